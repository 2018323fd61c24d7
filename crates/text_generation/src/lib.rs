//! Boundary to the external text-generation service used by the assistant widget.
//!
//! Each call is a fresh completion: a fixed system framing plus the current
//! prompt. The service keeps no conversation memory.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod gemini;

pub use gemini::{GeminiConfig, GeminiGenerator, GenerationError, DEFAULT_GEMINI_BASE_URL};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_budget: Option<u32>,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the generated text. An empty string is a valid (if useless)
    /// answer; callers decide how to present it.
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}

/// Stand-in used when no credentials are configured. Every call fails, so
/// the assistant degrades to its apology message.
pub struct MissingTextGenerator;

#[async_trait]
impl TextGenerator for MissingTextGenerator {
    async fn generate(&self, _request: GenerateRequest) -> Result<String> {
        Err(anyhow!("text generation backend is unavailable"))
    }
}
