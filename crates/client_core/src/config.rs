use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use serde::Deserialize;
use text_generation::{
    GeminiConfig, GeminiGenerator, MissingTextGenerator, TextGenerator, DEFAULT_GEMINI_BASE_URL,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{cursor::DEFAULT_INDICATOR_SIZE, intro::IntroTimings, typewriter::TypewriterTimings};

pub const DEFAULT_SETTINGS_FILE: &str = "portfolio.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub thinking_budget: Option<u32>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-3-flash-preview".into(),
            base_url: DEFAULT_GEMINI_BASE_URL.into(),
            temperature: 0.7,
            max_output_tokens: 200,
            thinking_budget: Some(100),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub greetings: Vec<String>,
    pub titles: Vec<String>,
    pub reveal_heading: String,
    pub intro: IntroTimings,
    pub typewriter: TypewriterTimings,
    pub cursor_size: f64,
    pub assistant: AssistantSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            greetings: [
                "Hello",
                "Hola",
                "안녕하세요",
                "Hallo",
                "こんにちは",
                "你好",
                "Ciao",
                "నమస్కారం",
                "Hello",
            ]
            .map(String::from)
            .to_vec(),
            titles: [
                "Marketer",
                "Problem solver",
                "Artist",
                "Entrepreneur",
                "Event planner",
                "Project manager",
            ]
            .map(String::from)
            .to_vec(),
            reveal_heading: "Services".into(),
            intro: IntroTimings::default(),
            typewriter: TypewriterTimings::default(),
            cursor_size: DEFAULT_INDICATOR_SIZE,
            assistant: AssistantSettings::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("typewriter timings must be non-zero")]
    ZeroTypewriterDelay,
    #[error("intro step delay must be non-zero")]
    ZeroIntroStep,
    #[error("cursor size must be a positive number, got {0}")]
    InvalidCursorSize(f64),
    #[error("assistant temperature must be within 0..=2, got {0}")]
    InvalidTemperature(f32),
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let t = &self.typewriter;
        if [t.type_ms, t.hold_ms, t.delete_ms, t.next_word_ms].contains(&0) {
            return Err(SettingsError::ZeroTypewriterDelay);
        }
        if self.intro.step_ms == 0 {
            return Err(SettingsError::ZeroIntroStep);
        }
        if !(self.cursor_size.is_finite() && self.cursor_size > 0.0) {
            return Err(SettingsError::InvalidCursorSize(self.cursor_size));
        }
        if !(0.0..=2.0).contains(&self.assistant.temperature) {
            return Err(SettingsError::InvalidTemperature(
                self.assistant.temperature,
            ));
        }
        Ok(())
    }

    /// Falls back to a generator that always fails when no key is set, so
    /// the widget answers with its apology line instead of erroring.
    pub fn text_generator(&self) -> anyhow::Result<Arc<dyn TextGenerator>> {
        let Some(api_key) = self
            .assistant
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
        else {
            warn!("no assistant API key configured; assistant replies will fail closed");
            return Ok(Arc::new(MissingTextGenerator));
        };
        let config = GeminiConfig::new(api_key, &self.assistant.model, &self.assistant.base_url)
            .context("invalid assistant settings")?;
        info!(model = %config.model, "assistant backend configured");
        Ok(Arc::new(GeminiGenerator::new(config)))
    }
}

/// Defaults, then the settings file, then environment overrides.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

    let mut settings = match fs::read_to_string(&path) {
        Ok(raw) => parse_settings(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings.validate()?;
    Ok(settings)
}

pub fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str(raw)?)
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("API_KEY") {
        settings.assistant.api_key = Some(v);
    }
    if let Some(v) = lookup("GEMINI_API_KEY") {
        settings.assistant.api_key = Some(v);
    }
    if let Some(v) = lookup("APP__ASSISTANT_API_KEY") {
        settings.assistant.api_key = Some(v);
    }

    if let Some(v) = lookup("APP__ASSISTANT_MODEL") {
        settings.assistant.model = v;
    }

    if let Some(v) = lookup("APP__ASSISTANT_BASE_URL") {
        settings.assistant.base_url = v;
    }

    if let Some(v) = lookup("APP__ASSISTANT_TEMPERATURE") {
        if let Ok(parsed) = v.parse::<f32>() {
            settings.assistant.temperature = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
