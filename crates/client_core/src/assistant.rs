//! Chat widget session: owns the transcript and gates the external text
//! generator to one request at a time.

use std::{
    ops::Deref,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use anyhow::Result;
use serde::Serialize;
use shared::{content::Profile, domain::Message};
use text_generation::{GenerateRequest, TextGenerator};
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't process that request right now.";
pub const FAILURE_REPLY: &str =
    "The assistant is currently taking a coffee break. Please try again in a moment.";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub system_instruction: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub thinking_budget: Option<u32>,
    pub welcome: Option<String>,
    pub empty_reply: String,
    pub failure_reply: String,
}

impl SessionConfig {
    pub fn for_profile(profile: &Profile) -> Self {
        let first_name = profile
            .name
            .split_whitespace()
            .next()
            .unwrap_or(profile.name.as_str());
        let system_instruction = format!(
            "You are an AI assistant for {name}'s portfolio website.\n\
             {name} is a world-class {title}.\n\
             Bio: {bio}\n\
             Your tone: Professional, elegant, concise, and helpful.\n\
             Answer questions about {first}'s expertise, approach, and how {first} can help businesses.\n\
             Keep responses short (under 3 sentences).\n\
             If you don't know something specific about {first}'s personal life, steer back to {first}'s professional marketing expertise.",
            name = profile.name,
            title = profile.title,
            bio = profile.bio,
            first = first_name,
        );
        Self {
            system_instruction,
            temperature: 0.7,
            max_output_tokens: 200,
            thinking_budget: Some(100),
            welcome: Some(format!(
                "Hi, I'm {first_name}'s virtual assistant. Ask me anything about {first_name}'s marketing work!"
            )),
            empty_reply: EMPTY_REPLY.to_string(),
            failure_reply: FAILURE_REPLY.to_string(),
        }
    }

    fn request(&self, prompt: &str) -> GenerateRequest {
        GenerateRequest {
            system_instruction: self.system_instruction.clone(),
            prompt: prompt.to_string(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            thinking_budget: self.thinking_budget,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Answered,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Blank,
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Ignored(IgnoreReason),
    Answered,
    /// The generator succeeded but returned no text.
    EmptyReply,
    Failed,
}

#[derive(Default)]
struct SessionInner {
    transcript: Vec<Message>,
    state: RequestState,
}

pub struct AssistantSession {
    generator: Arc<dyn TextGenerator>,
    config: SessionConfig,
    inner: Mutex<SessionInner>,
}

/// Puts the session back to idle if the request is dropped before it
/// completes. Created as soon as a prompt is accepted.
struct PendingGuard<S: Deref<Target = AssistantSession>> {
    session: S,
    armed: bool,
}

impl<S: Deref<Target = AssistantSession>> PendingGuard<S> {
    fn new(session: S) -> Self {
        Self {
            session,
            armed: true,
        }
    }
}

impl<S: Deref<Target = AssistantSession>> Drop for PendingGuard<S> {
    fn drop(&mut self) {
        if self.armed {
            let mut inner = self.session.lock();
            if inner.state == RequestState::Pending {
                warn!("assistant request abandoned before completion");
                inner.state = RequestState::Idle;
            }
        }
    }
}

impl AssistantSession {
    pub fn new(generator: Arc<dyn TextGenerator>, config: SessionConfig) -> Arc<Self> {
        let mut inner = SessionInner::default();
        if let Some(welcome) = &config.welcome {
            inner.transcript.push(Message::assistant(welcome.clone()));
        }
        Arc::new(Self {
            generator,
            config,
            inner: Mutex::new(inner),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> RequestState {
        self.lock().state
    }

    pub fn is_pending(&self) -> bool {
        self.state() == RequestState::Pending
    }

    pub fn transcript(&self) -> Vec<Message> {
        self.lock().transcript.clone()
    }

    pub fn transcript_len(&self) -> usize {
        self.lock().transcript.len()
    }

    /// Sends a prompt and waits for the reply to land in the transcript.
    pub async fn send(&self, prompt: &str) -> SendOutcome {
        match self.begin(prompt) {
            Ok(request) => Self::complete(PendingGuard::new(self), request).await,
            Err(reason) => SendOutcome::Ignored(reason),
        }
    }

    /// Accepts the prompt right away and finishes the request on a spawned
    /// task, so the caller never waits on the network. Needs a tokio runtime.
    pub fn submit(
        self: &Arc<Self>,
        prompt: &str,
    ) -> Result<JoinHandle<SendOutcome>, IgnoreReason> {
        let request = self.begin(prompt)?;
        let guard = PendingGuard::new(Arc::clone(self));
        Ok(tokio::spawn(Self::complete(guard, request)))
    }

    fn begin(&self, prompt: &str) -> Result<GenerateRequest, IgnoreReason> {
        if prompt.trim().is_empty() {
            return Err(IgnoreReason::Blank);
        }
        let mut inner = self.lock();
        if inner.state == RequestState::Pending {
            return Err(IgnoreReason::InFlight);
        }
        inner.transcript.push(Message::user(prompt));
        inner.state = RequestState::Pending;
        info!(chars = prompt.chars().count(), "assistant prompt accepted");
        Ok(self.config.request(prompt))
    }

    async fn complete<S>(mut guard: PendingGuard<S>, request: GenerateRequest) -> SendOutcome
    where
        S: Deref<Target = AssistantSession>,
    {
        let result = guard.session.generator.generate(request).await;
        guard.armed = false;
        guard.session.finish(result)
    }

    fn finish(&self, result: Result<String>) -> SendOutcome {
        let (reply, state, outcome) = match result {
            Ok(text) if text.is_empty() => (
                self.config.empty_reply.clone(),
                RequestState::Answered,
                SendOutcome::EmptyReply,
            ),
            Ok(text) => (text, RequestState::Answered, SendOutcome::Answered),
            Err(err) => {
                warn!(error = ?err, "assistant request failed");
                (
                    self.config.failure_reply.clone(),
                    RequestState::Failed,
                    SendOutcome::Failed,
                )
            }
        };
        let mut inner = self.lock();
        inner.transcript.push(Message::assistant(reply));
        inner.state = state;
        outcome
    }
}

#[cfg(test)]
#[path = "tests/assistant_tests.rs"]
mod tests;
