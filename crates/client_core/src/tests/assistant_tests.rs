use super::*;
use anyhow::anyhow;
use async_trait::async_trait;
use shared::{content::Catalog, domain::Role};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{oneshot, Mutex as AsyncMutex};

struct ScriptedGenerator {
    reply: Result<String, String>,
    calls: AtomicUsize,
    requests: std::sync::Mutex<Vec<GenerateRequest>>,
}

impl ScriptedGenerator {
    fn ok(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            requests: std::sync::Mutex::new(Vec::new()),
        })
    }

    fn failing(err: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err.to_string()),
            calls: AtomicUsize::new(0),
            requests: std::sync::Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("requests").push(request);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(err) => Err(anyhow!(err.clone())),
        }
    }
}

/// Holds every request open until the test releases it.
struct GatedGenerator {
    release: AsyncMutex<Option<oneshot::Receiver<String>>>,
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for GatedGenerator {
    async fn generate(&self, _request: GenerateRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let rx = self
            .release
            .lock()
            .await
            .take()
            .ok_or_else(|| anyhow!("gate already used"))?;
        Ok(rx.await?)
    }
}

fn config() -> SessionConfig {
    SessionConfig::for_profile(&Catalog::default().profile)
}

fn session_with(generator: Arc<dyn TextGenerator>) -> Arc<AssistantSession> {
    AssistantSession::new(generator, config())
}

#[tokio::test]
async fn transcript_starts_with_welcome_line() {
    let session = session_with(ScriptedGenerator::ok("x"));
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].role, Role::Assistant);
    assert!(transcript[0].text.starts_with("Hi, I'm Megan's virtual assistant"));
    assert_eq!(session.state(), RequestState::Idle);
}

#[tokio::test]
async fn blank_prompt_changes_nothing_and_calls_nothing() {
    let generator = ScriptedGenerator::ok("x");
    let session = session_with(generator.clone());

    assert_eq!(
        session.send("").await,
        SendOutcome::Ignored(IgnoreReason::Blank)
    );
    assert_eq!(
        session.send("   \n").await,
        SendOutcome::Ignored(IgnoreReason::Blank)
    );
    assert_eq!(session.transcript_len(), 1);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn successful_reply_is_appended_after_the_prompt() {
    let generator = ScriptedGenerator::ok("Brand strategy and growth.");
    let session = session_with(generator.clone());

    assert_eq!(
        session.send("What does Megan do?").await,
        SendOutcome::Answered
    );

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].role, Role::User);
    assert_eq!(transcript[1].text, "What does Megan do?");
    assert_eq!(transcript[2].role, Role::Assistant);
    assert_eq!(transcript[2].text, "Brand strategy and growth.");
    assert_eq!(session.state(), RequestState::Answered);

    let requests = generator.requests.lock().expect("requests");
    assert_eq!(requests[0].prompt, "What does Megan do?");
    assert!(requests[0].system_instruction.contains("Megan Perpich"));
    assert_eq!(requests[0].max_output_tokens, 200);
    assert_eq!(requests[0].thinking_budget, Some(100));
}

#[tokio::test]
async fn empty_reply_uses_fallback_text() {
    let session = session_with(ScriptedGenerator::ok(""));

    assert_eq!(session.send("hello").await, SendOutcome::EmptyReply);
    let transcript = session.transcript();
    assert_eq!(transcript.last().map(|m| m.text.as_str()), Some(EMPTY_REPLY));
    assert!(!session.is_pending());
}

#[tokio::test]
async fn whitespace_reply_is_kept_as_is() {
    let session = session_with(ScriptedGenerator::ok("  "));

    assert_eq!(session.send("hello").await, SendOutcome::Answered);
    let transcript = session.transcript();
    assert_eq!(transcript.last().map(|m| m.text.as_str()), Some("  "));
}

#[tokio::test]
async fn failure_appends_exactly_one_apology_and_clears_pending() {
    let session = session_with(ScriptedGenerator::failing("quota exceeded: key=secret"));

    assert_eq!(session.send("hello").await, SendOutcome::Failed);

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2].text, FAILURE_REPLY);
    assert!(transcript.iter().all(|m| !m.text.contains("quota")));
    assert_eq!(session.state(), RequestState::Failed);

    assert_eq!(session.send("again").await, SendOutcome::Failed);
    assert_eq!(session.transcript_len(), 5);
}

#[tokio::test]
async fn second_prompt_while_in_flight_is_a_no_op() {
    let (release_tx, release_rx) = oneshot::channel();
    let generator = Arc::new(GatedGenerator {
        release: AsyncMutex::new(Some(release_rx)),
        calls: AtomicUsize::new(0),
    });
    let session = session_with(generator.clone());

    let handle = session.submit("first").expect("accepted");
    assert!(session.is_pending());
    assert_eq!(session.transcript_len(), 2);

    assert_eq!(
        session.send("second").await,
        SendOutcome::Ignored(IgnoreReason::InFlight)
    );
    assert!(matches!(
        session.submit("third"),
        Err(IgnoreReason::InFlight)
    ));
    assert_eq!(session.transcript_len(), 2);

    release_tx.send("done".to_string()).expect("release");
    assert_eq!(handle.await.expect("join"), SendOutcome::Answered);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert!(!session.is_pending());
    assert_eq!(session.transcript_len(), 3);
}

#[tokio::test]
async fn dropped_request_does_not_leave_session_pending() {
    let (_release_tx, release_rx) = oneshot::channel::<String>();
    let generator = Arc::new(GatedGenerator {
        release: AsyncMutex::new(Some(release_rx)),
        calls: AtomicUsize::new(0),
    });
    let session = session_with(generator);

    let handle = session.submit("hello").expect("accepted");
    tokio::task::yield_now().await;
    handle.abort();
    let _ = handle.await;

    assert_eq!(session.state(), RequestState::Idle);
    assert!(session.submit("retry").is_ok());
}

#[tokio::test]
async fn request_outlives_the_caller_handle() {
    let session = session_with(ScriptedGenerator::ok("still here"));
    let handle = session.submit("hello").expect("accepted");
    let weak = Arc::downgrade(&session);
    drop(session);

    assert_eq!(handle.await.expect("join"), SendOutcome::Answered);
    assert!(weak.upgrade().is_none());
}
