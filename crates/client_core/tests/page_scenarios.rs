use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use client_core::{
    config::parse_settings, BodyStyle, ElementSnapshot, Geometry, IntroPhase, Page, RequestState,
    SendOutcome,
};
use shared::{
    content::Catalog,
    domain::{Role, StepId, WorkItemId},
};
use text_generation::{GenerateRequest, TextGenerator};

struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        Ok(format!("You asked: {}", request.prompt))
    }
}

fn small_page() -> Page {
    let settings = parse_settings(
        r#"
        greetings = ["Hi", "Hola", "Bye"]
        titles = ["A", "BB"]
        "#,
    )
    .expect("settings");
    Page::new(&settings, Catalog::default(), Arc::new(EchoGenerator))
}

/// Drives the page the way a host loop does: sleep to the next deadline,
/// then advance.
fn run_until(page: &mut Page, end: u64) -> Vec<(u64, String)> {
    let mut seen = Vec::new();
    let mut last = page.frame().typed_title;
    while let Some(deadline) = page.next_deadline().filter(|d| *d <= end) {
        page.advance_to(deadline);
        let typed = page.frame().typed_title;
        if typed != last {
            seen.push((deadline, typed.clone()));
            last = typed;
        }
    }
    page.advance_to(end);
    seen
}

#[test]
fn intro_then_typewriter_timeline() {
    let mut page = small_page();
    page.mount(0);

    let content_at = 1_350;
    let seen = run_until(&mut page, content_at + 4_825);
    let expected: Vec<(u64, String)> = [
        (150, "A"),
        (1_800, ""),
        (2_375, "B"),
        (2_525, "BB"),
        (4_175, "B"),
        (4_250, ""),
        (4_825, "A"),
    ]
    .into_iter()
    .map(|(t, text)| (content_at + t, text.to_string()))
    .collect();

    assert_eq!(seen, expected);
    assert_eq!(page.intro_phase(), IntroPhase::OverlayRemoved);
    assert_eq!(page.frame().greeting, None);
}

#[test]
fn greetings_cycle_before_content_appears() {
    let mut page = small_page();
    page.mount(0);

    let mut greetings = vec![page.frame().greeting];
    for t in [200, 400] {
        page.advance_to(t);
        greetings.push(page.frame().greeting);
    }
    assert_eq!(
        greetings,
        vec![Some("Hi".into()), Some("Hola".into()), Some("Bye".into())]
    );
    assert!(!page.frame().content_visible);
    assert!(!page.frame().overlay_slid);
}

#[test]
fn interactions_before_the_intro_still_update_state() {
    let mut page = small_page();
    page.mount(0);
    let mut body = BodyStyle::with_overflow("scroll");

    assert!(page.toggle_step(&StepId::from("01")));
    page.open_work(WorkItemId::from("3"), &mut body);
    page.on_pointer_move(10.0, 10.0, &ElementSnapshot::new("div").with_cursor("pointer"));
    page.on_scroll(
        0.0,
        Geometry {
            top: 800.0,
            viewport_height: 1_000.0,
        },
    );

    let frame = page.frame();
    assert_eq!(frame.open_steps, vec![StepId::from("01")]);
    assert_eq!(frame.selected_work.as_deref(), Some("Content Ecosystem"));
    assert_eq!(frame.cursor.opacity, 0.0);
    assert!(!frame.header_condensed);
    assert!(frame.heading.iter().any(|glyph| glyph.revealed));
    assert!(!frame.heading.iter().all(|glyph| glyph.revealed));
    assert_eq!(body.overflow, "hidden");

    page.unmount(&mut body);
    assert_eq!(body.overflow, "scroll");
}

#[tokio::test]
async fn assistant_round_trip_through_the_page() {
    let page = small_page();

    let handle = page.ask("What is your process?").expect("accepted");
    assert!(page.ask("again").is_err());
    assert_eq!(handle.await.expect("join"), SendOutcome::Answered);

    let transcript = page.assistant().transcript();
    let last = transcript.last().expect("reply");
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.text, "You asked: What is your process?");
    assert_eq!(page.frame().assistant, RequestState::Answered);
}
