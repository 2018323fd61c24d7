use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, BodyStyle, ElementSnapshot, Geometry, Page};
use shared::{
    content::Catalog,
    domain::{Role, StepId, WorkItemId},
};
use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};

/// Plays the portfolio page headlessly and prints every changed frame as a
/// JSON line.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Stop after this much virtual time.
    #[arg(long, default_value_t = 6_000)]
    duration_ms: u64,
    /// Top of the "Services" heading relative to the viewport.
    #[arg(long, default_value_t = 700.0)]
    scroll_top: f64,
    #[arg(long, default_value_t = 900.0)]
    viewport_height: f64,
    /// Work item to open once content is visible.
    #[arg(long)]
    select: Option<String>,
    /// Process step to expand once content is visible.
    #[arg(long)]
    toggle: Vec<String>,
    #[arg(long)]
    ask: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())?;
    let catalog = Catalog::default();
    catalog.validate().context("built-in catalog is invalid")?;
    let generator = settings.text_generator()?;

    let mut page = Page::new(&settings, catalog, generator);
    let mut body = BodyStyle::with_overflow("auto");
    let started = Instant::now();
    page.mount(0);

    let mut last = None;
    let mut inputs_applied = false;
    let mut pending_reply = None;

    loop {
        let now = elapsed_ms(started);
        page.advance_to(now);

        if page.content_visible() && !inputs_applied {
            inputs_applied = true;
            page.on_scroll(
                args.viewport_height - args.scroll_top,
                Geometry {
                    top: args.scroll_top,
                    viewport_height: args.viewport_height,
                },
            );
            page.on_pointer_move(0.0, 0.0, &ElementSnapshot::new("body"));
            for step in &args.toggle {
                page.toggle_step(&StepId::from(step.as_str()));
            }
            if let Some(id) = &args.select {
                page.open_work(WorkItemId::from(id.as_str()), &mut body);
            }
            if let Some(prompt) = &args.ask {
                match page.ask(prompt) {
                    Ok(handle) => pending_reply = Some(handle),
                    Err(reason) => warn!(?reason, "prompt ignored"),
                }
            }
        }

        let frame = page.frame();
        if last.as_ref() != Some(&frame) {
            println!("{}", serde_json::to_string(&frame)?);
            last = Some(frame);
        }

        let Some(deadline) = page
            .next_deadline()
            .filter(|deadline| *deadline <= args.duration_ms)
        else {
            break;
        };
        sleep_until(started + Duration::from_millis(deadline)).await;
    }

    if let Some(handle) = pending_reply {
        let outcome = handle.await.context("assistant task panicked")?;
        info!(?outcome, "assistant request finished");
        for message in page.assistant().transcript() {
            let who = match message.role {
                Role::User => "you",
                Role::Assistant => "assistant",
            };
            println!("{who}: {}", message.text);
        }
    }

    page.unmount(&mut body);
    info!(overflow = %body.overflow, "preview finished");
    Ok(())
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
