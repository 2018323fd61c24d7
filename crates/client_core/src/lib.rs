//! Interaction state engine for the portfolio page.
//!
//! Each component owns its state and, where it is timed, its own
//! [`scheduler::TimerQueue`]. Hosts feed events in (`advance_to`, scroll,
//! pointer, clicks, prompts) and read a [`page::Frame`] back out.

pub mod accordion;
pub mod assistant;
pub mod config;
pub mod cursor;
pub mod gallery;
pub mod intro;
pub mod navigation;
pub mod page;
pub mod reveal;
pub mod scheduler;
pub mod typewriter;

pub use accordion::AccordionSet;
pub use assistant::{AssistantSession, IgnoreReason, RequestState, SendOutcome, SessionConfig};
pub use config::{load_settings, Settings};
pub use cursor::{CursorFollower, ElementSnapshot, PointerTarget};
pub use gallery::{BodyStyle, ScrollLock, WorkGallery};
pub use intro::{IntroPhase, IntroSequencer, IntroTimings};
pub use page::{Frame, Page};
pub use reveal::{Geometry, ScrollReveal};
pub use scheduler::{Millis, TimerHandle, TimerQueue};
pub use typewriter::{Typewriter, TypewriterTimings};
