//! Domain types and read-only site content shared by the engine and its drivers.

pub mod content;
pub mod domain;
pub mod error;
