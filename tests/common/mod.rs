//! Shared test utilities
//!
//! - Temporary data directories and a core built on them
//! - TUI terminal testing helpers

pub mod fixtures;
pub mod terminal;
