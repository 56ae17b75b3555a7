//! Composition root shared by the CLI and the interactive screens.
//!
//! `WardenCore` owns the database, the disk sources, and the platform
//! repositories. Consumers receive explicit `Arc` handles from it.

mod platform_module;
mod warden_core;

pub use platform_module::{provide_debug_menu_repository, provide_settings_repository};
pub use warden_core::WardenCore;
