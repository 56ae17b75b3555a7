//! Data persistence layer
//!
//! SQLite-backed key-value tables behind one disk source per concern.

mod auth_source;
mod database;
mod flag_override_source;
mod key_value;
mod migrations;
mod settings_source;

pub use auth_source::AuthDiskSource;
pub use database::{Database, DatabaseError};
pub use flag_override_source::FeatureFlagOverrideDiskSource;
pub use key_value::{KeyValueStore, KeyValueTable};
pub use settings_source::SettingsDiskSource;
