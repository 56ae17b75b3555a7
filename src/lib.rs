pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod nav;
pub mod network;
pub mod platform;
pub mod ui;
pub mod util;
pub mod vault;

pub use config::Config;
pub use core::WardenCore;
pub use data::{AuthDiskSource, Database, DatabaseError, SettingsDiskSource};
pub use nav::{
    ArgBundle, EnterpriseSignOnArgs, NavError, NavOptions, Navigator, RoutePattern,
    VaultAddEditArgs, VaultAddEditMode,
};
pub use platform::{DebugMenuRepository, FeatureFlag, SettingsRepository};
pub use vault::CipherType;
