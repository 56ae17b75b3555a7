//! Platform repositories and the collaborators they are built from

mod biometrics;
mod debug_menu_repository;
mod dispatcher;
mod feature_flag;
mod sdk;
mod server_config;
mod settings_model;
mod settings_repository;

pub use biometrics::{BiometricsEncryptionManager, BiometricsError, UnsupportedBiometricsManager};
pub use debug_menu_repository::{DebugMenuRepository, DebugMenuRepositoryImpl};
pub use dispatcher::DispatcherManager;
pub use feature_flag::FeatureFlag;
pub use sdk::{LockedVaultSdkSource, SdkError, VaultSdkSource};
pub use server_config::{FileServerConfigRepository, ServerConfig, ServerConfigRepository};
pub use settings_model::{AppTheme, ClipboardClearFrequency, VaultTimeout, VaultTimeoutAction};
pub use settings_repository::{SettingsError, SettingsRepository, SettingsRepositoryImpl};
