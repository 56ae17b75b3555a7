//! Provider functions for the platform repositories.
//!
//! Each function builds one repository from collaborators the caller has
//! already constructed. `WardenCore` calls them once at startup.

use std::sync::Arc;

use crate::data::{AuthDiskSource, FeatureFlagOverrideDiskSource, SettingsDiskSource};
use crate::platform::{
    BiometricsEncryptionManager, DebugMenuRepository, DebugMenuRepositoryImpl, DispatcherManager,
    ServerConfigRepository, SettingsRepository, SettingsRepositoryImpl, VaultSdkSource,
};

pub fn provide_settings_repository(
    settings_disk_source: SettingsDiskSource,
    auth_disk_source: AuthDiskSource,
    dispatcher_manager: &DispatcherManager,
    biometrics_encryption_manager: Arc<dyn BiometricsEncryptionManager>,
    vault_sdk_source: Arc<dyn VaultSdkSource>,
) -> Arc<dyn SettingsRepository> {
    Arc::new(SettingsRepositoryImpl::new(
        settings_disk_source,
        auth_disk_source,
        dispatcher_manager,
        biometrics_encryption_manager,
        vault_sdk_source,
    ))
}

pub fn provide_debug_menu_repository(
    feature_flag_override_disk_source: FeatureFlagOverrideDiskSource,
    server_config_repository: Arc<dyn ServerConfigRepository>,
    is_debug_menu_enabled: bool,
) -> Arc<dyn DebugMenuRepository> {
    Arc::new(DebugMenuRepositoryImpl::new(
        feature_flag_override_disk_source,
        server_config_repository,
        is_debug_menu_enabled,
    ))
}
