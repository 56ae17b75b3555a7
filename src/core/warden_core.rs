//! Core infrastructure built once per process.

use std::path::PathBuf;
use std::sync::Arc;

use super::platform_module::{provide_debug_menu_repository, provide_settings_repository};
use crate::config::Config;
use crate::data::{
    AuthDiskSource, Database, DatabaseError, FeatureFlagOverrideDiskSource, SettingsDiskSource,
};
use crate::platform::{
    BiometricsEncryptionManager, DebugMenuRepository, DispatcherManager,
    FileServerConfigRepository, LockedVaultSdkSource, ServerConfigRepository, SettingsRepository,
    UnsupportedBiometricsManager, VaultSdkSource,
};

/// Owns the database connection and every repository built on it.
pub struct WardenCore {
    /// Application configuration
    config: Config,
    /// Database connection (owned to keep connection alive)
    database: Database,
    auth_disk_source: AuthDiskSource,
    settings_repository: Arc<dyn SettingsRepository>,
    debug_menu_repository: Arc<dyn DebugMenuRepository>,
    server_config_repository: Arc<FileServerConfigRepository>,
}

impl WardenCore {
    /// Open the default database and build the repositories with the host
    /// collaborators this binary ships.
    pub fn open(config: Config, dispatcher_manager: &DispatcherManager) -> Result<Self, DatabaseError> {
        let database = Database::open_default()?;
        Self::with_collaborators(
            config,
            database,
            crate::util::server_config_path(),
            dispatcher_manager,
            Arc::new(UnsupportedBiometricsManager),
            Arc::new(LockedVaultSdkSource),
        )
    }

    /// Build the core from an already opened database and explicit
    /// collaborators.
    pub fn with_collaborators(
        config: Config,
        database: Database,
        server_config_path: PathBuf,
        dispatcher_manager: &DispatcherManager,
        biometrics_encryption_manager: Arc<dyn BiometricsEncryptionManager>,
        vault_sdk_source: Arc<dyn VaultSdkSource>,
    ) -> Result<Self, DatabaseError> {
        let settings_disk_source = SettingsDiskSource::new(database.connection());
        let auth_disk_source = AuthDiskSource::new(database.connection())?;
        let override_disk_source = FeatureFlagOverrideDiskSource::new(database.connection());
        let server_config_repository =
            Arc::new(FileServerConfigRepository::new(server_config_path));

        let settings_repository = provide_settings_repository(
            settings_disk_source,
            auth_disk_source.clone(),
            dispatcher_manager,
            biometrics_encryption_manager,
            vault_sdk_source,
        );
        let debug_menu_repository = provide_debug_menu_repository(
            override_disk_source,
            server_config_repository.clone() as Arc<dyn ServerConfigRepository>,
            config.debug_menu_enabled,
        );

        tracing::debug!(database = ?database, "Core initialized");

        Ok(Self {
            config,
            database,
            auth_disk_source,
            settings_repository,
            debug_menu_repository,
            server_config_repository,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Active user and remembered SSO organization
    pub fn auth_disk_source(&self) -> &AuthDiskSource {
        &self.auth_disk_source
    }

    pub fn settings_repository(&self) -> Arc<dyn SettingsRepository> {
        self.settings_repository.clone()
    }

    pub fn debug_menu_repository(&self) -> Arc<dyn DebugMenuRepository> {
        self.debug_menu_repository.clone()
    }

    pub fn server_config_repository(&self) -> Arc<FileServerConfigRepository> {
        self.server_config_repository.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FeatureFlag, ServerConfig, VaultTimeout};
    use serde_json::json;
    use tempfile::tempdir;

    fn build_core(config: Config, dir: &std::path::Path) -> WardenCore {
        WardenCore::with_collaborators(
            config,
            Database::open(dir.join("warden.db")).unwrap(),
            dir.join("server_config.json"),
            &DispatcherManager::try_current().unwrap(),
            Arc::new(UnsupportedBiometricsManager),
            Arc::new(LockedVaultSdkSource),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_repositories_share_the_database() {
        let dir = tempdir().unwrap();
        let core = build_core(Config::default(), dir.path());

        core.auth_disk_source()
            .store_active_user_id(Some("u1"))
            .unwrap();
        core.settings_repository()
            .set_vault_timeout(VaultTimeout::FiveMinutes)
            .unwrap();

        let settings = SettingsDiskSource::new(core.database().connection());
        assert_eq!(settings.vault_timeout_in_minutes("u1").unwrap(), Some(5));
    }

    #[tokio::test]
    async fn test_debug_menu_follows_config() {
        let dir = tempdir().unwrap();
        let config = Config {
            debug_menu_enabled: true,
            ..Config::default()
        };
        let core = build_core(config, dir.path());
        assert!(core.debug_menu_repository().is_debug_menu_enabled());

        let mut server = ServerConfig::default();
        server
            .feature_states
            .insert("import-logins-flow".to_string(), json!(true));
        core.server_config_repository().store(&server).unwrap();

        assert!(core
            .debug_menu_repository()
            .feature_flag(FeatureFlag::ImportLoginsFlow));
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let core = build_core(Config::default(), dir.path());
            core.auth_disk_source()
                .store_active_user_id(Some("u9"))
                .unwrap();
        }
        let core = build_core(Config::default(), dir.path());
        assert_eq!(core.auth_disk_source().active_user_id(), Some("u9".to_string()));
    }
}
