//! Settings repository
//!
//! App-wide settings plus the active user's vault timeout and biometric
//! unlock state. Reads never fail: storage errors are logged and the
//! default is returned. Writes report errors to the caller.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

use super::biometrics::{BiometricsEncryptionManager, BiometricsError};
use super::dispatcher::DispatcherManager;
use super::sdk::{SdkError, VaultSdkSource};
use super::settings_model::{AppTheme, ClipboardClearFrequency, VaultTimeout, VaultTimeoutAction};
use crate::data::{AuthDiskSource, DatabaseError, SettingsDiskSource};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no active user")]
    NoActiveUser,
    #[error("storage error: {0}")]
    Storage(#[from] DatabaseError),
    #[error(transparent)]
    Biometrics(#[from] BiometricsError),
    #[error(transparent)]
    Sdk(#[from] SdkError),
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    fn app_theme(&self) -> AppTheme;
    fn set_app_theme(&self, theme: AppTheme) -> Result<(), SettingsError>;
    fn app_theme_receiver(&self) -> watch::Receiver<AppTheme>;

    fn is_screen_capture_allowed(&self) -> bool;
    fn set_screen_capture_allowed(&self, allowed: bool) -> Result<(), SettingsError>;

    fn clipboard_clear_frequency(&self) -> ClipboardClearFrequency;
    fn set_clipboard_clear_frequency(
        &self,
        frequency: ClipboardClearFrequency,
    ) -> Result<(), SettingsError>;

    /// Vault timeout of the active user; `Never` without one
    fn vault_timeout(&self) -> VaultTimeout;
    fn set_vault_timeout(&self, timeout: VaultTimeout) -> Result<(), SettingsError>;
    /// Follows the active user: switching accounts publishes their timeout
    fn vault_timeout_receiver(&self) -> watch::Receiver<VaultTimeout>;

    fn vault_timeout_action(&self) -> VaultTimeoutAction;
    fn set_vault_timeout_action(&self, action: VaultTimeoutAction) -> Result<(), SettingsError>;

    fn is_unlock_with_biometrics_enabled(&self) -> bool;
    /// Store the active user's key for biometric unlock
    async fn setup_biometrics_key(&self) -> Result<(), SettingsError>;
    fn clear_biometrics_key(&self) -> Result<(), SettingsError>;

    /// Forget everything stored for `user_id`: timeout settings and biometric unlock
    fn clear_user_settings(&self, user_id: &str) -> Result<(), SettingsError>;
}

pub struct SettingsRepositoryImpl {
    settings_disk_source: SettingsDiskSource,
    auth_disk_source: AuthDiskSource,
    biometrics_encryption_manager: Arc<dyn BiometricsEncryptionManager>,
    vault_sdk_source: Arc<dyn VaultSdkSource>,
    app_theme: watch::Sender<AppTheme>,
    vault_timeout: Arc<watch::Sender<VaultTimeout>>,
}

/// Read the stored timeout for `user_id`, logging storage failures
fn read_vault_timeout(settings: &SettingsDiskSource, user_id: Option<&str>) -> VaultTimeout {
    let Some(user_id) = user_id else {
        return VaultTimeout::Never;
    };
    match settings.vault_timeout_in_minutes(user_id) {
        Ok(minutes) => VaultTimeout::from_minutes(minutes),
        Err(e) => {
            tracing::warn!(user_id, error = %e, "Failed to read vault timeout");
            VaultTimeout::Never
        }
    }
}

impl SettingsRepositoryImpl {
    pub fn new(
        settings_disk_source: SettingsDiskSource,
        auth_disk_source: AuthDiskSource,
        dispatcher_manager: &DispatcherManager,
        biometrics_encryption_manager: Arc<dyn BiometricsEncryptionManager>,
        vault_sdk_source: Arc<dyn VaultSdkSource>,
    ) -> Self {
        let theme = match settings_disk_source.app_theme() {
            Ok(stored) => AppTheme::from_stored_value(stored.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read app theme");
                AppTheme::Default
            }
        };
        let (app_theme, _) = watch::channel(theme);

        let mut active_user = auth_disk_source.active_user_id_receiver();
        let initial = read_vault_timeout(
            &settings_disk_source,
            active_user.borrow_and_update().as_deref(),
        );
        let vault_timeout = Arc::new(watch::channel(initial).0);

        let settings = settings_disk_source.clone();
        let timeout_tx = vault_timeout.clone();
        dispatcher_manager.spawn(async move {
            while active_user.changed().await.is_ok() {
                let user_id = active_user.borrow_and_update().clone();
                let timeout = read_vault_timeout(&settings, user_id.as_deref());
                tracing::debug!(?user_id, %timeout, "Active user changed");
                timeout_tx.send_replace(timeout);
            }
        });

        Self {
            settings_disk_source,
            auth_disk_source,
            biometrics_encryption_manager,
            vault_sdk_source,
            app_theme,
            vault_timeout,
        }
    }

    fn require_active_user(&self) -> Result<String, SettingsError> {
        self.auth_disk_source
            .active_user_id()
            .ok_or(SettingsError::NoActiveUser)
    }
}

#[async_trait]
impl SettingsRepository for SettingsRepositoryImpl {
    fn app_theme(&self) -> AppTheme {
        *self.app_theme.borrow()
    }

    fn set_app_theme(&self, theme: AppTheme) -> Result<(), SettingsError> {
        self.settings_disk_source
            .store_app_theme(theme.stored_value())?;
        self.app_theme.send_replace(theme);
        Ok(())
    }

    fn app_theme_receiver(&self) -> watch::Receiver<AppTheme> {
        self.app_theme.subscribe()
    }

    fn is_screen_capture_allowed(&self) -> bool {
        self.settings_disk_source
            .screen_capture_allowed()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read screen capture setting");
                None
            })
            .unwrap_or(false)
    }

    fn set_screen_capture_allowed(&self, allowed: bool) -> Result<(), SettingsError> {
        self.settings_disk_source
            .store_screen_capture_allowed(Some(allowed))?;
        Ok(())
    }

    fn clipboard_clear_frequency(&self) -> ClipboardClearFrequency {
        let seconds = self
            .settings_disk_source
            .clipboard_clear_seconds()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read clipboard clear frequency");
                None
            });
        ClipboardClearFrequency::from_seconds(seconds)
    }

    fn set_clipboard_clear_frequency(
        &self,
        frequency: ClipboardClearFrequency,
    ) -> Result<(), SettingsError> {
        self.settings_disk_source
            .store_clipboard_clear_seconds(frequency.seconds())?;
        Ok(())
    }

    fn vault_timeout(&self) -> VaultTimeout {
        read_vault_timeout(
            &self.settings_disk_source,
            self.auth_disk_source.active_user_id().as_deref(),
        )
    }

    fn set_vault_timeout(&self, timeout: VaultTimeout) -> Result<(), SettingsError> {
        let user_id = self.require_active_user()?;
        self.settings_disk_source
            .store_vault_timeout_in_minutes(&user_id, timeout.minutes())?;
        self.vault_timeout.send_replace(timeout);
        Ok(())
    }

    fn vault_timeout_receiver(&self) -> watch::Receiver<VaultTimeout> {
        self.vault_timeout.subscribe()
    }

    fn vault_timeout_action(&self) -> VaultTimeoutAction {
        let Some(user_id) = self.auth_disk_source.active_user_id() else {
            return VaultTimeoutAction::default();
        };
        match self.settings_disk_source.vault_timeout_action(&user_id) {
            Ok(Some(stored)) => stored.parse().unwrap_or_else(|e: String| {
                tracing::warn!(user_id, error = %e, "Unknown vault timeout action");
                VaultTimeoutAction::default()
            }),
            Ok(None) => VaultTimeoutAction::default(),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Failed to read vault timeout action");
                VaultTimeoutAction::default()
            }
        }
    }

    fn set_vault_timeout_action(&self, action: VaultTimeoutAction) -> Result<(), SettingsError> {
        let user_id = self.require_active_user()?;
        self.settings_disk_source
            .store_vault_timeout_action(&user_id, Some(action.as_str()))?;
        Ok(())
    }

    fn is_unlock_with_biometrics_enabled(&self) -> bool {
        let Some(user_id) = self.auth_disk_source.active_user_id() else {
            return false;
        };
        let has_key = match self.auth_disk_source.user_biometric_unlock_key(&user_id) {
            Ok(key) => key.is_some(),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Failed to read biometric unlock key");
                false
            }
        };
        has_key
            && self
                .biometrics_encryption_manager
                .is_biometric_integrity_valid(&user_id)
    }

    async fn setup_biometrics_key(&self) -> Result<(), SettingsError> {
        let user_id = self.require_active_user()?;
        let key = self.vault_sdk_source.user_encryption_key(&user_id).await?;
        self.biometrics_encryption_manager.create_cipher(&user_id)?;
        self.auth_disk_source
            .store_user_biometric_unlock_key(&user_id, Some(&key))?;
        tracing::info!(user_id, "Biometric unlock enabled");
        Ok(())
    }

    fn clear_biometrics_key(&self) -> Result<(), SettingsError> {
        let user_id = self.require_active_user()?;
        self.auth_disk_source
            .store_user_biometric_unlock_key(&user_id, None)?;
        self.biometrics_encryption_manager.clear_biometrics(&user_id);
        Ok(())
    }

    fn clear_user_settings(&self, user_id: &str) -> Result<(), SettingsError> {
        self.settings_disk_source.clear_user(user_id)?;
        self.auth_disk_source
            .store_user_biometric_unlock_key(user_id, None)?;
        self.biometrics_encryption_manager.clear_biometrics(user_id);
        if self.auth_disk_source.active_user_id().as_deref() == Some(user_id) {
            self.vault_timeout
                .send_replace(read_vault_timeout(&self.settings_disk_source, Some(user_id)));
        }
        tracing::info!(user_id, "User settings cleared");
        Ok(())
    }
}
