//! Integration tests for the platform repositories
//!
//! A core is built on a temporary data directory, written through its
//! repositories, then reopened to check what was persisted.

use std::time::Duration;

use serde_json::json;
use warden::platform::{
    AppTheme, ClipboardClearFrequency, FeatureFlag, ServerConfig, SettingsError, VaultTimeout,
    VaultTimeoutAction,
};
use warden::Config;

use super::common::fixtures::TestDataDir;

#[tokio::test]
async fn test_device_settings_survive_reopen() {
    let data = TestDataDir::new();
    {
        let core = data.open_core(Config::default());
        let settings = core.settings_repository();
        settings.set_app_theme(AppTheme::Dark).unwrap();
        settings.set_screen_capture_allowed(true).unwrap();
        settings
            .set_clipboard_clear_frequency(ClipboardClearFrequency::TwoMinutes)
            .unwrap();
    }

    let core = data.open_core(Config::default());
    let settings = core.settings_repository();
    assert_eq!(settings.app_theme(), AppTheme::Dark);
    assert!(settings.is_screen_capture_allowed());
    assert_eq!(
        settings.clipboard_clear_frequency(),
        ClipboardClearFrequency::TwoMinutes
    );
}

#[tokio::test]
async fn test_account_settings_need_an_active_user() {
    let data = TestDataDir::new();
    let core = data.open_core(Config::default());
    let settings = core.settings_repository();

    assert_eq!(settings.vault_timeout(), VaultTimeout::Never);
    assert_eq!(settings.vault_timeout_action(), VaultTimeoutAction::Lock);
    assert!(matches!(
        settings.set_vault_timeout(VaultTimeout::FiveMinutes),
        Err(SettingsError::NoActiveUser)
    ));
    assert!(matches!(
        settings.setup_biometrics_key().await,
        Err(SettingsError::NoActiveUser)
    ));
}

/// Each account keeps its own timeout and the stream follows the switch
#[tokio::test]
async fn test_vault_timeout_follows_active_user() {
    let data = TestDataDir::new();
    let core = data.open_core(Config::default());
    let auth = core.auth_disk_source();
    let settings = core.settings_repository();

    auth.store_active_user_id(Some("alice")).unwrap();
    settings.set_vault_timeout(VaultTimeout::FifteenMinutes).unwrap();
    settings
        .set_vault_timeout_action(VaultTimeoutAction::Logout)
        .unwrap();
    auth.store_active_user_id(Some("bob")).unwrap();
    settings.set_vault_timeout(VaultTimeout::Immediately).unwrap();

    let mut timeout = settings.vault_timeout_receiver();
    timeout.borrow_and_update();
    auth.store_active_user_id(Some("alice")).unwrap();

    tokio::time::timeout(Duration::from_secs(2), timeout.changed())
        .await
        .expect("timeout stream did not update")
        .unwrap();
    assert_eq!(*timeout.borrow(), VaultTimeout::FifteenMinutes);
    assert_eq!(settings.vault_timeout_action(), VaultTimeoutAction::Logout);

    auth.store_active_user_id(Some("bob")).unwrap();
    assert_eq!(settings.vault_timeout(), VaultTimeout::Immediately);
    assert_eq!(settings.vault_timeout_action(), VaultTimeoutAction::Lock);
}

/// The shipped collaborators never enable biometric unlock
#[tokio::test]
async fn test_biometrics_unavailable_without_unlocked_vault() {
    let data = TestDataDir::new();
    let core = data.open_core(Config::default());
    core.auth_disk_source()
        .store_active_user_id(Some("alice"))
        .unwrap();
    let settings = core.settings_repository();

    assert!(matches!(
        settings.setup_biometrics_key().await,
        Err(SettingsError::Sdk(_))
    ));
    assert!(!settings.is_unlock_with_biometrics_enabled());
    settings.clear_biometrics_key().unwrap();
}

#[tokio::test]
async fn test_flag_overrides_apply_only_with_debug_menu() {
    let data = TestDataDir::new();
    let mut server = ServerConfig::default();
    server
        .feature_states
        .insert(FeatureFlag::SshKeyCipherItems.key().to_string(), json!(true));

    {
        let core = data.open_core(Config::default());
        core.server_config_repository().store(&server).unwrap();
        let debug_menu = core.debug_menu_repository();
        debug_menu
            .update_feature_flag(FeatureFlag::SshKeyCipherItems, false)
            .unwrap();
        assert!(debug_menu.feature_flag(FeatureFlag::SshKeyCipherItems));
    }

    let core = data.open_core(Config {
        debug_menu_enabled: true,
        ..Config::default()
    });
    let debug_menu = core.debug_menu_repository();
    assert!(!debug_menu.feature_flag(FeatureFlag::SshKeyCipherItems));

    let mut updated = debug_menu.feature_flag_overrides_updated();
    debug_menu.reset_feature_flag_overrides().unwrap();
    assert!(updated.has_changed().unwrap());
    assert!(debug_menu.feature_flag(FeatureFlag::SshKeyCipherItems));
    assert!(!debug_menu.feature_flag(FeatureFlag::ImportLoginsFlow));
}
