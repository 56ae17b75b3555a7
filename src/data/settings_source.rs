//! Disk source for app and per-user settings

use parking_lot::Mutex;
use rusqlite::Connection;
use std::sync::Arc;

use super::database::DatabaseError;
use super::key_value::{KeyValueStore, KeyValueTable};

const APP_THEME: &str = "theme";
const SCREEN_CAPTURE_ALLOWED: &str = "screenCaptureAllowed";
const CLEAR_CLIPBOARD_FREQUENCY: &str = "clearClipboard";
const VAULT_TIMEOUT_IN_MINUTES: &str = "vaultTimeoutInMinutes";
const VAULT_TIMEOUT_ACTION: &str = "vaultTimeoutAction";

const USER_SCOPED_KEYS: [&str; 2] = [VAULT_TIMEOUT_IN_MINUTES, VAULT_TIMEOUT_ACTION];

fn user_key(base: &str, user_id: &str) -> String {
    format!("{base}_{user_id}")
}

/// Raw settings storage. Values are stored as text; typing happens in the repository.
#[derive(Clone)]
pub struct SettingsDiskSource {
    store: KeyValueStore,
}

impl SettingsDiskSource {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            store: KeyValueStore::new(conn, KeyValueTable::Settings),
        }
    }

    pub fn app_theme(&self) -> Result<Option<String>, DatabaseError> {
        self.store.get(APP_THEME)
    }

    pub fn store_app_theme(&self, theme: Option<&str>) -> Result<(), DatabaseError> {
        self.store.put(APP_THEME, theme)
    }

    pub fn screen_capture_allowed(&self) -> Result<Option<bool>, DatabaseError> {
        self.store.get_parsed(SCREEN_CAPTURE_ALLOWED)
    }

    pub fn store_screen_capture_allowed(&self, allowed: Option<bool>) -> Result<(), DatabaseError> {
        self.store.put(
            SCREEN_CAPTURE_ALLOWED,
            allowed.map(|a| a.to_string()).as_deref(),
        )
    }

    pub fn clipboard_clear_seconds(&self) -> Result<Option<i64>, DatabaseError> {
        self.store.get_parsed(CLEAR_CLIPBOARD_FREQUENCY)
    }

    pub fn store_clipboard_clear_seconds(&self, seconds: Option<i64>) -> Result<(), DatabaseError> {
        self.store.put(
            CLEAR_CLIPBOARD_FREQUENCY,
            seconds.map(|s| s.to_string()).as_deref(),
        )
    }

    /// Minutes until the vault times out. `-1` means on app restart, absent means never.
    pub fn vault_timeout_in_minutes(&self, user_id: &str) -> Result<Option<i64>, DatabaseError> {
        self.store
            .get_parsed(&user_key(VAULT_TIMEOUT_IN_MINUTES, user_id))
    }

    pub fn store_vault_timeout_in_minutes(
        &self,
        user_id: &str,
        minutes: Option<i64>,
    ) -> Result<(), DatabaseError> {
        self.store.put(
            &user_key(VAULT_TIMEOUT_IN_MINUTES, user_id),
            minutes.map(|m| m.to_string()).as_deref(),
        )
    }

    pub fn vault_timeout_action(&self, user_id: &str) -> Result<Option<String>, DatabaseError> {
        self.store.get(&user_key(VAULT_TIMEOUT_ACTION, user_id))
    }

    pub fn store_vault_timeout_action(
        &self,
        user_id: &str,
        action: Option<&str>,
    ) -> Result<(), DatabaseError> {
        self.store
            .put(&user_key(VAULT_TIMEOUT_ACTION, user_id), action)
    }

    /// Drop every user-scoped value for `user_id`
    pub fn clear_user(&self, user_id: &str) -> Result<(), DatabaseError> {
        for base in USER_SCOPED_KEYS {
            self.store.delete(&user_key(base, user_id))?;
        }
        Ok(())
    }
}
