//! Disk source for authentication state

use parking_lot::Mutex;
use rusqlite::Connection;
use std::sync::Arc;
use tokio::sync::watch;

use super::database::DatabaseError;
use super::key_value::{KeyValueStore, KeyValueTable};

const ACTIVE_USER_ID: &str = "activeUserId";
const REMEMBERED_ORG_IDENTIFIER: &str = "rememberedOrgIdentifier";
const BIOMETRICS_UNLOCK_KEY: &str = "userKeyBiometricUnlock";

/// Authentication state storage.
///
/// The active user id is mirrored in memory so consumers can observe changes.
#[derive(Clone)]
pub struct AuthDiskSource {
    store: KeyValueStore,
    active_user: Arc<watch::Sender<Option<String>>>,
}

impl AuthDiskSource {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Result<Self, DatabaseError> {
        let store = KeyValueStore::new(conn, KeyValueTable::AuthState);
        let active = store.get(ACTIVE_USER_ID)?;
        let (active_user, _) = watch::channel(active);
        Ok(Self {
            store,
            active_user: Arc::new(active_user),
        })
    }

    pub fn active_user_id(&self) -> Option<String> {
        self.active_user.borrow().clone()
    }

    pub fn store_active_user_id(&self, user_id: Option<&str>) -> Result<(), DatabaseError> {
        self.store.put(ACTIVE_USER_ID, user_id)?;
        self.active_user.send_replace(user_id.map(str::to_string));
        Ok(())
    }

    /// Receiver that sees every active user change
    pub fn active_user_id_receiver(&self) -> watch::Receiver<Option<String>> {
        self.active_user.subscribe()
    }

    pub fn remembered_org_identifier(&self) -> Result<Option<String>, DatabaseError> {
        self.store.get(REMEMBERED_ORG_IDENTIFIER)
    }

    pub fn store_remembered_org_identifier(
        &self,
        org_identifier: Option<&str>,
    ) -> Result<(), DatabaseError> {
        self.store.put(REMEMBERED_ORG_IDENTIFIER, org_identifier)
    }

    pub fn user_biometric_unlock_key(&self, user_id: &str) -> Result<Option<String>, DatabaseError> {
        self.store
            .get(&format!("{BIOMETRICS_UNLOCK_KEY}_{user_id}"))
    }

    pub fn store_user_biometric_unlock_key(
        &self,
        user_id: &str,
        key: Option<&str>,
    ) -> Result<(), DatabaseError> {
        self.store
            .put(&format!("{BIOMETRICS_UNLOCK_KEY}_{user_id}"), key)
    }
}
