//! Disk source for debug feature flag overrides

use parking_lot::Mutex;
use rusqlite::Connection;
use std::sync::Arc;

use super::database::DatabaseError;
use super::key_value::{KeyValueStore, KeyValueTable};

/// Override values, stored as JSON so non-boolean flags fit the same table
#[derive(Clone)]
pub struct FeatureFlagOverrideDiskSource {
    store: KeyValueStore,
}

impl FeatureFlagOverrideDiskSource {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            store: KeyValueStore::new(conn, KeyValueTable::FeatureFlagOverrides),
        }
    }

    pub fn feature_flag(&self, key: &str) -> Result<Option<serde_json::Value>, DatabaseError> {
        match self.store.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| DatabaseError::Malformed {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    pub fn store_feature_flag(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), DatabaseError> {
        self.store.set(key, &value.to_string())
    }

    pub fn overridden_keys(&self) -> Result<Vec<String>, DatabaseError> {
        self.store.keys()
    }

    pub fn clear_feature_flags(&self) -> Result<(), DatabaseError> {
        self.store.clear_all()
    }
}
