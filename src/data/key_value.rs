//! Key-value table access shared by the disk sources

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;

use super::database::DatabaseError;

/// Tables created by the migrations with a (key, value, updated_at) layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyValueTable {
    Settings,
    AuthState,
    FeatureFlagOverrides,
}

impl KeyValueTable {
    fn name(&self) -> &'static str {
        match self {
            KeyValueTable::Settings => "settings",
            KeyValueTable::AuthState => "auth_state",
            KeyValueTable::FeatureFlagOverrides => "feature_flag_overrides",
        }
    }
}

/// Data access object for one key-value table
#[derive(Clone)]
pub struct KeyValueStore {
    conn: Arc<Mutex<Connection>>,
    table: KeyValueTable,
}

impl KeyValueStore {
    pub fn new(conn: Arc<Mutex<Connection>>, table: KeyValueTable) -> Self {
        Self { conn, table }
    }

    /// Set a value (insert or update)
    pub fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        let conn = self.conn.lock();
        conn.execute(
            &format!(
                "INSERT INTO {} (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                self.table.name()
            ),
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let conn = self.conn.lock();
        let value = conn
            .query_row(
                &format!("SELECT value FROM {} WHERE key = ?1", self.table.name()),
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Store `Some` or delete on `None`
    pub fn put(&self, key: &str, value: Option<&str>) -> Result<(), DatabaseError> {
        match value {
            Some(value) => self.set(key, value),
            None => self.delete(key),
        }
    }

    /// Get and parse a value, reporting malformed rows
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>, DatabaseError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key)? {
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|e| DatabaseError::Malformed {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    pub fn delete(&self, key: &str) -> Result<(), DatabaseError> {
        let conn = self.conn.lock();
        conn.execute(
            &format!("DELETE FROM {} WHERE key = ?1", self.table.name()),
            params![key],
        )?;
        Ok(())
    }

    /// All keys in the table, sorted
    pub fn keys(&self) -> Result<Vec<String>, DatabaseError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT key FROM {} ORDER BY key",
            self.table.name()
        ))?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(keys)
    }

    pub fn clear_all(&self) -> Result<(), DatabaseError> {
        let conn = self.conn.lock();
        conn.execute(&format!("DELETE FROM {}", self.table.name()), [])?;
        Ok(())
    }
}
