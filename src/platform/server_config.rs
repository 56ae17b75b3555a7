//! Cached server configuration

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// The subset of the server's `/config` response the client reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub feature_states: HashMap<String, serde_json::Value>,
}

impl ServerConfig {
    pub fn feature_state(&self, key: &str) -> Option<&serde_json::Value> {
        self.feature_states.get(key)
    }
}

pub trait ServerConfigRepository: Send + Sync {
    /// Last known server config, if any has been fetched
    fn server_config(&self) -> Option<ServerConfig>;
}

/// Reads the server config cached on disk as JSON
pub struct FileServerConfigRepository {
    path: PathBuf,
    cached: Mutex<Option<Option<ServerConfig>>>,
}

impl FileServerConfigRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cached: Mutex::new(None),
        }
    }

    /// Overwrite the cached file
    pub fn store(&self, config: &ServerConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, json)?;
        *self.cached.lock() = Some(Some(config.clone()));
        Ok(())
    }

    /// Drop the in-memory copy so the next read goes to disk
    pub fn invalidate(&self) {
        *self.cached.lock() = None;
    }

    fn load(&self) -> Option<ServerConfig> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No cached server config");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read server config");
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Malformed server config");
                None
            }
        }
    }
}

impl ServerConfigRepository for FileServerConfigRepository {
    fn server_config(&self) -> Option<ServerConfig> {
        let mut cached = self.cached.lock();
        cached.get_or_insert_with(|| self.load()).clone()
    }
}
