//! Path utilities for the warden data directory

use std::path::PathBuf;
use std::sync::OnceLock;

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the data directory with an optional custom path.
/// Must be called early in main() before any other path functions are used.
pub fn init_data_dir(custom_path: Option<PathBuf>) {
    let path = custom_path.unwrap_or_else(default_data_dir);
    if DATA_DIR.set(path.clone()).is_err() {
        let existing = DATA_DIR
            .get()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        tracing::debug!(
            path = %path.display(),
            existing = %existing,
            "Data directory already initialized"
        );
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".warden"))
        .unwrap_or_else(|| PathBuf::from(".warden"))
}

/// Get the base data directory.
/// Returns the custom path if set via init_data_dir(), otherwise ~/.warden
pub fn data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

/// ~/.warden/warden.db
pub fn database_path() -> PathBuf {
    data_dir().join("warden.db")
}

pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// ~/.warden/logs/warden.log
pub fn log_file_path() -> PathBuf {
    logs_dir().join("warden.log")
}

/// ~/.warden/config.toml
pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

/// Last server config fetched, cached as JSON
pub fn server_config_path() -> PathBuf {
    data_dir().join("server_config.json")
}
