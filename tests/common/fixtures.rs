//! Temporary data directories for integration tests

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use warden::platform::{DispatcherManager, LockedVaultSdkSource, UnsupportedBiometricsManager};
use warden::{Config, Database, WardenCore};

/// A throwaway `--data-dir` laid out like `~/.warden`
pub struct TestDataDir {
    dir: TempDir,
}

impl TestDataDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn database_path(&self) -> PathBuf {
        self.path().join("warden.db")
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    pub fn server_config_path(&self) -> PathBuf {
        self.path().join("server_config.json")
    }

    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.config_path(), contents).expect("Failed to write config");
    }

    /// Build a core on this directory. Needs a tokio runtime.
    pub fn open_core(&self, config: Config) -> WardenCore {
        WardenCore::with_collaborators(
            config,
            Database::open(self.database_path()).expect("Failed to open database"),
            self.server_config_path(),
            &DispatcherManager::try_current().expect("No tokio runtime"),
            Arc::new(UnsupportedBiometricsManager),
            Arc::new(LockedVaultSdkSource),
        )
        .expect("Failed to build core")
    }
}
