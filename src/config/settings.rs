use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use toml_edit::{DocumentMut, Item, Table};

use crate::util::paths::config_path;
use crate::vault::CipherType;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

const DEFAULT_BASE_URL: &str = "https://vault.bitwarden.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("config file {path} cannot be edited: {source}")]
    Edit {
        path: PathBuf,
        #[source]
        source: toml_edit::TomlError,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Vault server base URL, without a trailing slash
    pub base_url: String,
    /// Whether the debug menu (and feature flag overrides) is available
    pub debug_menu_enabled: bool,
    /// Item type used when none is given on the command line
    pub default_cipher_type: CipherType,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TomlServerConfig {
    base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TomlDebugConfig {
    menu_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TomlVaultConfig {
    default_cipher_type: Option<CipherType>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlConfig {
    server: Option<TomlServerConfig>,
    debug: Option<TomlDebugConfig>,
    vault: Option<TomlVaultConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debug_menu_enabled: false,
            default_cipher_type: CipherType::Login,
        }
    }
}

impl Config {
    /// Load configuration from ~/.warden/config.toml, writing the example
    /// file on first run. Errors are logged and defaults used.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        match Self::load_from(&config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        }
    }

    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(base_url) = toml_config.server.and_then(|s| s.base_url) {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(enabled) = toml_config.debug.and_then(|d| d.menu_enabled) {
            config.debug_menu_enabled = enabled;
        }
        if let Some(cipher_type) = toml_config.vault.and_then(|v| v.default_cipher_type) {
            config.default_cipher_type = cipher_type;
        }

        Ok(config)
    }

    /// Create the default config file from the example
    fn create_default_config(path: &PathBuf) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "Failed to create config directory");
                return;
            }
        }
        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to write example config");
        }
    }

    /// Identity service URL derived from the server base URL
    pub fn identity_url(&self) -> String {
        format!("{}/identity", self.base_url)
    }
}

/// Set `[section] key` in the config file at `path`, keeping comments and
/// everything else in the document intact.
fn save_value(path: &Path, section: &str, key: &str, value: toml_edit::Item) -> Result<(), ConfigError> {
    let io_error = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    let contents = if path.exists() {
        fs::read_to_string(path).map_err(io_error)?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = contents.parse().map_err(|source| ConfigError::Edit {
        path: path.to_path_buf(),
        source,
    })?;

    if !doc.contains_key(section) {
        doc[section] = Item::Table(Table::new());
    }
    doc[section][key] = value;

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
    }

    fs::write(path, doc.to_string()).map_err(io_error)
}

/// Save the server base URL to the config file
pub fn save_server_base_url(path: &Path, base_url: &str) -> Result<(), ConfigError> {
    save_value(
        path,
        "server",
        "base_url",
        toml_edit::value(base_url.trim_end_matches('/')),
    )
}

/// Save whether the debug menu is enabled
pub fn save_debug_menu_enabled(path: &Path, enabled: bool) -> Result<(), ConfigError> {
    save_value(path, "debug", "menu_enabled", toml_edit::value(enabled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_example_config_parses_to_defaults() {
        assert_eq!(Config::parse(EXAMPLE_CONFIG).unwrap(), Config::default());
    }

    #[test]
    fn test_parse_all_sections() {
        let config = Config::parse(
            r#"
            [server]
            base_url = "https://vault.example.com/"

            [debug]
            menu_enabled = true

            [vault]
            default_cipher_type = "secure_note"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://vault.example.com");
        assert_eq!(config.identity_url(), "https://vault.example.com/identity");
        assert!(config.debug_menu_enabled);
        assert_eq!(config.default_cipher_type, CipherType::SecureNote);
    }

    #[test]
    fn test_unknown_cipher_type_is_error() {
        let err = Config::parse("[vault]\ndefault_cipher_type = \"wallet\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_preserves_comments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, EXAMPLE_CONFIG).unwrap();

        save_debug_menu_enabled(&path, true).unwrap();
        save_server_base_url(&path, "https://self.hosted/").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# Enables the debug menu."));
        let config = Config::load_from(&path).unwrap();
        assert!(config.debug_menu_enabled);
        assert_eq!(config.base_url, "https://self.hosted");
    }

    #[test]
    fn test_save_creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        save_debug_menu_enabled(&path, true).unwrap();

        assert!(Config::load_from(&path).unwrap().debug_menu_enabled);
    }
}
