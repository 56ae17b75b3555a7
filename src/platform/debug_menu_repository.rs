//! Debug menu repository
//!
//! Local feature flag overrides layered over the server config.

use std::sync::Arc;
use tokio::sync::watch;

use super::feature_flag::FeatureFlag;
use super::server_config::ServerConfigRepository;
use crate::data::{DatabaseError, FeatureFlagOverrideDiskSource};

pub trait DebugMenuRepository: Send + Sync {
    fn is_debug_menu_enabled(&self) -> bool;

    /// Effective value: override, then server, then default
    fn feature_flag(&self, flag: FeatureFlag) -> bool;

    /// Locally stored override, if any
    fn feature_flag_override(&self, flag: FeatureFlag) -> Option<bool>;

    fn update_feature_flag(&self, flag: FeatureFlag, value: bool) -> Result<(), DatabaseError>;

    /// Rewrite every override to the server value (or the default)
    fn reset_feature_flag_overrides(&self) -> Result<(), DatabaseError>;

    /// Keys with a stored override, including ones no known flag uses
    fn overridden_keys(&self) -> Result<Vec<String>, DatabaseError>;

    /// Delete every stored override
    fn clear_feature_flag_overrides(&self) -> Result<(), DatabaseError>;

    /// Bumped after every override change
    fn feature_flag_overrides_updated(&self) -> watch::Receiver<u64>;
}

pub struct DebugMenuRepositoryImpl {
    override_source: FeatureFlagOverrideDiskSource,
    server_config_repository: Arc<dyn ServerConfigRepository>,
    is_debug_menu_enabled: bool,
    updated: watch::Sender<u64>,
}

impl DebugMenuRepositoryImpl {
    pub fn new(
        override_source: FeatureFlagOverrideDiskSource,
        server_config_repository: Arc<dyn ServerConfigRepository>,
        is_debug_menu_enabled: bool,
    ) -> Self {
        let (updated, _) = watch::channel(0);
        Self {
            override_source,
            server_config_repository,
            is_debug_menu_enabled,
            updated,
        }
    }

    fn server_value(&self, flag: FeatureFlag) -> Option<bool> {
        self.server_config_repository
            .server_config()?
            .feature_state(flag.key())
            .and_then(serde_json::Value::as_bool)
    }

    fn notify(&self) {
        self.updated.send_modify(|version| *version += 1);
    }
}

impl DebugMenuRepository for DebugMenuRepositoryImpl {
    fn is_debug_menu_enabled(&self) -> bool {
        self.is_debug_menu_enabled
    }

    fn feature_flag(&self, flag: FeatureFlag) -> bool {
        let overridden = if self.is_debug_menu_enabled {
            self.feature_flag_override(flag)
        } else {
            None
        };
        overridden
            .or_else(|| self.server_value(flag))
            .unwrap_or_else(|| flag.default_value())
    }

    fn feature_flag_override(&self, flag: FeatureFlag) -> Option<bool> {
        match self.override_source.feature_flag(flag.key()) {
            Ok(value) => value.as_ref().and_then(serde_json::Value::as_bool),
            Err(e) => {
                tracing::warn!(flag = flag.key(), error = %e, "Failed to read flag override");
                None
            }
        }
    }

    fn update_feature_flag(&self, flag: FeatureFlag, value: bool) -> Result<(), DatabaseError> {
        self.override_source
            .store_feature_flag(flag.key(), &serde_json::Value::Bool(value))?;
        tracing::debug!(flag = flag.key(), value, "Feature flag overridden");
        self.notify();
        Ok(())
    }

    fn reset_feature_flag_overrides(&self) -> Result<(), DatabaseError> {
        for flag in FeatureFlag::ALL {
            let value = self
                .server_value(flag)
                .unwrap_or_else(|| flag.default_value());
            self.override_source
                .store_feature_flag(flag.key(), &serde_json::Value::Bool(value))?;
        }
        tracing::info!("Feature flag overrides reset");
        self.notify();
        Ok(())
    }

    fn overridden_keys(&self) -> Result<Vec<String>, DatabaseError> {
        self.override_source.overridden_keys()
    }

    fn clear_feature_flag_overrides(&self) -> Result<(), DatabaseError> {
        self.override_source.clear_feature_flags()?;
        tracing::info!("Feature flag overrides cleared");
        self.notify();
        Ok(())
    }

    fn feature_flag_overrides_updated(&self) -> watch::Receiver<u64> {
        self.updated.subscribe()
    }
}
