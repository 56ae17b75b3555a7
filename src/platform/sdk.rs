//! Access to the cryptographic SDK

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    #[error("vault is locked")]
    VaultLocked,
    #[error("sdk call failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait VaultSdkSource: Send + Sync {
    /// Base64 encoded user key of an unlocked account
    async fn user_encryption_key(&self, user_id: &str) -> Result<String, SdkError>;
}

/// SDK source for a host where no account has been unlocked
#[derive(Debug, Default, Clone, Copy)]
pub struct LockedVaultSdkSource;

#[async_trait]
impl VaultSdkSource for LockedVaultSdkSource {
    async fn user_encryption_key(&self, _user_id: &str) -> Result<String, SdkError> {
        Err(SdkError::VaultLocked)
    }
}
