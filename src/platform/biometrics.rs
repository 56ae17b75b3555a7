//! Biometric unlock key protection

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BiometricsError {
    #[error("biometric unlock is not supported on this device")]
    Unsupported,
    #[error("biometric cipher could not be created: {0}")]
    CipherCreation(String),
}

/// Guards the key that biometric unlock decrypts the vault with
pub trait BiometricsEncryptionManager: Send + Sync {
    /// Create (or replace) the cipher protecting `user_id`'s biometric key
    fn create_cipher(&self, user_id: &str) -> Result<(), BiometricsError>;

    /// Forget the cipher for `user_id`
    fn clear_biometrics(&self, user_id: &str);

    /// False once enrolled biometrics changed since the cipher was created
    fn is_biometric_integrity_valid(&self, user_id: &str) -> bool;
}

/// Used on hosts without a biometric sensor
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedBiometricsManager;

impl BiometricsEncryptionManager for UnsupportedBiometricsManager {
    fn create_cipher(&self, _user_id: &str) -> Result<(), BiometricsError> {
        Err(BiometricsError::Unsupported)
    }

    fn clear_biometrics(&self, _user_id: &str) {}

    fn is_biometric_integrity_valid(&self, _user_id: &str) -> bool {
        false
    }
}
