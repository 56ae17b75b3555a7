use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Content kind of a stored vault item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherType {
    Login,
    Card,
    Identity,
    SecureNote,
    SshKey,
}

/// Returned when a token does not name a known cipher type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cipher type: {0}")]
pub struct UnknownCipherType(pub String);

impl CipherType {
    /// Every cipher type, in the order the add flow lists them
    pub const ALL: [CipherType; 5] = [
        CipherType::Login,
        CipherType::Card,
        CipherType::Identity,
        CipherType::SecureNote,
        CipherType::SshKey,
    ];

    /// Route token for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherType::Login => "login",
            CipherType::Card => "card",
            CipherType::Identity => "identity",
            CipherType::SecureNote => "secure_note",
            CipherType::SshKey => "ssh_key",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CipherType::Login => "Login",
            CipherType::Card => "Card",
            CipherType::Identity => "Identity",
            CipherType::SecureNote => "Secure note",
            CipherType::SshKey => "SSH key",
        }
    }

    /// Item types the add flow offers. SSH keys are gated behind a feature flag.
    pub fn available(ssh_keys_enabled: bool) -> Vec<CipherType> {
        Self::ALL
            .into_iter()
            .filter(|t| ssh_keys_enabled || *t != CipherType::SshKey)
            .collect()
    }
}

impl FromStr for CipherType {
    type Err = UnknownCipherType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "login" => Ok(CipherType::Login),
            "card" => Ok(CipherType::Card),
            "identity" => Ok(CipherType::Identity),
            "secure_note" => Ok(CipherType::SecureNote),
            "ssh_key" => Ok(CipherType::SshKey),
            other => Err(UnknownCipherType(other.to_string())),
        }
    }
}

impl std::fmt::Display for CipherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
