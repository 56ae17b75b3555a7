use std::str::FromStr;

/// Flags the server can toggle and the debug menu can override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureFlag {
    EmailVerification,
    ImportLoginsFlow,
    SshKeyCipherItems,
    VerifiedSsoDomainEndpoint,
    CredentialExchangeProtocolImport,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 5] = [
        FeatureFlag::EmailVerification,
        FeatureFlag::ImportLoginsFlow,
        FeatureFlag::SshKeyCipherItems,
        FeatureFlag::VerifiedSsoDomainEndpoint,
        FeatureFlag::CredentialExchangeProtocolImport,
    ];

    /// Key used by the server config and the override table
    pub fn key(&self) -> &'static str {
        match self {
            FeatureFlag::EmailVerification => "email-verification",
            FeatureFlag::ImportLoginsFlow => "import-logins-flow",
            FeatureFlag::SshKeyCipherItems => "ssh-key-vault-item",
            FeatureFlag::VerifiedSsoDomainEndpoint => "pm-12337-refactor-sso-details-endpoint",
            FeatureFlag::CredentialExchangeProtocolImport => "cxp-import-mobile",
        }
    }

    pub fn default_value(&self) -> bool {
        false
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FeatureFlag::EmailVerification => "Email verification",
            FeatureFlag::ImportLoginsFlow => "Import logins flow",
            FeatureFlag::SshKeyCipherItems => "SSH key cipher items",
            FeatureFlag::VerifiedSsoDomainEndpoint => "Verified SSO domain endpoint",
            FeatureFlag::CredentialExchangeProtocolImport => "Credential exchange import",
        }
    }
}

impl FromStr for FeatureFlag {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.key() == value)
            .ok_or_else(|| format!("unknown feature flag: {value}"))
    }
}

impl std::fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique_and_parse() {
        let mut keys = std::collections::HashSet::new();
        for flag in FeatureFlag::ALL {
            assert!(keys.insert(flag.key()));
            assert_eq!(flag.key().parse::<FeatureFlag>(), Ok(flag));
        }
    }

    #[test]
    fn test_unknown_key() {
        assert!("no-such-flag".parse::<FeatureFlag>().is_err());
    }
}
