//! Received navigation arguments

use std::collections::BTreeMap;

use super::NavError;

/// String-keyed arguments extracted from a received route.
///
/// An absent key is the null value; there is no separate null marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgBundle {
    values: BTreeMap<String, String>,
}

impl ArgBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for callers that already hold parsed arguments
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Set or clear a key. `None` removes it.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match value {
            Some(value) => {
                self.values.insert(key, value);
            }
            None => {
                self.values.remove(&key);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a key that the destination cannot do without
    pub fn require(&self, key: &'static str) -> Result<&str, NavError> {
        self.get(key).ok_or(NavError::MissingArgument(key))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
