//! Registration input normalization.

use std::fmt;

use crate::lookup::types::{LookupError, LookupResult};

/// Canonical registration key: upper-case, no whitespace, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationKey(String);

impl RegistrationKey {
    /// Normalize raw caller input into a key.
    ///
    /// Strips every whitespace character (leading, trailing and internal)
    /// and upper-cases the rest. No format checks are applied; any
    /// non-empty result is accepted.
    pub fn normalize(raw: &str) -> LookupResult<Self> {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();

        if key.is_empty() {
            return Err(LookupError::InvalidInput);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegistrationKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
