//! Normalized email address.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// An email address, normalized to its canonical form (trimmed,
/// lower-cased). This is the unique key for OTP records, so the same
/// mailbox typed with different casing maps to one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and normalizes a raw email string.
    ///
    /// # Validation
    /// - Must be non-empty after trimming
    /// - Must contain an `@`
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::MissingEmail);
        }
        if !normalized.contains('@') {
            return Err(DomainError::InvalidEmail(normalized));
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
