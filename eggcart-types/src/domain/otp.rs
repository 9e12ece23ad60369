//! One-time passcode domain model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::email::EmailAddress;
use crate::error::DomainError;

/// How long an issued code stays redeemable.
pub const OTP_TTL_MINUTES: i64 = 10;

/// A six-digit one-time passcode.
///
/// Codes are generated in `100000..=999999`, so a valid code never has a
/// leading zero. Only the digest of a code is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Parses a submitted code, requiring exactly six ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::MalformedOtpCode);
        }
        Ok(Self(raw.to_string()))
    }

    /// Builds a code from a freshly generated number.
    ///
    /// The caller guarantees the six-digit range; this is the constructor
    /// used by the code generator, not by request parsing.
    pub fn from_number(n: u32) -> Self {
        debug_assert!((100_000..=999_999).contains(&n));
        Self(n.to_string())
    }

    /// Returns the code digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored OTP issuance: the digest of a code bound to an email, with a
/// fixed expiry window.
///
/// At most one record exists per email; issuing a new code replaces any
/// prior record, instantly invalidating the outstanding code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRecord {
    pub email: EmailAddress,
    pub otp_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record for a just-issued code digest, expiring
    /// [`OTP_TTL_MINUTES`] from now.
    pub fn issue(email: EmailAddress, otp_hash: String) -> Self {
        let now = Utc::now();
        Self {
            email,
            otp_hash,
            expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a record from stored parts.
    pub fn from_parts(
        email: EmailAddress,
        otp_hash: String,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            email,
            otp_hash,
            expires_at,
            created_at,
            updated_at,
        }
    }

    /// True once the redemption window has closed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_six_digits() {
        let code = OtpCode::parse("123456").unwrap();
        assert_eq!(code.as_str(), "123456");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let code = OtpCode::parse(" 654321 ").unwrap();
        assert_eq!(code.as_str(), "654321");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(OtpCode::parse("12345").is_err());
        assert!(OtpCode::parse("1234567").is_err());
        assert!(OtpCode::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        assert!(OtpCode::parse("12a456").is_err());
        assert!(OtpCode::parse("12 456").is_err());
    }

    #[test]
    fn test_issue_sets_ten_minute_window() {
        let email = EmailAddress::parse("a@b.com").unwrap();
        let record = OtpRecord::issue(email, "hash".into());
        let window = record.expires_at - record.created_at;
        assert_eq!(window.num_minutes(), OTP_TTL_MINUTES);
    }

    #[test]
    fn test_expiry_boundary() {
        let email = EmailAddress::parse("a@b.com").unwrap();
        let record = OtpRecord::issue(email, "hash".into());
        assert!(!record.is_expired(record.expires_at));
        assert!(record.is_expired(record.expires_at + Duration::seconds(1)));
    }
}
