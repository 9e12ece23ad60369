//! Error types for the checkout core.

use crate::domain::OrderId;

/// Domain-level errors (business logic violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Email is required")]
    MissingEmail,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("OTP must be a 6-digit code")]
    MalformedOtpCode,

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Port errors (outbound collaborators)
// ─────────────────────────────────────────────────────────────────────────────

/// Email delivery port errors.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Email service is not configured: {0}")]
    Config(String),

    #[error("{0}")]
    Delivery(String),
}

/// Identity provider port errors.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Identity service is not configured: {0}")]
    Config(String),

    #[error("{0}")]
    Provider(String),
}

/// Payment gateway port errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Payment gateway is not configured: {0}")]
    Config(String),

    /// The gateway accepted the request but refused it, with a reason.
    #[error("{0}")]
    Rejected(String),

    /// The gateway could not be reached (network failure, timeout).
    #[error("Payment gateway unreachable: {0}")]
    Transport(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Component error taxonomies
// ─────────────────────────────────────────────────────────────────────────────

/// OTP issuance/redemption errors.
///
/// Each variant is a distinct, stable failure identity so the client can
/// branch (offer "resend code" on not-found/expired, re-prompt on
/// invalid-code, ask for a password on missing-password).
#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    #[error("{0}")]
    Validation(String),

    #[error("OTP not found. Please request a new one.")]
    NotFound,

    #[error("OTP expired. Please request a new one.")]
    Expired,

    #[error("Invalid OTP")]
    InvalidCode,

    #[error("Password of at least 6 characters is required")]
    MissingPassword,

    #[error("Failed to send verification email: {0}")]
    Delivery(String),

    #[error("Account service error: {0}")]
    Identity(String),

    /// Record-store failure. Display text is generic; the detail is kept
    /// for logs only.
    #[error("Could not process your request. Please try again.")]
    Storage(String),

    #[error("Service is not configured: {0}")]
    Config(String),
}

impl From<RepoError> for OtpError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => OtpError::Validation(e.to_string()),
            other => OtpError::Storage(other.to_string()),
        }
    }
}

impl From<MailerError> for OtpError {
    fn from(err: MailerError) -> Self {
        match err {
            MailerError::Config(msg) => OtpError::Config(msg),
            MailerError::Delivery(msg) => OtpError::Delivery(msg),
        }
    }
}

impl From<IdentityError> for OtpError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Config(msg) => OtpError::Config(msg),
            IdentityError::Provider(msg) => OtpError::Identity(msg),
        }
    }
}

/// Payment order creation/verification errors.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("{0}")]
    Validation(String),

    #[error("Payment gateway is not configured: {0}")]
    Config(String),

    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("Invalid payment signature")]
    SignatureMismatch,

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Could not process your request. Please try again.")]
    Storage(String),
}

impl From<GatewayError> for PaymentError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Config(msg) => PaymentError::Config(msg),
            GatewayError::Rejected(msg) => PaymentError::Gateway(msg),
            GatewayError::Transport(msg) => PaymentError::Gateway(msg),
        }
    }
}

impl From<RepoError> for PaymentError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => PaymentError::Validation(e.to_string()),
            other => PaymentError::Storage(other.to_string()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP-facing application errors
// ─────────────────────────────────────────────────────────────────────────────

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes. Only the payment/order endpoints use
/// this mapping; the OTP endpoints return 200 with a structured body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Validation(msg) => AppError::BadRequest(msg),
            PaymentError::SignatureMismatch => {
                AppError::BadRequest("Invalid payment signature".into())
            }
            PaymentError::OrderNotFound(id) => AppError::NotFound(format!("Order {}", id)),
            PaymentError::Gateway(msg) => AppError::Upstream(msg),
            PaymentError::Config(msg) => AppError::Internal(msg),
            PaymentError::Storage(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => AppError::BadRequest(e.to_string()),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Conflict(e) => AppError::BadRequest(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_error_messages_are_stable() {
        assert_eq!(
            OtpError::NotFound.to_string(),
            "OTP not found. Please request a new one."
        );
        assert_eq!(
            OtpError::Expired.to_string(),
            "OTP expired. Please request a new one."
        );
        assert_eq!(OtpError::InvalidCode.to_string(), "Invalid OTP");
    }

    #[test]
    fn test_storage_detail_not_leaked() {
        let err = OtpError::Storage("connection refused on 10.0.0.3:5432".into());
        assert!(!err.to_string().contains("10.0.0.3"));
    }

    #[test]
    fn test_signature_mismatch_maps_to_bad_request() {
        let app: AppError = PaymentError::SignatureMismatch.into();
        assert!(matches!(app, AppError::BadRequest(_)));
        assert!(app.to_string().contains("Invalid payment signature"));
    }
}
