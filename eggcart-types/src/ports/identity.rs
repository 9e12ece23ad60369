//! Identity provider port.

use crate::domain::EmailAddress;
use crate::error::IdentityError;

/// Account to create after a successful OTP redemption.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password: String,
    /// Display name, stored as profile metadata.
    pub full_name: Option<String>,
}

/// The external account/credential service.
///
/// Accounts are keyed by email and owned by the provider; this core only
/// ever looks one up or creates one.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Returns the account id for an email, if an account exists.
    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<String>, IdentityError>;

    /// Creates an account with the email already confirmed (the OTP
    /// round-trip proved mailbox ownership). Returns the new account id.
    async fn create_user(&self, user: NewUser) -> Result<String, IdentityError>;
}
