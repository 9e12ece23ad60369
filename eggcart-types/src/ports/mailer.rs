//! Email delivery port.

use crate::domain::{EmailAddress, OtpCode};
use crate::error::MailerError;

/// Outbound transactional email.
///
/// The one message this core sends is the verification-code email; the
/// template is fixed and the subject static.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Delivers the plaintext code to the given mailbox.
    async fn send_otp_email(&self, to: &EmailAddress, code: &OtpCode) -> Result<(), MailerError>;
}
