//! Resend email adapter.

use std::time::Duration;

use eggcart_types::{EmailAddress, Mailer, MailerError, OtpCode};

const RESEND_API_URL: &str = "https://api.resend.com/emails";
const DEFAULT_FROM: &str = "Eggcart <no-reply@eggcart.app>";

/// Static subject line for the verification email.
pub const OTP_EMAIL_SUBJECT: &str = "Your Eggcart verification code";

/// Transactional email via the Resend HTTP API.
///
/// Credentials are read from the environment at construction but only
/// checked at first use: a missing `RESEND_API_KEY` is a configuration
/// error on send, not at startup.
pub struct ResendMailer {
    http: reqwest::Client,
    api_key: Option<String>,
    from: String,
}

impl ResendMailer {
    /// Builds the mailer from `RESEND_API_KEY` and optional
    /// `OTP_FROM_EMAIL`.
    pub fn from_env() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
            api_key: std::env::var("RESEND_API_KEY").ok(),
            from: std::env::var("OTP_FROM_EMAIL").unwrap_or_else(|_| DEFAULT_FROM.to_string()),
        }
    }
}

/// Renders the fixed HTML template with the code displayed prominently.
pub fn otp_email_html(code: &OtpCode) -> String {
    format!(
        r#"<div style="font-family: sans-serif; max-width: 480px; margin: 0 auto;">
  <h2 style="color: #2e7d32;">Eggcart</h2>
  <p>Use this code to verify your email address:</p>
  <p style="font-size: 36px; font-weight: bold; letter-spacing: 8px; text-align: center; padding: 16px; background: #f5f5f5; border-radius: 8px;">{code}</p>
  <p>The code expires in 10 minutes. If you didn't request it, you can ignore this email.</p>
</div>"#,
        code = code.as_str()
    )
}

#[async_trait::async_trait]
impl Mailer for ResendMailer {
    async fn send_otp_email(&self, to: &EmailAddress, code: &OtpCode) -> Result<(), MailerError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| MailerError::Config("RESEND_API_KEY is not set".into()))?;

        let body = serde_json::json!({
            "from": self.from,
            "to": [to.as_str()],
            "subject": OTP_EMAIL_SUBJECT,
            "html": otp_email_html(code),
        });

        let resp = self
            .http
            .post(RESEND_API_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailerError::Delivery(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            tracing::debug!(to = %to, "Verification email accepted by provider");
            return Ok(());
        }

        // Surface the provider's reason so the client can show it.
        let detail = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| format!("HTTP {}", status));

        Err(MailerError::Delivery(detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_renders_code() {
        let code = OtpCode::parse("123456").unwrap();
        let html = otp_email_html(&code);
        assert!(html.contains("123456"));
        assert!(html.contains("10 minutes"));
    }

    #[test]
    fn test_subject_is_static() {
        assert_eq!(OTP_EMAIL_SUBJECT, "Your Eggcart verification code");
    }
}
