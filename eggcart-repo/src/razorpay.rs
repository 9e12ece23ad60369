//! Razorpay gateway adapter.

use std::time::Duration;

use serde::Deserialize;

use eggcart_types::{GatewayError, GatewayOrder, PaymentGateway};

use crate::security;

const RAZORPAY_API_URL: &str = "https://api.razorpay.com/v1";

/// Razorpay REST client.
///
/// Order creation uses basic auth built from the key id/secret pair; the
/// secret also keys the checkout-callback HMAC and never leaves this
/// adapter. Missing credentials surface at first use.
pub struct RazorpayGateway {
    http: reqwest::Client,
    key_id: Option<String>,
    key_secret: Option<String>,
}

#[derive(Deserialize)]
struct RazorpayOrderBody {
    id: String,
    amount: i64,
    currency: String,
}

#[derive(Deserialize)]
struct RazorpayErrorBody {
    error: RazorpayErrorDetail,
}

#[derive(Deserialize)]
struct RazorpayErrorDetail {
    description: String,
}

impl RazorpayGateway {
    /// Builds the gateway from `RAZORPAY_KEY_ID` and
    /// `RAZORPAY_KEY_SECRET`.
    pub fn from_env() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
            key_id: std::env::var("RAZORPAY_KEY_ID").ok(),
            key_secret: std::env::var("RAZORPAY_KEY_SECRET").ok(),
        }
    }

    fn credentials(&self) -> Result<(&str, &str), GatewayError> {
        let key_id = self
            .key_id
            .as_deref()
            .ok_or_else(|| GatewayError::Config("RAZORPAY_KEY_ID is not set".into()))?;
        let secret = self
            .key_secret
            .as_deref()
            .ok_or_else(|| GatewayError::Config("RAZORPAY_KEY_SECRET is not set".into()))?;
        Ok((key_id, secret))
    }
}

#[async_trait::async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        let (key_id, secret) = self.credentials()?;

        let body = serde_json::json!({
            "amount": amount,
            "currency": currency,
            "receipt": receipt,
        });

        let resp = self
            .http
            .post(format!("{}/orders", RAZORPAY_API_URL))
            .basic_auth(key_id, Some(secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            let order: RazorpayOrderBody = resp
                .json()
                .await
                .map_err(|e| GatewayError::Transport(e.to_string()))?;
            return Ok(GatewayOrder {
                id: order.id,
                amount: order.amount,
                currency: order.currency,
            });
        }

        // Propagate the gateway's own description as the failure reason.
        let description = resp
            .json::<RazorpayErrorBody>()
            .await
            .map(|b| b.error.description)
            .unwrap_or_else(|_| format!("HTTP {}", status));

        tracing::warn!(%status, %description, "Gateway rejected order creation");
        Err(GatewayError::Rejected(description))
    }

    fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool, GatewayError> {
        let (_, secret) = self.credentials()?;
        Ok(security::verify_payment_signature(
            order_id, payment_id, signature, secret,
        ))
    }

    fn key_id(&self) -> Result<String, GatewayError> {
        self.credentials().map(|(key_id, _)| key_id.to_string())
    }
}
