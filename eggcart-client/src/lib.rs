//! # Eggcart Client SDK
//!
//! A typed Rust client for the eggcart checkout API.

use eggcart_types::{
    CreateOrderRequest, CreatePaymentOrderRequest, CreatePaymentOrderResponse, LocalOrder,
    OrderId, OrderItem, SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse,
    VerifyPaymentRequest, VerifyPaymentResponse,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Checkout API client.
pub struct EggcartClient {
    base_url: String,
    http: Client,
}

impl EggcartClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // OTP
    //
    // These endpoints answer 200 even on logical failure; inspect
    // `success`/`error` on the returned body.
    // ─────────────────────────────────────────────────────────────────────────

    /// Requests a verification code for an email.
    pub async fn send_otp(&self, email: &str) -> Result<SendOtpResponse, ClientError> {
        let req = SendOtpRequest {
            email: email.to_string(),
        };
        self.post("/api/otp/send", &req).await
    }

    /// Redeems a verification code, creating the account on first success.
    pub async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
        password: Option<String>,
        full_name: Option<String>,
    ) -> Result<VerifyOtpResponse, ClientError> {
        let req = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
            password,
            full_name,
        };
        self.post("/api/otp/verify", &req).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payments
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates a gateway payment order for a major-unit amount.
    pub async fn create_payment_order(
        &self,
        amount: f64,
        currency: Option<String>,
        receipt: Option<&str>,
    ) -> Result<CreatePaymentOrderResponse, ClientError> {
        let req = CreatePaymentOrderRequest {
            amount,
            currency,
            receipt: receipt.map(String::from),
        };
        self.post("/api/payments/orders", &req).await
    }

    /// Verifies a completed checkout callback.
    pub async fn verify_payment(
        &self,
        req: &VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, ClientError> {
        self.post("/api/payments/verify", req).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Orders
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates a pending local order ahead of checkout.
    pub async fn create_order(
        &self,
        total_amount: f64,
        receipt: Option<&str>,
        items: Vec<OrderItem>,
    ) -> Result<LocalOrder, ClientError> {
        let req = CreateOrderRequest {
            total_amount,
            receipt: receipt.map(String::from),
            items,
        };
        self.post("/api/orders", &req).await
    }

    /// Gets a local order by ID.
    pub async fn get_order(&self, id: OrderId) -> Result<LocalOrder, ClientError> {
        self.get(&format!("/api/orders/{}", id)).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
