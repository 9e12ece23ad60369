//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Field naming follows the wire contract the mobile client already
//! speaks: camelCase for client-originated fields, snake_case for the
//! gateway-issued `razorpay_*` triple.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::OrderItem;

// ─────────────────────────────────────────────────────────────────────────────
// OTP DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to issue a one-time passcode.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendOtpRequest {
    /// Destination mailbox
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// Response to an OTP issuance request.
///
/// Always delivered with HTTP 200; `success`/`error` carry the real
/// outcome so RPC-style clients read the body instead of catching
/// transport errors.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendOtpResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request to redeem a one-time passcode and create the account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// The 6-digit code from the email
    #[schema(example = "123456")]
    pub otp: String,
    /// Password for the new account (min 6 chars); unused when the
    /// account already exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Display name stored as profile metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Response to an OTP redemption request (HTTP 200 always, like send).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub success: bool,
    /// Account id, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a gateway payment order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentOrderRequest {
    /// Amount in major currency units (rupees)
    #[schema(example = 500.0)]
    pub amount: f64,
    /// Defaults to INR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Receipt reference; defaults to a timestamp-derived value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

/// Response with everything the client-side checkout widget needs.
/// The key secret is never returned.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentOrderResponse {
    /// Gateway order id
    pub order_id: String,
    /// Amount in minor currency units (paise)
    #[schema(example = 50000)]
    pub amount: i64,
    #[schema(example = "INR")]
    pub currency: String,
    /// Public key id for the checkout widget
    pub key_id: String,
}

/// Request to verify a completed checkout.
///
/// The `razorpay_*` triple is passed through exactly as issued by the
/// gateway's checkout callback.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,

    /// Local order to finalize
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub community: String,
    pub address: String,
    pub phone: String,
    #[serde(rename = "customerName")]
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    /// Order total in major currency units
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    #[serde(rename = "subscriptionEndDate", skip_serializing_if = "Option::is_none")]
    pub subscription_end_date: Option<String>,
}

/// Response after a verified payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    /// Deep link the client opens to notify the operator; nothing is
    /// sent server-side
    pub whatsapp_url: String,
    pub admin_phone: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Order intake DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a pending local order ahead of checkout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Total in major currency units
    #[schema(example = 500.0)]
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}
