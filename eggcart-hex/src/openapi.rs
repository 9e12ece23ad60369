//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use eggcart_types::domain::{LocalOrder, OrderId, OrderItem, OrderStatus, PaymentStatus};
use eggcart_types::dto::{
    CreateOrderRequest, CreatePaymentOrderRequest, CreatePaymentOrderResponse, SendOtpRequest,
    SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse, VerifyPaymentRequest,
    VerifyPaymentResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Issue a one-time passcode
#[utoipa::path(
    post,
    path = "/api/otp/send",
    tag = "otp",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Outcome in the body: success, or a structured error reason", body = SendOtpResponse)
    )
)]
async fn send_otp() {}

/// Redeem a one-time passcode and create the account
#[utoipa::path(
    post,
    path = "/api/otp/verify",
    tag = "otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Outcome in the body: the account id on success, or a structured error reason", body = VerifyOtpResponse)
    )
)]
async fn verify_otp() {}

/// Create a gateway payment order
#[utoipa::path(
    post,
    path = "/api/payments/orders",
    tag = "payments",
    request_body = CreatePaymentOrderRequest,
    responses(
        (status = 200, description = "Gateway order created", body = CreatePaymentOrderResponse),
        (status = 400, description = "Invalid amount"),
        (status = 502, description = "Gateway rejected the request")
    )
)]
async fn create_payment_order() {}

/// Verify a completed checkout
#[utoipa::path(
    post,
    path = "/api/payments/verify",
    tag = "payments",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Signature verified, order confirmed", body = VerifyPaymentResponse),
        (status = 400, description = "Invalid payment signature or invalid request")
    )
)]
async fn verify_payment() {}

/// Create a pending local order
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = LocalOrder),
        (status = 400, description = "Invalid request")
    )
)]
async fn create_order() {}

/// Get order by ID
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "orders",
    params(
        ("id" = OrderId, Path, description = "Order ID (UUID)")
    ),
    responses(
        (status = 200, description = "Order details", body = LocalOrder),
        (status = 404, description = "Order not found")
    )
)]
async fn get_order() {}

/// OpenAPI documentation for the checkout API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Eggcart Checkout API",
        version = "1.0.0",
        description = "Email OTP signup and payment verification for the Eggcart delivery service.\n\nThe OTP endpoints answer HTTP 200 even on logical failure; read `success`/`error` in the body.",
        license(name = "MIT"),
    ),
    paths(
        health,
        send_otp,
        verify_otp,
        create_payment_order,
        verify_payment,
        create_order,
        get_order,
    ),
    components(
        schemas(
            SendOtpRequest,
            SendOtpResponse,
            VerifyOtpRequest,
            VerifyOtpResponse,
            CreatePaymentOrderRequest,
            CreatePaymentOrderResponse,
            VerifyPaymentRequest,
            VerifyPaymentResponse,
            CreateOrderRequest,
            LocalOrder,
            OrderId,
            OrderItem,
            OrderStatus,
            PaymentStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "otp", description = "Email one-time-passcode issuance and redemption"),
        (name = "payments", description = "Gateway order creation and signature verification"),
        (name = "orders", description = "Local order intake"),
    )
)]
pub struct ApiDoc;
