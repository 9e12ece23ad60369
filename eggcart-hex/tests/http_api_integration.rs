//! HTTP-level integration tests for the checkout API.
//!
//! These drive the full router: the OTP round-trip with its 200-always
//! body contract, the payment flow, and rate limiting.
//!
//! This test requires the `sqlite` feature flag.

#![cfg(feature = "sqlite")]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use eggcart_hex::{CheckoutService, inbound::HttpServer};
use eggcart_repo::{SqliteRepo, security};
use eggcart_types::{
    EmailAddress, GatewayError, GatewayOrder, IdentityError, IdentityProvider, Mailer,
    MailerError, NewUser, OtpCode, PaymentGateway,
};

const TEST_SECRET: &str = "test_secret";

/// Mailer that records the codes it "delivers".
#[derive(Clone, Default)]
struct CapturingMailer {
    codes: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send_otp_email(&self, _to: &EmailAddress, code: &OtpCode) -> Result<(), MailerError> {
        self.codes.lock().unwrap().push(code.as_str().to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct MapIdentity {
    users: Arc<Mutex<std::collections::HashMap<String, String>>>,
}

#[async_trait]
impl IdentityProvider for MapIdentity {
    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<String>, IdentityError> {
        Ok(self.users.lock().unwrap().get(email.as_str()).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<String, IdentityError> {
        let mut users = self.users.lock().unwrap();
        let id = format!("user_{}", users.len() + 1);
        users.insert(user.email.as_str().to_string(), id.clone());
        Ok(id)
    }
}

#[derive(Clone, Default)]
struct StubGateway;

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        _receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        Ok(GatewayOrder {
            id: "order_stub".into(),
            amount,
            currency: currency.to_string(),
        })
    }

    fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool, GatewayError> {
        Ok(security::verify_payment_signature(
            order_id, payment_id, signature, TEST_SECRET,
        ))
    }

    fn key_id(&self) -> Result<String, GatewayError> {
        Ok("rzp_test_key".to_string())
    }
}

type TestServer = HttpServer<SqliteRepo, CapturingMailer, MapIdentity, StubGateway>;

async fn create_test_server(requests_per_minute: u32) -> (TestServer, CapturingMailer) {
    // Use in-memory SQLite for tests
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let mailer = CapturingMailer::default();
    let service = CheckoutService::new(
        repo,
        mailer.clone(),
        MapIdentity::default(),
        StubGateway,
    );
    (
        HttpServer::with_rate_limit(service, requests_per_minute),
        mailer,
    )
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_otp_round_trip_over_http() {
    let (server, mailer) = create_test_server(100).await;
    let app = server.router();

    // Send
    let response = app
        .clone()
        .oneshot(post_json("/api/otp/send", serde_json::json!({"email": "a@b.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    let code = mailer.codes.lock().unwrap().last().unwrap().clone();

    // Verify
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/otp/verify",
            serde_json::json!({
                "email": "a@b.com",
                "otp": code,
                "password": "secret1",
                "fullName": "Alice"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["userId"].as_str().unwrap().starts_with("user_"));
}

#[tokio::test]
async fn test_otp_failure_is_http_200_with_error_body() {
    let (server, _) = create_test_server(100).await;
    let app = server.router();

    // No code was ever issued for this email
    let response = app
        .oneshot(post_json(
            "/api/otp/verify",
            serde_json::json!({
                "email": "nobody@b.com",
                "otp": "123456",
                "password": "secret1"
            }),
        ))
        .await
        .unwrap();

    // Logical failure still travels as HTTP 200
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "OTP not found. Please request a new one.");
}

#[tokio::test]
async fn test_wrong_code_reports_invalid_otp() {
    let (server, mailer) = create_test_server(100).await;
    let app = server.router();

    app.clone()
        .oneshot(post_json("/api/otp/send", serde_json::json!({"email": "a@b.com"})))
        .await
        .unwrap();

    let real_code = mailer.codes.lock().unwrap().last().unwrap().clone();
    let wrong = if real_code == "000000" { "000001" } else { "000000" };

    let response = app
        .oneshot(post_json(
            "/api/otp/verify",
            serde_json::json!({"email": "a@b.com", "otp": wrong, "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Invalid OTP");
}

#[tokio::test]
async fn test_payment_flow_over_http() {
    let (server, _) = create_test_server(100).await;
    let app = server.router();

    // Create the gateway order
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/payments/orders",
            serde_json::json!({"amount": 500.0, "receipt": "r1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["amount"], 50000);
    assert_eq!(json["currency"], "INR");
    assert_eq!(json["keyId"], "rzp_test_key");

    // Create the pending local order
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/orders",
            serde_json::json!({"totalAmount": 500.0, "items": []}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let order = body_json(response).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    // Verify the checkout callback
    let signature = security::payment_signature("order_stub", "pay_1", TEST_SECRET);
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/payments/verify",
            serde_json::json!({
                "razorpay_order_id": "order_stub",
                "razorpay_payment_id": "pay_1",
                "razorpay_signature": signature,
                "orderId": order_id,
                "community": "Green Meadows",
                "address": "Block C",
                "phone": "9876543210",
                "customerName": "Alice",
                "items": [],
                "totalAmount": 500.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["whatsappUrl"].as_str().unwrap().starts_with("https://wa.me/"));

    // The order is now paid/confirmed
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/orders/{}", order_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["payment_status"], "paid");
    assert_eq!(json["order_status"], "confirmed");
    assert_eq!(json["payment_id"], "pay_1");
}

#[tokio::test]
async fn test_tampered_signature_is_rejected_over_http() {
    let (server, _) = create_test_server(100).await;
    let app = server.router();

    let good = security::payment_signature("order_stub", "pay_1", TEST_SECRET);
    let mut tampered = good.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == '0' { '1' } else { '0' });

    let response = app
        .oneshot(post_json(
            "/api/payments/verify",
            serde_json::json!({
                "razorpay_order_id": "order_stub",
                "razorpay_payment_id": "pay_1",
                "razorpay_signature": tampered,
                "orderId": uuid::Uuid::new_v4().to_string(),
                "community": "Green Meadows",
                "address": "Block C",
                "phone": "9876543210",
                "customerName": "Alice",
                "items": [],
                "totalAmount": 500.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid payment signature");
}

#[tokio::test]
async fn test_rate_limiting_returns_429_when_exceeded() {
    // Only 2 requests allowed per minute
    let (server, _) = create_test_server(2).await;
    let app = server.router();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json("/api/otp/send", serde_json::json!({"email": "a@b.com"})))
            .await
            .unwrap();
        assert_ne!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    let response = app
        .clone()
        .oneshot(post_json("/api/otp/send", serde_json::json!({"email": "a@b.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Rate limit exceeded"));
    assert_eq!(json["retry_after_seconds"], 60);
}

#[tokio::test]
async fn test_rate_limiting_health_endpoint_bypassed() {
    let (server, _) = create_test_server(1).await;
    let app = server.router();

    for _ in 0..10 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
