//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use eggcart_types::{
    AppError, CheckoutRepository, CreateOrderRequest, CreatePaymentOrderRequest,
    IdentityProvider, Mailer, OrderId, PaymentGateway, SendOtpRequest, SendOtpResponse,
    VerifyOtpRequest, VerifyOtpResponse, VerifyPaymentRequest,
};

use crate::CheckoutService;

/// Application state shared across handlers.
pub struct AppState<R, M, I, G> {
    pub service: CheckoutService<R, M, I, G>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// OTP endpoints
//
// These answer HTTP 200 even on logical failure; the body carries the real
// outcome so RPC-style clients read `error` instead of catching transport
// exceptions.
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req))]
pub async fn send_otp<R, M, I, G>(
    State(state): State<Arc<AppState<R, M, I, G>>>,
    Json(req): Json<SendOtpRequest>,
) -> Json<SendOtpResponse>
where
    R: CheckoutRepository,
    M: Mailer,
    I: IdentityProvider,
    G: PaymentGateway,
{
    match state.service.send_otp(req).await {
        Ok(()) => Json(SendOtpResponse {
            success: true,
            error: None,
        }),
        Err(e) => {
            tracing::warn!(error = ?e, "OTP send failed");
            Json(SendOtpResponse {
                success: false,
                error: Some(e.to_string()),
            })
        }
    }
}

#[tracing::instrument(skip(state, req))]
pub async fn verify_otp<R, M, I, G>(
    State(state): State<Arc<AppState<R, M, I, G>>>,
    Json(req): Json<VerifyOtpRequest>,
) -> Json<VerifyOtpResponse>
where
    R: CheckoutRepository,
    M: Mailer,
    I: IdentityProvider,
    G: PaymentGateway,
{
    match state.service.verify_otp(req).await {
        Ok(user_id) => Json(VerifyOtpResponse {
            success: true,
            user_id: Some(user_id),
            error: None,
        }),
        Err(e) => {
            tracing::warn!(error = ?e, "OTP verification failed");
            Json(VerifyOtpResponse {
                success: false,
                user_id: None,
                error: Some(e.to_string()),
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment endpoints
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req), fields(amount = req.amount))]
pub async fn create_payment_order<R, M, I, G>(
    State(state): State<Arc<AppState<R, M, I, G>>>,
    Json(req): Json<CreatePaymentOrderRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: CheckoutRepository,
    M: Mailer,
    I: IdentityProvider,
    G: PaymentGateway,
{
    let resp = state
        .service
        .create_payment_order(req)
        .await
        .map_err(AppError::from)?;
    Ok(Json(resp))
}

#[tracing::instrument(skip(state, req), fields(order_id = %req.order_id))]
pub async fn verify_payment<R, M, I, G>(
    State(state): State<Arc<AppState<R, M, I, G>>>,
    Json(req): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: CheckoutRepository,
    M: Mailer,
    I: IdentityProvider,
    G: PaymentGateway,
{
    let resp = state
        .service
        .verify_payment(req)
        .await
        .map_err(AppError::from)?;
    Ok(Json(resp))
}

// ─────────────────────────────────────────────────────────────────────────────
// Order intake
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req), fields(total = req.total_amount))]
pub async fn create_order<R, M, I, G>(
    State(state): State<Arc<AppState<R, M, I, G>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: CheckoutRepository,
    M: Mailer,
    I: IdentityProvider,
    G: PaymentGateway,
{
    let order = state
        .service
        .create_order(req)
        .await
        .map_err(AppError::from)?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[tracing::instrument(skip(state), fields(order_id = %id))]
pub async fn get_order<R, M, I, G>(
    State(state): State<Arc<AppState<R, M, I, G>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: CheckoutRepository,
    M: Mailer,
    I: IdentityProvider,
    G: PaymentGateway,
{
    let order_id: OrderId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid order ID".into()))?;

    let order = state
        .service
        .get_order(order_id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(order))
}
