//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use eggcart_types::{CheckoutRepository, IdentityProvider, Mailer, PaymentGateway};

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::CheckoutService;
use crate::openapi::ApiDoc;

/// HTTP Server for the checkout API.
pub struct HttpServer<R, M, I, G> {
    state: Arc<AppState<R, M, I, G>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<R, M, I, G> HttpServer<R, M, I, G>
where
    R: CheckoutRepository,
    M: Mailer,
    I: IdentityProvider,
    G: PaymentGateway,
{
    /// Creates a new HTTP server with the given service.
    pub fn new(service: CheckoutService<R, M, I, G>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 100 req/min default
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(service: CheckoutService<R, M, I, G>, requests_per_minute: u32) -> Self {
        use std::time::Duration;
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::new(
                requests_per_minute,
                Duration::from_secs(60),
            )),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/otp/send", post(handlers::send_otp::<R, M, I, G>))
            .route("/api/otp/verify", post(handlers::verify_otp::<R, M, I, G>))
            .route(
                "/api/payments/orders",
                post(handlers::create_payment_order::<R, M, I, G>),
            )
            .route(
                "/api/payments/verify",
                post(handlers::verify_payment::<R, M, I, G>),
            )
            .route("/api/orders", post(handlers::create_order::<R, M, I, G>))
            .route("/api/orders/{id}", get(handlers::get_order::<R, M, I, G>))
            .route(
                "/api-docs/openapi.json",
                get(|| async { Json(ApiDoc::openapi()) }),
            )
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
