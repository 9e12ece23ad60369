//! # Eggcart Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Construct the outbound service clients
//! - Create the checkout service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eggcart_hex::{CheckoutService, inbound::HttpServer};
use eggcart_repo::{GoTrueIdentity, RazorpayGateway, ResendMailer, build_repo};

fn init_tracer() -> (sdktrace::Tracer, sdktrace::SdkTracerProvider) {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .expect("failed to create OTLP span exporter");

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    (provider.tracer("eggcart-server"), provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing
    let (otel_tracer, otel_provider) = init_tracer();
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,eggcart_app=debug,eggcart_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting eggcart server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // Outbound adapters read their credentials lazily; a missing secret
    // surfaces as a configuration error at first use, not here.
    let mailer = ResendMailer::from_env();
    let identity = GoTrueIdentity::from_env();
    let gateway = RazorpayGateway::from_env();

    // Create the checkout service
    let mut service = CheckoutService::new(repo, mailer, identity, gateway);
    if let Some(phone) = config.admin_phone {
        service = service.with_admin_phone(phone);
    }

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    let _ = otel_provider.shutdown();
    Ok(())
}
