//! # Payments Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Create the payment service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;

const DEFAULT_FILTER: &str = "info,payments_app=debug,payments_hex=debug,payments_repo=debug";

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("payments-service"), provider))
}

/// Installs the global subscriber.
///
/// Spans are exported over OTLP only when a collector endpoint is configured.
fn init_tracing() -> anyhow::Result<Option<sdktrace::SdkTracerProvider>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    if std::env::var_os("OTEL_EXPORTER_OTLP_ENDPOINT").is_some() {
        let (otel_tracer, otel_provider) = init_tracer()?;
        registry
            .with(tracing_opentelemetry::layer().with_tracer(otel_tracer))
            .init();
        Ok(Some(otel_provider))
    } else {
        registry.init();
        Ok(None)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let otel_provider = init_tracing()?;

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting payments server on port {}", config.port);

    // Build repository (handles connection and schema)
    let repo = build_repo(&config.database_url, &config.table_name).await?;
    tracing::info!(
        backend = repo.backend(),
        table = %config.table_name,
        "repository ready"
    );

    let service = PaymentService::new(repo);
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Flush spans before exit
    if let Some(provider) = otel_provider {
        if let Err(e) = provider.shutdown() {
            tracing::warn!("failed to flush traces: {}", e);
        }
    }
    Ok(())
}
