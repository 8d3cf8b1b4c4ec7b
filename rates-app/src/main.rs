//! # Quote Server
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the SQLite repository (fatal on failure)
//! - Create the quote service over the AwesomeAPI source
//! - Start the HTTP server

mod config;

use anyhow::Context;
use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exchange_rates::AwesomeApiSource;
use rates_hex::{RateService, inbound::HttpServer};
use rates_repo::build_repo;
use rates_types::RateRepository;

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .context("failed to create OTLP span exporter")?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("cotacao-server"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = config::Config::from_env()?;

    // OpenTelemetry export only when a collector is configured
    let otel = if config.otlp_enabled {
        Some(init_tracer()?)
    } else {
        None
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rates_app=debug,rates_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    if let Err(e) = config.budgets.validate() {
        tracing::warn!("{}", e);
    }

    tracing::info!("Starting quote server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);
    tracing::info!(
        "Upstream: {} (budget {:?}, storage budget {:?})",
        config.upstream_url,
        config.budgets.upstream,
        config.budgets.storage
    );

    // Build repository (handles connection and table creation)
    let repo = match build_repo(&config.database_url).await {
        Ok(repo) => repo,
        Err(e) => {
            tracing::error!("Erro: Falha ao conectar com banco de dados: {:#}", e);
            return Err(e.context("storage initialization failed"));
        }
    };

    let stored = repo.count_rates().await?;
    tracing::info!(stored, "quote history available");

    // Create the quote service
    let source = AwesomeApiSource::new(config.upstream_url.clone());
    let service = RateService::with_budgets(source, repo, config.budgets);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}
