//! LeadFlow — analytics backend for the lead management dashboard.
//!
//! Main entry point that wires the record store, the aggregation
//! engine, and the HTTP server.

use clap::Parser;
use leadflow_analytics::AnalyticsEngine;
use leadflow_api::{ApiServer, AppState};
use leadflow_core::config::AppConfig;
use leadflow_store::MemoryStore;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "leadflow")]
#[command(about = "Lead and campaign analytics backend")]
#[command(version)]
struct Cli {
    /// HTTP port (overrides config)
    #[arg(long, env = "LEADFLOW__SERVER__PORT")]
    port: Option<u16>,

    /// Metrics port (overrides config)
    #[arg(long, env = "LEADFLOW__SERVER__METRICS_PORT")]
    metrics_port: Option<u16>,

    /// Start with an empty store (skip demo data)
    #[arg(long, default_value_t = false)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadflow=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("LeadFlow starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(port) = cli.metrics_port {
        config.server.metrics_port = port;
    }
    if cli.no_seed {
        config.store.seed_demo_data = false;
    }

    info!(
        port = config.server.port,
        metrics_port = config.server.metrics_port,
        seed_demo_data = config.store.seed_demo_data,
        "Configuration loaded"
    );

    // Initialize the record store
    let store = Arc::new(MemoryStore::new());
    if config.store.seed_demo_data {
        store.seed_demo_data();
    }

    // Initialize the aggregation engine
    let engine = Arc::new(AnalyticsEngine::new(
        store.clone(),
        Duration::from_millis(config.server.request_timeout_ms),
    ));

    let state = AppState {
        store,
        engine,
        start_time: Instant::now(),
    };
    let api_server = ApiServer::new(config, state);

    // Start metrics exporter
    if let Err(e) = api_server.start_metrics() {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("LeadFlow is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
