//! HTTP server assembly: routes, middleware, and the metrics exporter.

use crate::records;
use crate::rest::{self, AppState};
use axum::routing::{get, post};
use axum::Router;
use leadflow_core::config::AppConfig;
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the application router with all endpoints mounted.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Leads
        .route("/api/v1/leads", get(records::list_leads).post(records::create_lead))
        .route(
            "/api/v1/leads/:id",
            get(records::get_lead)
                .put(records::update_lead)
                .delete(records::delete_lead),
        )
        .route("/api/v1/leads/:id/notes", post(records::add_lead_note))
        // Campaigns
        .route(
            "/api/v1/campaigns",
            get(records::list_campaigns).post(records::create_campaign),
        )
        .route(
            "/api/v1/campaigns/:id",
            get(records::get_campaign)
                .put(records::update_campaign)
                .delete(records::delete_campaign),
        )
        .route("/api/v1/campaigns/:id/metrics", get(records::campaign_metrics))
        // Analytics
        .route("/api/v1/analytics/overview", get(rest::analytics_overview))
        .route("/api/v1/analytics/sources", get(rest::analytics_sources))
        .route("/api/v1/analytics/timeline", get(rest::analytics_timeline))
        // Operational endpoints
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Main API server for the dashboard backend.
pub struct ApiServer {
    config: AppConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: AppConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Start the HTTP server. Runs until the process is stopped.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = build_router(self.state.clone());

        let addr = SocketAddr::new(self.config.server.host.parse()?, self.config.server.port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the Prometheus exporter on its own port.
    pub fn start_metrics(&self) -> anyhow::Result<()> {
        let addr = SocketAddr::new(
            self.config.server.host.parse()?,
            self.config.server.metrics_port,
        );
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()?;

        info!(port = self.config.server.metrics_port, "Metrics exporter started");
        Ok(())
    }
}
