//! REST handlers for the analytics endpoints and operational probes.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use leadflow_analytics::{
    AnalyticsEngine, AnalyticsError, OverviewMetrics, SourceBreakdown, TimelineBucket,
};
use leadflow_store::MemoryStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub engine: Arc<AnalyticsEngine>,
    pub start_time: Instant,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TimelineQuery {
    pub period: Option<String>,
}

/// GET /api/v1/analytics/overview — dashboard rollup for an optional
/// date window.
pub async fn analytics_overview(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<OverviewMetrics>, (StatusCode, Json<ErrorResponse>)> {
    metrics::counter!("api.analytics.overview").increment(1);
    state
        .engine
        .overview(query.start_date.as_deref(), query.end_date.as_deref())
        .await
        .map(Json)
        .map_err(analytics_error)
}

/// GET /api/v1/analytics/sources — per-source breakdown for an optional
/// date window.
pub async fn analytics_sources(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Vec<SourceBreakdown>>, (StatusCode, Json<ErrorResponse>)> {
    metrics::counter!("api.analytics.sources").increment(1);
    state
        .engine
        .source_analytics(query.start_date.as_deref(), query.end_date.as_deref())
        .await
        .map(Json)
        .map_err(analytics_error)
}

/// GET /api/v1/analytics/timeline — bucketed trend over the full record
/// set. Takes a granularity, never a date window.
pub async fn analytics_timeline(
    State(state): State<AppState>,
    Query(query): Query<TimelineQuery>,
) -> Result<Json<Vec<TimelineBucket>>, (StatusCode, Json<ErrorResponse>)> {
    metrics::counter!("api.analytics.timeline").increment(1);
    state
        .engine
        .timeline(query.period.as_deref())
        .await
        .map(Json)
        .map_err(analytics_error)
}

/// Map engine failures onto the wire: bad input is the caller's fault,
/// store trouble is reported without leaking internals.
fn analytics_error(err: AnalyticsError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        AnalyticsError::Validation(message) => {
            warn!(error = %message, "Analytics query validation failed");
            metrics::counter!("api.validation_errors").increment(1);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "invalid_query".to_string(),
                    message,
                }),
            )
        }
        AnalyticsError::Store(err) => {
            error!(error = %err, "Analytics store read failed");
            metrics::counter!("api.errors").increment(1);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "store_unavailable".to_string(),
                    message: "Upstream store failure".to_string(),
                }),
            )
        }
        AnalyticsError::Timeout => {
            error!("Analytics store read timed out");
            metrics::counter!("api.errors").increment(1);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: "store_timeout".to_string(),
                    message: "Aggregation read exceeded the request deadline".to_string(),
                }),
            )
        }
    }
}

/// GET /health — Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Readiness probe for Kubernetes.
/// Returns 200 only when the store answers a trivial read.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.engine.timeline(Some("day")).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /live — Liveness probe for Kubernetes.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}
