//! Axum REST handlers for lead and campaign records.

use crate::pagination::{self, PaginatedResponse, PaginationParams};
use crate::rest::{AppState, ErrorResponse};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use leadflow_core::types::{Campaign, CampaignStatus, Channel, Lead, LeadStatus};
use leadflow_store::models::*;
use leadflow_store::{CampaignFilter, LeadFilter, StoreError};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

/// Filterable query parameters for the lead list.
#[derive(Debug, Default, Deserialize)]
pub struct LeadListQuery {
    pub status: Option<LeadStatus>,
    pub source: Option<Channel>,
    pub campaign_id: Option<Uuid>,
    pub search: Option<String>,
}

impl LeadListQuery {
    fn into_filter(self) -> LeadFilter {
        LeadFilter {
            range: None,
            status: self.status,
            source: self.source,
            campaign_id: self.campaign_id,
            search: self.search,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CampaignListQuery {
    pub status: Option<CampaignStatus>,
}

// ─── Leads ─────────────────────────────────────────────────────────────────

pub async fn list_leads(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(query): Query<LeadListQuery>,
) -> Json<PaginatedResponse<Lead>> {
    let leads = state.store.list_leads(&query.into_filter());
    Json(pagination::paginate(leads, &page))
}

pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Lead>, StatusCode> {
    state.store.get_lead(id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

pub async fn create_lead(
    State(state): State<AppState>,
    Json(req): Json<CreateLeadRequest>,
) -> Result<(StatusCode, Json<Lead>), (StatusCode, Json<ErrorResponse>)> {
    match state.store.create_lead(req) {
        Ok(lead) => {
            metrics::counter!("api.leads.created").increment(1);
            Ok((StatusCode::CREATED, Json(lead)))
        }
        Err(err) => Err(store_error(err)),
    }
}

pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateLeadRequest>,
) -> Result<Json<Lead>, (StatusCode, Json<ErrorResponse>)> {
    state
        .store
        .update_lead(id, req)
        .map(Json)
        .map_err(store_error)
}

pub async fn delete_lead(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    if state.store.delete_lead(id) {
        metrics::counter!("api.leads.deleted").increment(1);
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// POST /api/v1/leads/{id}/notes — append a note, returns the updated lead.
pub async fn add_lead_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<Json<Lead>, (StatusCode, Json<ErrorResponse>)> {
    state
        .store
        .add_lead_note(id, &req.content)
        .map(Json)
        .map_err(store_error)
}

// ─── Campaigns ─────────────────────────────────────────────────────────────

pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(query): Query<CampaignListQuery>,
) -> Json<PaginatedResponse<Campaign>> {
    let filter = CampaignFilter {
        range: None,
        status: query.status,
    };
    let campaigns = state.store.list_campaigns(&filter);
    Json(pagination::paginate(campaigns, &page))
}

pub async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Campaign>, StatusCode> {
    state
        .store
        .get_campaign(id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn create_campaign(
    State(state): State<AppState>,
    Json(req): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Campaign>), (StatusCode, Json<ErrorResponse>)> {
    match state.store.create_campaign(req) {
        Ok(campaign) => {
            metrics::counter!("api.campaigns.created").increment(1);
            Ok((StatusCode::CREATED, Json(campaign)))
        }
        Err(err) => Err(store_error(err)),
    }
}

pub async fn update_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCampaignRequest>,
) -> Result<Json<Campaign>, (StatusCode, Json<ErrorResponse>)> {
    state
        .store
        .update_campaign(id, req)
        .map(Json)
        .map_err(store_error)
}

/// DELETE /api/v1/campaigns/{id} — also detaches the campaign from its leads.
pub async fn delete_campaign(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    if state.store.delete_campaign(id) {
        metrics::counter!("api.campaigns.deleted").increment(1);
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// GET /api/v1/campaigns/{id}/metrics — rollup of this campaign's leads.
pub async fn campaign_metrics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CampaignMetrics>, StatusCode> {
    state
        .store
        .campaign_metrics(id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

fn store_error(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let message = err.to_string();
    let (status, code) = match err {
        StoreError::Validation(_) => {
            warn!(error = %message, "Record validation failed");
            metrics::counter!("api.validation_errors").increment(1);
            (StatusCode::BAD_REQUEST, "validation_failed")
        }
        StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        StoreError::Unavailable(_) => {
            metrics::counter!("api.errors").increment(1);
            (StatusCode::BAD_GATEWAY, "store_unavailable")
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message,
        }),
    )
}
