//! Request and read-model types for the record store.

use chrono::{DateTime, Utc};
use leadflow_core::types::{Budget, CampaignStatus, Channel, LeadStatus, SourceKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ─── Lead requests ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeadRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<Channel>,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub score: u8,
    pub campaign_id: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLeadRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<Channel>,
    pub status: Option<LeadStatus>,
    pub score: Option<u8>,
    pub campaign_id: Option<Uuid>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub content: String,
}

// ─── Campaign requests ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: CampaignStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCampaignRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<CampaignStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub budget: Option<Budget>,
    pub channels: Option<Vec<Channel>>,
    pub tags: Option<Vec<String>>,
}

// ─── Read models ───────────────────────────────────────────────────────────

/// Rollup served on a campaign's detail page. Conversion rate here is
/// converted-based, unlike the overview's qualified-based rate.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignMetrics {
    pub total_leads: u64,
    pub qualified_leads: u64,
    pub conversion_rate: f64,
    pub average_score: f64,
    pub leads_by_source: BTreeMap<SourceKey, u64>,
    pub leads_by_status: BTreeMap<LeadStatus, u64>,
}
