//! In-memory record store backed by DashMap.
//!
//! Production: replace with PostgreSQL (sqlx) or similar ACID store.
//! This provides the same API surface for development and testing.

use crate::error::{StoreError, StoreResult};
use crate::filter::{CampaignFilter, LeadFilter};
use crate::models::*;
use crate::RecordStore;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use leadflow_core::types::{
    Budget, Campaign, CampaignStatus, Channel, Lead, LeadNote, LeadStatus, SourceKey,
};
use std::collections::BTreeMap;
use tracing::info;
use uuid::Uuid;

/// Thread-safe in-memory store for leads and campaigns.
pub struct MemoryStore {
    leads: DashMap<Uuid, Lead>,
    campaigns: DashMap<Uuid, Campaign>,
}

impl MemoryStore {
    pub fn new() -> Self {
        info!("Record store initialized (in-memory, development mode)");
        Self {
            leads: DashMap::new(),
            campaigns: DashMap::new(),
        }
    }

    // ─── Leads ─────────────────────────────────────────────────────────────

    pub fn get_lead(&self, id: Uuid) -> Option<Lead> {
        self.leads.get(&id).map(|r| r.value().clone())
    }

    pub fn create_lead(&self, req: CreateLeadRequest) -> StoreResult<Lead> {
        let name = req.name.trim().to_string();
        let email = req.email.trim().to_lowercase();
        validate_lead_name(&name)?;
        validate_email(&email)?;
        validate_score(req.score)?;

        let now = Utc::now();
        let lead = Lead {
            id: Uuid::new_v4(),
            name,
            email,
            phone: req.phone,
            company: req.company,
            source: req.source,
            status: req.status,
            score: req.score,
            campaign_id: req.campaign_id,
            notes: Vec::new(),
            tags: req.tags,
            created_at: now,
            updated_at: now,
        };
        self.leads.insert(lead.id, lead.clone());
        Ok(lead)
    }

    pub fn update_lead(&self, id: Uuid, req: UpdateLeadRequest) -> StoreResult<Lead> {
        if let Some(name) = &req.name {
            validate_lead_name(name.trim())?;
        }
        if let Some(email) = &req.email {
            validate_email(email.trim())?;
        }
        if let Some(score) = req.score {
            validate_score(score)?;
        }

        let mut entry = self
            .leads
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "lead", id })?;
        let lead = entry.value_mut();
        if let Some(name) = req.name {
            lead.name = name.trim().to_string();
        }
        if let Some(email) = req.email {
            lead.email = email.trim().to_lowercase();
        }
        if let Some(phone) = req.phone {
            lead.phone = Some(phone);
        }
        if let Some(company) = req.company {
            lead.company = Some(company);
        }
        if let Some(source) = req.source {
            lead.source = Some(source);
        }
        if let Some(status) = req.status {
            lead.status = status;
        }
        if let Some(score) = req.score {
            lead.score = score;
        }
        if let Some(campaign_id) = req.campaign_id {
            lead.campaign_id = Some(campaign_id);
        }
        if let Some(tags) = req.tags {
            lead.tags = tags;
        }
        lead.updated_at = Utc::now();
        Ok(lead.clone())
    }

    pub fn delete_lead(&self, id: Uuid) -> bool {
        self.leads.remove(&id).is_some()
    }

    /// Append a timestamped note and return the updated lead.
    pub fn add_lead_note(&self, id: Uuid, content: &str) -> StoreResult<Lead> {
        let content = content.trim();
        if content.is_empty() {
            return Err(StoreError::validation("note 'content' must not be empty"));
        }

        let mut entry = self
            .leads
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "lead", id })?;
        let lead = entry.value_mut();
        let now = Utc::now();
        lead.notes.push(LeadNote {
            content: content.to_string(),
            created_at: now,
        });
        lead.updated_at = now;
        Ok(lead.clone())
    }

    /// Filtered snapshot of all leads, newest first.
    pub fn list_leads(&self, filter: &LeadFilter) -> Vec<Lead> {
        let mut leads: Vec<Lead> = self
            .leads
            .iter()
            .filter(|r| filter.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        leads
    }

    // ─── Campaigns ─────────────────────────────────────────────────────────

    pub fn get_campaign(&self, id: Uuid) -> Option<Campaign> {
        self.campaigns.get(&id).map(|r| r.value().clone())
    }

    pub fn create_campaign(&self, req: CreateCampaignRequest) -> StoreResult<Campaign> {
        let name = req.name.trim().to_string();
        validate_campaign_name(&name)?;
        validate_budget(&req.budget)?;

        let now = Utc::now();
        let campaign = Campaign {
            id: Uuid::new_v4(),
            name,
            description: req.description,
            status: req.status,
            start_date: req.start_date,
            end_date: req.end_date,
            budget: req.budget,
            channels: req.channels,
            tags: req.tags,
            created_at: now,
            updated_at: now,
        };
        self.campaigns.insert(campaign.id, campaign.clone());
        Ok(campaign)
    }

    pub fn update_campaign(&self, id: Uuid, req: UpdateCampaignRequest) -> StoreResult<Campaign> {
        if let Some(name) = &req.name {
            validate_campaign_name(name.trim())?;
        }
        if let Some(budget) = &req.budget {
            validate_budget(budget)?;
        }

        let mut entry = self.campaigns.get_mut(&id).ok_or(StoreError::NotFound {
            entity: "campaign",
            id,
        })?;
        let campaign = entry.value_mut();
        if let Some(name) = req.name {
            campaign.name = name.trim().to_string();
        }
        if let Some(description) = req.description {
            campaign.description = Some(description);
        }
        if let Some(status) = req.status {
            campaign.status = status;
        }
        if let Some(start_date) = req.start_date {
            campaign.start_date = start_date;
        }
        if let Some(end_date) = req.end_date {
            campaign.end_date = Some(end_date);
        }
        if let Some(budget) = req.budget {
            campaign.budget = budget;
        }
        if let Some(channels) = req.channels {
            campaign.channels = channels;
        }
        if let Some(tags) = req.tags {
            campaign.tags = tags;
        }
        campaign.updated_at = Utc::now();
        Ok(campaign.clone())
    }

    /// Delete a campaign and detach it from every referencing lead.
    /// Leads survive; only their reference is cleared.
    pub fn delete_campaign(&self, id: Uuid) -> bool {
        let removed = self.campaigns.remove(&id).is_some();
        if removed {
            let now = Utc::now();
            for mut entry in self.leads.iter_mut() {
                if entry.value().campaign_id == Some(id) {
                    let lead = entry.value_mut();
                    lead.campaign_id = None;
                    lead.updated_at = now;
                }
            }
        }
        removed
    }

    /// Rollup over one campaign's attributed leads, for the campaign
    /// detail page. `None` when the campaign does not exist.
    pub fn campaign_metrics(&self, id: Uuid) -> Option<CampaignMetrics> {
        if !self.campaigns.contains_key(&id) {
            return None;
        }

        let leads: Vec<Lead> = self
            .leads
            .iter()
            .filter(|r| r.value().campaign_id == Some(id))
            .map(|r| r.value().clone())
            .collect();

        let total = leads.len() as u64;
        let qualified = leads
            .iter()
            .filter(|l| l.status == LeadStatus::Qualified)
            .count() as u64;
        let converted = leads
            .iter()
            .filter(|l| l.status == LeadStatus::Converted)
            .count() as u64;

        let conversion_rate = if total > 0 {
            converted as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let average_score = if total > 0 {
            leads.iter().map(|l| l.score as u64).sum::<u64>() as f64 / total as f64
        } else {
            0.0
        };

        let mut leads_by_source: BTreeMap<SourceKey, u64> = BTreeMap::new();
        let mut leads_by_status: BTreeMap<LeadStatus, u64> = BTreeMap::new();
        for lead in &leads {
            *leads_by_source
                .entry(SourceKey::from_source(lead.source))
                .or_insert(0) += 1;
            *leads_by_status.entry(lead.status).or_insert(0) += 1;
        }

        Some(CampaignMetrics {
            total_leads: total,
            qualified_leads: qualified,
            conversion_rate,
            average_score,
            leads_by_source,
            leads_by_status,
        })
    }

    /// Filtered snapshot of all campaigns, newest first.
    pub fn list_campaigns(&self, filter: &CampaignFilter) -> Vec<Campaign> {
        let mut campaigns: Vec<Campaign> = self
            .campaigns
            .iter()
            .filter(|r| filter.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();
        campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        campaigns
    }

    // ─── Demo Data ─────────────────────────────────────────────────────────

    /// Populate a handful of campaigns and leads so the dashboard has
    /// something to render on first boot. Gated by configuration.
    pub fn seed_demo_data(&self) {
        use chrono::Duration;
        let now = Utc::now();

        let campaigns = vec![
            (
                "Spring Product Launch",
                "Email and social push for the spring release",
                CampaignStatus::Active,
                12_000.0,
                vec![Channel::Email, Channel::Facebook],
                45,
                None,
            ),
            (
                "Webinar Signup Drive",
                "Weekly webinar funnel targeting trial users",
                CampaignStatus::Active,
                6_500.0,
                vec![Channel::Email, Channel::Website],
                30,
                None,
            ),
            (
                "Social Retargeting Push",
                "Retarget site visitors across social channels",
                CampaignStatus::Paused,
                3_000.0,
                vec![Channel::Facebook, Channel::Twitter],
                21,
                None,
            ),
            (
                "Year-End Newsletter",
                "Holiday promotion to the full mailing list",
                CampaignStatus::Completed,
                1_500.0,
                vec![Channel::Email],
                90,
                Some(60),
            ),
        ];

        let mut campaign_ids = Vec::new();
        for (name, description, status, amount, channels, start_days_ago, end_days_ago) in campaigns
        {
            let id = Uuid::new_v4();
            let start = now - Duration::days(start_days_ago);
            self.campaigns.insert(
                id,
                Campaign {
                    id,
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    status,
                    start_date: start,
                    end_date: end_days_ago.map(|d| now - Duration::days(d)),
                    budget: Budget {
                        amount,
                        currency: "USD".to_string(),
                    },
                    channels,
                    tags: Vec::new(),
                    created_at: start,
                    updated_at: now,
                },
            );
            campaign_ids.push(id);
        }

        let leads = vec![
            ("Ava Thornton", "ava.thornton@brightmail.example", Some(Channel::Email), LeadStatus::Converted, 92, Some(0), 40),
            ("Marcus Webb", "marcus.webb@acmecorp.example", Some(Channel::Facebook), LeadStatus::Qualified, 78, Some(0), 38),
            ("Priya Natarajan", "priya.n@stellar.example", Some(Channel::Email), LeadStatus::Qualified, 81, Some(0), 33),
            ("Jonas Keller", "j.keller@nordwind.example", Some(Channel::Website), LeadStatus::Contacted, 55, Some(1), 28),
            ("Sofia Marini", "sofia.marini@veloce.example", Some(Channel::Email), LeadStatus::New, 35, Some(1), 26),
            ("Derek Oyelaran", "derek.o@kinetic.example", Some(Channel::Website), LeadStatus::Converted, 88, Some(1), 24),
            ("Hannah Brooks", "hannah@brookslaw.example", Some(Channel::Twitter), LeadStatus::Unqualified, 18, Some(2), 19),
            ("Liam Donnelly", "liam.d@harborview.example", Some(Channel::Facebook), LeadStatus::Contacted, 47, Some(2), 17),
            ("Yuki Tanaka", "yuki.tanaka@sakura.example", Some(Channel::Twitter), LeadStatus::New, 29, Some(2), 15),
            ("Elena Vasquez", "elena.v@solaria.example", Some(Channel::Email), LeadStatus::Qualified, 74, Some(3), 70),
            ("Oscar Lindqvist", "oscar@lindqvist.example", Some(Channel::Email), LeadStatus::Converted, 85, Some(3), 65),
            ("Grace Abara", "grace.abara@meridian.example", Some(Channel::Phone), LeadStatus::Qualified, 69, None, 12),
            ("Tom Hendricks", "tom.h@copperfield.example", Some(Channel::Phone), LeadStatus::New, 22, None, 10),
            ("Isabel Fontaine", "isabel@fontaine.example", Some(Channel::Website), LeadStatus::Contacted, 51, None, 8),
            ("Noah Petersen", "noah.petersen@fjord.example", None, LeadStatus::New, 0, None, 6),
            ("Mia Castellanos", "mia.c@andina.example", None, LeadStatus::Contacted, 44, None, 5),
            ("Ruben Silva", "ruben.silva@atlantico.example", Some(Channel::Facebook), LeadStatus::New, 31, Some(0), 3),
            ("Clara Nguyen", "clara.nguyen@lotus.example", Some(Channel::Email), LeadStatus::Qualified, 77, Some(1), 1),
        ];

        let lead_count = leads.len();
        for (name, email, source, status, score, campaign_idx, days_ago) in leads {
            let id = Uuid::new_v4();
            let created = now - Duration::days(days_ago);
            self.leads.insert(
                id,
                Lead {
                    id,
                    name: name.to_string(),
                    email: email.to_string(),
                    phone: None,
                    company: None,
                    source,
                    status,
                    score,
                    campaign_id: campaign_idx.map(|i: usize| campaign_ids[i]),
                    notes: Vec::new(),
                    tags: Vec::new(),
                    created_at: created,
                    updated_at: created,
                },
            );
        }

        info!(
            campaigns = campaign_ids.len(),
            leads = lead_count,
            "Demo data seeded"
        );
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// Inherent methods shadow these, so the calls below resolve to the
// synchronous versions above.
#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_leads(&self, filter: &LeadFilter) -> StoreResult<Vec<Lead>> {
        Ok(self.list_leads(filter))
    }

    async fn list_campaigns(&self, filter: &CampaignFilter) -> StoreResult<Vec<Campaign>> {
        Ok(self.list_campaigns(filter))
    }
}

// ─── Validation ────────────────────────────────────────────────────────────

fn validate_lead_name(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::validation("lead 'name' must not be empty"));
    }
    Ok(())
}

fn validate_email(email: &str) -> StoreResult<()> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(StoreError::validation(
            "lead 'email' must be a valid email address",
        )),
    }
}

fn validate_score(score: u8) -> StoreResult<()> {
    if score > 100 {
        return Err(StoreError::validation(
            "lead 'score' must be between 0 and 100",
        ));
    }
    Ok(())
}

fn validate_campaign_name(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::validation("campaign 'name' must not be empty"));
    }
    Ok(())
}

fn validate_budget(budget: &Budget) -> StoreResult<()> {
    if !budget.amount.is_finite() || budget.amount < 0.0 {
        return Err(StoreError::validation(
            "campaign 'budget.amount' must be a non-negative number",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
