//! Record selection predicates applied by store reads.

use leadflow_core::types::{Campaign, CampaignStatus, Channel, DateRange, Lead, LeadStatus};
use uuid::Uuid;

/// Predicate over leads. Every field is optional; an empty filter
/// selects everything.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    /// Inclusive creation-date window.
    pub range: Option<DateRange>,
    pub status: Option<LeadStatus>,
    pub source: Option<Channel>,
    pub campaign_id: Option<Uuid>,
    /// Case-insensitive substring match over name, email, and company.
    pub search: Option<String>,
}

impl LeadFilter {
    pub fn in_range(range: Option<DateRange>) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        if let Some(range) = &self.range {
            if !range.contains(&lead.created_at) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if lead.status != status {
                return false;
            }
        }
        if let Some(source) = self.source {
            if lead.source != Some(source) {
                return false;
            }
        }
        if let Some(campaign_id) = self.campaign_id {
            if lead.campaign_id != Some(campaign_id) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let company_hit = lead
                .company
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle));
            if !lead.name.to_lowercase().contains(&needle)
                && !lead.email.to_lowercase().contains(&needle)
                && !company_hit
            {
                return false;
            }
        }
        true
    }
}

/// Predicate over campaigns.
#[derive(Debug, Clone, Copy, Default)]
pub struct CampaignFilter {
    /// Inclusive creation-date window.
    pub range: Option<DateRange>,
    pub status: Option<CampaignStatus>,
}

impl CampaignFilter {
    pub fn in_range(range: Option<DateRange>) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn matches(&self, campaign: &Campaign) -> bool {
        if let Some(range) = &self.range {
            if !range.contains(&campaign.created_at) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if campaign.status != status {
                return false;
            }
        }
        true
    }
}
