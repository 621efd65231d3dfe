//! Campaign-to-lead join for the overview's per-campaign rows.

use crate::stats;
use leadflow_core::types::{Campaign, Lead, LeadStatus};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Per-campaign performance row in the overview response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignPerformance {
    pub id: Uuid,
    pub name: String,
    /// Leads attributed to this campaign.
    pub leads: u64,
    pub qualified: u64,
    pub converted: u64,
    /// Converted share of attributed leads, in percent.
    pub conversion: f64,
    /// Cost per lead. Zero when no leads are attributed, whatever the budget.
    pub cpl: f64,
}

/// Join campaigns against the lead set and compute one row per campaign.
///
/// Leads are indexed by campaign id once, so the join is O(leads +
/// campaigns) instead of a rescan per campaign. Leads without a campaign
/// reference, or referencing a campaign outside `campaigns`, contribute
/// to no row. Rows keep the order of `campaigns`.
pub fn campaign_performance(campaigns: &[Campaign], leads: &[Lead]) -> Vec<CampaignPerformance> {
    let mut by_campaign: HashMap<Uuid, Vec<&Lead>> = HashMap::with_capacity(campaigns.len());
    for lead in leads {
        if let Some(campaign_id) = lead.campaign_id {
            by_campaign.entry(campaign_id).or_default().push(lead);
        }
    }

    campaigns
        .iter()
        .map(|campaign| {
            let group = by_campaign
                .get(&campaign.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let total = group.len() as u64;
            let qualified = group
                .iter()
                .filter(|l| l.status == LeadStatus::Qualified)
                .count() as u64;
            let converted = group
                .iter()
                .filter(|l| l.status == LeadStatus::Converted)
                .count() as u64;
            let cpl = if total > 0 {
                campaign.budget.amount / total as f64
            } else {
                0.0
            };
            CampaignPerformance {
                id: campaign.id,
                name: campaign.name.clone(),
                leads: total,
                qualified,
                converted,
                conversion: stats::percentage(converted, total),
                cpl,
            }
        })
        .collect()
}
