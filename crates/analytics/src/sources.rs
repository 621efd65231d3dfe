//! Per-source breakdown of the lead set.

use crate::stats;
use leadflow_core::types::{Lead, LeadStatus, SourceKey};
use serde::Serialize;
use std::collections::BTreeMap;

/// One row of the source analytics view.
///
/// A group exists only when it holds at least one lead, so the per-row
/// rates never face a zero denominator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceBreakdown {
    pub source: SourceKey,
    pub total: u64,
    pub qualified: u64,
    pub converted: u64,
    pub qualification_rate: f64,
    pub conversion_rate: f64,
    pub average_score: f64,
}

/// Group leads by acquisition source and compute per-group rates.
///
/// Leads without a source land in the `unspecified` group rather than
/// being dropped. Rows come back sorted by source name, unspecified
/// last, so output is stable for a given snapshot.
pub fn source_breakdown(leads: &[Lead]) -> Vec<SourceBreakdown> {
    let mut groups: BTreeMap<SourceKey, Vec<&Lead>> = BTreeMap::new();
    for lead in leads {
        groups
            .entry(SourceKey::from_source(lead.source))
            .or_default()
            .push(lead);
    }

    groups
        .into_iter()
        .map(|(source, group)| {
            let total = group.len() as u64;
            let qualified = group
                .iter()
                .filter(|l| l.status == LeadStatus::Qualified)
                .count() as u64;
            let converted = group
                .iter()
                .filter(|l| l.status == LeadStatus::Converted)
                .count() as u64;
            SourceBreakdown {
                source,
                total,
                qualified,
                converted,
                qualification_rate: stats::percentage(qualified, total),
                conversion_rate: stats::percentage(converted, total),
                average_score: stats::mean_score(group.iter().copied()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use leadflow_core::types::Channel;
    use uuid::Uuid;

    fn make_lead(status: LeadStatus, source: Option<Channel>, score: u8) -> Lead {
        let now = Utc::now();
        Lead {
            id: Uuid::new_v4(),
            name: "Test Lead".to_string(),
            email: "lead@example.test".to_string(),
            phone: None,
            company: None,
            source,
            status,
            score,
            campaign_id: None,
            notes: Vec::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_groups_by_source_with_rates() {
        let leads = vec![
            make_lead(LeadStatus::Qualified, Some(Channel::Email), 80),
            make_lead(LeadStatus::Converted, Some(Channel::Email), 90),
            make_lead(LeadStatus::New, Some(Channel::Email), 40),
            make_lead(LeadStatus::New, Some(Channel::Twitter), 20),
        ];

        let rows = source_breakdown(&leads);
        assert_eq!(rows.len(), 2);

        let email = &rows[0];
        assert_eq!(email.source, SourceKey::Email);
        assert_eq!(email.total, 3);
        assert_eq!(email.qualified, 1);
        assert_eq!(email.converted, 1);
        assert!((email.qualification_rate - 100.0 / 3.0).abs() < 1e-9);
        assert!((email.conversion_rate - 100.0 / 3.0).abs() < 1e-9);
        assert!((email.average_score - 70.0).abs() < f64::EPSILON);

        let twitter = &rows[1];
        assert_eq!(twitter.source, SourceKey::Twitter);
        assert_eq!(twitter.total, 1);
        assert!((twitter.qualification_rate).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unset_source_is_grouped_not_dropped() {
        let leads = vec![
            make_lead(LeadStatus::New, None, 10),
            make_lead(LeadStatus::Qualified, None, 70),
            make_lead(LeadStatus::New, Some(Channel::Phone), 30),
        ];

        let rows = source_breakdown(&leads);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.iter().map(|r| r.total).sum::<u64>(), 3);

        // Unspecified sorts after every named source.
        assert_eq!(rows[0].source, SourceKey::Phone);
        assert_eq!(rows[1].source, SourceKey::Unspecified);
        assert_eq!(rows[1].total, 2);
        assert!((rows[1].qualification_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_lead_set_yields_no_rows() {
        assert!(source_breakdown(&[]).is_empty());
    }

    #[test]
    fn test_row_order_is_alphabetical_by_source() {
        let leads = vec![
            make_lead(LeadStatus::New, Some(Channel::Website), 10),
            make_lead(LeadStatus::New, Some(Channel::Facebook), 10),
            make_lead(LeadStatus::New, Some(Channel::Phone), 10),
            make_lead(LeadStatus::New, Some(Channel::Email), 10),
        ];

        let order: Vec<SourceKey> = source_breakdown(&leads).iter().map(|r| r.source).collect();
        assert_eq!(
            order,
            vec![
                SourceKey::Email,
                SourceKey::Facebook,
                SourceKey::Phone,
                SourceKey::Website
            ]
        );
    }
}
