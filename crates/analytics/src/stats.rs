//! Shared counting and guarded-arithmetic helpers.
//!
//! Every division in the engine funnels through here so the zero-lead
//! guards live in exactly one place.

use leadflow_core::types::{Lead, LeadStatus, SourceKey};
use std::collections::BTreeMap;

/// `part / total * 100`, or `0.0` when `total` is zero. Never NaN.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// Arithmetic mean of lead scores, `0.0` for an empty group.
pub fn mean_score<'a, I>(leads: I) -> f64
where
    I: IntoIterator<Item = &'a Lead>,
{
    let (sum, count) = leads
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), lead| {
            (sum + lead.score as u64, count + 1)
        });
    if count == 0 {
        return 0.0;
    }
    sum as f64 / count as f64
}

pub fn count_status(leads: &[Lead], status: LeadStatus) -> u64 {
    leads.iter().filter(|l| l.status == status).count() as u64
}

/// Tally by status. Keys appear only for statuses that occur.
pub fn count_by_status(leads: &[Lead]) -> BTreeMap<LeadStatus, u64> {
    let mut counts = BTreeMap::new();
    for lead in leads {
        *counts.entry(lead.status).or_insert(0) += 1;
    }
    counts
}

/// Tally by source, with unset sources under [`SourceKey::Unspecified`].
pub fn count_by_source(leads: &[Lead]) -> BTreeMap<SourceKey, u64> {
    let mut counts = BTreeMap::new();
    for lead in leads {
        *counts.entry(SourceKey::from_source(lead.source)).or_insert(0) += 1;
    }
    counts
}
