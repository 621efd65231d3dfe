//! Calendar bucketing of leads for trend views.

use crate::error::AnalyticsError;
use crate::stats;
use chrono::{DateTime, Datelike, Utc};
use leadflow_core::types::{Lead, LeadStatus};
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Bucket granularity for the time-series views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimelinePeriod {
    Day,
    Week,
    #[default]
    Month,
}

impl TimelinePeriod {
    /// Truncate a timestamp to this granularity's bucket key.
    ///
    /// Keys are zero-padded and left-to-right significant, so a plain
    /// string sort orders buckets chronologically. Weeks use the ISO
    /// week calendar; note the ISO week-year can differ from the
    /// calendar year near January 1st.
    pub fn bucket_key(&self, at: DateTime<Utc>) -> String {
        match self {
            Self::Day => at.format("%Y-%m-%d").to_string(),
            Self::Week => {
                let week = at.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Self::Month => at.format("%Y-%m").to_string(),
        }
    }
}

impl FromStr for TimelinePeriod {
    type Err = AnalyticsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(AnalyticsError::validation(
                "'period' must be one of day, week, month",
            )),
        }
    }
}

/// One bucket of the time-series output. Only buckets holding at least
/// one lead are emitted; the sequence is sparse, not a dense calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineBucket {
    pub bucket_key: String,
    pub total_leads: u64,
    pub qualified_leads: u64,
    pub converted_leads: u64,
    pub average_score: f64,
}

/// Group leads into calendar buckets, ascending by bucket key.
pub fn bucketize(leads: &[Lead], period: TimelinePeriod) -> Vec<TimelineBucket> {
    let mut groups: BTreeMap<String, Vec<&Lead>> = BTreeMap::new();
    for lead in leads {
        groups
            .entry(period.bucket_key(lead.created_at))
            .or_default()
            .push(lead);
    }

    groups
        .into_iter()
        .map(|(bucket_key, group)| TimelineBucket {
            bucket_key,
            total_leads: group.len() as u64,
            qualified_leads: group
                .iter()
                .filter(|l| l.status == LeadStatus::Qualified)
                .count() as u64,
            converted_leads: group
                .iter()
                .filter(|l| l.status == LeadStatus::Converted)
                .count() as u64,
            average_score: stats::mean_score(group.iter().copied()),
        })
        .collect()
}
