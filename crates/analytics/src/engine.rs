//! Request-scoped orchestration of the three read operations.
//!
//! The engine validates caller input, reads one snapshot from the
//! record store under a deadline, and reduces it with the pure helpers
//! in the sibling modules. A failed or late read fails the whole
//! request; there are no retries and no partial output.

use crate::campaigns::{self, CampaignPerformance};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::range;
use crate::sources::{self, SourceBreakdown};
use crate::stats;
use crate::timeline::{self, TimelineBucket, TimelinePeriod};
use leadflow_core::types::{Campaign, Lead, LeadStatus, SourceKey};
use leadflow_store::{CampaignFilter, LeadFilter, RecordStore};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Overview rollup: headline counters, the day-bucketed trend, and
/// per-campaign rows, all computed from the same filtered snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewMetrics {
    pub total_leads: u64,
    pub qualified_leads: u64,
    /// Qualified share of all leads, in percent.
    pub conversion_rate: f64,
    pub leads_by_source: BTreeMap<SourceKey, u64>,
    pub leads_by_status: BTreeMap<LeadStatus, u64>,
    pub leads_over_time: Vec<TimelineBucket>,
    pub campaign_performance: Vec<CampaignPerformance>,
}

pub struct AnalyticsEngine {
    store: Arc<dyn RecordStore>,
    read_timeout: Duration,
}

impl AnalyticsEngine {
    pub fn new(store: Arc<dyn RecordStore>, read_timeout: Duration) -> Self {
        Self {
            store,
            read_timeout,
        }
    }

    /// Dashboard overview for an optional date window.
    ///
    /// The window applies to leads and campaigns alike, keyed on their
    /// creation timestamps.
    pub async fn overview(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> AnalyticsResult<OverviewMetrics> {
        let window = range::resolve_range(start_date, end_date)?;
        let leads = self.fetch_leads(&LeadFilter::in_range(window)).await?;
        let campaigns = self
            .fetch_campaigns(&CampaignFilter::in_range(window))
            .await?;
        debug!(
            leads = leads.len(),
            campaigns = campaigns.len(),
            windowed = window.is_some(),
            "Overview snapshot loaded"
        );

        let total_leads = leads.len() as u64;
        let qualified_leads = stats::count_status(&leads, LeadStatus::Qualified);
        Ok(OverviewMetrics {
            total_leads,
            qualified_leads,
            conversion_rate: stats::percentage(qualified_leads, total_leads),
            leads_by_source: stats::count_by_source(&leads),
            leads_by_status: stats::count_by_status(&leads),
            leads_over_time: timeline::bucketize(&leads, TimelinePeriod::Day),
            campaign_performance: campaigns::campaign_performance(&campaigns, &leads),
        })
    }

    /// Per-source breakdown for an optional date window.
    pub async fn source_analytics(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> AnalyticsResult<Vec<SourceBreakdown>> {
        let window = range::resolve_range(start_date, end_date)?;
        let leads = self.fetch_leads(&LeadFilter::in_range(window)).await?;
        Ok(sources::source_breakdown(&leads))
    }

    /// Time-series view over the full record set.
    ///
    /// Unlike the other two operations this one takes no date window;
    /// it always reads every lead. Granularity defaults to month.
    pub async fn timeline(&self, period: Option<&str>) -> AnalyticsResult<Vec<TimelineBucket>> {
        let period = match period.map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => raw.parse::<TimelinePeriod>()?,
            None => TimelinePeriod::default(),
        };
        let leads = self.fetch_leads(&LeadFilter::default()).await?;
        Ok(timeline::bucketize(&leads, period))
    }

    async fn fetch_leads(&self, filter: &LeadFilter) -> AnalyticsResult<Vec<Lead>> {
        let read = self.store.list_leads(filter);
        Ok(tokio::time::timeout(self.read_timeout, read)
            .await
            .map_err(|_| AnalyticsError::Timeout)??)
    }

    async fn fetch_campaigns(&self, filter: &CampaignFilter) -> AnalyticsResult<Vec<Campaign>> {
        let read = self.store.list_campaigns(filter);
        Ok(tokio::time::timeout(self.read_timeout, read)
            .await
            .map_err(|_| AnalyticsError::Timeout)??)
    }
}
