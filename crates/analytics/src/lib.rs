//! Read-side aggregation engine for the lead dashboard.
//!
//! Three operations are exposed to the HTTP layer: an overview rollup,
//! a per-source breakdown, and a time-series view. All of them read a
//! snapshot from the record store and reduce it in memory; nothing here
//! mutates state.

#![warn(clippy::unwrap_used)]

pub mod campaigns;
pub mod engine;
pub mod error;
pub mod range;
pub mod sources;
pub mod stats;
pub mod timeline;

pub use campaigns::CampaignPerformance;
pub use engine::{AnalyticsEngine, OverviewMetrics};
pub use error::{AnalyticsError, AnalyticsResult};
pub use sources::SourceBreakdown;
pub use timeline::{TimelineBucket, TimelinePeriod};
