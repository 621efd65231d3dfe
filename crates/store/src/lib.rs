//! Record storage for leads and campaigns.

#![warn(clippy::unwrap_used)]

pub mod error;
pub mod filter;
pub mod memory;
pub mod models;

use async_trait::async_trait;
use leadflow_core::types::{Campaign, Lead};

pub use error::{StoreError, StoreResult};
pub use filter::{CampaignFilter, LeadFilter};
pub use memory::MemoryStore;

/// Read-only, filterable view of the record store. This is the only
/// surface the analytics engine consumes; mutation stays behind the
/// concrete store type.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_leads(&self, filter: &LeadFilter) -> StoreResult<Vec<Lead>>;
    async fn list_campaigns(&self, filter: &CampaignFilter) -> StoreResult<Vec<Campaign>>;
}
