#![warn(clippy::unwrap_used)]

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{
    Budget, Campaign, CampaignStatus, Channel, DateRange, Lead, LeadNote, LeadStatus, SourceKey,
};
