use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Leads ─────────────────────────────────────────────────────────────────

/// A prospective customer record captured by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// Acquisition channel. Absent when the lead was entered manually.
    pub source: Option<Channel>,
    pub status: LeadStatus,
    /// Quality score in [0, 100].
    pub score: u8,
    /// Weak reference to a campaign; may dangle after a campaign is deleted.
    pub campaign_id: Option<Uuid>,
    #[serde(default)]
    pub notes: Vec<LeadNote>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A timestamped free-text note attached to a lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadNote {
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Unqualified,
    Converted,
}

impl Default for LeadStatus {
    fn default() -> Self {
        LeadStatus::New
    }
}

/// Marketing channel, used both as lead acquisition source and as a
/// campaign delivery channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Facebook,
    Email,
    Twitter,
    Phone,
    Website,
}

/// Grouping key for by-source breakdowns. Mirrors [`Channel`] with an
/// explicit bucket for leads that carry no source at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceKey {
    Email,
    Facebook,
    Phone,
    Twitter,
    Website,
    Unspecified,
}

impl SourceKey {
    pub fn from_source(source: Option<Channel>) -> Self {
        match source {
            Some(Channel::Email) => SourceKey::Email,
            Some(Channel::Facebook) => SourceKey::Facebook,
            Some(Channel::Phone) => SourceKey::Phone,
            Some(Channel::Twitter) => SourceKey::Twitter,
            Some(Channel::Website) => SourceKey::Website,
            None => SourceKey::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKey::Email => "email",
            SourceKey::Facebook => "facebook",
            SourceKey::Phone => "phone",
            SourceKey::Twitter => "twitter",
            SourceKey::Website => "website",
            SourceKey::Unspecified => "unspecified",
        }
    }
}

// ─── Campaigns ─────────────────────────────────────────────────────────────

/// A marketing initiative with a budget and a time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: CampaignStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub budget: Budget,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

impl Default for CampaignStatus {
    fn default() -> Self {
        CampaignStatus::Draft
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            amount: 0.0,
            currency: default_currency(),
        }
    }
}

// ─── Date windows ──────────────────────────────────────────────────────────

/// An inclusive calendar-date window. An inverted window (`end < start`)
/// is valid and matches nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Whether a timestamp's UTC calendar date falls within the window.
    /// Both bounds are inclusive, so an `end` bound covers that whole day.
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        let date = ts.date_naive();
        self.start <= date && date <= self.end
    }
}
