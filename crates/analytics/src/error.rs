//! Error types for the aggregation engine.

use leadflow_store::StoreError;
use thiserror::Error;

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The caller supplied a malformed parameter. No computation was run.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The record store failed mid-read. Never yields partial results.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A store read exceeded the request deadline.
    #[error("Store timeout: aggregation read exceeded the request deadline")]
    Timeout,
}

impl AnalyticsError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
