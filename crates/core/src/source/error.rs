use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur when constructing a date window.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Invalid date range: start {start} must be before or equal to end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Errors that can occur when reading from the upstream scheduling service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The upstream service kept failing after all retries were used.
    #[error("Upstream unavailable ({}): {body}", status.map_or_else(|| "no response".to_string(), |s| s.to_string()))]
    Unavailable { status: Option<u16>, body: String },
    /// The upstream service answered with something we could not parse.
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

/// Result type for upstream source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
