use thiserror::Error;
use timetable_core::source::{DateRangeError, SourceError};

/// Errors that can occur while resolving codes, listings and timetables.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The upstream service failed after all retries.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] SourceError),
    /// No category item matches the raw code.
    #[error("Invalid code: {0}")]
    InvalidCode(String),
    /// The requested range starts after it ends.
    #[error(transparent)]
    InvalidRange(#[from] DateRangeError),
    /// A page after the first failed, so the whole listing is discarded.
    #[error("Failed to fetch page {page} of {total_pages}: {source}")]
    PartialPageFailure {
        page: u32,
        total_pages: u32,
        source: SourceError,
    },
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_code_display() {
        let error = ResolveError::InvalidCode("XYZ9999".to_string());
        assert_eq!(error.to_string(), "Invalid code: XYZ9999");
    }

    #[test]
    fn test_partial_page_failure_display() {
        let error = ResolveError::PartialPageFailure {
            page: 2,
            total_pages: 3,
            source: SourceError::Unavailable {
                status: Some(500),
                body: "boom".to_string(),
            },
        };
        assert_eq!(
            error.to_string(),
            "Failed to fetch page 2 of 3: Upstream unavailable (500): boom"
        );
    }

    #[test]
    fn test_source_error_converts_to_upstream_unavailable() {
        let error: ResolveError = SourceError::InvalidResponse("bad".to_string()).into();
        assert!(matches!(error, ResolveError::UpstreamUnavailable(_)));
    }
}
