use thiserror::Error;

/// Errors raised by a cache backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The backend could not be reached.
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    /// The backend was reached but rejected a get or set.
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    /// A bounded backend was configured to hold no entries.
    #[error("Cache capacity must be at least one entry, got {0}")]
    InvalidCapacity(usize),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
