//! Client error types.

use thiserror::Error;
use timetable_core::source::SourceError;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// The HTTP status attached to the failure, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            ClientError::ServerError { status, .. } => Some(*status),
            ClientError::InvalidResponse(_) | ClientError::Json(_) => None,
        }
    }

    /// Whether another attempt could succeed.
    ///
    /// A response that arrived but could not be parsed is not retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClientError::Request(_) | ClientError::ServerError { .. }
        )
    }
}

impl From<ClientError> for SourceError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::ServerError { status, message } => SourceError::Unavailable {
                status: Some(status),
                body: message,
            },
            ClientError::Request(e) => SourceError::Unavailable {
                status: e.status().map(|s| s.as_u16()),
                body: e.to_string(),
            },
            ClientError::InvalidResponse(message) => SourceError::InvalidResponse(message),
            ClientError::Json(e) => SourceError::InvalidResponse(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_maps_to_unavailable() {
        let error = ClientError::ServerError {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(error.status(), Some(503));
        assert!(error.is_transient());

        assert_eq!(
            SourceError::from(error),
            SourceError::Unavailable {
                status: Some(503),
                body: "Service Unavailable".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_response_is_not_transient() {
        let error = ClientError::InvalidResponse("missing field".to_string());
        assert!(!error.is_transient());
        assert_eq!(
            SourceError::from(error),
            SourceError::InvalidResponse("missing field".to_string())
        );
    }

    #[test]
    fn test_json_error_maps_to_invalid_response() {
        let error: ClientError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(!error.is_transient());
        assert!(matches!(
            SourceError::from(error),
            SourceError::InvalidResponse(_)
        ));
    }
}
