//! Client error handling
//!
//! Everything that can go wrong between issuing a backend call and applying
//! its outcome ends up as a [`ClientError`]. The dispatcher turns these into
//! workspace failure events; the error text becomes the notification detail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audio player failed: {0}")]
    Playback(String),
}

impl ClientError {
    /// Whether the backend answered with a non-success status
    pub fn is_status(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let error = ClientError::Status {
            status: 503,
            body: "Service Unavailable".to_string(),
        };
        assert_eq!(error.to_string(), "Backend returned 503: Service Unavailable");
        assert!(error.is_status());
    }

    #[test]
    fn test_decode_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: ClientError = err.into();
        assert!(error.to_string().starts_with("Unexpected response body"));
        assert!(!error.is_status());
    }

    #[test]
    fn test_playback_error_message() {
        let error = ClientError::Playback("exit status: 1".to_string());
        assert_eq!(error.to_string(), "Audio player failed: exit status: 1");
    }
}
