//! Error types for notelink.

use thiserror::Error;

/// Result type alias using notelink's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for notelink operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Link offsets computed during body rewriting are inconsistent
    /// with the matched text; splicing must not proceed.
    #[error("Link offset inconsistency: {0}")]
    LinkOffsets(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("note abc123".to_string());
        assert_eq!(err.to_string(), "Not found: note abc123");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing API token".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API token");
    }

    #[test]
    fn test_error_display_request() {
        let err = Error::Request("connection refused".to_string());
        assert_eq!(err.to_string(), "Request error: connection refused");
    }

    #[test]
    fn test_error_display_link_offsets() {
        let err = Error::LinkOffsets("overlapping matches".to_string());
        assert_eq!(
            err.to_string(),
            "Link offset inconsistency: overlapping matches"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }
}
