//! Shared Error Types
//!
//! This module defines the error types used across the client.
//!
//! # Error Categories
//!
//! - `ApiError` - normalized outcome of a backend call. Every API operation
//!   resolves to either a value or exactly one of these; nothing below the
//!   UI layer panics or rethrows for an ordinary HTTP failure.
//! - `StorageError` - failures of the local session store. These never
//!   escape the store: writes are best-effort and reads self-heal.
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread
//! boundaries.
use thiserror::Error;

/// Normalized error for backend API calls.
///
/// The `Display` form is what the UI shows next to the failed action, so
/// each variant renders as a human-readable message rather than a debug
/// dump.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure: the request never produced an HTTP response
    #[error("Network error")]
    Network,

    /// The backend answered with a non-success status
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message extracted from the error body, or `HTTP <status>`
        message: String,
    },

    /// The response body could not be decoded into the expected shape
    #[error("Failed to parse response: {message}")]
    Decode {
        /// Human-readable decode failure
        message: String,
    },
}

impl ApiError {
    /// Create a transport-level error
    pub fn network() -> Self {
        Self::Network
    }

    /// Create a status error with an explicit message
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a status error with the generic `HTTP <status>` message,
    /// used when the error body carries no readable message
    pub fn from_status(status: u16) -> Self {
        Self::Status {
            status,
            message: format!("HTTP {}", status),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Failures of the local session store.
///
/// Kept internal to the store: callers observe `Option` values, never these.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file read/write failure
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be serialized or deserialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display() {
        let error = ApiError::network();
        assert_eq!(format!("{}", error), "Network error");
    }

    #[test]
    fn test_status_error_displays_message_only() {
        let error = ApiError::status(404, "Not found");
        assert_eq!(format!("{}", error), "Not found");
    }

    #[test]
    fn test_from_status_fallback_message() {
        let error = ApiError::from_status(502);
        match &error {
            ApiError::Status { status, message } => {
                assert_eq!(*status, 502);
                assert_eq!(message, "HTTP 502");
            }
            _ => panic!("Expected Status error"),
        }
        assert_eq!(format!("{}", error), "HTTP 502");
    }

    #[test]
    fn test_decode_error_display() {
        let error = ApiError::decode("missing field `token`");
        assert_eq!(
            format!("{}", error),
            "Failed to parse response: missing field `token`"
        );
    }

    #[test]
    fn test_error_clone_and_eq() {
        let error = ApiError::status(401, "Unauthorized");
        assert_eq!(error.clone(), error);
        assert_ne!(error, ApiError::network());
    }

    #[test]
    fn test_storage_error_from_serde() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{ not json }");
        let storage: StorageError = result.unwrap_err().into();
        match storage {
            StorageError::Serialization(_) => {}
            _ => panic!("Expected Serialization error from serde error"),
        }
    }
}
