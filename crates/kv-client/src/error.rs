//! Error types shared by all key-value adapters.

use thiserror::Error;

/// Errors returned by [`crate::KvClient`] operations and client factories.
#[derive(Error, Debug)]
pub enum KvClientError {
    /// The key does not exist in the backend.
    #[error("Key '{key}' not found")]
    NotFound { key: String },

    /// Could not establish a connection or session with the backend.
    #[error("{backend} connection error: {message}")]
    Connect { backend: String, message: String },

    /// A command sent to the backend failed.
    #[error("{backend} error: {message}")]
    Backend { backend: String, message: String },

    /// A value came back in a shape the adapter cannot represent as a string.
    #[error("Invalid value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl KvClientError {
    /// Build a [`KvClientError::Backend`] from any displayable error.
    pub fn backend(backend: impl Into<String>, err: impl std::fmt::Display) -> Self {
        KvClientError::Backend {
            backend: backend.into(),
            message: err.to_string(),
        }
    }

    /// Build a [`KvClientError::Connect`] from any displayable error.
    pub fn connect(backend: impl Into<String>, err: impl std::fmt::Display) -> Self {
        KvClientError::Connect {
            backend: backend.into(),
            message: err.to_string(),
        }
    }

    /// Whether this error means the key was missing rather than a transport failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, KvClientError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_message() {
        let err = KvClientError::backend("redis", "connection reset");
        assert_eq!(err.to_string(), "redis error: connection reset");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found() {
        let err = KvClientError::NotFound {
            key: "abc-key-1".to_string(),
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("abc-key-1"));
    }
}
