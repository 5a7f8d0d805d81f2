//! Error types for the Atlas Command client.

use std::time::Duration;

/// Atlas Command client errors.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    /// A top-level component key is neither known nor `custom_`-prefixed.
    #[error("unknown component key: {key}")]
    UnknownComponentKey { key: String },

    /// Request rejected before it was sent.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Server rejected the payload (400 / 422).
    #[error("bad request (HTTP {status}): {message}")]
    BadRequest { status: u16, message: String },

    /// Authentication failed or token missing/expired.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Token is valid but lacks permission.
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// Resource not found.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Resource already exists or is in a conflicting state.
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Rate limit exceeded.
    #[error("rate limited: retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Any other non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Transport-level failure (connect, timeout, body read).
    #[error("network error: {message}")]
    Network { message: String },

    /// Success status but the body did not match the expected shape.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Payload could not be serialized.
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl AtlasError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Not found / config / caller input
            Self::NotFound { .. } => 1,
            Self::Config { .. } => 1,
            Self::InvalidRequest { .. } => 1,
            Self::Serialization { .. } => 1,

            // Auth issues
            Self::Unauthorized { .. } => 2,
            Self::Forbidden { .. } => 2,

            // Rejected payloads
            Self::UnknownComponentKey { .. } => 3,
            Self::BadRequest { .. } => 3,
            Self::Conflict { .. } => 3,

            // Network/transient
            Self::RateLimited { .. } => 5,
            Self::Network { .. } => 5,

            // Other
            Self::Http { .. } => 6,
            Self::InvalidResponse { .. } => 6,
        }
    }

    /// Whether the error was raised locally, before any request was sent.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownComponentKey { .. }
                | Self::InvalidRequest { .. }
                | Self::Serialization { .. }
                | Self::Config { .. }
        )
    }

    /// HTTP status behind this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AtlasError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AtlasError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result type for Atlas Command operations.
pub type AtlasResult<T> = Result<T, AtlasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_message_names_key() {
        let err = AtlasError::UnknownComponentKey {
            key: "unknown_key".to_string(),
        };
        assert_eq!(err.to_string(), "unknown component key: unknown_key");
        assert_eq!(err.exit_code(), 3);
        assert!(err.is_client_error());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_status_for_response_errors() {
        let err = AtlasError::NotFound {
            resource: "/entities/x".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_client_error());

        let err = AtlasError::Http {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.exit_code(), 6);
    }
}
