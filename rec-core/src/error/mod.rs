//! Error taxonomy for the recommendation core.
//!
//! Mirrors the collaborator-error propagation policy in the design:
//! session-store errors surface, retrieval errors trigger a fallback
//! upstream, and enrichment/analytics errors are swallowed at their
//! call sites before ever reaching this type.

use uuid::Uuid;

pub mod cache;

pub use cache::CacheError;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Stable machine-readable error code, one per HTTP status in §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    SessionExpired,
    NotFound,
    RateLimited,
    Unavailable,
    Internal,
}

impl ErrorCode {
    /// HTTP status code for this error code.
    #[must_use]
    pub fn http_status(self) -> u16 {
        match self {
            Self::ValidationError => 400,
            Self::SessionExpired => 401,
            Self::NotFound => 404,
            Self::RateLimited => 429,
            Self::Unavailable => 503,
            Self::Internal => 500,
        }
    }
}

/// Error type for recommendation-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("session expired or not found: {0}")]
    SessionExpired(Uuid),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Cache(#[from] CacheError),
}

impl Error {
    /// Stable taxonomy code from §7, used to build the HTTP error body.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationError,
            Self::SessionExpired(_) => ErrorCode::SessionExpired,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::RateLimited { .. } => ErrorCode::RateLimited,
            Self::Unavailable(_) => ErrorCode::Unavailable,
            Self::Internal(_) | Self::Serialization(_) => ErrorCode::Internal,
            Self::Cache(_) => ErrorCode::Internal,
        }
    }

    /// Whether a caller may retry this error (collaborator-grade, transient).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::RateLimited { .. })
    }

    /// `retryAfter` seconds to surface in the error body, when applicable.
    #[must_use]
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }
}
