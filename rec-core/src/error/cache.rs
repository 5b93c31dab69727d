//! Error types for cache operations (C5/C7/C8).

use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Failed to serialize a cache entry before storing it.
    SerializationFailed {
        /// The cache key.
        key: String,
        /// The serialization error message.
        error: String,
    },
    /// Cache eviction failed.
    EvictionFailed {
        /// The reason eviction failed.
        reason: String,
    },
    /// Invalid cache configuration supplied at startup.
    InvalidConfiguration {
        /// The configuration field that is invalid.
        field: String,
        /// The invalid value.
        value: String,
    },
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SerializationFailed { key, error } => {
                write!(f, "failed to serialize cache entry '{key}': {error}")
            }
            Self::EvictionFailed { reason } => write!(f, "cache eviction failed: {reason}"),
            Self::InvalidConfiguration { field, value } => {
                write!(f, "invalid cache configuration: field='{field}', value='{value}'")
            }
        }
    }
}

impl std::error::Error for CacheError {}
