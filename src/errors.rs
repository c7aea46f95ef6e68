//! Error types for topology planning

use thiserror::Error;

use crate::domain::{DomainPatternError, NetworkError};

/// Errors that can occur while building a topology plan
#[derive(Debug, Error)]
pub enum TopologyError {
    /// CIDR parsing or sub-block allocation failed
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// A configured domain is not a valid domain pattern
    #[error("Domain pattern error: {0}")]
    DomainPattern(#[from] DomainPatternError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Reading configuration failed
    #[error("I/O error: {0}")]
    Io(String),

    /// A domain has no hosted zone assigned
    #[error("No hosted zone assigned to domain: {0}")]
    ZoneLookup(String),
}

/// Result type for topology operations
pub type TopologyResult<T> = Result<T, TopologyError>;

impl From<serde_json::Error> for TopologyError {
    fn from(err: serde_json::Error) -> Self {
        TopologyError::Serialization(err.to_string())
    }
}
