//! Domain-level errors.
//!
//! These errors represent invalid model operations and undecodable field values.
//! They are independent of infrastructure concerns (commands, files, stores).

use thiserror::Error;

/// Domain-specific errors for model and encoding violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A textual field could not be decoded (e.g. an epoch-day count)
    #[error("Format error: {0}")]
    Format(String),

    /// Element already exists in the aggregate (conflict)
    #[error("{0} already exists")]
    Conflict(String),
}

impl DomainError {
    /// Create a format error
    pub fn format(msg: impl Into<String>) -> Self {
        DomainError::Format(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(entity: impl Into<String>) -> Self {
        DomainError::Conflict(entity.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
