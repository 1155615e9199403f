//! Unified error handling for readers, writers and the CLI.
//!
//! Provides a single error type wrapping domain errors and failures of the
//! external channels (commands, files, stores).

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Domain
    #[error(transparent)]
    Domain(#[from] DomainError),

    // External channel errors
    #[error("Command '{command}' failed: {message}")]
    Command { command: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl AppError {
    /// Get a stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Domain(DomainError::Format(_)) => "FORMAT_ERROR",
            AppError::Domain(DomainError::Conflict(_)) => "CONFLICT",
            AppError::Command { .. } => "COMMAND_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Check if the error comes from an external collaborator rather than
    /// from the data itself
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            AppError::Command { .. } | AppError::Io(_) | AppError::Serialization(_)
        )
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Command {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }
}
