//! Shared configuration structures.

use std::env;
use std::path::PathBuf;

use domain::AUTHORIZED_KEYS_FILE;
use serde::{Deserialize, Serialize};

/// Default program used to query the system databases
pub const DEFAULT_GETENT_PROGRAM: &str = "getent";

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Log level
    pub log_level: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            service_name: env::var("ACCOUNTS_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "accounts-service".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Configuration of the system reader.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReaderConfig {
    /// Program answering `<program> <table>` with the table content
    pub getent_program: String,
    /// Root directory prepended to home directories when reading keys
    pub root_dir: PathBuf,
    /// Authorized keys file relative to a home directory
    pub authorized_keys_path: String,
    /// Pattern of password values that carry no hash; `None` uses the
    /// built-in `!`/`*` markers
    pub disabled_password_pattern: Option<String>,
}

impl ReaderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            getent_program: env::var("ACCOUNTS_GETENT").unwrap_or(defaults.getent_program),
            root_dir: env::var("ACCOUNTS_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.root_dir),
            authorized_keys_path: env::var("ACCOUNTS_AUTHORIZED_KEYS")
                .unwrap_or(defaults.authorized_keys_path),
            disabled_password_pattern: env::var("ACCOUNTS_DISABLED_PASSWORD_PATTERN")
                .ok()
                .or(defaults.disabled_password_pattern),
        }
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            getent_program: DEFAULT_GETENT_PROGRAM.to_string(),
            root_dir: PathBuf::from("/"),
            authorized_keys_path: AUTHORIZED_KEYS_FILE.to_string(),
            disabled_password_pattern: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.getent_program, "getent");
        assert_eq!(config.root_dir, PathBuf::from("/"));
        assert_eq!(config.authorized_keys_path, ".ssh/authorized_keys");
        assert!(config.disabled_password_pattern.is_none());
    }
}
