//! Access to the system account databases.

use std::process::Command;

use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Source of the raw account, group and shadow tables.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait SystemQuery: Send + Sync {
    /// Full textual content of the given table (`passwd`, `group`, `shadow`).
    ///
    /// An error means the query could not be performed at all, not that the
    /// table is empty.
    fn query(&self, table: &str) -> AppResult<String>;
}

/// Queries the tables through `getent`.
pub struct Getent {
    program: String,
}

impl Getent {
    /// Create a query using the given `getent` compatible program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SystemQuery for Getent {
    fn query(&self, table: &str) -> AppResult<String> {
        let command = format!("{} {}", self.program, table);
        tracing::debug!("Running {}", command);

        let output = Command::new(&self.program)
            .arg(table)
            .output()
            .map_err(|e| AppError::command(&command, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::command(
                &command,
                format!("{} {}", output.status, stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_a_command_error() {
        let getent = Getent::new("/nonexistent/getent-for-tests");
        let err = getent.query("passwd").unwrap_err();

        assert!(matches!(err, AppError::Command { .. }));
        assert!(err.to_string().contains("/nonexistent/getent-for-tests passwd"));
    }
}
