//! Authorized keys files below home directories.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use common::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Source of the public keys allowed to log in as a user.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait KeySource: Send + Sync {
    /// Keys authorized for the user owning `home`; no file means no keys.
    fn authorized_keys(&self, home: &str) -> AppResult<Vec<String>>;
}

/// Reads `<root>/<home>/<relative path>` files.
pub struct AuthorizedKeysFiles {
    root: PathBuf,
    relative_path: PathBuf,
}

impl AuthorizedKeysFiles {
    /// Create a source rooted at `root` (`/` for the running system)
    pub fn new(root: impl Into<PathBuf>, relative_path: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            relative_path: relative_path.into(),
        }
    }

    /// Location of the keys file for the given home directory
    pub fn path_for(&self, home: &str) -> PathBuf {
        self.root
            .join(home.trim_start_matches('/'))
            .join(&self.relative_path)
    }
}

impl KeySource for AuthorizedKeysFiles {
    fn authorized_keys(&self, home: &str) -> AppResult<Vec<String>> {
        let path = self.path_for(home);
        read_keys_file(&path)
    }
}

fn read_keys_file(path: &Path) -> AppResult<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(parse_authorized_keys(&content)),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
            tracing::debug!("No authorized keys at {}: {}", path.display(), e);
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Keys of an authorized keys file, skipping blank and comment lines.
pub fn parse_authorized_keys(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
