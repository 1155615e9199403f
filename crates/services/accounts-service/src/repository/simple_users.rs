//! Legacy flat store used by the unattended installation workflow.
//!
//! Every user is a flat record of optional string fields. The administrative
//! account is not part of the list: its password and public key live in two
//! separate slots.

use std::fs;
use std::path::Path;

use common::AppResult;
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One user of the legacy store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimpleUser {
    /// Login name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_shell: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_directory: Option<String>,
    /// Full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_last_change: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_inactive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_expire: Option<String>,
}

/// Operations of the legacy store.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait SimpleUsersStore {
    /// All stored users
    fn users(&self) -> AppResult<Vec<SimpleUser>>;

    /// Password of the administrative account; empty means none
    fn root_password(&self) -> AppResult<String>;

    /// Public key of the administrative account; empty means none
    fn root_public_key(&self) -> AppResult<String>;

    /// Replace the stored users
    fn set_users(&mut self, users: Vec<SimpleUser>) -> AppResult<()>;

    fn set_root_password(&mut self, password: &str) -> AppResult<()>;

    fn set_root_public_key(&mut self, key: &str) -> AppResult<()>;
}

/// In-memory store that can be loaded from and saved to a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleUsersDocument {
    pub users: Vec<SimpleUser>,
    pub root_password: String,
    pub root_public_key: String,
}

impl SimpleUsersDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document from a JSON file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the document as a JSON file.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::debug!("Saved {} users to {}", self.users.len(), path.display());
        Ok(())
    }

    /// Find a stored user by login name
    pub fn user(&self, name: &str) -> Option<&SimpleUser> {
        self.users.iter().find(|u| u.uid.as_deref() == Some(name))
    }
}

impl SimpleUsersStore for SimpleUsersDocument {
    fn users(&self) -> AppResult<Vec<SimpleUser>> {
        Ok(self.users.clone())
    }

    fn root_password(&self) -> AppResult<String> {
        Ok(self.root_password.clone())
    }

    fn root_public_key(&self) -> AppResult<String> {
        Ok(self.root_public_key.clone())
    }

    fn set_users(&mut self, users: Vec<SimpleUser>) -> AppResult<()> {
        self.users = users;
        Ok(())
    }

    fn set_root_password(&mut self, password: &str) -> AppResult<()> {
        self.root_password = password.to_string();
        Ok(())
    }

    fn set_root_public_key(&mut self, key: &str) -> AppResult<()> {
        self.root_public_key = key.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_field_names() {
        let record = SimpleUser {
            uid: Some("test1".to_string()),
            uid_number: Some("1000".to_string()),
            home_directory: Some("/home/test1".to_string()),
            encrypted: Some(true),
            shadow_last_change: Some("2683".to_string()),
            ..SimpleUser::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["uid"], "test1");
        assert_eq!(json["uidNumber"], "1000");
        assert_eq!(json["homeDirectory"], "/home/test1");
        assert_eq!(json["encrypted"], true);
        assert_eq!(json["shadowLastChange"], "2683");
        assert!(json.get("gidNumber").is_none());
        assert!(json.get("userPassword").is_none());
    }

    #[test]
    fn test_document_from_partial_json() {
        let json = r#"{"users": [{"uid": "test1", "cn": "Test User1"}]}"#;
        let document: SimpleUsersDocument = serde_json::from_str(json).unwrap();

        assert_eq!(document.user("test1").unwrap().cn.as_deref(), Some("Test User1"));
        assert_eq!(document.root_password, "");
        assert_eq!(document.root_public_key, "");
    }
}
