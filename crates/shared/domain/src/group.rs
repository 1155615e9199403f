//! Group domain entity.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::user::User;

/// A group of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group name, unique within a config
    pub name: String,
    /// Numeric group id; `None` means unassigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<String>,
    /// Login names of the members, in declaration order
    pub users_name: Vec<String>,
}

impl Group {
    /// Create a group with only its name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gid: None,
            users_name: Vec::new(),
        }
    }

    /// Members resolved within `config`; unknown names are skipped.
    pub fn users<'a>(&self, config: &'a Config) -> Vec<&'a User> {
        self.users_name
            .iter()
            .filter_map(|name| config.users().by_name(name))
            .collect()
    }
}
