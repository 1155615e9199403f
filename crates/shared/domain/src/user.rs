//! User domain entity.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::constants::ROOT_USER_NAME;
use crate::group::Group;
use crate::password::Password;

/// A login account.
///
/// Numeric ids are kept as strings so blank or missing values survive a round
/// trip through the textual formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name, unique within a config
    pub name: String,
    /// Numeric user id; `None` means unassigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Numeric id of the primary group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<String>,
    /// Free-text fields, the first one is conventionally the full name
    pub gecos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
    /// Public keys allowed to log in as this user
    pub authorized_keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<Password>,
}

impl User {
    /// Create a user with only its login name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uid: None,
            gid: None,
            gecos: Vec::new(),
            shell: None,
            home: None,
            authorized_keys: Vec::new(),
            password: None,
        }
    }

    /// Check if this is the administrative account
    pub fn is_root(&self) -> bool {
        self.name == ROOT_USER_NAME
    }

    /// Full name from the first gecos entry, if not blank
    pub fn full_name(&self) -> Option<&str> {
        self.gecos
            .first()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// The user's password, if any
    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }

    /// Replace the password; the password is bound to this user's name
    pub fn set_password(&mut self, mut password: Password) {
        password.name = Some(self.name.clone());
        self.password = Some(password);
    }

    /// Remove and return the password
    pub fn take_password(&mut self) -> Option<Password> {
        self.password.take()
    }

    /// Resolve the primary group by gid within `config`.
    ///
    /// Dangling or missing gids resolve to `None`.
    pub fn primary_group<'a>(&self, config: &'a Config) -> Option<&'a Group> {
        self.gid
            .as_deref()
            .and_then(|gid| config.groups().by_gid(gid))
    }
}
