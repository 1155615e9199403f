//! Password value object - login password material plus aging policy.
//!
//! A password belongs to exactly one user. Moving it to another user goes
//! through [`Password::clone_to`], which copies every policy attribute and
//! takes the login name from the new owner.

use serde::{Deserialize, Serialize};

use crate::constants::LOCKED_PASSWORD_PREFIX;
use crate::date::{AccountExpiration, PasswordAging};
use crate::user::User;

/// Classification of a password value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordState {
    /// Login by password is disabled (`!`, `*` and similar markers)
    Disabled,
    /// Login without password is allowed (empty value)
    Passwordless,
    /// Disabled password keeping the previous hash after the `!` prefix
    Locked,
    /// Usable hash or plain text
    Active,
}

/// Password content with its encryption flag.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordValue {
    #[serde(skip_serializing, default)]
    content: String,
    encrypted: bool,
}

// Don't expose the content in debug output
impl std::fmt::Debug for PasswordValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordValue")
            .field("content", &"[REDACTED]")
            .field("encrypted", &self.encrypted)
            .finish()
    }
}

impl PasswordValue {
    /// Plain text value
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encrypted: false,
        }
    }

    /// Already hashed value
    pub fn encrypted(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encrypted: true,
        }
    }

    /// Raw content as stored
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the content is a hash rather than plain text
    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Classify the value.
    ///
    /// `!` or `*` alone (or repeated) disable the login, an empty value allows
    /// passwordless login and a `!` followed by anything else keeps the old
    /// hash while locking the account.
    pub fn state(&self) -> PasswordState {
        let content = self.content.as_str();

        if content.is_empty() {
            return PasswordState::Passwordless;
        }
        if content.starts_with('*') || content.chars().all(|c| c == LOCKED_PASSWORD_PREFIX) {
            return PasswordState::Disabled;
        }
        if content.starts_with(LOCKED_PASSWORD_PREFIX) {
            return PasswordState::Locked;
        }
        PasswordState::Active
    }

    /// Check if login by password is possible at all
    pub fn is_disabled(&self) -> bool {
        matches!(self.state(), PasswordState::Disabled | PasswordState::Locked)
    }
}

/// Where a password is defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordSource {
    /// Local shadow database
    Local,
    /// Directory service
    Ldap,
    #[default]
    Unknown,
}

/// Password configuration for a user including its value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Password {
    /// Login name of the owner, absent until attached to a user
    pub(crate) name: Option<String>,
    /// Value; `None` means the password is not set yet
    pub value: Option<PasswordValue>,
    /// Last change; `None` means unset
    pub aging: Option<PasswordAging>,
    /// Minimum days before the next change
    pub minimum_age: Option<u32>,
    /// Maximum days after which a change is forced; `None` is unrestricted
    pub maximum_age: Option<u32>,
    /// Days of warning before the password expires; 0 means no warning
    pub warning_period: Option<u32>,
    /// Days after expiration while the old password is still accepted
    pub inactivity_period: Option<u32>,
    /// When the whole account expires; `None` means unset
    pub account_expiration: Option<AccountExpiration>,
    /// Provenance, not semantics
    pub source: PasswordSource,
}

impl Password {
    /// Create a password holding a plain text value.
    pub fn create_plain(value: impl Into<String>) -> Self {
        Self {
            value: Some(PasswordValue::plain(value)),
            ..Self::default()
        }
    }

    /// Create a password holding an already encrypted value.
    pub fn create_encrypted(value: impl Into<String>) -> Self {
        Self {
            value: Some(PasswordValue::encrypted(value)),
            ..Self::default()
        }
    }

    /// Login name of the owner
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Copy this password for another owner.
    ///
    /// Every attribute is preserved except the name, which is taken from
    /// `owner`.
    pub fn clone_to(&self, owner: &User) -> Self {
        Self {
            name: Some(owner.name.clone()),
            ..self.clone()
        }
    }

    /// Check if any aging, limit or expiration attribute is set
    pub fn has_policy(&self) -> bool {
        self.aging.is_some()
            || self.minimum_age.is_some()
            || self.maximum_age.is_some()
            || self.warning_period.is_some()
            || self.inactivity_period.is_some()
            || self.account_expiration.is_some()
    }

    /// Check if the value is encrypted
    pub fn is_encrypted(&self) -> bool {
        self.value.as_ref().is_some_and(PasswordValue::is_encrypted)
    }
}

// Ownership and provenance are not part of the comparison
impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.value == other.value
            && self.aging == other.aging
            && self.minimum_age == other.minimum_age
            && self.maximum_age == other.maximum_age
            && self.warning_period == other.warning_period
            && self.inactivity_period == other.inactivity_period
            && self.account_expiration == other.account_expiration
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn aged_password() -> Password {
        let mut password = Password::create_encrypted("$6$pLx8Xx$hash");
        password.aging = Some(PasswordAging::LastChange(
            NaiveDate::from_ymd_opt(1977, 5, 7).unwrap(),
        ));
        password.minimum_age = Some(0);
        password.maximum_age = Some(90);
        password.warning_period = Some(7);
        password.account_expiration = Some(AccountExpiration::Never);
        password.source = PasswordSource::Local;
        password
    }

    #[test]
    fn test_create_plain() {
        let password = Password::create_plain("S3cr3T");
        let value = password.value.as_ref().unwrap();

        assert_eq!(value.content(), "S3cr3T");
        assert!(!value.is_encrypted());
        assert!(password.name().is_none());
        assert!(!password.has_policy());
        assert_eq!(password.source, PasswordSource::Unknown);
    }

    #[test]
    fn test_create_encrypted() {
        let password = Password::create_encrypted("$1$.QKDPc5E$SWlkjRWexrXYgc98F.");
        assert!(password.is_encrypted());
        assert_eq!(password.value.unwrap().state(), PasswordState::Active);
    }

    #[test]
    fn test_clone_to_preserves_attributes() {
        let mut owner = User::new("test2");
        let mut password = aged_password();
        password.name = Some("test2".to_string());
        owner.set_password(password.clone());

        let cloned = password.clone_to(&owner);
        assert_eq!(cloned, password);
        assert_eq!(cloned.source, PasswordSource::Local);
    }

    #[test]
    fn test_clone_to_takes_owner_name() {
        let password = aged_password();
        let cloned = password.clone_to(&User::new("other"));

        assert_eq!(cloned.name(), Some("other"));
        assert_ne!(cloned, password);
        assert_eq!(cloned.maximum_age, Some(90));
    }

    #[test]
    fn test_equality_ignores_source() {
        let mut other = aged_password();
        other.source = PasswordSource::Ldap;
        assert_eq!(other, aged_password());

        other.warning_period = None;
        assert_ne!(other, aged_password());
    }

    #[test]
    fn test_value_states() {
        assert_eq!(PasswordValue::encrypted("!").state(), PasswordState::Disabled);
        assert_eq!(PasswordValue::encrypted("*").state(), PasswordState::Disabled);
        assert_eq!(PasswordValue::encrypted("!!").state(), PasswordState::Disabled);
        assert_eq!(PasswordValue::plain("").state(), PasswordState::Passwordless);
        assert_eq!(PasswordValue::encrypted("!$6$abc").state(), PasswordState::Locked);
        assert_eq!(PasswordValue::encrypted("$6$abc").state(), PasswordState::Active);
        assert!(PasswordValue::encrypted("!$6$abc").is_disabled());
    }

    #[test]
    fn test_debug_redacts_content() {
        let debug = format!("{:?}", Password::create_plain("S3cr3T"));
        assert!(!debug.contains("S3cr3T"));
        assert!(debug.contains("[REDACTED]"));
    }
}
