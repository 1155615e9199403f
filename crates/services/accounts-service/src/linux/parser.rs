//! Parsers of the colon-delimited account, group and shadow tables.
//!
//! Records with the wrong number of fields are skipped with a warning; they
//! never abort the parsing of the remaining records.

use common::{AppError, AppResult};
use domain::{
    parse_day_limit, AccountExpiration, DomainResult, EpochDayField, Group, Password,
    PasswordAging, PasswordSource, PasswordState, PasswordValue, User, FIELD_SEPARATOR,
    GROUP_FIELDS, GROUP_TABLE, LIST_SEPARATOR, PASSWD_FIELDS, PASSWD_TABLE, SHADOW_FIELDS,
    SHADOW_TABLE,
};
use regex::Regex;

/// Policy telling hashed shadow values apart from login-disabling markers.
#[derive(Debug, Clone, Default)]
pub enum DisabledMarkers {
    /// `!` or `*` alone or repeated, and `*` prefixed tags like `*LK*`
    #[default]
    Standard,
    /// Any value matching the pattern is a marker
    Pattern(Regex),
}

impl DisabledMarkers {
    /// Build a policy from a regular expression.
    ///
    /// # Errors
    /// Returns a configuration error if the pattern does not compile.
    pub fn from_pattern(pattern: &str) -> AppResult<Self> {
        Regex::new(pattern).map(DisabledMarkers::Pattern).map_err(|e| {
            AppError::configuration(format!(
                "invalid disabled password pattern '{}': {}",
                pattern, e
            ))
        })
    }

    /// Check if `value` is a marker rather than a password
    pub fn is_marker(&self, value: &str) -> bool {
        match self {
            DisabledMarkers::Standard => {
                PasswordValue::encrypted(value).state() == PasswordState::Disabled
            }
            DisabledMarkers::Pattern(pattern) => pattern.is_match(value),
        }
    }

    /// A value is encrypted unless it is empty or a marker
    pub fn is_encrypted(&self, value: &str) -> bool {
        !value.is_empty() && !self.is_marker(value)
    }
}

/// Split a record into exactly `expected` fields.
fn record_fields<'a>(line: &'a str, expected: usize, table: &str) -> Option<Vec<&'a str>> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != expected || fields[0].is_empty() {
        tracing::warn!(
            "Skipping malformed {} record with {} fields (expected {})",
            table,
            fields.len(),
            expected
        );
        return None;
    }
    Some(fields)
}

fn records(content: &str) -> impl Iterator<Item = &str> {
    content.lines().filter(|line| !line.trim().is_empty())
}

fn non_empty(field: &str) -> Option<String> {
    (!field.is_empty()).then(|| field.to_string())
}

fn split_list(field: &str) -> Vec<String> {
    if field.is_empty() {
        return Vec::new();
    }
    field.split(LIST_SEPARATOR).map(str::to_string).collect()
}

/// Parse `login:x:uid:gid:gecos:home:shell` records.
pub fn parse_passwd(content: &str) -> Vec<User> {
    records(content)
        .filter_map(|line| record_fields(line, PASSWD_FIELDS, PASSWD_TABLE))
        .map(|fields| {
            let mut user = User::new(fields[0]);
            user.uid = non_empty(fields[2]);
            user.gid = non_empty(fields[3]);
            user.gecos = split_list(fields[4]);
            user.home = non_empty(fields[5]);
            user.shell = non_empty(fields[6]);
            user
        })
        .collect()
}

/// Parse `name:x:gid:members` records.
pub fn parse_group(content: &str) -> Vec<Group> {
    records(content)
        .filter_map(|line| record_fields(line, GROUP_FIELDS, GROUP_TABLE))
        .map(|fields| {
            let mut group = Group::new(fields[0]);
            group.gid = non_empty(fields[2]);
            group.users_name = split_list(fields[3])
                .into_iter()
                .filter(|name| !name.is_empty())
                .collect();
            group
        })
        .collect()
}

/// Parse `login:hash:last-change:min:max:warn:inactive:expire:reserved`
/// records into `(login, password)` pairs.
///
/// Records with undecodable dates or limits are skipped with a warning.
pub fn parse_shadow(content: &str, markers: &DisabledMarkers) -> Vec<(String, Password)> {
    records(content)
        .filter_map(|line| record_fields(line, SHADOW_FIELDS, SHADOW_TABLE))
        .filter_map(|fields| match password_from_shadow(&fields, markers) {
            Ok(password) => Some((fields[0].to_string(), password)),
            Err(e) => {
                tracing::warn!("Skipping shadow record of {}: {}", fields[0], e);
                None
            }
        })
        .collect()
}

fn password_from_shadow(fields: &[&str], markers: &DisabledMarkers) -> DomainResult<Password> {
    let value = fields[1];
    let mut password = if markers.is_encrypted(value) {
        Password::create_encrypted(value)
    } else {
        Password::create_plain(value)
    };

    password.aging = Some(PasswordAging::from_epoch_days(fields[2])?);
    password.minimum_age = parse_day_limit(fields[3])?;
    password.maximum_age = parse_day_limit(fields[4])?;
    password.warning_period = parse_day_limit(fields[5])?;
    password.inactivity_period = parse_day_limit(fields[6])?;
    password.account_expiration = Some(AccountExpiration::from_epoch_days(fields[7])?);
    password.source = PasswordSource::Local;

    Ok(password)
}
