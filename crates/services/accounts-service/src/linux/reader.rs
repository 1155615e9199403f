//! Reader of the users configuration of a running Linux system.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use common::AppResult;
use domain::{Config, Group, Password, User, GROUP_TABLE, PASSWD_TABLE, SHADOW_TABLE};
use tracing::{debug, info, warn};

use super::parser::{parse_group, parse_passwd, parse_shadow, DisabledMarkers};
use crate::repository::{KeySource, SystemQuery};

/// Builds a [`Config`] from the account, group and shadow tables plus the
/// authorized keys of every user.
pub struct Reader {
    query: Arc<dyn SystemQuery>,
    keys: Arc<dyn KeySource>,
    markers: DisabledMarkers,
}

impl Reader {
    /// Create a reader using the standard disabled password markers
    pub fn new(query: Arc<dyn SystemQuery>, keys: Arc<dyn KeySource>) -> Self {
        Self {
            query,
            keys,
            markers: DisabledMarkers::default(),
        }
    }

    /// Use a different policy to detect encrypted passwords
    pub fn with_markers(mut self, markers: DisabledMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Read the whole configuration.
    ///
    /// # Errors
    /// Fails if any table cannot be queried or a keys file cannot be read for
    /// a reason other than its absence. Malformed records are skipped.
    pub fn read(&self) -> AppResult<Config> {
        let passwd = self.query.query(PASSWD_TABLE)?;
        let group = self.query.query(GROUP_TABLE)?;
        let shadow = self.query.query(SHADOW_TABLE)?;

        let groups = unique_by_name(parse_group(&group), |g: &Group| &g.name, GROUP_TABLE);
        let mut users = unique_by_name(parse_passwd(&passwd), |u: &User| &u.name, PASSWD_TABLE);
        let mut passwords = shadow_by_login(parse_shadow(&shadow, &self.markers));
        debug!(
            "Parsed {} users, {} groups and {} shadow records",
            users.len(),
            groups.len(),
            passwords.len()
        );

        for user in users.iter_mut() {
            if let Some(password) = passwords.remove(&user.name) {
                user.set_password(password);
            }
            if let Some(home) = user.home.as_deref() {
                let keys = self.keys.authorized_keys(home)?;
                user.authorized_keys = keys;
            }
        }

        for login in passwords.keys() {
            debug!("Ignoring shadow record of unknown user {}", login);
        }

        let mut config = Config::new();
        config.attach(groups)?;
        config.attach(users)?;

        info!(
            "Read {} users and {} groups",
            config.users().len(),
            config.groups().len()
        );
        Ok(config)
    }
}

/// Keep the first element of every name, dropping later duplicates.
fn unique_by_name<T>(items: Vec<T>, name: impl Fn(&T) -> &String, table: &str) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(name(item).clone());
            if !fresh {
                warn!("Skipping duplicated {} record {}", table, name(item));
            }
            fresh
        })
        .collect()
}

fn shadow_by_login(records: Vec<(String, Password)>) -> HashMap<String, Password> {
    let mut passwords = HashMap::new();
    for (login, password) in records {
        if passwords.contains_key(&login) {
            warn!("Skipping duplicated {} record {}", SHADOW_TABLE, login);
            continue;
        }
        passwords.insert(login, password);
    }
    passwords
}
