//! Builds a [`Config`] from the legacy flat store.

use common::AppResult;
use domain::{
    parse_day_limit, AccountExpiration, Config, EpochDayField, Password, PasswordAging,
    PasswordSource, User, ROOT_USER_NAME,
};
use tracing::{info, warn};

use crate::repository::{SimpleUser, SimpleUsersStore};

/// Reader of the legacy store.
pub struct Reader<'a> {
    store: &'a dyn SimpleUsersStore,
}

impl<'a> Reader<'a> {
    pub fn new(store: &'a dyn SimpleUsersStore) -> Self {
        Self { store }
    }

    /// Read the stored users and the administrative account into a new config.
    pub fn read(&self) -> AppResult<Config> {
        let mut config = Config::new();
        self.read_to(&mut config)?;
        Ok(config)
    }

    /// Read the stored users and the administrative account into `config`.
    ///
    /// # Errors
    /// Fails if the store cannot be queried, if a stored date or day limit
    /// cannot be decoded or if a user already exists in `config`.
    pub fn read_to(&self, config: &mut Config) -> AppResult<()> {
        let mut users = Vec::new();

        for record in self.store.users()? {
            let Some(name) = record.uid.as_deref().filter(|n| !n.is_empty()) else {
                warn!("Skipping stored user without login name");
                continue;
            };
            if name == ROOT_USER_NAME {
                warn!("Skipping stored user {}, it is read from its own slots", name);
                continue;
            }
            users.push(user_from_record(name, &record)?);
        }

        users.push(self.root_user()?);
        let count = users.len();
        config.attach(users)?;

        info!("Imported {} users from the legacy store", count);
        Ok(())
    }

    fn root_user(&self) -> AppResult<User> {
        let mut root = User::new(ROOT_USER_NAME);

        // An empty slot is a passwordless root, not a missing password
        root.set_password(Password::create_plain(self.store.root_password()?));

        let key = self.store.root_public_key()?;
        if !key.trim().is_empty() {
            root.authorized_keys = vec![key];
        }

        Ok(root)
    }
}

fn user_from_record(name: &str, record: &SimpleUser) -> AppResult<User> {
    let mut user = User::new(name);
    user.uid = non_empty(&record.uid_number);
    user.gid = non_empty(&record.gid_number);
    user.shell = non_empty(&record.login_shell);
    user.home = non_empty(&record.home_directory);
    user.gecos = record.cn.iter().cloned().collect();
    user.set_password(password_from_record(record)?);

    Ok(user)
}

// Every record gets a Password. A missing userPassword leaves its value unset,
// an empty one makes the user passwordless.
fn password_from_record(record: &SimpleUser) -> AppResult<Password> {
    let mut password = match (&record.user_password, record.encrypted) {
        (Some(value), Some(true)) => Password::create_encrypted(value.as_str()),
        (Some(value), _) => Password::create_plain(value.as_str()),
        (None, _) => Password::default(),
    };

    password.aging = record
        .shadow_last_change
        .as_deref()
        .map(PasswordAging::from_epoch_days)
        .transpose()?;
    password.minimum_age = limit(record.shadow_min.as_deref())?;
    password.maximum_age = limit(record.shadow_max.as_deref())?;
    password.warning_period = limit(record.shadow_warning.as_deref())?;
    password.inactivity_period = limit(record.shadow_inactive.as_deref())?;
    password.account_expiration = record
        .shadow_expire
        .as_deref()
        .map(AccountExpiration::from_epoch_days)
        .transpose()?;
    password.source = PasswordSource::Local;

    Ok(password)
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field.clone().filter(|value| !value.is_empty())
}

// Absent and empty fields both mean unset
fn limit(field: Option<&str>) -> AppResult<Option<u32>> {
    Ok(match field {
        Some(text) => parse_day_limit(text)?,
        None => None,
    })
}
