//! Writes a [`Config`] into the legacy flat store.

use common::AppResult;
use domain::{Config, EpochDayField, User};
use tracing::{debug, info};

use crate::repository::{SimpleUser, SimpleUsersStore};

/// Writer of the legacy store.
///
/// The administrative account never appears in the user list; its password
/// and first authorized key go to the dedicated slots.
pub struct Writer<'a> {
    config: &'a Config,
}

impl<'a> Writer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Replace the stored users and the administrative slots.
    pub fn write(&self, store: &mut dyn SimpleUsersStore) -> AppResult<()> {
        let users: Vec<SimpleUser> = self
            .config
            .users()
            .all()
            .filter(|user| !user.is_root())
            .map(simple_user)
            .collect();
        let count = users.len();
        store.set_users(users)?;

        let root = self.config.users().root();
        let root_password = root
            .and_then(User::password)
            .and_then(|password| password.value.as_ref())
            .map(|value| value.content())
            .unwrap_or_default();
        let root_key = root
            .and_then(|root| root.authorized_keys.first())
            .map(String::as_str)
            .unwrap_or_default();

        if root.is_some_and(|root| root.authorized_keys.len() > 1) {
            debug!("Only the first authorized key of root is stored");
        }

        store.set_root_password(root_password)?;
        store.set_root_public_key(root_key)?;

        info!("Exported {} users to the legacy store", count);
        Ok(())
    }
}

/// Build the legacy record of a user.
pub fn simple_user(user: &User) -> SimpleUser {
    let password = user.password();
    let value = password.and_then(|password| password.value.as_ref());

    SimpleUser {
        uid: Some(user.name.clone()),
        uid_number: user.uid.clone(),
        gid_number: user.gid.clone(),
        login_shell: user.shell.clone(),
        home_directory: user.home.clone(),
        cn: Some(user.full_name().unwrap_or(&user.name).to_string()),
        user_password: value.map(|value| value.content().to_string()),
        encrypted: value
            .is_some_and(|value| value.is_encrypted())
            .then_some(true),
        shadow_last_change: password
            .and_then(|p| p.aging)
            .map(|aging| aging.to_epoch_days()),
        shadow_min: password.and_then(|p| p.minimum_age).map(|days| days.to_string()),
        shadow_max: password.and_then(|p| p.maximum_age).map(|days| days.to_string()),
        shadow_warning: password
            .and_then(|p| p.warning_period)
            .map(|days| days.to_string()),
        shadow_inactive: password
            .and_then(|p| p.inactivity_period)
            .map(|days| days.to_string()),
        shadow_expire: password
            .and_then(|p| p.account_expiration)
            .map(|expiration| expiration.to_epoch_days()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{AccountExpiration, Password, PasswordAging};

    use crate::repository::MockSimpleUsersStore;

    #[test]
    fn test_record_without_password() {
        let mut user = User::new("test1");
        user.uid = Some("1000".to_string());
        user.home = Some("/home/test1".to_string());

        let record = simple_user(&user);

        assert_eq!(record.uid.as_deref(), Some("test1"));
        assert_eq!(record.uid_number.as_deref(), Some("1000"));
        assert_eq!(record.home_directory.as_deref(), Some("/home/test1"));
        assert_eq!(record.cn.as_deref(), Some("test1"));
        assert!(record.gid_number.is_none());
        assert!(record.login_shell.is_none());
        assert!(record.user_password.is_none());
        assert!(record.encrypted.is_none());
        assert!(record.shadow_last_change.is_none());
    }

    #[test]
    fn test_record_with_policy() {
        let mut user = User::new("test1");
        user.gecos = vec!["".to_string(), "Room 1".to_string()];
        let mut password = Password::create_plain("s3cr3t");
        password.aging = Some(PasswordAging::Disabled);
        password.minimum_age = Some(0);
        password.warning_period = Some(7);
        password.account_expiration = Some(AccountExpiration::Never);
        user.set_password(password);

        let record = simple_user(&user);

        assert_eq!(record.cn.as_deref(), Some("test1"));
        assert_eq!(record.user_password.as_deref(), Some("s3cr3t"));
        assert!(record.encrypted.is_none());
        assert_eq!(record.shadow_last_change.as_deref(), Some(""));
        assert_eq!(record.shadow_min.as_deref(), Some("0"));
        assert!(record.shadow_max.is_none());
        assert_eq!(record.shadow_warning.as_deref(), Some("7"));
        assert_eq!(record.shadow_expire.as_deref(), Some(""));
    }

    #[test]
    fn test_write_calls_store() {
        let mut root = User::new("root");
        root.set_password(Password::create_encrypted("$6$root"));
        let mut config = Config::new();
        config.attach([root, User::new("test1")]).unwrap();

        let mut store = MockSimpleUsersStore::new();
        store
            .expect_set_users()
            .withf(|users| users.len() == 1 && users[0].uid.as_deref() == Some("test1"))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_set_root_password()
            .withf(|password| password == "$6$root")
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_set_root_public_key()
            .withf(|key| key.is_empty())
            .times(1)
            .returning(|_| Ok(()));

        Writer::new(&config).write(&mut store).unwrap();
    }
}
