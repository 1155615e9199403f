//! System reader tests against fixture tables.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use accounts_service_lib::linux::Reader;
use accounts_service_lib::repository::{AuthorizedKeysFiles, SystemQuery};
use accounts_service_lib::users_simple::simple_user;
use accounts_service_lib::validation::IdsValidator;
use common::{AppError, AppResult};
use domain::{EpochDayField, PasswordSource, AUTHORIZED_KEYS_FILE};

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/root")
}

/// Answers queries with the files under `<root>/etc`
struct FixtureQuery {
    root: PathBuf,
}

impl SystemQuery for FixtureQuery {
    fn query(&self, table: &str) -> AppResult<String> {
        Ok(fs::read_to_string(self.root.join("etc").join(table))?)
    }
}

/// Fails like `getent` does without permission to read a table
struct FailingQuery;

impl SystemQuery for FailingQuery {
    fn query(&self, table: &str) -> AppResult<String> {
        if table == "shadow" {
            return Err(AppError::command("getent shadow", "exit status: 2"));
        }
        Ok(String::new())
    }
}

fn fixture_reader() -> Reader {
    let root = fixture_root();
    Reader::new(
        Arc::new(FixtureQuery { root: root.clone() }),
        Arc::new(AuthorizedKeysFiles::new(root, AUTHORIZED_KEYS_FILE)),
    )
}

#[test]
fn test_read_fixture_system() {
    let config = fixture_reader().read().unwrap();

    assert_eq!(config.users().len(), 8);
    assert_eq!(config.groups().len(), 7);
}

#[test]
fn test_read_root_user() {
    let config = fixture_reader().read().unwrap();
    let root = config.users().root().unwrap();

    assert_eq!(root.uid.as_deref(), Some("0"));
    assert_eq!(root.home.as_deref(), Some("/root"));
    assert_eq!(root.shell.as_deref(), Some("/bin/bash"));
    assert_eq!(root.primary_group(&config).unwrap().name, "root");
    assert_eq!(
        root.authorized_keys,
        vec![
            "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQDfakeRootKey root@example.com",
            "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIfakeAdminKey admin@example.com",
        ]
    );

    let password = root.password().unwrap();
    assert_eq!(password.name(), Some("root"));
    assert_eq!(password.source, PasswordSource::Local);
    assert!(password.is_encrypted());
    assert!(password.value.as_ref().unwrap().content().starts_with("$6$pL"));
    assert_eq!(password.aging.unwrap().to_epoch_days(), "16899");
    assert_eq!(password.account_expiration.unwrap().to_epoch_days(), "");
}

#[test]
fn test_read_relations() {
    let config = fixture_reader().read().unwrap();

    let nobody = config.users().by_name("nobody").unwrap();
    assert_eq!(nobody.primary_group(&config).unwrap().name, "nogroup");

    let wheel = config.groups().by_name("wheel").unwrap();
    let members: Vec<_> = wheel.users(&config).iter().map(|u| u.name.as_str()).collect();
    assert_eq!(members, vec!["root", "test1"]);

    // disabled markers are kept as plain values
    let bin = config.users().by_name("bin").unwrap();
    assert!(!bin.password().unwrap().is_encrypted());
    assert!(bin.password().unwrap().value.as_ref().unwrap().is_disabled());

    let test3 = config.users().by_name("test3").unwrap();
    assert!(test3.password().is_none());
    assert!(test3.authorized_keys.is_empty());
}

#[test]
fn test_fixture_system_has_no_collisions() {
    let config = fixture_reader().read().unwrap();

    assert!(IdsValidator::new(&config).issues().is_empty());
}

#[test]
fn test_read_user_to_legacy_record() {
    let config = fixture_reader().read().unwrap();

    let record = simple_user(config.users().by_name("test1").unwrap());
    assert_eq!(record.uid.as_deref(), Some("test1"));
    assert_eq!(record.uid_number.as_deref(), Some("1000"));
    assert_eq!(record.gid_number.as_deref(), Some("100"));
    assert_eq!(record.login_shell.as_deref(), Some("/bin/bash"));
    assert_eq!(record.home_directory.as_deref(), Some("/home/test1"));
    assert_eq!(record.cn.as_deref(), Some("Test User1"));
    assert_eq!(record.encrypted, Some(true));
    assert_eq!(record.shadow_last_change.as_deref(), Some("16899"));
    assert_eq!(record.shadow_min.as_deref(), Some("0"));
    assert_eq!(record.shadow_max.as_deref(), Some("99999"));
    assert_eq!(record.shadow_warning.as_deref(), Some("7"));
    assert!(record.shadow_inactive.is_none());

    let record = simple_user(config.users().by_name("test2").unwrap());
    assert_eq!(record.cn.as_deref(), Some("test2"));
    assert_eq!(record.shadow_last_change.as_deref(), Some("2683"));
    assert_eq!(record.shadow_inactive.as_deref(), Some("30"));
    assert_eq!(record.shadow_expire.as_deref(), Some("18754"));

    let record = simple_user(config.users().by_name("test3").unwrap());
    assert!(record.user_password.is_none());
    assert!(record.encrypted.is_none());
    assert!(record.shadow_last_change.is_none());
    assert!(record.shadow_expire.is_none());
}

#[test]
fn test_failing_query_aborts_read() {
    let reader = Reader::new(
        Arc::new(FailingQuery),
        Arc::new(AuthorizedKeysFiles::new(fixture_root(), AUTHORIZED_KEYS_FILE)),
    );

    let err = reader.read().unwrap_err();

    assert!(err.is_collaborator_failure());
    assert_eq!(err.code(), "COMMAND_ERROR");
}
