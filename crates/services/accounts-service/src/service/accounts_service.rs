//! Accounts service - Reads, checks and converts users configurations.

use std::sync::Arc;

use common::{AppResult, ReaderConfig};
use domain::{Config, IssueList};
use tracing::{info, warn};

use crate::linux::{self, DisabledMarkers};
use crate::repository::{AuthorizedKeysFiles, Getent, KeySource, SimpleUsersStore, SystemQuery};
use crate::users_simple;
use crate::validation::IdsValidator;

/// Accounts service trait for dependency injection.
pub trait AccountsService: Send + Sync {
    /// Read the users configuration of the running system
    fn read_system(&self) -> AppResult<Config>;

    /// Check a configuration for colliding ids
    fn validate(&self, config: &Config) -> IssueList;

    /// Build a configuration from the legacy store
    fn import_simple(&self, store: &dyn SimpleUsersStore) -> AppResult<Config>;

    /// Write a configuration into the legacy store
    fn export_simple(&self, config: &Config, store: &mut dyn SimpleUsersStore) -> AppResult<()>;
}

/// Concrete implementation of AccountsService using the system collaborators.
pub struct AccountsManager {
    query: Arc<dyn SystemQuery>,
    keys: Arc<dyn KeySource>,
    markers: DisabledMarkers,
}

impl AccountsManager {
    /// Create new accounts service instance with its collaborators
    pub fn new(query: Arc<dyn SystemQuery>, keys: Arc<dyn KeySource>) -> Self {
        Self {
            query,
            keys,
            markers: DisabledMarkers::default(),
        }
    }

    /// Create a service querying the system as described by `config`.
    ///
    /// # Errors
    /// Returns a configuration error if the disabled password pattern is not
    /// a valid regular expression.
    pub fn from_config(config: &ReaderConfig) -> AppResult<Self> {
        let query = Arc::new(Getent::new(config.getent_program.as_str()));
        let keys = Arc::new(AuthorizedKeysFiles::new(
            config.root_dir.clone(),
            config.authorized_keys_path.as_str(),
        ));

        let markers = match config.disabled_password_pattern.as_deref() {
            Some(pattern) => DisabledMarkers::from_pattern(pattern)?,
            None => DisabledMarkers::default(),
        };

        Ok(Self::new(query, keys).with_markers(markers))
    }

    pub fn with_markers(mut self, markers: DisabledMarkers) -> Self {
        self.markers = markers;
        self
    }
}

impl AccountsService for AccountsManager {
    fn read_system(&self) -> AppResult<Config> {
        linux::Reader::new(self.query.clone(), self.keys.clone())
            .with_markers(self.markers.clone())
            .read()
    }

    fn validate(&self, config: &Config) -> IssueList {
        let issues = IdsValidator::new(config).issues();
        for issue in &issues {
            warn!("{}", issue);
        }
        info!("Validation found {} issues", issues.len());
        issues
    }

    fn import_simple(&self, store: &dyn SimpleUsersStore) -> AppResult<Config> {
        users_simple::Reader::new(store).read()
    }

    fn export_simple(&self, config: &Config, store: &mut dyn SimpleUsersStore) -> AppResult<()> {
        users_simple::Writer::new(config).write(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;
    use domain::{Severity, GROUP_TABLE, PASSWD_TABLE, SHADOW_TABLE};
    use mockall::predicate::eq;

    use crate::repository::{MockKeySource, MockSystemQuery, SimpleUsersDocument};

    fn manager(passwd: &'static str, shadow: &'static str) -> AccountsManager {
        let mut query = MockSystemQuery::new();
        query
            .expect_query()
            .with(eq(PASSWD_TABLE))
            .times(1)
            .returning(move |_| Ok(passwd.to_string()));
        query
            .expect_query()
            .with(eq(GROUP_TABLE))
            .times(1)
            .returning(|_| Ok("root:x:0:\nusers:x:100:\n".to_string()));
        query
            .expect_query()
            .with(eq(SHADOW_TABLE))
            .times(1)
            .returning(move |_| Ok(shadow.to_string()));

        let mut keys = MockKeySource::new();
        keys.expect_authorized_keys().returning(|_| Ok(Vec::new()));

        AccountsManager::new(Arc::new(query), Arc::new(keys))
    }

    #[test]
    fn test_read_and_validate() {
        let service = manager(
            "root:x:0:0:root:/root:/bin/bash\n\
             test1:x:1000:100::/home/test1:/bin/bash\n\
             test2:x:1000:100::/home/test2:/bin/bash\n",
            "",
        );

        let config = service.read_system().unwrap();
        let issues = service.validate(&config);

        assert_eq!(config.users().len(), 3);
        assert_eq!(issues.len(), 1);
        assert!(issues.iter().all(|issue| issue.severity == Severity::Warn));
    }

    #[test]
    fn test_custom_markers_apply_to_read() {
        let service = manager(
            "root:x:0:0:root:/root:/bin/bash\n",
            "root:x:16899::::::\n",
        )
        .with_markers(DisabledMarkers::from_pattern("^x$").unwrap());

        let config = service.read_system().unwrap();
        let password = config.users().root().unwrap().password().unwrap();

        assert!(!password.is_encrypted());
    }

    #[test]
    fn test_export_then_import() {
        let service = manager(
            "root:x:0:0:root:/root:/bin/bash\n\
             test1:x:1000:100:Test User1:/home/test1:/bin/zsh\n",
            "root:R00t:16899::::::\n",
        );
        let config = service.read_system().unwrap();

        let mut document = SimpleUsersDocument::new();
        service.export_simple(&config, &mut document).unwrap();
        let imported = service.import_simple(&document).unwrap();

        let test1 = imported.users().by_name("test1").unwrap();
        assert_eq!(test1.uid.as_deref(), Some("1000"));
        assert_eq!(test1.full_name(), Some("Test User1"));
        assert_eq!(test1.shell.as_deref(), Some("/bin/zsh"));
        assert_eq!(document.root_password, "R00t");
    }

    #[test]
    fn test_invalid_pattern_in_config() {
        let config = ReaderConfig {
            disabled_password_pattern: Some("[".to_string()),
            ..ReaderConfig::default()
        };

        let result = AccountsManager::from_config(&config);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
