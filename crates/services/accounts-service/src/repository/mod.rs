//! Repository layer for the external sources of account data.

mod authorized_keys;
mod simple_users;
mod system_query;

pub use authorized_keys::{parse_authorized_keys, AuthorizedKeysFiles, KeySource};
pub use simple_users::{SimpleUser, SimpleUsersDocument, SimpleUsersStore};
pub use system_query::{Getent, SystemQuery};

#[cfg(any(test, feature = "test-utils"))]
pub use authorized_keys::MockKeySource;
#[cfg(any(test, feature = "test-utils"))]
pub use simple_users::MockSimpleUsersStore;
#[cfg(any(test, feature = "test-utils"))]
pub use system_query::MockSystemQuery;
