//! Domain-level constants.
//!
//! Well-known names, locations and encodings shared by readers, writers and
//! validators.

// =============================================================================
// Accounts
// =============================================================================

/// Login name of the administrative account
pub const ROOT_USER_NAME: &str = "root";

/// Path of the authorized keys file relative to a home directory
pub const AUTHORIZED_KEYS_FILE: &str = ".ssh/authorized_keys";

// =============================================================================
// System tables
// =============================================================================

/// Account database name (seven-field records)
pub const PASSWD_TABLE: &str = "passwd";

/// Group database name (four-field records)
pub const GROUP_TABLE: &str = "group";

/// Shadow database name (nine-field records)
pub const SHADOW_TABLE: &str = "shadow";

/// Number of fields in an account record
pub const PASSWD_FIELDS: usize = 7;

/// Number of fields in a group record
pub const GROUP_FIELDS: usize = 4;

/// Number of fields in a shadow record
pub const SHADOW_FIELDS: usize = 9;

/// Field separator of the system tables
pub const FIELD_SEPARATOR: char = ':';

/// Separator of list values (gecos entries, group members)
pub const LIST_SEPARATOR: char = ',';

// =============================================================================
// Passwords
// =============================================================================

/// Prefix marking a locked password
pub const LOCKED_PASSWORD_PREFIX: char = '!';

/// Epoch-day count that forces a password change on next login
pub const FORCE_CHANGE_DAY_COUNT: &str = "0";

// =============================================================================
// Issues
// =============================================================================

/// Issue location describing the User uid attribute
pub const USER_UID_LOCATION: &str = "user:uid";

/// Issue location describing the Group gid attribute
pub const GROUP_GID_LOCATION: &str = "group:gid";
