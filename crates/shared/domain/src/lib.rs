//! Domain layer - Users, groups and passwords of an operating system.
//!
//! This crate contains the in-memory configuration graph and the shadow-style
//! temporal encodings. It has no infrastructure dependencies: reading from and
//! writing to concrete sources lives in the service crates.

pub mod config;
pub mod constants;
pub mod date;
pub mod error;
pub mod group;
pub mod issue;
pub mod password;
pub mod user;

pub use config::{Config, Element, Groups, Users};
pub use constants::*;
pub use date::{
    date_from_epoch_days, date_to_epoch_days, parse_day_limit, AccountExpiration, EpochDayField,
    PasswordAging,
};
pub use error::{DomainError, DomainResult};
pub use group::Group;
pub use issue::{Issue, IssueList, Severity};
pub use password::{Password, PasswordSource, PasswordState, PasswordValue};
pub use user::User;
