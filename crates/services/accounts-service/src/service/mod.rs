//! Accounts service business logic.

mod accounts_service;

pub use accounts_service::{AccountsManager, AccountsService};
