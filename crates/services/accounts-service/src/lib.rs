//! Accounts Service Library
//!
//! This crate reads the users configuration of a Linux system, checks it for
//! colliding ids and converts it from and to the legacy flat store used by
//! unattended installations.

pub mod linux;
pub mod repository;
pub mod service;
pub mod users_simple;
pub mod validation;

use std::path::Path;

use common::{AppResult, ReaderConfig};
use domain::{Config, IssueList};
use tracing::info;

use crate::repository::SimpleUsersDocument;
use crate::service::{AccountsManager, AccountsService};

/// Read the running system with the given configuration.
pub fn read_system(config: &ReaderConfig) -> AppResult<Config> {
    AccountsManager::from_config(config)?.read_system()
}

/// Read the running system and check it for colliding ids.
pub fn validate_system(config: &ReaderConfig) -> AppResult<(Config, IssueList)> {
    let service = AccountsManager::from_config(config)?;
    let accounts = service.read_system()?;
    let issues = service.validate(&accounts);
    Ok((accounts, issues))
}

/// Read the running system and save it as a legacy store document.
pub fn export_simple(config: &ReaderConfig, output: &Path) -> AppResult<SimpleUsersDocument> {
    let service = AccountsManager::from_config(config)?;
    let accounts = service.read_system()?;

    let mut document = SimpleUsersDocument::new();
    service.export_simple(&accounts, &mut document)?;
    document.save(output)?;

    info!("Legacy store written to {}", output.display());
    Ok(document)
}

/// Load a legacy store document and check the resulting configuration.
pub fn import_simple(config: &ReaderConfig, input: &Path) -> AppResult<(Config, IssueList)> {
    let service = AccountsManager::from_config(config)?;
    let document = SimpleUsersDocument::load(input)?;

    let accounts = service.import_simple(&document)?;
    let issues = service.validate(&accounts);
    Ok((accounts, issues))
}
