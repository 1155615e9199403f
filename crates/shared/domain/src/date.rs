//! Shadow-style temporal values.
//!
//! Shadow tables store dates as the decimal count of whole days since
//! 1970-01-01. Dates are civil dates, no timezone is involved.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::FORCE_CHANGE_DAY_COUNT;
use crate::error::{DomainError, DomainResult};

/// 1970-01-01, the origin of every day count.
fn epoch() -> NaiveDate {
    NaiveDate::default()
}

/// Decode a non-empty day count into a date.
///
/// Only canonical counts are accepted, so decoding and encoding give back
/// the same text.
///
/// # Errors
/// Returns a format error if `text` is not a non-negative integer, has
/// leading zeros or the resulting date is out of the calendar range.
pub fn date_from_epoch_days(text: &str) -> DomainResult<NaiveDate> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::format(format!(
            "'{}' is not a valid day count",
            text
        )));
    }
    if text.len() > 1 && text.starts_with('0') {
        return Err(DomainError::format(format!(
            "'{}' is not a canonical day count",
            text
        )));
    }

    let days: u64 = text
        .parse()
        .map_err(|_| DomainError::format(format!("'{}' is not a valid day count", text)))?;

    epoch()
        .checked_add_days(Days::new(days))
        .ok_or_else(|| DomainError::format(format!("day count '{}' is out of range", text)))
}

/// Encode a date as its day count since 1970-01-01.
pub fn date_to_epoch_days(date: NaiveDate) -> String {
    date.signed_duration_since(epoch()).num_days().to_string()
}

/// Parse a day limit (minimum/maximum age, warning or inactivity period).
///
/// An empty field means the limit is unset.
///
/// # Errors
/// Returns a format error if `text` is neither empty nor a non-negative integer.
pub fn parse_day_limit(text: &str) -> DomainResult<Option<u32>> {
    if text.is_empty() {
        return Ok(None);
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::format(format!("'{}' is not a valid day limit", text)));
    }

    text.parse()
        .map(Some)
        .map_err(|_| DomainError::format(format!("day limit '{}' is out of range", text)))
}

/// A shadow field whose textual form is an (optionally empty) day count.
pub trait EpochDayField: Sized {
    /// Decode the textual form of the field.
    fn from_epoch_days(text: &str) -> DomainResult<Self>;

    /// Encode the field back into its textual form.
    fn to_epoch_days(&self) -> String;
}

/// Last password change, as stored in the third shadow field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum PasswordAging {
    /// Aging features are disabled (empty field)
    Disabled,
    /// The user must change the password on next login (`0`)
    ForceChange,
    /// Date of the last password change
    LastChange(NaiveDate),
}

impl PasswordAging {
    /// Date of the last change, if any
    pub fn last_change(&self) -> Option<NaiveDate> {
        match self {
            PasswordAging::LastChange(date) => Some(*date),
            _ => None,
        }
    }

    /// Check if aging is disabled
    pub fn is_disabled(&self) -> bool {
        matches!(self, PasswordAging::Disabled)
    }
}

impl EpochDayField for PasswordAging {
    fn from_epoch_days(text: &str) -> DomainResult<Self> {
        match text {
            "" => Ok(PasswordAging::Disabled),
            FORCE_CHANGE_DAY_COUNT => Ok(PasswordAging::ForceChange),
            _ => date_from_epoch_days(text).map(PasswordAging::LastChange),
        }
    }

    fn to_epoch_days(&self) -> String {
        match self {
            PasswordAging::Disabled => String::new(),
            PasswordAging::ForceChange => FORCE_CHANGE_DAY_COUNT.to_string(),
            PasswordAging::LastChange(date) => date_to_epoch_days(*date),
        }
    }
}

impl From<NaiveDate> for PasswordAging {
    fn from(date: NaiveDate) -> Self {
        PasswordAging::LastChange(date)
    }
}

/// Account expiration, as stored in the eighth shadow field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum AccountExpiration {
    /// The account never expires (empty field)
    Never,
    /// The account expires on the given date
    On(NaiveDate),
}

impl AccountExpiration {
    /// Expiration date, if any
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            AccountExpiration::On(date) => Some(*date),
            AccountExpiration::Never => None,
        }
    }
}

impl EpochDayField for AccountExpiration {
    fn from_epoch_days(text: &str) -> DomainResult<Self> {
        if text.is_empty() {
            return Ok(AccountExpiration::Never);
        }

        date_from_epoch_days(text).map(AccountExpiration::On)
    }

    fn to_epoch_days(&self) -> String {
        match self {
            AccountExpiration::Never => String::new(),
            AccountExpiration::On(date) => date_to_epoch_days(*date),
        }
    }
}

impl From<NaiveDate> for AccountExpiration {
    fn from(date: NaiveDate) -> Self {
        AccountExpiration::On(date)
    }
}
