//! Domain identifier types with validation
//!
//! Requisitions are identified by a human-meaningful business key of the form
//! `YYYYMMDD-SEQ` where `SEQ` is a zero-padded daily sequence number.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format used for the business key prefix and for stored dates
pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Requisition business key newtype wrapper
///
/// Keys read back from the row store are not guaranteed to follow the
/// `DATE-SEQ` shape (rows can be typed in by hand), so construction only
/// rejects blank input. [`BusinessKey::sequence`] and
/// [`BusinessKey::date_prefix`] return `None` for keys that do not parse.
///
/// # Examples
///
/// ```
/// use reqflow::domain::ids::BusinessKey;
///
/// let key = BusinessKey::new("20250718-003").unwrap();
/// assert_eq!(key.date_prefix(), Some("20250718"));
/// assert_eq!(key.sequence(), Some(3));
/// assert_eq!(key.compact(), "20250718003");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessKey(String);

impl BusinessKey {
    /// Creates a new BusinessKey from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(BusinessKey)` if the key is not blank, `Err` otherwise
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err("Business key cannot be empty".to_string());
        }
        Ok(Self(key))
    }

    /// Builds a key from a date and a sequence number (`YYYYMMDD-NNN`)
    pub fn compose(date: NaiveDate, sequence: u32) -> Self {
        Self(format!("{}-{:03}", date.format(COMPACT_DATE_FORMAT), sequence))
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Date portion before the first `-`, if the key has one
    pub fn date_prefix(&self) -> Option<&str> {
        self.0.split_once('-').map(|(date, _)| date)
    }

    /// Numeric sequence after the first `-`, if it parses
    pub fn sequence(&self) -> Option<u32> {
        self.0
            .split_once('-')
            .and_then(|(_, seq)| seq.trim().parse().ok())
    }

    /// The key with every `-` removed
    pub fn compact(&self) -> String {
        compact_key(&self.0)
    }

    /// Compares two keys ignoring `-` separators
    ///
    /// Callers frequently pass keys with the dash stripped (`20250718001`),
    /// so row lookup goes through this comparison.
    pub fn matches(&self, other: &str) -> bool {
        let other = other.trim();
        !other.is_empty() && self.compact() == compact_key(other)
    }
}

fn compact_key(key: &str) -> String {
    key.trim().chars().filter(|c| *c != '-').collect()
}

impl fmt::Display for BusinessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BusinessKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for BusinessKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
