//! Daily business-key sequence
//!
//! The next key is derived from the keys already in the sheet:
//! `max(sequence of keys dated today) + 1`. Nothing reserves the value, so
//! two submissions that read the sheet before either appends receive the
//! same key. The row store offers no atomic increment to prevent that.

use crate::adapters::row_store::RowStore;
use crate::core::snapshot::Snapshot;
use crate::domain::ids::COMPACT_DATE_FORMAT;
use crate::domain::BusinessKey;
use chrono::NaiveDate;

/// Next business key for `today` given the keys already issued
///
/// Keys dated another day and keys whose sequence does not parse are
/// ignored.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use reqflow::core::sequence::next_business_key;
///
/// let today = NaiveDate::from_ymd_opt(2025, 7, 18).unwrap();
/// let key = next_business_key(["20250718-001", "20250718-002"], today);
/// assert_eq!(key.as_str(), "20250718-003");
///
/// let key = next_business_key(Vec::<&str>::new(), today);
/// assert_eq!(key.as_str(), "20250718-001");
/// ```
pub fn next_business_key<I, S>(existing: I, today: NaiveDate) -> BusinessKey
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let prefix = today.format(COMPACT_DATE_FORMAT).to_string();

    let next = existing
        .into_iter()
        .filter_map(|key| {
            let (date, seq) = key.as_ref().trim().split_once('-')?;
            if date != prefix {
                return None;
            }
            seq.trim().parse::<u32>().ok()
        })
        .max()
        .map_or(1, |max| max.saturating_add(1));

    BusinessKey::compose(today, next)
}

/// Issues business keys against the live sheet
pub struct SequenceGenerator<'a> {
    store: &'a dyn RowStore,
    max_columns: usize,
}

impl<'a> SequenceGenerator<'a> {
    /// Create a generator reading from `store`
    pub fn new(store: &'a dyn RowStore, max_columns: usize) -> Self {
        Self { store, max_columns }
    }

    /// Next key for `today` from a fresh fetch
    ///
    /// Falls back to `today-001` when the store cannot be read. That key
    /// carries no uniqueness guarantee at all.
    pub async fn next(&self, today: NaiveDate) -> BusinessKey {
        match Snapshot::fetch(self.store, self.max_columns).await {
            Ok(snapshot) => Self::next_from(&snapshot, today),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    sheet = self.store.sheet_name(),
                    "Row store unavailable, falling back to first sequence of the day"
                );
                BusinessKey::compose(today, 1)
            }
        }
    }

    /// Next key for `today` from an existing snapshot
    pub fn next_from(snapshot: &Snapshot, today: NaiveDate) -> BusinessKey {
        next_business_key(snapshot.business_keys().map(BusinessKey::as_str), today)
    }
}
