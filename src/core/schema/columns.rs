//! Column map resolution over a live header row
//!
//! A [`ColumnMap`] is only valid for the fetch it was built from: other
//! writers may append or rename columns at any time, so every operation
//! resolves a new map from a fresh header row.

use super::fields::Field;
use crate::domain::ReqflowError;
use std::borrow::Cow;

/// Default per-row column ceiling of the backing sheet
pub const DEFAULT_MAX_COLUMNS: usize = 24;

/// One physical column of the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSlot {
    /// Column with a (de-duplicated) header name
    Known(String),
    /// Blank header; the index is the column's own 0-based position
    Placeholder(usize),
}

impl ColumnSlot {
    /// Name used for lookups; placeholders get a synthetic name
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            ColumnSlot::Known(name) => Cow::Borrowed(name),
            ColumnSlot::Placeholder(index) => Cow::Owned(placeholder_name(*index)),
        }
    }

    /// Whether the column can be claimed by a new field
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ColumnSlot::Placeholder(_))
    }
}

fn placeholder_name(index: usize) -> String {
    format!("column_{}", index + 1)
}

/// How [`ColumnMap::ensure_column`] obtained its column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationKind {
    /// Header already present
    Existing,
    /// A blank header column was claimed
    ReusedPlaceholder,
    /// A new column was appended after the last one
    Appended,
    /// Ceiling reached; the last column was taken over from `previous`
    Displaced { previous: String },
}

/// Result of [`ColumnMap::ensure_column`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAllocation {
    /// 0-based column index
    pub index: usize,

    /// How the column was obtained
    pub kind: AllocationKind,

    /// Header text the column must carry
    pub header: String,
}

impl ColumnAllocation {
    /// Whether the header cell has to be written back to the store
    pub fn needs_header_write(&self) -> bool {
        self.kind != AllocationKind::Existing
    }
}

/// Logical-name to physical-index map for one header snapshot
///
/// Holds exactly one slot per physical column. Duplicate header text is
/// disambiguated with a positional suffix (`Note#7`) and blank headers
/// become [`ColumnSlot::Placeholder`], so no two slots share a name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnMap {
    slots: Vec<ColumnSlot>,
}

impl ColumnMap {
    /// Resolve a header row into a column map
    ///
    /// # Examples
    ///
    /// ```
    /// use reqflow::core::schema::{ColumnMap, ColumnSlot};
    ///
    /// let header = vec!["Item".to_string(), "".to_string(), "Item".to_string()];
    /// let map = ColumnMap::resolve(&header);
    ///
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.index_of("Item"), Some(0));
    /// assert_eq!(map.slots()[1], ColumnSlot::Placeholder(1));
    /// assert_eq!(map.index_of("Item#3"), Some(2));
    /// ```
    pub fn resolve(header: &[String]) -> Self {
        let mut slots: Vec<ColumnSlot> = Vec::with_capacity(header.len());

        // Synthetic names of blank columns may not be taken by real headers
        let reserved: Vec<String> = header
            .iter()
            .enumerate()
            .filter(|(_, text)| text.trim().is_empty())
            .map(|(index, _)| placeholder_name(index))
            .collect();

        for (index, text) in header.iter().enumerate() {
            let text = text.trim();
            if text.is_empty() {
                slots.push(ColumnSlot::Placeholder(index));
                continue;
            }

            let mut name = text.to_string();
            while Self::slot_position(&slots, &name).is_some()
                || reserved.iter().any(|r| r.eq_ignore_ascii_case(&name))
            {
                name = format!("{}#{}", name, index + 1);
            }
            if name != text {
                tracing::debug!(
                    header = text,
                    column = index,
                    resolved = %name,
                    "Disambiguated duplicate header"
                );
            }
            slots.push(ColumnSlot::Known(name));
        }

        Self { slots }
    }

    /// All slots in column order
    pub fn slots(&self) -> &[ColumnSlot] {
        &self.slots
    }

    /// Number of physical columns
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the header row was empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot_position(slots: &[ColumnSlot], name: &str) -> Option<usize> {
        let name = name.trim();
        slots
            .iter()
            .position(|slot| slot.name().eq_ignore_ascii_case(name))
    }

    /// 0-based index of a column by (case-insensitive) name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        Self::slot_position(&self.slots, name)
    }

    /// Every column index carrying one of the field's spellings, alias order
    pub fn indices_of_field(&self, field: Field) -> Vec<usize> {
        field
            .aliases()
            .iter()
            .filter_map(|alias| self.index_of(alias))
            .collect()
    }

    /// First column carrying one of the field's spellings
    pub fn index_of_field(&self, field: Field) -> Option<usize> {
        field
            .aliases()
            .iter()
            .find_map(|alias| self.index_of(alias))
    }

    /// First populated cell among the named columns, trimmed
    pub fn value_by_names<'r>(&self, row: &'r [String], names: &[&str]) -> Option<&'r str> {
        names
            .iter()
            .filter_map(|name| self.index_of(name))
            .filter_map(|index| row.get(index))
            .map(|cell| cell.trim())
            .find(|cell| !cell.is_empty())
    }

    /// First populated cell among the field's alias columns, trimmed
    pub fn value<'r>(&self, row: &'r [String], field: Field) -> Option<&'r str> {
        self.value_by_names(row, field.aliases())
    }

    /// Field value or an empty string
    pub fn text(&self, row: &[String], field: Field) -> String {
        self.value(row, field).unwrap_or_default().to_string()
    }

    /// Make sure a column exists for `logical_name`
    ///
    /// In order of preference: reuse the column already named `logical_name`
    /// or `header_text`; claim the first placeholder column; append a new
    /// column while below `max_columns`; otherwise take over the last column
    /// allowed by the ceiling. The last case discards whatever field lived
    /// there and is logged as a schema capacity error.
    pub fn ensure_column(
        &mut self,
        logical_name: &str,
        header_text: &str,
        max_columns: usize,
    ) -> ColumnAllocation {
        let max_columns = max_columns.max(1);

        if let Some(index) = self
            .index_of(logical_name)
            .or_else(|| self.index_of(header_text))
        {
            return ColumnAllocation {
                index,
                kind: AllocationKind::Existing,
                header: self.slots[index].name().into_owned(),
            };
        }

        let header = header_text.trim().to_string();

        if let Some(index) = self.slots.iter().position(ColumnSlot::is_placeholder) {
            self.slots[index] = ColumnSlot::Known(header.clone());
            tracing::info!(column = index, header = %header, "Claimed blank header column");
            return ColumnAllocation {
                index,
                kind: AllocationKind::ReusedPlaceholder,
                header,
            };
        }

        if self.slots.len() < max_columns {
            let index = self.slots.len();
            self.slots.push(ColumnSlot::Known(header.clone()));
            tracing::info!(column = index, header = %header, "Appended header column");
            return ColumnAllocation {
                index,
                kind: AllocationKind::Appended,
                header,
            };
        }

        let index = max_columns - 1;
        let previous = self.slots[index].name().into_owned();
        self.slots[index] = ColumnSlot::Known(header.clone());

        let error = ReqflowError::SchemaCapacityExceeded {
            column: header.clone(),
            index,
            displaced: previous.clone(),
            ceiling: max_columns,
        };
        crate::log_schema_fallback!(&error, index);

        ColumnAllocation {
            index,
            kind: AllocationKind::Displaced { previous },
            header,
        }
    }

    /// [`ColumnMap::ensure_column`] for a logical field
    ///
    /// Any of the field's spellings counts as an existing column.
    pub fn ensure_field(&mut self, field: Field, max_columns: usize) -> ColumnAllocation {
        if let Some(index) = self.index_of_field(field) {
            return ColumnAllocation {
                index,
                kind: AllocationKind::Existing,
                header: self.slots[index].name().into_owned(),
            };
        }
        self.ensure_column(field.header(), field.header(), max_columns)
    }
}
