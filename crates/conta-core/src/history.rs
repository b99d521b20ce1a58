//! The ordered log of completed intervals.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{self, epoch_millis};
use crate::unit::CountUnit;

/// Validation errors for history types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The provided entry ID was empty.
    #[error("entry ID cannot be empty")]
    EmptyId,
}

/// A validated history entry identifier.
///
/// Entry IDs must be non-empty strings. They are assigned at creation and
/// never change afterwards; freshly created entries get a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryId(String);

impl EntryId {
    /// Creates an ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, HistoryError> {
        let id = id.into();
        if id.is_empty() {
            return Err(HistoryError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Generates a fresh unique ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntryId {
    type Error = HistoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One completed, closed interval.
///
/// `count` is a derived field: it is recomputed from the dates whenever
/// either changes and is never edited independently of them. Date order is
/// irrelevant to the magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    #[serde(rename = "start", with = "epoch_millis")]
    pub start_date: NaiveDate,
    #[serde(rename = "end", with = "epoch_millis")]
    pub end_date: NaiveDate,
    pub count: i64,
}

impl HistoryEntry {
    /// Creates an entry with a fresh ID, deriving the count from the dates.
    #[must_use]
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, unit: CountUnit) -> Self {
        Self::with_id(EntryId::generate(), start_date, end_date, unit)
    }

    /// Creates an entry with a given ID, deriving the count from the dates.
    #[must_use]
    pub fn with_id(id: EntryId, start_date: NaiveDate, end_date: NaiveDate, unit: CountUnit) -> Self {
        Self {
            id,
            start_date,
            end_date,
            count: calendar::unit_diff(start_date, end_date, unit).abs(),
        }
    }
}

/// Insertion-ordered sequence of completed intervals.
///
/// The order is whatever the entries were appended in, not necessarily
/// chronological. The log is persisted wholesale on every mutation; partial
/// updates are never written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog(Vec<HistoryEntry>);

impl HistoryLog {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &EntryId) -> Option<&HistoryEntry> {
        self.0.iter().find(|entry| entry.id == *id)
    }

    /// Appends an entry to the end of the log.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.0.push(entry);
    }

    /// Replaces the dates of the entry with the given ID, preserving its
    /// position and recomputing the count with the active unit.
    ///
    /// Returns `false` (and leaves the log untouched) when no entry matches.
    pub fn update(
        &mut self,
        id: &EntryId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        unit: CountUnit,
    ) -> bool {
        match self.0.iter_mut().find(|entry| entry.id == *id) {
            Some(entry) => {
                entry.start_date = start_date;
                entry.end_date = end_date;
                entry.count = calendar::unit_diff(start_date, end_date, unit).abs();
                true
            }
            None => {
                tracing::warn!(id = %id, "update of unknown history entry ignored");
                false
            }
        }
    }

    /// Removes the entry with the given ID.
    ///
    /// Returns `false` (and leaves the log untouched) when no entry matches.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        let before = self.0.len();
        self.0.retain(|entry| entry.id != *id);
        if self.0.len() == before {
            tracing::warn!(id = %id, "removal of unknown history entry ignored");
            return false;
        }
        true
    }

    /// The maximum count across all entries, or 0 for an empty log.
    #[must_use]
    pub fn max_count(&self) -> i64 {
        self.0.iter().map(|entry| entry.count).max().unwrap_or(0)
    }

    /// Serializes the log to its persisted JSON form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses the persisted JSON form.
    ///
    /// A malformed payload yields an empty log: the store fails safe rather
    /// than surfacing a corrupted blob to the user.
    #[must_use]
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(log) => log,
            Err(error) => {
                tracing::warn!(%error, "malformed history payload, starting empty");
                Self::new()
            }
        }
    }
}
