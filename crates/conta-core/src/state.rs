//! Counter, record, and history reconciliation.
//!
//! [`CounterState`] is the full persisted state of one widget instance. All
//! write paths that can raise the record live here, so the invariant holds
//! no matter which editor triggered the mutation: after any history change
//! the stored record is at least the largest count in the log, and it only
//! ever decreases through [`CounterState::reset_record`].

use chrono::NaiveDate;

use crate::history::{EntryId, HistoryEntry, HistoryLog};
use crate::record::derive_record;
use crate::session::CounterSession;

/// The complete state of one counter: live run, stored record, history log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterState {
    pub session: CounterSession,
    /// Largest count ever observed, as last explicitly persisted.
    pub record: i64,
    pub history: HistoryLog,
}

impl CounterState {
    /// First-run state: fresh session, record 0, empty history.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            session: CounterSession::new(today),
            record: 0,
            history: HistoryLog::new(),
        }
    }

    /// The live elapsed count for display.
    #[must_use]
    pub fn live_count(&self, today: NaiveDate) -> i64 {
        self.session.live_count(today)
    }

    /// The record for display: the live count may exceed the stored record
    /// while the session is running, but the stored value is untouched.
    #[must_use]
    pub fn displayed_record(&self, today: NaiveDate) -> i64 {
        derive_record(
            self.record,
            self.session.live_count(today),
            self.session.is_running(),
        )
    }

    /// Overwrites the stored record with the currently displayed one.
    ///
    /// This is the save-settings path: the derived value the user has been
    /// looking at becomes durable. Call it before applying edits so the
    /// capture reflects the state as loaded.
    pub fn capture_live_record(&mut self, today: NaiveDate) {
        self.record = self.displayed_record(today);
    }

    /// Zeroes the record, forgetting the previous maximum. No undo.
    pub fn reset_record(&mut self) {
        self.record = 0;
    }

    /// Closes the current run into history and immediately restarts it.
    ///
    /// The closed interval runs from the session start to today, measured in
    /// the active unit; a forced end date does not shorten it and is
    /// cleared. The session is left running from today, so no day is ever
    /// outside some interval.
    pub fn commit_new(&mut self, today: NaiveDate) -> EntryId {
        let entry = HistoryEntry::new(self.session.start_date, today, self.session.unit);
        let id = entry.id.clone();
        self.history.append(entry);
        self.raise_record_to_history_max();
        self.session.start_date = today;
        self.session.end_date = None;
        id
    }

    /// Appends a manually created interval, deriving its count from the
    /// dates and the active unit.
    pub fn add_history(&mut self, start_date: NaiveDate, end_date: NaiveDate) -> EntryId {
        let entry = HistoryEntry::new(start_date, end_date, self.session.unit);
        let id = entry.id.clone();
        self.history.append(entry);
        self.raise_record_to_history_max();
        id
    }

    /// Re-dates the entry with the given ID, recomputing its count.
    ///
    /// Returns `false` when no entry matches; the state is then unchanged.
    pub fn update_history(
        &mut self,
        id: &EntryId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> bool {
        let updated = self
            .history
            .update(id, start_date, end_date, self.session.unit);
        if updated {
            self.raise_record_to_history_max();
        }
        updated
    }

    /// Removes the entry with the given ID.
    ///
    /// Returns `false` when no entry matches. The record is not lowered even
    /// when the removed entry held the maximum.
    pub fn remove_history(&mut self, id: &EntryId) -> bool {
        let removed = self.history.remove(id);
        if removed {
            self.raise_record_to_history_max();
        }
        removed
    }

    fn raise_record_to_history_max(&mut self) {
        self.record = self.record.max(self.history.max_count());
    }
}
