//! The live counter run.

use chrono::NaiveDate;

use crate::calendar;
use crate::unit::CountUnit;

/// Default label shown until the user picks their own.
pub const DEFAULT_LABEL: &str = "Sem acidentes graves";

/// Whether the current run is still tracking today or frozen at an end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No forced end date; the count follows today.
    Running,
    /// A forced end date is set; the count is frozen.
    Closed,
}

/// The mutable current-run state.
///
/// Created once per widget instance and loaded from persisted state at render
/// time; mutated only by explicit user actions. It is never deleted, only
/// reset by committing a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSession {
    /// Inclusive start of the current streak.
    pub start_date: NaiveDate,
    /// When present, the count freezes at `end_date - start_date`.
    pub end_date: Option<NaiveDate>,
    /// Unit used for every difference this session computes.
    pub unit: CountUnit,
    /// Free text shown alongside the count.
    pub label: String,
    /// First-person plural phrasing when set.
    pub is_plural: bool,
}

impl CounterSession {
    /// The first-run session: started today, singular, counting days.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            start_date: today,
            end_date: None,
            unit: CountUnit::Days,
            label: DEFAULT_LABEL.to_string(),
            is_plural: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> RunState {
        match self.end_date {
            None => RunState::Running,
            Some(_) => RunState::Closed,
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state(), RunState::Running)
    }

    /// The elapsed count shown to the user: start to today, or to the forced
    /// end date when one is set. Always a magnitude.
    #[must_use]
    pub fn live_count(&self, today: NaiveDate) -> i64 {
        let end = self.end_date.unwrap_or(today);
        calendar::unit_diff(self.start_date, end, self.unit).abs()
    }

    /// Restarts the count from today without closing anything into history.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.start_date = today;
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = date;
    }

    /// Freezes the count at the given end date.
    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.end_date = Some(date);
    }

    /// Resumes tracking today.
    pub fn clear_end_date(&mut self) {
        self.end_date = None;
    }
}
