//! Save-settings command for the running counter.
//!
//! This is the path that lets a user re-label, re-date, or freeze the
//! running session without closing it into history. The history log is
//! never touched here.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use conta_core::CountUnit;
use conta_store::Store;

use super::util;

/// Parsed `set` flags. `None` fields leave the stored value unchanged.
#[derive(Debug, Default)]
pub struct SetOptions {
    pub label: Option<String>,
    pub plural: Option<bool>,
    pub unit: Option<CountUnit>,
    pub start: Option<NaiveDate>,
    pub today: bool,
    pub end: Option<NaiveDate>,
    pub clear_end: bool,
}

pub fn run<W: Write>(
    writer: &mut W,
    store: &mut Store,
    today: NaiveDate,
    options: SetOptions,
) -> Result<()> {
    let state = store.apply(today, |state| {
        // The record the user was looking at is what gets persisted, so
        // capture it against the state as loaded, before the edits move the
        // goalposts.
        state.capture_live_record(today);

        if let Some(label) = options.label {
            state.session.label = label;
        }
        if let Some(plural) = options.plural {
            state.session.is_plural = plural;
        }
        if let Some(unit) = options.unit {
            state.session.unit = unit;
        }
        if options.today {
            state.session.set_today(today);
        } else if let Some(start) = options.start {
            state.session.set_start_date(start);
        }
        if options.clear_end {
            state.session.clear_end_date();
        } else if let Some(end) = options.end {
            state.session.set_end_date(end);
        }
    })?;

    util::print_widget(writer, &state, today)
}
