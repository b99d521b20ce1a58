//! Commit command: close the current run and restart it.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use conta_core::display;
use conta_store::Store;

use super::util;

pub fn run<W: Write>(writer: &mut W, store: &mut Store, today: NaiveDate) -> Result<()> {
    let mut committed = None;
    let state = store.apply(today, |state| {
        committed = Some(state.commit_new(today));
    })?;

    if let Some(id) = committed {
        if let Some(entry) = state.history.get(&id) {
            writeln!(
                writer,
                "Closed run: {} - {} ({} {})",
                display::format_date(entry.start_date),
                display::format_date(entry.end_date),
                entry.count,
                state.session.unit.label(entry.count),
            )?;
        }
    }
    writeln!(writer)?;
    util::print_widget(writer, &state, today)
}
