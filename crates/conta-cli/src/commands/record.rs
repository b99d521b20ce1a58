//! Record commands: show and reset the personal best.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use conta_store::Store;

use super::util;

/// Shows the record as the user sees it: the stored value, or the live
/// count when a running session has already passed it.
pub fn show<W: Write>(writer: &mut W, store: &Store, today: NaiveDate) -> Result<()> {
    let state = store.load(today)?;
    let displayed = state.displayed_record(today);
    let unit = state.session.unit;

    if displayed == state.record {
        writeln!(writer, "Record: {} {}", displayed, unit.label(displayed))?;
    } else {
        writeln!(
            writer,
            "Record: {} {} (stored {}, live run ahead)",
            displayed,
            unit.label(displayed),
            state.record
        )?;
    }
    Ok(())
}

/// Zeroes the record. All memory of the previous maximum is lost.
pub fn reset<W: Write>(writer: &mut W, store: &mut Store, today: NaiveDate) -> Result<()> {
    let state = store.apply(today, conta_core::CounterState::reset_record)?;
    writeln!(writer, "Record reset.")?;
    writeln!(writer)?;
    util::print_widget(writer, &state, today)
}
