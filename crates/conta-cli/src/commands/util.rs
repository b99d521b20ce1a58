//! Shared helpers for command output.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use conta_core::{CounterState, display};

/// Re-renders the counter text after a mutation.
///
/// This is the refresh signal: every mutating command calls it once its
/// state is persisted, the way the widget is redrawn after an edit.
pub fn print_widget<W: Write>(
    writer: &mut W,
    state: &CounterState,
    today: NaiveDate,
) -> Result<()> {
    let text = display::render(state, today);
    writeln!(writer, "{}", text.to_block())?;
    Ok(())
}
