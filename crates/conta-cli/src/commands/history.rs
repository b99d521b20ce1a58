//! History editor commands.
//!
//! All writes go through the log operations on the counter state, so the
//! record invariant is maintained here the same way it is for commits.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use conta_core::{EntryId, display};
use conta_store::Store;

use super::util;

/// Lists completed runs in insertion order.
pub fn list<W: Write>(writer: &mut W, store: &Store, today: NaiveDate, json: bool) -> Result<()> {
    let state = store.load(today)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&state.history)?)?;
        return Ok(());
    }

    if state.history.is_empty() {
        writeln!(writer, "No completed runs.")?;
        return Ok(());
    }

    for entry in state.history.entries() {
        writeln!(
            writer,
            "{} - {}  {} {}  [{}]",
            display::format_date(entry.start_date),
            display::format_date(entry.end_date),
            entry.count,
            state.session.unit.label(entry.count),
            entry.id,
        )?;
    }
    Ok(())
}

/// Adds a completed run; its count is derived from the dates.
pub fn add<W: Write>(
    writer: &mut W,
    store: &mut Store,
    today: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<()> {
    let mut added = None;
    let state = store.apply(today, |state| {
        added = Some(state.add_history(start, end));
    })?;

    if let Some(id) = added {
        if let Some(entry) = state.history.get(&id) {
            writeln!(
                writer,
                "Added: {} - {} ({} {})  [{}]",
                display::format_date(entry.start_date),
                display::format_date(entry.end_date),
                entry.count,
                state.session.unit.label(entry.count),
                entry.id,
            )?;
        }
    }
    writeln!(writer)?;
    util::print_widget(writer, &state, today)
}

/// Re-dates the entry with the given ID. Omitted dates keep their stored
/// value. An unknown ID changes nothing and is reported, not an error.
pub fn edit<W: Write>(
    writer: &mut W,
    store: &mut Store,
    today: NaiveDate,
    id: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<()> {
    let id = EntryId::new(id)?;
    let mut updated = false;
    let state = store.apply(today, |state| {
        let Some(entry) = state.history.get(&id) else {
            return;
        };
        let new_start = start.unwrap_or(entry.start_date);
        let new_end = end.unwrap_or(entry.end_date);
        updated = state.update_history(&id, new_start, new_end);
    })?;

    if !updated {
        writeln!(writer, "No history entry with id {id}; nothing changed.")?;
        return Ok(());
    }

    if let Some(entry) = state.history.get(&id) {
        writeln!(
            writer,
            "Updated: {} - {} ({} {})",
            display::format_date(entry.start_date),
            display::format_date(entry.end_date),
            entry.count,
            state.session.unit.label(entry.count),
        )?;
    }
    writeln!(writer)?;
    util::print_widget(writer, &state, today)
}

/// Deletes the entry with the given ID. An unknown ID changes nothing and
/// is reported, not an error.
pub fn remove<W: Write>(
    writer: &mut W,
    store: &mut Store,
    today: NaiveDate,
    id: &str,
) -> Result<()> {
    let id = EntryId::new(id)?;
    let mut removed = false;
    let state = store.apply(today, |state| {
        removed = state.remove_history(&id);
    })?;

    if !removed {
        writeln!(writer, "No history entry with id {id}; nothing changed.")?;
        return Ok(());
    }

    writeln!(writer, "Removed {id}.")?;
    writeln!(writer)?;
    util::print_widget(writer, &state, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    use conta_core::{CounterState, CountUnit};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    fn store_with_entry() -> (Store, String) {
        let mut store = Store::open_in_memory().unwrap();
        let mut state = CounterState::new(date(2024, 6, 1));
        let id = state.add_history(date(2024, 1, 1), date(2024, 1, 11));
        store.save(&state).unwrap();
        (store, id.to_string())
    }

    #[test]
    fn list_is_empty_on_first_run() {
        let store = Store::open_in_memory().unwrap();
        let mut output = Vec::new();
        list(&mut output, &store, today(), false).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No completed runs.\n");
    }

    #[test]
    fn list_shows_dates_count_and_id() {
        let (store, id) = store_with_entry();
        let mut output = Vec::new();
        list(&mut output, &store, today(), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, format!("01/01/2024 - 11/01/2024  10 dias  [{id}]\n"));
    }

    #[test]
    fn list_json_round_trips_the_wire_format() {
        let (store, id) = store_with_entry();
        let mut output = Vec::new();
        list(&mut output, &store, today(), true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[0]["id"], id.as_str());
        assert_eq!(value[0]["count"], 10);
    }

    #[test]
    fn add_appends_and_raises_the_record() {
        let mut store = Store::open_in_memory().unwrap();
        store.save(&CounterState::new(today())).unwrap();

        let mut output = Vec::new();
        add(
            &mut output,
            &mut store,
            today(),
            date(2024, 1, 1),
            date(2024, 1, 11),
        )
        .unwrap();

        let state = store.load(today()).unwrap();
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.record, 10);
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Added: 01/01/2024 - 11/01/2024 (10 dias)"), "{output}");
    }

    #[test]
    fn edit_recomputes_the_count() {
        let (mut store, id) = store_with_entry();
        let mut output = Vec::new();

        edit(
            &mut output,
            &mut store,
            today(),
            &id,
            None,
            Some(date(2024, 1, 21)),
        )
        .unwrap();

        let state = store.load(today()).unwrap();
        assert_eq!(state.history.entries()[0].count, 20);
        assert_eq!(state.record, 20);
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Updated: 01/01/2024 - 21/01/2024 (20 dias)"), "{output}");
    }

    #[test]
    fn edit_uses_the_active_unit() {
        let (mut store, id) = store_with_entry();
        store
            .apply(today(), |state| {
                state.session.unit = CountUnit::Months;
            })
            .unwrap();

        let mut output = Vec::new();
        edit(
            &mut output,
            &mut store,
            today(),
            &id,
            Some(date(2024, 1, 15)),
            Some(date(2024, 3, 10)),
        )
        .unwrap();

        let state = store.load(today()).unwrap();
        assert_eq!(state.history.entries()[0].count, 1);
    }

    #[test]
    fn edit_unknown_id_reports_and_changes_nothing() {
        let (mut store, _id) = store_with_entry();
        let before = store.load(today()).unwrap();

        let mut output = Vec::new();
        edit(
            &mut output,
            &mut store,
            today(),
            "missing",
            Some(date(2024, 1, 1)),
            Some(date(2024, 1, 2)),
        )
        .unwrap();

        assert_eq!(store.load(today()).unwrap(), before);
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "No history entry with id missing; nothing changed.\n");
    }

    #[test]
    fn remove_drops_the_entry() {
        let (mut store, id) = store_with_entry();
        let mut output = Vec::new();

        remove(&mut output, &mut store, today(), &id).unwrap();

        assert!(store.load(today()).unwrap().history.is_empty());
        // The record survives the deletion.
        assert_eq!(store.load(today()).unwrap().record, 10);
    }

    #[test]
    fn remove_unknown_id_reports_and_changes_nothing() {
        let (mut store, _id) = store_with_entry();
        let before = store.load(today()).unwrap();

        let mut output = Vec::new();
        remove(&mut output, &mut store, today(), "x").unwrap();

        assert_eq!(store.load(today()).unwrap(), before);
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "No history entry with id x; nothing changed.\n");
    }
}
