//! Status command: the counter text plus the current settings.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use conta_core::{CountUnit, display};
use conta_store::Store;

use super::util;

/// Machine-readable status, for `--json`.
#[derive(Serialize)]
struct StatusExport {
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    unit: CountUnit,
    label: String,
    is_plural: bool,
    live_count: i64,
    record: i64,
    stored_record: i64,
    history_entries: usize,
}

pub fn run<W: Write>(writer: &mut W, store: &Store, today: NaiveDate, json: bool) -> Result<()> {
    let state = store.load(today)?;

    if json {
        let export = StatusExport {
            start_date: state.session.start_date,
            end_date: state.session.end_date,
            unit: state.session.unit,
            label: state.session.label.clone(),
            is_plural: state.session.is_plural,
            live_count: state.live_count(today),
            record: state.displayed_record(today),
            stored_record: state.record,
            history_entries: state.history.len(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&export)?)?;
        return Ok(());
    }

    util::print_widget(writer, &state, today)?;
    writeln!(writer)?;
    writeln!(
        writer,
        "Start: {}",
        display::format_date(state.session.start_date)
    )?;
    match state.session.end_date {
        Some(end) => writeln!(writer, "End: {} (frozen)", display::format_date(end))?,
        None => writeln!(writer, "End: today (running)")?,
    }
    writeln!(writer, "Unit: {}", state.session.unit)?;
    let displayed = state.displayed_record(today);
    if displayed == state.record {
        writeln!(writer, "Record: {displayed}")?;
    } else {
        writeln!(writer, "Record: {displayed} (stored {})", state.record)?;
    }
    writeln!(writer, "History: {} entries", state.history.len())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use conta_core::CounterState;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_store() -> Store {
        let mut store = Store::open_in_memory().unwrap();
        let mut state = CounterState::new(date(2024, 1, 1));
        state.record = 12;
        state.add_history(date(2023, 12, 1), date(2023, 12, 4));
        store.save(&state).unwrap();
        store
    }

    #[test]
    fn status_shows_widget_text_and_settings() {
        let store = seeded_store();
        let mut output = Vec::new();
        run(&mut output, &store, date(2024, 1, 11), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "Estou há 10 dias\n\
             Sem acidentes graves\n\
             Meu record é 12 dias\n\
             \n\
             Start: 01/01/2024\n\
             End: today (running)\n\
             Unit: days\n\
             Record: 12\n\
             History: 1 entries\n"
        );
    }

    #[test]
    fn status_marks_a_live_record_ahead_of_the_stored_one() {
        let store = seeded_store();
        let mut output = Vec::new();
        run(&mut output, &store, date(2024, 1, 31), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Record: 30 (stored 12)"), "{output}");
    }

    #[test]
    fn status_shows_frozen_end_date() {
        let store = seeded_store();
        let mut store = store;
        store
            .apply(date(2024, 1, 11), |state| {
                state.session.set_end_date(date(2024, 1, 6));
            })
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &store, date(2024, 1, 11), false).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Estou há 5 dias"), "{output}");
        assert!(output.contains("End: 06/01/2024 (frozen)"), "{output}");
    }

    #[test]
    fn status_json_exports_the_derived_and_stored_record() {
        let store = seeded_store();
        let mut output = Vec::new();
        run(&mut output, &store, date(2024, 1, 31), true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["start_date"], "2024-01-01");
        assert_eq!(value["end_date"], serde_json::Value::Null);
        assert_eq!(value["unit"], "days");
        assert_eq!(value["live_count"], 30);
        assert_eq!(value["record"], 30);
        assert_eq!(value["stored_record"], 12);
        assert_eq!(value["history_entries"], 1);
    }
}
