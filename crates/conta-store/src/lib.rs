//! Storage layer for the streak counter.
//!
//! Persists the counter state as a small set of preference keys using
//! `rusqlite`, mirroring a platform key-value preferences store.
//!
//! # Thread Safety
//!
//! The [`Store`] type wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`. A `Store` can be moved between threads but not shared without
//! external synchronization. The counter has a single writer (the UI issues
//! one mutation at a time), so no locking is provided here.
//!
//! # Schema
//!
//! One table, one row per preference key:
//!
//! ```sql
//! CREATE TABLE prefs (key TEXT PRIMARY KEY, value TEXT NOT NULL);
//! ```
//!
//! Values are stored as text: dates as decimal epoch millis at midnight,
//! booleans as `true`/`false`, the history log as its JSON wire form. A
//! missing key falls back to its documented default; a malformed value does
//! the same with a warning. The `end_date` key is deleted, not nulled, when
//! the session has no forced end date.
//!
//! Every mutation is a full read-modify-write: [`Store::apply`] loads the
//! state, runs the mutator, and rewrites every key inside one transaction,
//! so an interrupted write leaves the prior persisted state intact.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use conta_core::calendar::{date_from_millis, date_to_millis};
use conta_core::{CounterSession, CounterState, CountUnit, DEFAULT_LABEL, HistoryLog};

/// Preference keys, one per persisted field.
pub mod keys {
    pub const START_DATE: &str = "start_date";
    pub const END_DATE: &str = "end_date";
    pub const RECORD: &str = "record";
    pub const IS_PLURAL: &str = "is_plural";
    pub const MIDDLE_TEXT: &str = "middle_text";
    pub const USE_MONTHS: &str = "use_months";
    pub const HISTORY_JSON: &str = "history_json";
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// The history log failed to serialize.
    #[error("history serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Preferences-store wrapper.
///
/// See the [module documentation](self) for schema and thread safety notes.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens a store at the given path, creating it if necessary.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Opens an in-memory store. Useful for testing; the data is destroyed
    /// when the connection closes.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS prefs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Loads the counter state, substituting the documented default for
    /// every missing or malformed key. Never writes; a first run reads the
    /// defaults without persisting them.
    pub fn load(&self, today: NaiveDate) -> Result<CounterState, StoreError> {
        load_state(&self.conn, today)
    }

    /// Persists the whole state, replacing every key.
    pub fn save(&mut self, state: &CounterState) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        write_state(&tx, state)?;
        tx.commit()?;
        Ok(())
    }

    /// One read-modify-write cycle: loads the state, runs the mutator, and
    /// persists the result, all inside a single transaction. Returns the
    /// state as persisted.
    pub fn apply<F>(&mut self, today: NaiveDate, mutate: F) -> Result<CounterState, StoreError>
    where
        F: FnOnce(&mut CounterState),
    {
        let tx = self.conn.transaction()?;
        let mut state = load_state(&tx, today)?;
        mutate(&mut state);
        write_state(&tx, &state)?;
        tx.commit()?;
        tracing::debug!(record = state.record, history_len = state.history.len(), "state persisted");
        Ok(state)
    }
}

fn get_raw(conn: &Connection, key: &str) -> Result<Option<String>, StoreError> {
    let value = conn
        .query_row("SELECT value FROM prefs WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

fn set_raw(conn: &Connection, key: &str, value: &str) -> Result<(), StoreError> {
    conn.execute(
        "INSERT OR REPLACE INTO prefs (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

fn delete_raw(conn: &Connection, key: &str) -> Result<(), StoreError> {
    conn.execute("DELETE FROM prefs WHERE key = ?1", params![key])?;
    Ok(())
}

/// Parses a stored value, falling back to the default on malformed input.
fn parse_or_default<T: std::str::FromStr>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        None => default,
        Some(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!(key, value = %value, "malformed preference value, using default");
                default
            }
        },
    }
}

fn get_date(conn: &Connection, key: &str) -> Result<Option<NaiveDate>, StoreError> {
    let Some(raw) = get_raw(conn, key)? else {
        return Ok(None);
    };
    let date = raw.parse::<i64>().ok().and_then(date_from_millis);
    if date.is_none() {
        tracing::warn!(key, value = %raw, "malformed stored date, using default");
    }
    Ok(date)
}

fn load_state(conn: &Connection, today: NaiveDate) -> Result<CounterState, StoreError> {
    let start_date = get_date(conn, keys::START_DATE)?.unwrap_or(today);
    let end_date = get_date(conn, keys::END_DATE)?;
    let record = parse_or_default(get_raw(conn, keys::RECORD)?, keys::RECORD, 0i64);
    let is_plural = parse_or_default(get_raw(conn, keys::IS_PLURAL)?, keys::IS_PLURAL, false);
    let use_months = parse_or_default(get_raw(conn, keys::USE_MONTHS)?, keys::USE_MONTHS, false);
    let label = get_raw(conn, keys::MIDDLE_TEXT)?.unwrap_or_else(|| DEFAULT_LABEL.to_string());
    let history = get_raw(conn, keys::HISTORY_JSON)?
        .map_or_else(HistoryLog::new, |json| HistoryLog::from_json(&json));

    Ok(CounterState {
        session: CounterSession {
            start_date,
            end_date,
            unit: CountUnit::from_use_months(use_months),
            label,
            is_plural,
        },
        record,
        history,
    })
}

fn write_state(conn: &Connection, state: &CounterState) -> Result<(), StoreError> {
    let session = &state.session;
    set_raw(
        conn,
        keys::START_DATE,
        &date_to_millis(session.start_date).to_string(),
    )?;
    match session.end_date {
        Some(end) => set_raw(conn, keys::END_DATE, &date_to_millis(end).to_string())?,
        None => delete_raw(conn, keys::END_DATE)?,
    }
    set_raw(conn, keys::RECORD, &state.record.to_string())?;
    set_raw(conn, keys::IS_PLURAL, &session.is_plural.to_string())?;
    set_raw(conn, keys::MIDDLE_TEXT, &session.label)?;
    set_raw(
        conn,
        keys::USE_MONTHS,
        &session.unit.uses_months().to_string(),
    )?;
    set_raw(conn, keys::HISTORY_JSON, &state.history.to_json()?)?;
    Ok(())
}
