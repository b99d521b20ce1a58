//! Calendar-unit arithmetic between dates.
//!
//! All counter math works on [`NaiveDate`] — calendar dates with no time
//! component — so a run started "yesterday" is one day old regardless of the
//! time of day it is rendered at. The persisted representation is epoch
//! milliseconds at midnight UTC of the calendar date.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime};

use crate::unit::CountUnit;

/// Signed count of calendar days from `a` to `b`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Signed count of whole calendar months from `a` to `b`.
///
/// A month is counted once the day-of-month of `a` is reached again, with
/// shorter months clamped: 2024-01-15 → 2024-03-10 is 1 month (the second
/// month has not completed), 2023-01-31 → 2023-02-28 is 0.
pub fn months_between(a: NaiveDate, b: NaiveDate) -> i64 {
    if b < a {
        return -months_between(b, a);
    }
    let mut months =
        i64::from(b.year() - a.year()) * 12 + i64::from(b.month()) - i64::from(a.month());
    if months > 0 && b.day() < a.day() {
        months -= 1;
    }
    months
}

/// Signed count of whole units from `a` to `b` in the given unit.
///
/// Callers that only care about magnitude take the absolute value; the sign
/// is kept so a caller can tell which date is later. `a == b` yields 0.
pub fn unit_diff(a: NaiveDate, b: NaiveDate, unit: CountUnit) -> i64 {
    match unit {
        CountUnit::Days => days_between(a, b),
        CountUnit::Months => months_between(a, b),
    }
}

/// Converts a calendar date to its persisted form: epoch millis at midnight.
pub fn date_to_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Converts persisted epoch millis back to a calendar date.
///
/// Returns `None` for out-of-range values; callers substitute their
/// documented default rather than failing.
pub fn date_from_millis(millis: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

/// Serde adapter persisting a [`NaiveDate`] as epoch millis.
pub mod epoch_millis {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(super::date_to_millis(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        super::date_from_millis(millis)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {millis} ms")))
    }
}
