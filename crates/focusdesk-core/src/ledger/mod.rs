//! Habit and water ledgers, plus canonical date-key helpers.
//!
//! A date key is the zero-padded local calendar day (`YYYY-MM-DD`). It is
//! computed from the calendar date directly, never from locale-formatted
//! display strings, so ledger indexing is stable across locales.

pub mod habit;
pub mod water;

pub use habit::{Category, HabitKey, HabitLedger, UnknownCategory, UnknownHabit};
pub use water::WaterLedger;

use chrono::{Local, NaiveDate};

/// Canonical date key for a calendar day.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Date key for today in local time.
pub fn today_key() -> String {
    date_key(Local::now().date_naive())
}

/// Parse a date key back into a calendar day.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}
