//! Survey entries and vaccination reminders.
//!
//! Surveys are free-form JSON objects; the only field the service cares about is `date`, which
//! is stamped when the caller leaves it out. Reminders are seeded out of band and only ever read.

use crate::format_date;
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// A single survey submission. Every key the caller sent is kept.
pub type SurveyEntry = Map<String, Value>;

/// A vaccination reminder as stored in the reminder file.
pub type VaccinationReminder = Value;

/// Inserts `date` as `YYYY-MM-DD` when the entry has none. An existing `date` is left as is,
/// whatever its value.
pub fn stamp_date(mut entry: SurveyEntry, today: NaiveDate) -> SurveyEntry {
    if !entry.contains_key("date") {
        entry.insert("date".to_string(), Value::String(format_date(today)));
    }
    entry
}
