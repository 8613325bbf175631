//! # Swasthya Core
//!
//! Core business logic for the Swasthya health-record service.
//!
//! This crate contains pure data operations over flat JSON files:
//! - Whole-file JSON array stores with locked read-modify-write (`store`)
//! - Patient EHR merge keyed by ABHA number (`ehr`)
//! - Survey entries and vaccination reminders (`survey`)
//! - The Ayushman Bharat registry client with offline fallback (`registry`)
//!
//! **No API concerns**: HTTP servers, routing and CLI parsing belong in `api-rest` and
//! `swasthya-cli`.

pub mod config;
pub mod constants;
pub mod ehr;
pub mod error;
pub mod registry;
pub mod service;
pub mod store;
pub mod survey;

pub use config::{registry_timeout_from_env_value, CoreConfig, StoreKind};
pub use constants::DEFAULT_DATA_DIR;
pub use ehr::{EhrSubmission, MergeOutcome, Observation, PatientRecord};
pub use error::{CoreError, CoreResult};
pub use service::RecordService;
pub use swasthya_types::NonEmptyText;

use chrono::NaiveDate;

/// Formats a date the way every stored `date` field is written (`YYYY-MM-DD`).
pub fn format_date(date: NaiveDate) -> String {
    date.format(constants::DATE_FORMAT).to_string()
}

/// Today's date in the server's local time zone.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
