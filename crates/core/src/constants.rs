//! Constants used throughout the Swasthya core crate.
//!
//! This module contains file names, defaults and fixed response strings so that the CLI, the
//! REST API and the core agree on them.

/// Default directory for the JSON stores when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Filename for the patient EHR store.
pub const EHR_FILENAME: &str = "ehr_records.json";

/// Filename for the survey store.
pub const SURVEY_FILENAME: &str = "survey_data.json";

/// Filename for the vaccination reminder store.
pub const VACCINATION_FILENAME: &str = "vaccination_schedule.json";

/// Upstream Ayushman Bharat registry endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "https://api.ayushmanbharat.gov.in/data";

/// Timeout applied to the registry call, in seconds.
pub const DEFAULT_REGISTRY_TIMEOUT_SECS: u64 = 5;

/// Sentinel stored for patient name and gender when the first submission omits them.
pub const UNKNOWN: &str = "Unknown";

/// Error message returned in place of registry data when the upstream call fails.
pub const OFFLINE_MESSAGE: &str = "Unable to connect. Offline mode";

/// Date format for observation and survey dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
