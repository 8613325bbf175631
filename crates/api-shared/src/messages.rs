//! Wire types for the REST API.
//!
//! Field names match the JSON the browser front end sends and reads, so `abha_number` stays
//! `abha_number` here even though the core calls it an identifier.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// `{"status": "..."}` acknowledgement returned by write endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusRes {
    pub status: String,
}

impl StatusRes {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// `{"error": "..."}` body for client errors and the registry offline fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// EHR submission. Only `abha_number` is required; the server rejects the request without it.
/// It is matched against stored patients exactly, surrounding whitespace included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SaveEhrReq {
    #[serde(default)]
    pub abha_number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub problem_name: Option<String>,
    #[serde(default)]
    pub problem_description: Option<String>,
    #[serde(default)]
    pub vitals_bp: Option<String>,
    #[serde(default)]
    pub vitals_temp: Option<String>,
    /// `YYYY-MM-DD`; the server's current date is used when absent.
    #[serde(default)]
    pub date: Option<String>,
}

/// One observation as stored. Any field may be `null` in records written by older clients, and
/// keys not listed here are returned unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ObservationRes {
    pub problem_name: Option<String>,
    pub problem_description: Option<String>,
    pub vitals_bp: Option<String>,
    pub vitals_temp: Option<String>,
    pub date: Option<String>,
}

/// Shape of one `/load_ehr` entry. Stored patients are returned as they are on disk, extra keys
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub abha_number: String,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub diseases: Vec<ObservationRes>,
}

/// A free-form survey submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct SurveyEntry(pub Map<String, Value>);

/// Any JSON document passed through without interpretation (reminders, registry data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct JsonDocument(pub Value);
