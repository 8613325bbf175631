//! Patient EHR records and the observation merge.
//!
//! The patient store holds one [`PatientRecord`] per ABHA number. Each EHR submission carries a
//! single clinical observation; it is appended to the matching patient's `diseases` history, or
//! a new patient is created around it.
//!
//! ## Stored layout
//!
//! ```text
//! [
//!   {
//!     "abha_number": "14-2233-4455-6677",
//!     "name": "Asha",
//!     "gender": "F",
//!     "diseases": [
//!       { "problem_name": "Fever", "problem_description": null,
//!         "vitals_bp": "120/80", "vitals_temp": "38.2", "date": "2024-03-01" }
//!     ]
//!   }
//! ]
//! ```
//!
//! `diseases` is append-only: it is never reordered, deduplicated or trimmed.
//!
//! Records written by older clients may carry `null` in any field, or keys this module does not
//! know about. Both are read without error and written back as they were.

use crate::constants::UNKNOWN;
use crate::{format_date, CoreError, CoreResult};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use swasthya_types::NonEmptyText;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One clinical note within a patient's history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub problem_name: Option<String>,
    #[serde(default)]
    pub problem_description: Option<String>,
    #[serde(default)]
    pub vitals_bp: Option<String>,
    #[serde(default)]
    pub vitals_temp: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// Keys outside the fields above, kept as stored.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A patient entry in the EHR store, keyed by ABHA number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "abha_number")]
    pub identifier: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Older records may predate this field or hold `null`; they read back as an empty history.
    #[serde(default, deserialize_with = "null_as_default")]
    pub diseases: Vec<Observation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PatientRecord {
    pub fn name_or_unknown(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn gender_or_unknown(&self) -> &str {
        self.gender.as_deref().unwrap_or(UNKNOWN)
    }
}

/// An EHR payload as submitted, before any defaulting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EhrSubmission {
    #[serde(rename = "abha_number", default)]
    pub identifier: Option<String>,
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
    #[serde(default)]
    pub date: Option<String>,
}

/// A submission with its identifier validated and its defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSubmission {
    pub identifier: NonEmptyText,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub observation: Observation,
}

impl EhrSubmission {
    /// Applies the submission defaults.
    ///
    /// - `date` falls back to `today` as `YYYY-MM-DD`
    /// - `vitals_bp` and `vitals_temp` fall back to empty strings
    ///
    /// Name and gender stay optional here; they are only defaulted when a new patient is created.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingIdentifier` if `abha_number` is absent or blank.
    pub fn resolve(self, today: NaiveDate) -> CoreResult<ResolvedSubmission> {
        let identifier = self.identifier.ok_or(CoreError::MissingIdentifier)?;
        let identifier = NonEmptyText::new(identifier)?;

        Ok(ResolvedSubmission {
            identifier,
            name: self.name,
            gender: self.gender,
            observation: Observation {
                problem_name: self.problem_name,
                problem_description: self.problem_description,
                vitals_bp: Some(self.vitals_bp.unwrap_or_default()),
                vitals_temp: Some(self.vitals_temp.unwrap_or_default()),
                date: Some(self.date.unwrap_or_else(|| format_date(today))),
                extra: Map::new(),
            },
        })
    }
}

/// What a merge did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// A new patient record was appended.
    Created,
    /// The observation was appended to an existing patient, whose history now has
    /// `observations` entries.
    Appended { observations: usize },
}

/// Merges one observation into the patient collection.
///
/// Identifiers are compared exactly as stored. The first record whose identifier matches receives the observation at the end of its
/// `diseases`. Otherwise a new record is pushed, with name and gender defaulting to
/// `"Unknown"`. Name and gender on the submission are ignored for existing patients.
///
/// The caller is responsible for persisting `collection` afterwards.
pub fn merge_observation(
    collection: &mut Vec<PatientRecord>,
    incoming: ResolvedSubmission,
) -> MergeOutcome {
    let ResolvedSubmission {
        identifier,
        name,
        gender,
        observation,
    } = incoming;

    if let Some(idx) = collection
        .iter()
        .position(|p| p.identifier == identifier.as_str())
    {
        let patient = &mut collection[idx];
        patient.diseases.push(observation);
        return MergeOutcome::Appended {
            observations: patient.diseases.len(),
        };
    }

    collection.push(PatientRecord {
        identifier: identifier.into_string(),
        name: Some(name.unwrap_or_else(|| UNKNOWN.to_string())),
        gender: Some(gender.unwrap_or_else(|| UNKNOWN.to_string())),
        diseases: vec![observation],
        extra: Map::new(),
    });
    MergeOutcome::Created
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn submission(identifier: &str, problem: &str) -> EhrSubmission {
        EhrSubmission {
            identifier: Some(identifier.to_string()),
            problem_name: Some(problem.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_requires_identifier() {
        let err = EhrSubmission::default()
            .resolve(day())
            .expect_err("missing identifier should fail");
        assert!(matches!(err, CoreError::MissingIdentifier));

        let blank = EhrSubmission {
            identifier: Some("   ".into()),
            ..Default::default()
        };
        assert!(matches!(
            blank.resolve(day()),
            Err(CoreError::MissingIdentifier)
        ));
    }

    #[test]
    fn test_resolve_defaults_date_and_vitals() {
        let resolved = submission("A1", "Cough").resolve(day()).unwrap();

        assert_eq!(resolved.observation.date.as_deref(), Some("2024-03-01"));
        assert_eq!(resolved.observation.vitals_bp.as_deref(), Some(""));
        assert_eq!(resolved.observation.vitals_temp.as_deref(), Some(""));
        assert_eq!(resolved.observation.problem_description, None);
    }

    #[test]
    fn test_resolve_keeps_caller_date() {
        let mut sub = submission("A1", "Cough");
        sub.date = Some("2023-12-31".into());

        let resolved = sub.resolve(day()).unwrap();
        assert_eq!(resolved.observation.date.as_deref(), Some("2023-12-31"));
    }

    #[test]
    fn test_merge_creates_new_patient_with_defaults() {
        let mut records = Vec::new();
        let resolved = submission("A1", "Fever").resolve(day()).unwrap();

        let outcome = merge_observation(&mut records, resolved);

        assert_eq!(outcome, MergeOutcome::Created);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identifier, "A1");
        assert_eq!(records[0].name.as_deref(), Some("Unknown"));
        assert_eq!(records[0].gender.as_deref(), Some("Unknown"));
        assert_eq!(records[0].diseases.len(), 1);
        assert_eq!(records[0].diseases[0].problem_name.as_deref(), Some("Fever"));
    }

    #[test]
    fn test_merge_appends_to_existing_patient_in_order() {
        let mut records = Vec::new();
        let mut first = submission("A1", "Fever");
        first.name = Some("Asha".into());
        first.gender = Some("F".into());
        merge_observation(&mut records, first.resolve(day()).unwrap());

        let mut second = submission("A1", "Cough");
        second.name = Some("Someone Else".into());
        let outcome = merge_observation(&mut records, second.resolve(day()).unwrap());

        assert_eq!(outcome, MergeOutcome::Appended { observations: 2 });
        assert_eq!(records.len(), 1, "no duplicate patient should be created");
        assert_eq!(records[0].name_or_unknown(), "Asha", "name is not overwritten");
        let problems: Vec<_> = records[0]
            .diseases
            .iter()
            .map(|d| d.problem_name.as_deref().unwrap())
            .collect();
        assert_eq!(problems, vec!["Fever", "Cough"]);
    }

    #[test]
    fn test_merge_only_touches_matching_patient() {
        let mut records = Vec::new();
        merge_observation(&mut records, submission("A1", "Fever").resolve(day()).unwrap());
        merge_observation(&mut records, submission("B2", "Rash").resolve(day()).unwrap());
        merge_observation(&mut records, submission("A1", "Cough").resolve(day()).unwrap());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].diseases.len(), 2);
        assert_eq!(records[1].diseases.len(), 1);
    }

    #[test]
    fn test_merge_into_record_without_diseases_field() {
        let mut records: Vec<PatientRecord> =
            serde_json::from_str(r#"[{"abha_number": "A1", "name": "Ravi", "gender": "M"}]"#)
                .unwrap();
        assert!(records[0].diseases.is_empty());

        let outcome = merge_observation(&mut records, submission("A1", "Fever").resolve(day()).unwrap());

        assert_eq!(outcome, MergeOutcome::Appended { observations: 1 });
        assert_eq!(records[0].diseases.len(), 1);
    }

    #[test]
    fn test_observation_serialises_absent_problem_as_null() {
        let resolved = EhrSubmission {
            identifier: Some("A1".into()),
            ..Default::default()
        }
        .resolve(day())
        .unwrap();

        let value = serde_json::to_value(&resolved.observation).unwrap();
        assert!(value["problem_name"].is_null());
        assert_eq!(value["vitals_bp"], "");
        assert_eq!(value["date"], "2024-03-01");
    }

    #[test]
    fn test_merge_matches_identifier_exactly() {
        let mut records: Vec<PatientRecord> =
            serde_json::from_str(r#"[{"abha_number": " A1", "name": "Ravi", "diseases": []}]"#)
                .unwrap();

        let padded = merge_observation(&mut records, submission(" A1", "Fever").resolve(day()).unwrap());
        let bare = merge_observation(&mut records, submission("A1", "Cough").resolve(day()).unwrap());

        assert_eq!(padded, MergeOutcome::Appended { observations: 1 });
        assert_eq!(bare, MergeOutcome::Created);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].identifier, "A1");
    }

    #[test]
    fn test_null_fields_read_back_and_are_written_as_null() {
        let stored = serde_json::json!([{
            "abha_number": "A1",
            "name": null,
            "gender": null,
            "diseases": [{
                "problem_name": null,
                "problem_description": null,
                "vitals_bp": null,
                "vitals_temp": null,
                "date": null
            }]
        }]);
        let mut records: Vec<PatientRecord> = serde_json::from_value(stored.clone()).unwrap();

        assert_eq!(records[0].name_or_unknown(), "Unknown");
        assert_eq!(records[0].diseases[0].vitals_bp, None);
        assert_eq!(serde_json::to_value(&records).unwrap(), stored);

        let outcome = merge_observation(&mut records, submission("A1", "Fever").resolve(day()).unwrap());
        assert_eq!(outcome, MergeOutcome::Appended { observations: 2 });
    }

    #[test]
    fn test_null_diseases_reads_as_empty_history() {
        let records: Vec<PatientRecord> =
            serde_json::from_str(r#"[{"abha_number": "A1", "diseases": null}]"#).unwrap();
        assert!(records[0].diseases.is_empty());
    }

    #[test]
    fn test_unknown_keys_survive_a_merge() {
        let mut records: Vec<PatientRecord> = serde_json::from_value(serde_json::json!([{
            "abha_number": "A1",
            "name": "Ravi",
            "gender": "M",
            "age": 42,
            "diseases": [{"problem_name": "Fever", "date": "2024-01-01", "doctor": "Rao"}]
        }]))
        .unwrap();

        merge_observation(&mut records, submission("A1", "Cough").resolve(day()).unwrap());

        let value = serde_json::to_value(&records).unwrap();
        assert_eq!(value[0]["age"], 42);
        assert_eq!(value[0]["diseases"][0]["doctor"], "Rao");
        assert_eq!(value[0]["diseases"][1]["problem_name"], "Cough");
    }
}
