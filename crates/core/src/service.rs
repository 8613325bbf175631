//! Record service.
//!
//! [`RecordService`] is the entry point the API and CLI use. It owns one [`JsonArrayStore`] per
//! dataset, built once from [`CoreConfig`], and the registry client. Cloning the service shares
//! the store locks, so every clone serialises writes to the same files.

use crate::config::{CoreConfig, StoreKind};
use crate::ehr::{merge_observation, EhrSubmission, MergeOutcome, PatientRecord};
use crate::registry::RegistryClient;
use crate::store::JsonArrayStore;
use crate::survey::{stamp_date, SurveyEntry, VaccinationReminder};
use crate::{local_today, CoreResult};
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;

/// Pure record operations - no API concerns
#[derive(Clone, Debug)]
pub struct RecordService {
    cfg: Arc<CoreConfig>,
    ehr: JsonArrayStore,
    surveys: JsonArrayStore,
    reminders: JsonArrayStore,
    registry: RegistryClient,
}

impl RecordService {
    /// Creates the service and its stores. Store files are created lazily on first access.
    ///
    /// # Errors
    /// Returns `CoreError::Registry` if the registry HTTP client cannot be built.
    pub fn new(cfg: Arc<CoreConfig>) -> CoreResult<Self> {
        let registry = RegistryClient::from_config(&cfg)?;
        Ok(Self {
            ehr: JsonArrayStore::new(cfg.store_path(StoreKind::Ehr)),
            surveys: JsonArrayStore::new(cfg.store_path(StoreKind::Survey)),
            reminders: JsonArrayStore::new(cfg.store_path(StoreKind::Vaccination)),
            registry,
            cfg,
        })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    fn store(&self, kind: StoreKind) -> &JsonArrayStore {
        match kind {
            StoreKind::Ehr => &self.ehr,
            StoreKind::Survey => &self.surveys,
            StoreKind::Vaccination => &self.reminders,
        }
    }

    /// Saves an EHR submission, dated today when it carries no date.
    pub fn save_ehr(&self, submission: EhrSubmission) -> CoreResult<MergeOutcome> {
        self.save_ehr_on(submission, local_today())
    }

    /// Saves an EHR submission, using `today` as the default date.
    ///
    /// The submission is validated before the store is touched, so a missing identifier leaves
    /// the store file exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if:
    /// - the submission has no `abha_number` ([`crate::CoreError::MissingIdentifier`])
    /// - the EHR store cannot be read, parsed or written
    pub fn save_ehr_on(
        &self,
        submission: EhrSubmission,
        today: NaiveDate,
    ) -> CoreResult<MergeOutcome> {
        let resolved = submission.resolve(today)?;
        let identifier = resolved.identifier.clone();

        let outcome = self
            .ehr
            .update(|records: &mut Vec<PatientRecord>| merge_observation(records, resolved))?;

        match outcome {
            MergeOutcome::Created => tracing::info!("created patient record {}", identifier),
            MergeOutcome::Appended { observations } => tracing::debug!(
                "appended observation {} to patient {}",
                observations,
                identifier
            ),
        }

        Ok(outcome)
    }

    pub fn load_ehr(&self) -> CoreResult<Vec<PatientRecord>> {
        self.ehr.read_all()
    }

    /// Returns the patient store exactly as it is on disk, without going through
    /// [`PatientRecord`].
    pub fn load_ehr_documents(&self) -> CoreResult<Vec<Value>> {
        self.ehr.read_all()
    }

    /// Looks a single patient up by ABHA number, matched exactly.
    pub fn find_patient(&self, identifier: &str) -> CoreResult<Option<PatientRecord>> {
        Ok(self
            .load_ehr()?
            .into_iter()
            .find(|p| p.identifier == identifier))
    }

    /// Appends a survey entry, dated today when it carries no date.
    pub fn save_survey(&self, entry: SurveyEntry) -> CoreResult<()> {
        self.save_survey_on(entry, local_today())
    }

    pub fn save_survey_on(&self, entry: SurveyEntry, today: NaiveDate) -> CoreResult<()> {
        let entry = stamp_date(entry, today);
        self.surveys.append(Value::Object(entry))
    }

    pub fn load_survey(&self) -> CoreResult<Vec<Value>> {
        self.surveys.read_all()
    }

    /// Returns the reminder list exactly as seeded.
    pub fn vaccination_reminders(&self) -> CoreResult<Vec<VaccinationReminder>> {
        self.reminders.read_all()
    }

    /// Pulls the registry payload, or the offline payload if the registry cannot be used.
    pub async fn sync_registry(&self) -> Value {
        self.registry.fetch_or_offline().await
    }

    /// Truncates every store, reminders included, back to an empty array.
    pub fn clear_all(&self) -> CoreResult<()> {
        for kind in StoreKind::ALL {
            self.store(kind).clear()?;
        }
        tracing::info!("cleared all local data in {}", self.cfg.data_dir().display());
        Ok(())
    }
}
