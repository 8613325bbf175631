//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads environment variables; the store
//! paths and registry settings all come from the `CoreConfig` built here.

use crate::constants::{
    DEFAULT_REGISTRY_TIMEOUT_SECS, EHR_FILENAME, SURVEY_FILENAME, VACCINATION_FILENAME,
};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The three datasets kept by the service, one JSON array file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Ehr,
    Survey,
    Vaccination,
}

impl StoreKind {
    pub const ALL: [StoreKind; 3] = [StoreKind::Ehr, StoreKind::Survey, StoreKind::Vaccination];

    /// Returns the file name of this dataset inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            StoreKind::Ehr => EHR_FILENAME,
            StoreKind::Survey => SURVEY_FILENAME,
            StoreKind::Vaccination => VACCINATION_FILENAME,
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    registry_url: String,
    registry_timeout: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidInput` if the registry URL is blank or the timeout is zero.
    pub fn new(
        data_dir: PathBuf,
        registry_url: String,
        registry_timeout: Duration,
    ) -> CoreResult<Self> {
        if registry_url.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "registry_url cannot be empty".into(),
            ));
        }
        if registry_timeout.is_zero() {
            return Err(CoreError::InvalidInput(
                "registry timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            data_dir,
            registry_url,
            registry_timeout,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the file backing `kind`.
    pub fn store_path(&self, kind: StoreKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    pub fn registry_timeout(&self) -> Duration {
        self.registry_timeout
    }

    /// Creates the data directory if it does not exist yet.
    ///
    /// # Errors
    /// Returns `CoreError::StorageDirCreation` if the directory cannot be created.
    pub fn ensure_data_dir(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(CoreError::StorageDirCreation)
    }
}

/// Parse the registry timeout from an optional string value holding whole seconds.
///
/// If `value` is `None` or empty/whitespace, returns the default of five seconds.
pub fn registry_timeout_from_env_value(value: Option<String>) -> CoreResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let secs = match value {
        Some(v) => v.parse::<u64>().map_err(|_| {
            CoreError::InvalidInput(format!(
                "registry timeout must be a whole number of seconds, got {v:?}"
            ))
        })?,
        None => DEFAULT_REGISTRY_TIMEOUT_SECS,
    };

    if secs == 0 {
        return Err(CoreError::InvalidInput(
            "registry timeout must be greater than zero".into(),
        ));
    }

    Ok(Duration::from_secs(secs))
}
