use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("abha_number is required")]
    MissingIdentifier,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write store file: {0}")]
    FileWrite(std::io::Error),
    #[error(
        "failed to remove temporary file after write failed (path: {path}): {cleanup_error}",
        path = path.display()
    )]
    CleanupAfterWriteFailed {
        path: PathBuf,
        #[source]
        write_error: std::io::Error,
        cleanup_error: std::io::Error,
    },
    #[error("failed to read store file: {0}")]
    FileRead(std::io::Error),
    #[error(
        "store file is not a valid JSON array (path: {path}): {source}",
        path = path.display()
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize records: {0}")]
    Serialization(serde_json::Error),
    #[error("store lock poisoned by a panicking writer")]
    LockPoisoned,
    #[error("failed to build registry client: {0}")]
    Registry(reqwest::Error),
}

impl From<swasthya_types::TextError> for CoreError {
    fn from(_: swasthya_types::TextError) -> Self {
        CoreError::MissingIdentifier
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
