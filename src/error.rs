//! Error types for the periodic note scheduler.

use thiserror::Error;

/// Document store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while generating notes for one cadence.
///
/// Template and listing errors abort the whole cadence for the current run;
/// folder and artifact errors abort a single period.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template is a folder, not a file: {0}")]
    TemplateIsNotAFile(String),

    #[error("Failed to read template {path}: {source}")]
    TemplateReadFailed {
        path: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to list existing notes: {0}")]
    ListingFailed(#[source] StoreError),

    #[error("Failed to create folder {path}: {source}")]
    FolderCreationFailed {
        path: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to create note {path}: {source}")]
    ArtifactCreationFailed {
        path: String,
        #[source]
        source: StoreError,
    },
}

/// Errors surfaced at the CLI and configuration boundary
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
