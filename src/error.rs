//! Error types for the prediction service.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Service error types
#[derive(Error, Debug)]
pub enum Error {
    /// Incoming rows are missing one or more required columns
    #[error("new data must contain columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Request body has the wrong shape or a non-numeric value
    #[error("{0}")]
    InvalidPayload(String),

    /// A model file is absent (no retrain has run yet)
    #[error("model file not found: {0} (run a retrain first)")]
    ModelNotFound(String),

    /// The dataset file is absent or unreadable
    #[error("dataset error: {0}")]
    Dataset(String),

    /// The dataset holds no rows to train on
    #[error("dataset is empty, nothing to train on")]
    EmptyDataset,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Model serialization error
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic internal error
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Whether the fault lies with the caller's payload (HTTP 400)
    /// rather than the service (HTTP 500).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::MissingColumns(_) | Error::InvalidPayload(_))
    }
}
