//! Error types for the validation crate.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a derivative check.
#[derive(Debug, Error)]
pub enum Error {
    /// A dataset could not be resolved for the case.
    #[error("dataset {key} not found for case {case:?} (looked in {path})")]
    DatasetNotFound {
        case: String,
        key: String,
        path: PathBuf,
    },

    /// A dataset was found but is malformed.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// The analytic-derivative dataset has no record for an entry.
    #[error("no analytic derivative record {index} for {label:?} ({available} records)")]
    AnalyticRecordMissing {
        label: String,
        index: usize,
        available: usize,
    },

    /// Catalog, layout, discrepancy or configuration error.
    #[error(transparent)]
    Core(#[from] lsjac_core::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
