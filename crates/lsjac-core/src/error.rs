//! Error types for lsjac-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("entry {label:?}: perturbation magnitude must be finite and nonzero, got {delta}")]
    InvalidDelta { label: String, delta: f64 },

    #[error("invalid catalog entry: {0}")]
    InvalidEntry(String),

    #[error("panel {index} claimed by both {first:?} and {second:?}")]
    PanelCollision {
        index: usize,
        first: String,
        second: String,
    },

    #[error("panel {index} of {label:?} is outside the {rows}x{cols} grid")]
    PanelOverflow {
        label: String,
        index: usize,
        rows: usize,
        cols: usize,
    },

    #[error("panel {index} of {label:?} does not follow panel {previous}")]
    PanelOrder {
        label: String,
        index: usize,
        previous: usize,
    },

    #[error("length mismatch: expected {expected} points, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("dataset {data_key:?}: expected {expected} points, got {actual}")]
    AxisLengthMismatch {
        data_key: String,
        expected: usize,
        actual: usize,
    },

    #[error("cell ({row}, {col}) is outside the {nrows}x{ncols} matrix")]
    CellOutOfRange {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    #[error("field out of range: {0}")]
    FieldOutOfRange(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
