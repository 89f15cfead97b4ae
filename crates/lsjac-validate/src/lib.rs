//! Derivative check runner for line-shape propagation matrices.
//!
//! This crate provides infrastructure for:
//! - Loading baseline, perturbed and analytic-derivative datasets
//! - Turning every catalog entry into a finite-difference error curve
//! - Comparing the curves with the analytic derivatives
//! - Handing the composed panels to a renderer

pub mod compare;
pub mod dataset;
pub mod error;
pub mod run;

pub use compare::{
    ComparisonReport, ComparisonStatus, ComparisonSummary, EntryComparison, WorstPointInfo,
    compare_entry,
};
pub use dataset::{DatasetFile, DatasetKey, DatasetSource, DirectorySource, MemorySource};
pub use error::{Error as ValidationError, Result as ValidationResult};
pub use run::{PanelResult, RunOptions, RunOutcome, evaluate, render_outcome, run};
