//! Comparison of finite-difference curves with analytic derivatives.

pub mod analytic;
pub mod report;
pub mod tolerances;

pub use analytic::compare_entry;
pub use report::{
    ComparisonReport, ComparisonStatus, ComparisonSummary, EntryComparison, WorstPointInfo,
};
pub use tolerances::{curves_match, peak_magnitude, relative_error, scaled_error, values_match};
