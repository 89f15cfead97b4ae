//! # lsjac
//!
//! Checks analytic line-shape derivatives of the propagation matrix against
//! finite differences.
//!
//! For every perturbed parameter the check computes
//! `|perturbed - baseline| / delta` over the frequency grid, places the curve
//! on a panel of a 6x6 figure and compares it with the analytic derivative.
//!
//! ## Quick Start
//!
//! ```rust
//! use lsjac::prelude::*;
//!
//! let baseline = Baseline::new(vec![90.0, 100.0, 110.0], vec![0.0; 3]).unwrap();
//! let curve = compute(&baseline, &[1e-4, 2e-4, 3e-4], 1e-4).unwrap();
//! assert_eq!(curve.len(), 3);
//!
//! let catalog = Catalog::builtin().unwrap();
//! let placement = place(catalog.iter(), GridLayout::default()).unwrap();
//! assert_eq!(placement.blanks(), &[8, 11, 23, 26, 36]);
//! ```
//!
//! ## Running a Check
//!
//! ```rust,ignore
//! use lsjac::prelude::*;
//!
//! let config = CheckConfig::builtin()?;
//! let source = DirectorySource::new("testdata");
//! let mut renderer = PlottersRenderer::new("jacobian-lorentz.png");
//!
//! let outcome = lsjac::run(&source, "lorentz", &config, &mut renderer, RunOptions::default())?;
//! if let Some(report) = &outcome.report {
//!     println!("{}", report.to_text());
//! }
//! ```

// Re-export member crates
pub use lsjac_core as core;
pub use lsjac_plot as plot;
pub use lsjac_validate as validate;

// ============================================================================
// Convenient re-exports from lsjac_core
// ============================================================================

pub use lsjac_core::{
    Baseline,
    Catalog,
    CheckConfig,
    DerivativeTolerances,
    // Errors
    Error as CoreError,
    ErrorCurve,
    FieldSelector,
    FigureRenderer,
    FrequencyGrid,
    GridLayout,
    KnownDeviation,
    PanelCoord,
    PerturbationEntry,
    Placement,
    Stokvec,
    StokvecMatrix,
    compute,
    compute_entry,
    place,
};

pub use lsjac_core::stokes::component;

// ============================================================================
// Convenient re-exports from lsjac_validate
// ============================================================================

pub use lsjac_validate::{
    ComparisonReport,
    ComparisonStatus,
    DatasetKey,
    DatasetSource,
    DirectorySource,
    MemorySource,
    PanelResult,
    RunOptions,
    RunOutcome,
    // Errors
    ValidationError,
    evaluate,
    run,
};

// ============================================================================
// Convenient re-exports from lsjac_plot
// ============================================================================

pub use lsjac_plot::{PlottersRenderer, render_heatmap, render_spectrum};

/// Re-export of nalgebra's dynamic matrix type.
pub use nalgebra::DMatrix;

/// Prelude module containing commonly used types and traits.
///
/// ```rust
/// use lsjac::prelude::*;
/// ```
pub mod prelude {
    // Catalog and layout
    pub use crate::{Catalog, GridLayout, PerturbationEntry, place};

    // Discrepancy engine
    pub use crate::{Baseline, ErrorCurve, compute};

    // Runs
    pub use crate::{
        CheckConfig, DatasetSource, DirectorySource, FigureRenderer, RunOptions, RunOutcome,
    };

    // Rendering
    pub use crate::PlottersRenderer;

    // Projection
    pub use crate::{DMatrix, Stokvec, StokvecMatrix};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config() {
        let config = CheckConfig::builtin().unwrap();
        assert_eq!(config.catalog.len(), 31);
        assert_eq!(config.grid, GridLayout::new(6, 6));
    }

    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;

        let mut matrix = StokvecMatrix::zeros(1, 2);
        matrix.set(0, 1, Stokvec::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        let projected: DMatrix<f64> = matrix.project(&component::q());
        assert_eq!(projected[(0, 0)], 0.0);
        assert_eq!(projected[(0, 1)], 2.0);
    }
}
