//! Run driver.
//!
//! A run places the catalog on the grid, loads the baseline once, evaluates
//! every catalog entry and finally hands the panels to a renderer. Placement
//! errors are raised before any dataset is loaded.

use std::collections::BTreeMap;

use lsjac_core::{
    Baseline, CheckConfig, Dataset, ErrorCurve, FigureRenderer, GridLayout, PanelContent,
    PanelCoord, PerturbationEntry, Placement, compute_entry, place,
};
use rayon::prelude::*;

use crate::compare::{ComparisonReport, compare_entry};
use crate::dataset::{DatasetKey, DatasetSource};
use crate::error::{Error, Result};

/// How a run is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Load and evaluate perturbed datasets on the rayon pool.
    pub parallel: bool,
    /// Compare each curve with its analytic derivative.
    pub compare: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            compare: true,
        }
    }
}

impl RunOptions {
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_compare(mut self, compare: bool) -> Self {
        self.compare = compare;
        self
    }
}

/// One evaluated catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelResult {
    /// 1-based panel number.
    pub index: usize,
    pub coord: PanelCoord,
    pub label: String,
    pub data_key: String,
    pub curve: ErrorCurve,
    /// Analytic derivative magnitude, when comparison is enabled.
    pub analytic: Option<Vec<f64>>,
}

impl PanelResult {
    /// Borrow as renderer input.
    pub fn content(&self) -> PanelContent<'_> {
        PanelContent {
            index: self.index,
            coord: self.coord,
            label: &self.label,
            curve: &self.curve,
            analytic: self.analytic.as_deref(),
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub case: String,
    pub grid: GridLayout,
    /// Evaluated entries in catalog order.
    pub panels: Vec<PanelResult>,
    /// Unclaimed panel numbers, ascending.
    pub blanks: Vec<usize>,
    /// Present when comparison was enabled.
    pub report: Option<ComparisonReport>,
}

impl RunOutcome {
    /// False only if a comparison ran and failed.
    pub fn passed(&self) -> bool {
        self.report.as_ref().map_or(true, |r| r.passed)
    }

    /// Find a panel by entry label.
    pub fn panel(&self, label: &str) -> Option<&PanelResult> {
        self.panels.iter().find(|p| p.label == label)
    }
}

/// Evaluate `case` and render the figure.
pub fn run(
    source: &dyn DatasetSource,
    case: &str,
    config: &CheckConfig,
    renderer: &mut dyn FigureRenderer,
    options: RunOptions,
) -> Result<RunOutcome> {
    let outcome = evaluate(source, case, config, options)?;
    render_outcome(&outcome, renderer)?;
    Ok(outcome)
}

/// Evaluate `case` without rendering.
pub fn evaluate(
    source: &dyn DatasetSource,
    case: &str,
    config: &CheckConfig,
    options: RunOptions,
) -> Result<RunOutcome> {
    config.validate()?;
    let placement = place(config.catalog.iter(), config.grid)?;

    log::info!(
        "{}: {} entries on a {}x{} grid, {} blank panels",
        case,
        config.catalog.len(),
        config.grid.rows,
        config.grid.cols,
        placement.blanks().len()
    );

    let axis = config.axis.values();
    let values = source.load(case, &DatasetKey::Baseline)?.field(config.field)?;
    if values.len() != axis.len() {
        return Err(lsjac_core::Error::AxisLengthMismatch {
            data_key: DatasetKey::Baseline.stem(),
            expected: axis.len(),
            actual: values.len(),
        }
        .into());
    }
    let baseline = Baseline::new(axis, values)?;

    let analytic = if options.compare {
        Some(source.load(case, &DatasetKey::AnalyticDerivatives)?)
    } else {
        None
    };

    let ctx = EntryContext {
        source,
        case,
        config,
        placement: &placement,
        baseline: &baseline,
        analytic: analytic.as_ref(),
    };

    let panels = if options.parallel {
        config
            .catalog
            .entries()
            .par_iter()
            .map(|entry| ctx.evaluate(entry))
            .collect::<Result<Vec<_>>>()?
    } else {
        config
            .catalog
            .iter()
            .map(|entry| ctx.evaluate(entry))
            .collect::<Result<Vec<_>>>()?
    };

    let report = if options.compare {
        let mut report = ComparisonReport::new(case);
        for (entry, panel) in config.catalog.iter().zip(&panels) {
            if let Some(analytic) = &panel.analytic {
                report.add_comparison(compare_entry(
                    entry,
                    &panel.curve,
                    analytic,
                    &config.tolerances,
                    case,
                ));
            }
        }
        report.finalize();
        Some(report)
    } else {
        None
    };

    Ok(RunOutcome {
        case: case.to_string(),
        grid: config.grid,
        panels,
        blanks: placement.blanks().to_vec(),
        report,
    })
}

/// Hand an evaluated run to a renderer, panel by panel in grid order.
pub fn render_outcome(outcome: &RunOutcome, renderer: &mut dyn FigureRenderer) -> Result<()> {
    let grid = outcome.grid;
    let panels: BTreeMap<usize, &PanelResult> =
        outcome.panels.iter().map(|p| (p.index, p)).collect();

    renderer.begin(grid)?;
    for index in 1..=grid.capacity() {
        let Some(coord) = grid.coord(index) else {
            continue;
        };
        match panels.get(&index) {
            Some(panel) => renderer.draw_panel(&panel.content())?,
            None => renderer.reserve_blank(index, coord)?,
        }
    }
    renderer.finish()?;

    log::debug!("{}: figure finished", outcome.case);
    Ok(())
}

/// Shared read-only state for evaluating entries.
struct EntryContext<'a> {
    source: &'a dyn DatasetSource,
    case: &'a str,
    config: &'a CheckConfig,
    placement: &'a Placement,
    baseline: &'a Baseline,
    analytic: Option<&'a Dataset>,
}

impl EntryContext<'_> {
    fn evaluate(&self, entry: &PerturbationEntry) -> Result<PanelResult> {
        let coord = self.placement.coord_of(entry.panel_index).ok_or_else(|| {
            lsjac_core::Error::InvalidEntry(format!(
                "{} was not placed on the grid",
                entry.label
            ))
        })?;

        let key = DatasetKey::Perturbed(entry.data_key.clone());
        let perturbed = self.source.load(self.case, &key)?.field(self.config.field)?;
        let curve = compute_entry(self.baseline, entry, &perturbed)?;

        if curve.zero_count() == curve.len() {
            log::warn!(
                "{}: perturbed profile {} equals the baseline",
                entry.label,
                key
            );
        }

        let analytic = match self.analytic {
            Some(dataset) => Some(self.analytic_magnitude(entry, dataset)?),
            None => None,
        };

        log::debug!(
            "{} (panel {}): max discrepancy {:?}",
            entry.label,
            entry.panel_index,
            curve.max()
        );

        Ok(PanelResult {
            index: entry.panel_index,
            coord,
            label: entry.label.clone(),
            data_key: entry.data_key.clone(),
            curve,
            analytic,
        })
    }

    fn analytic_magnitude(&self, entry: &PerturbationEntry, dataset: &Dataset) -> Result<Vec<f64>> {
        let index = entry.analytic_record();
        let record = dataset
            .record(index)
            .ok_or_else(|| Error::AnalyticRecordMissing {
                label: entry.label.clone(),
                index,
                available: dataset.len(),
            })?;

        let values = record.component(self.config.field.component)?;
        if values.len() != self.baseline.len() {
            return Err(lsjac_core::Error::AxisLengthMismatch {
                data_key: DatasetKey::AnalyticDerivatives.stem(),
                expected: self.baseline.len(),
                actual: values.len(),
            }
            .into());
        }

        Ok(values.iter().map(|v| v.abs()).collect())
    }
}
