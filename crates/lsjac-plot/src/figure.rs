//! Composed grid figure.
//!
//! [`PlottersRenderer`] collects panels as the run driver hands them over and
//! draws the whole figure in [`FigureRenderer::finish`].

use std::path::{Path, PathBuf};

use lsjac_core::{Error, FigureRenderer, GridLayout, PanelContent, PanelCoord, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::output::{OutputFormat, render_error};
use crate::scale::{linear_bounds, log_bounds};

const CURVE_COLOR: RGBColor = RGBColor(30, 144, 255);
const ANALYTIC_COLOR: RGBColor = RGBColor(220, 20, 60);
const TITLE_HEIGHT: u32 = 40;

/// Fallback y range for a panel with nothing drawable.
const EMPTY_LOG_RANGE: (f64, f64) = (0.1, 10.0);

#[derive(Debug, Clone)]
struct PanelData {
    coord: PanelCoord,
    label: String,
    x_range: (f64, f64),
    curve: Vec<(f64, f64)>,
    analytic: Vec<(f64, f64)>,
}

/// Renders the panel grid to a PNG or SVG file.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    path: PathBuf,
    title: String,
    panel_size: (u32, u32),
    grid: Option<GridLayout>,
    panels: Vec<PanelData>,
    blanks: Vec<usize>,
}

impl PlottersRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            title: "Line-shape derivatives".to_string(),
            panel_size: (320, 240),
            grid: None,
            panels: Vec::new(),
            blanks: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Size of a single panel in pixels.
    pub fn with_panel_size(mut self, width: u32, height: u32) -> Self {
        self.panel_size = (width, height);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pixel size of the whole figure for `grid`.
    pub fn figure_size(&self, grid: GridLayout) -> Result<(u32, u32)> {
        let (w, h) = self.panel_size;
        let too_large = || {
            Error::Render(format!(
                "a {}x{} grid of {}x{} panels exceeds the pixel range",
                grid.rows, grid.cols, w, h
            ))
        };

        let cols = u32::try_from(grid.cols).map_err(|_| too_large())?;
        let rows = u32::try_from(grid.rows).map_err(|_| too_large())?;
        let width = w.checked_mul(cols).ok_or_else(too_large)?;
        let height = h
            .checked_mul(rows)
            .and_then(|h| h.checked_add(TITLE_HEIGHT))
            .ok_or_else(too_large)?;
        Ok((width, height))
    }

    /// Panels collected so far.
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Blank panel numbers collected so far.
    pub fn blanks(&self) -> &[usize] {
        &self.blanks
    }

    fn started(&self) -> Result<GridLayout> {
        self.grid
            .ok_or_else(|| Error::Render("figure used before begin".to_string()))
    }
}

impl FigureRenderer for PlottersRenderer {
    fn begin(&mut self, grid: GridLayout) -> Result<()> {
        grid.validate()?;
        self.grid = Some(grid);
        self.panels.clear();
        self.blanks.clear();
        Ok(())
    }

    fn draw_panel(&mut self, panel: &PanelContent<'_>) -> Result<()> {
        let grid = self.started()?;
        if grid.index_of(panel.coord).is_none() {
            return Err(Error::Render(format!(
                "panel {} at {:?} is outside the {}x{} grid",
                panel.index, panel.coord, grid.rows, grid.cols
            )));
        }

        let curve: Vec<(f64, f64)> = panel.curve.positive_points().collect();
        let dropped = panel.curve.len() - curve.len();
        if dropped > 0 {
            log::debug!(
                "{}: {} non-positive points left off the log scale",
                panel.label,
                dropped
            );
        }

        let analytic: Vec<(f64, f64)> = panel
            .analytic
            .map(|values| {
                panel
                    .curve
                    .axis
                    .iter()
                    .copied()
                    .zip(values.iter().map(|v| v.abs()))
                    .filter(|&(_, v)| v > 0.0 && v.is_finite())
                    .collect()
            })
            .unwrap_or_default();

        let axis = &panel.curve.axis;
        let x_range = match (axis.first(), axis.last()) {
            (Some(&first), Some(&last)) if last > first => (first, last),
            _ => linear_bounds(axis),
        };

        self.panels.push(PanelData {
            coord: panel.coord,
            label: panel.label.to_string(),
            x_range,
            curve,
            analytic,
        });
        Ok(())
    }

    fn reserve_blank(&mut self, index: usize, _coord: PanelCoord) -> Result<()> {
        self.started()?;
        self.blanks.push(index);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let grid = self.started()?;
        let size = self.figure_size(grid)?;

        let drawn = match OutputFormat::from_path(&self.path) {
            OutputFormat::Svg => draw_figure(
                SVGBackend::new(&self.path, size).into_drawing_area(),
                &self.title,
                grid,
                &self.panels,
            ),
            OutputFormat::Png => draw_figure(
                BitMapBackend::new(&self.path, size).into_drawing_area(),
                &self.title,
                grid,
                &self.panels,
            ),
        };
        drawn.map_err(|e| render_error(&self.path, e))?;

        log::info!(
            "wrote {} ({} panels, {} blank)",
            self.path.display(),
            self.panels.len(),
            self.blanks.len()
        );
        Ok(())
    }
}

fn draw_figure<DB>(
    root: DrawingArea<DB, Shift>,
    title: &str,
    grid: GridLayout,
    panels: &[PanelData],
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let body = root.titled(title, ("sans-serif", 26))?;
    let areas = body.split_evenly((grid.rows, grid.cols));

    for panel in panels {
        let area = &areas[panel.coord.row * grid.cols + panel.coord.col];
        draw_curve_panel(area, panel)?;
    }

    root.present()?;
    Ok(())
}

fn draw_curve_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    panel: &PanelData,
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x_lo, x_hi) = panel.x_range;
    let (y_lo, y_hi) = log_bounds(panel.curve.iter().chain(&panel.analytic).map(|(_, v)| v))
        .unwrap_or(EMPTY_LOG_RANGE);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.label, ("sans-serif", 14))
        .margin(6)
        .x_label_area_size(22)
        .y_label_area_size(46)
        .build_cartesian_2d(x_lo..x_hi, (y_lo..y_hi).log_scale())?;

    chart
        .configure_mesh()
        .x_labels(3)
        .y_labels(3)
        .label_style(("sans-serif", 10))
        .y_label_formatter(&|v| format!("{:.0e}", v))
        .draw()?;

    chart.draw_series(LineSeries::new(
        panel.curve.iter().copied(),
        CURVE_COLOR.stroke_width(1),
    ))?;

    if !panel.analytic.is_empty() {
        chart.draw_series(LineSeries::new(
            panel.analytic.iter().copied(),
            ANALYTIC_COLOR.stroke_width(1),
        ))?;
    }

    Ok(())
}
