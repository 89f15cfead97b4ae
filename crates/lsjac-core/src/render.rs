//! Renderer interface.
//!
//! The run driver hands the renderer explicit panel coordinates instead of
//! relying on a "current axes" notion, so the discrepancy and layout engines
//! stay usable without any plotting backend.

use crate::discrepancy::ErrorCurve;
use crate::error::Result;
use crate::layout::{GridLayout, PanelCoord};

/// Content of one non-blank panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelContent<'a> {
    /// 1-based panel number.
    pub index: usize,
    pub coord: PanelCoord,
    /// Panel title.
    pub label: &'a str,
    /// Finite-difference curve, drawn on a logarithmic scale.
    pub curve: &'a ErrorCurve,
    /// Magnitude of the analytic derivative on the same axis, if compared.
    pub analytic: Option<&'a [f64]>,
}

/// A backend that composes one figure out of grid panels.
///
/// Calls arrive as `begin`, then any number of `draw_panel` and
/// `reserve_blank` in panel order, then `finish`.
pub trait FigureRenderer {
    /// Start a figure with the given grid.
    fn begin(&mut self, grid: GridLayout) -> Result<()>;

    /// Draw one curve panel.
    fn draw_panel(&mut self, panel: &PanelContent<'_>) -> Result<()>;

    /// Keep a spacer panel empty.
    fn reserve_blank(&mut self, index: usize, coord: PanelCoord) -> Result<()>;

    /// Display or export the composed figure.
    fn finish(&mut self) -> Result<()>;
}
