//! plotters renderers for derivative-check figures.
//!
//! - [`PlottersRenderer`] composes the panel grid of a run
//! - [`render_spectrum`] draws the baseline profile on linear scales
//! - [`render_heatmap`] draws a projected Stokes-vector matrix
//!
//! Output format follows the file extension: `.svg` writes SVG, anything
//! else a bitmap.

pub mod figure;
pub mod heatmap;
pub mod output;
pub mod scale;
pub mod spectrum;

pub use figure::PlottersRenderer;
pub use heatmap::render_heatmap;
pub use output::OutputFormat;
pub use spectrum::render_spectrum;
