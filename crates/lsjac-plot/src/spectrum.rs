//! Single-curve overview of the baseline profile.

use std::path::Path;

use lsjac_core::{Error, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::output::{OutputFormat, render_error};
use crate::scale::linear_bounds;

const SPECTRUM_SIZE: (u32, u32) = (900, 600);

/// Plot `values` over `axis` on linear scales.
pub fn render_spectrum(path: &Path, axis: &[f64], values: &[f64], title: &str) -> Result<()> {
    if axis.len() != values.len() {
        return Err(Error::LengthMismatch {
            expected: axis.len(),
            actual: values.len(),
        });
    }

    let drawn = match OutputFormat::from_path(path) {
        OutputFormat::Svg => draw_spectrum(
            SVGBackend::new(path, SPECTRUM_SIZE).into_drawing_area(),
            axis,
            values,
            title,
        ),
        OutputFormat::Png => draw_spectrum(
            BitMapBackend::new(path, SPECTRUM_SIZE).into_drawing_area(),
            axis,
            values,
            title,
        ),
    };
    drawn.map_err(|e| render_error(path, e))?;

    log::info!("wrote baseline overview {}", path.display());
    Ok(())
}

fn draw_spectrum<DB>(
    root: DrawingArea<DB, Shift>,
    axis: &[f64],
    values: &[f64],
    title: &str,
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = linear_bounds(axis);
    let (y_lo, y_hi) = linear_bounds(values);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(title, ("sans-serif", 22))
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Frequency")
        .y_desc("Propagation")
        .label_style(("sans-serif", 12))
        .y_label_formatter(&|v| format!("{:.2e}", v))
        .draw()?;

    chart.draw_series(LineSeries::new(
        axis.iter().copied().zip(values.iter().copied()),
        RGBColor(30, 144, 255).stroke_width(2),
    ))?;

    root.present()?;
    Ok(())
}
