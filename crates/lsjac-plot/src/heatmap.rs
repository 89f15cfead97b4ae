//! Heatmap of a projected Stokes-vector matrix.

use std::path::Path;

use lsjac_core::{Error, Result};
use nalgebra::DMatrix;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::output::{OutputFormat, render_error};
use crate::scale::cell_edges;

const HEATMAP_SIZE: (u32, u32) = (800, 800);

/// Map `t` in [0, 1] to a blue-white-red colour.
pub fn diverging_color(t: f64) -> RGBColor {
    let x = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };

    let r = (255.0 * (2.0 * x).min(1.0)) as u8;
    let b = (255.0 * (2.0 * (1.0 - x)).min(1.0)) as u8;
    let g = (255.0 * (1.0 - 2.0 * (x - 0.5).abs())) as u8;

    RGBColor(r, g, b)
}

/// Draw `values` as coloured cells.
///
/// `xgrid` holds one center per column and `ygrid` one per row; either
/// defaults to the cell indices.
pub fn render_heatmap(
    path: &Path,
    values: &DMatrix<f64>,
    xgrid: Option<&[f64]>,
    ygrid: Option<&[f64]>,
) -> Result<()> {
    if values.is_empty() {
        return Err(Error::Render("cannot draw an empty matrix".to_string()));
    }

    let xs = grid_or_indices(xgrid, values.ncols())?;
    let ys = grid_or_indices(ygrid, values.nrows())?;

    let drawn = match OutputFormat::from_path(path) {
        OutputFormat::Svg => draw_heatmap(
            SVGBackend::new(path, HEATMAP_SIZE).into_drawing_area(),
            values,
            &xs,
            &ys,
        ),
        OutputFormat::Png => draw_heatmap(
            BitMapBackend::new(path, HEATMAP_SIZE).into_drawing_area(),
            values,
            &xs,
            &ys,
        ),
    };
    drawn.map_err(|e| render_error(path, e))?;

    log::info!(
        "wrote {}x{} heatmap {}",
        values.nrows(),
        values.ncols(),
        path.display()
    );
    Ok(())
}

fn grid_or_indices(grid: Option<&[f64]>, len: usize) -> Result<Vec<f64>> {
    match grid {
        Some(grid) if grid.len() != len => Err(Error::LengthMismatch {
            expected: len,
            actual: grid.len(),
        }),
        Some(grid) => Ok(grid.to_vec()),
        None => Ok((0..len).map(|i| i as f64).collect()),
    }
}

fn draw_heatmap<DB>(
    root: DrawingArea<DB, Shift>,
    values: &DMatrix<f64>,
    xs: &[f64],
    ys: &[f64],
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let x_edges = cell_edges(xs);
    let y_edges = cell_edges(ys);
    let (x_lo, x_hi) = (x_edges[0], x_edges[x_edges.len() - 1]);
    let (y_lo, y_hi) = (y_edges[0], y_edges[y_edges.len() - 1]);

    let (v_min, v_max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = if v_max > v_min { v_max - v_min } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .margin(40)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo.min(x_hi)..x_lo.max(x_hi), y_lo.min(y_hi)..y_lo.max(y_hi))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .label_style(("sans-serif", 12))
        .draw()?;

    chart.draw_series((0..values.nrows()).flat_map(|i| {
        let x_edges = &x_edges;
        let y_edges = &y_edges;
        (0..values.ncols()).map(move |j| {
            let t = (values[(i, j)] - v_min) / span;
            Rectangle::new(
                [(x_edges[j], y_edges[i]), (x_edges[j + 1], y_edges[i + 1])],
                diverging_color(t).filled(),
            )
        })
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diverging_color_endpoints() {
        assert_eq!(diverging_color(0.0), RGBColor(0, 0, 255));
        assert_eq!(diverging_color(0.5), RGBColor(255, 255, 255));
        assert_eq!(diverging_color(1.0), RGBColor(255, 0, 0));
        assert_eq!(diverging_color(-3.0), RGBColor(0, 0, 255));
        assert_eq!(diverging_color(f64::NAN), RGBColor(255, 255, 255));
    }

    #[test]
    fn test_grid_defaults_to_indices() {
        assert_eq!(grid_or_indices(None, 3).unwrap(), vec![0.0, 1.0, 2.0]);
        assert_eq!(grid_or_indices(Some(&[5.0, 6.0][..]), 2).unwrap(), vec![5.0, 6.0]);
        assert!(matches!(
            grid_or_indices(Some(&[5.0][..]), 2),
            Err(Error::LengthMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = render_heatmap(&dir.path().join("h.png"), &DMatrix::zeros(0, 3), None, None);
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    #[ignore = "requires system fonts"]
    fn test_writes_heatmap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projection.png");
        let values = DMatrix::from_fn(4, 6, |i, j| (i as f64 - j as f64).sin());

        render_heatmap(&path, &values, Some(&[90.0, 94.0, 98.0, 102.0, 106.0, 110.0][..]), None)
            .unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }
}
