//! Axis range helpers.

/// Decade-aligned bounds covering every positive finite value.
///
/// Returns `None` when nothing can be drawn on a logarithmic axis.
pub fn log_bounds<'a, I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    let (lo, hi) = values
        .into_iter()
        .copied()
        .filter(|v| *v > 0.0 && v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })?;

    let lo = 10f64.powf(lo.log10().floor());
    let mut hi = 10f64.powf(hi.log10().ceil());
    if hi <= lo {
        hi = lo * 10.0;
    }
    Some((lo, hi))
}

/// Linear bounds with a small margin, never empty.
pub fn linear_bounds<'a, I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a f64>,
{
    let range = values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        });

    match range {
        Some((lo, hi)) if hi > lo => {
            let pad = 0.05 * (hi - lo);
            (lo - pad, hi + pad)
        }
        Some((v, _)) => (v - 0.5, v + 0.5),
        None => (0.0, 1.0),
    }
}

/// Cell edges around sorted cell centers.
///
/// Interior edges are midpoints; the outer edges mirror the first and last
/// spacing. A single center gets unit width.
pub fn cell_edges(centers: &[f64]) -> Vec<f64> {
    match centers.len() {
        0 => Vec::new(),
        1 => vec![centers[0] - 0.5, centers[0] + 0.5],
        n => {
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(centers[0] - 0.5 * (centers[1] - centers[0]));
            edges.extend(centers.windows(2).map(|w| 0.5 * (w[0] + w[1])));
            edges.push(centers[n - 1] + 0.5 * (centers[n - 1] - centers[n - 2]));
            edges
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_bounds_decades() {
        let (lo, hi) = log_bounds(&[0.0, 2e-3, 5e-1, -1.0]).unwrap();
        assert!((lo / 1e-3 - 1.0).abs() < 1e-12);
        assert!((hi - 1.0).abs() < 1e-12);

        assert_eq!(log_bounds(&[0.0, -3.0, f64::NAN]), None);

        // A single decade is widened
        let (lo, hi) = log_bounds(&[100.0]).unwrap();
        assert!((lo / 100.0 - 1.0).abs() < 1e-12);
        assert!((hi / 1000.0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_bounds() {
        assert_eq!(linear_bounds(&[0.0, 10.0]), (-0.5, 10.5));
        assert_eq!(linear_bounds(&[2.0, 2.0]), (1.5, 2.5));
        assert_eq!(linear_bounds(&[] as &[f64]), (0.0, 1.0));
    }

    #[test]
    fn test_cell_edges() {
        assert_eq!(cell_edges(&[0.0, 1.0, 2.0]), vec![-0.5, 0.5, 1.5, 2.5]);
        assert_eq!(cell_edges(&[90.0, 100.0]), vec![85.0, 95.0, 105.0]);
        assert_eq!(cell_edges(&[3.0]), vec![2.5, 3.5]);
        assert!(cell_edges(&[]).is_empty());
    }
}
