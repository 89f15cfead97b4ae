//! Finite-difference discrepancy engine.
//!
//! For a perturbed profile `p`, the baseline profile `b` and the step `delta`
//! that produced `p`, the error curve is
//!
//! ```text
//! values[i] = |p[i] - b[i]| / |delta|
//! ```
//!
//! which estimates the magnitude of the derivative at every axis point and
//! puts parameters of very different units on one logarithmic scale.

use crate::catalog::PerturbationEntry;
use crate::error::{Error, Result};

/// The unperturbed reference profile, loaded once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    axis: Vec<f64>,
    values: Vec<f64>,
}

impl Baseline {
    /// Pair an axis with the baseline values on it.
    pub fn new(axis: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if axis.len() != values.len() {
            return Err(Error::LengthMismatch {
                expected: axis.len(),
                actual: values.len(),
            });
        }
        Ok(Self { axis, values })
    }

    pub fn axis(&self) -> &[f64] {
        &self.axis
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Normalized finite-difference curve for one catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorCurve {
    /// Shared independent coordinate.
    pub axis: Vec<f64>,
    /// `|perturbed - baseline| / |delta|` per axis point.
    pub values: Vec<f64>,
}

impl ErrorCurve {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest value, ignoring NaN.
    pub fn max(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    /// Points that can be drawn on a logarithmic scale.
    pub fn positive_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.axis
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .filter(|&(_, v)| v > 0.0 && v.is_finite())
    }

    /// Number of exactly-zero points (perturbed equals baseline).
    pub fn zero_count(&self) -> usize {
        self.values.iter().filter(|&&v| v == 0.0).count()
    }
}

/// Compute the error curve of a perturbed profile against the baseline.
pub fn compute(baseline: &Baseline, perturbed: &[f64], delta: f64) -> Result<ErrorCurve> {
    if delta == 0.0 || !delta.is_finite() {
        return Err(Error::InvalidDelta {
            label: String::new(),
            delta,
        });
    }
    if perturbed.len() != baseline.len() {
        return Err(Error::LengthMismatch {
            expected: baseline.len(),
            actual: perturbed.len(),
        });
    }

    let step = delta.abs();
    let values = perturbed
        .iter()
        .zip(baseline.values())
        .map(|(p, b)| (p - b).abs() / step)
        .collect();

    Ok(ErrorCurve {
        axis: baseline.axis().to_vec(),
        values,
    })
}

/// [`compute`] for a catalog entry, naming the entry in any error.
pub fn compute_entry(
    baseline: &Baseline,
    entry: &PerturbationEntry,
    perturbed: &[f64],
) -> Result<ErrorCurve> {
    compute(baseline, perturbed, entry.delta).map_err(|e| match e {
        Error::LengthMismatch { expected, actual } => Error::AxisLengthMismatch {
            data_key: entry.data_key.clone(),
            expected,
            actual,
        },
        Error::InvalidDelta { delta, .. } => Error::InvalidDelta {
            label: entry.label.clone(),
            delta,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn baseline(values: &[f64]) -> Baseline {
        let axis = (0..values.len()).map(|i| i as f64).collect();
        Baseline::new(axis, values.to_vec()).unwrap()
    }

    #[test]
    fn test_round_trip_scenario() {
        let base = baseline(&[0.0, 0.0, 0.0]);
        let curve = compute(&base, &[0.0001, 0.0002, 0.0003], 0.0001).unwrap();

        assert_eq!(curve.axis, vec![0.0, 1.0, 2.0]);
        assert_eq!(curve.len(), 3);
        assert_relative_eq!(curve.values[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(curve.values[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(curve.values[2], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pointwise_contract() {
        let base = baseline(&[1.5, -2.0, 3.25, 0.0]);
        let perturbed = [1.0, -1.0, 3.25, 1e-3];
        let delta = 0.5;
        let curve = compute(&base, &perturbed, delta).unwrap();

        for i in 0..perturbed.len() {
            assert_eq!(curve.values[i], (perturbed[i] - base.values()[i]).abs() / delta);
        }
        assert_eq!(curve.zero_count(), 1);
        assert_eq!(curve.positive_points().count(), 3);
        assert_eq!(curve.max(), Some(2.0));
    }

    #[test]
    fn test_negative_delta_gives_magnitude() {
        let base = baseline(&[0.0, 0.0]);
        let curve = compute(&base, &[0.1, -0.2], -0.1).unwrap();
        assert_relative_eq!(curve.values[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(curve.values[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_length_mismatch() {
        let base = baseline(&[0.0, 0.0, 0.0]);
        let result = compute(&base, &[0.0, 0.0], 1.0);
        assert!(matches!(
            result,
            Err(Error::LengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_zero_delta() {
        let base = baseline(&[0.0]);
        assert!(matches!(
            compute(&base, &[1.0], 0.0),
            Err(Error::InvalidDelta { .. })
        ));
    }

    #[test]
    fn test_compute_entry_names_dataset() {
        let base = baseline(&[0.0, 0.0, 0.0]);
        let entry = PerturbationEntry::new("Line Center", "df0", 10.0, 5);
        match compute_entry(&base, &entry, &[0.0; 4]) {
            Err(Error::AxisLengthMismatch {
                data_key,
                expected,
                actual,
            }) => {
                assert_eq!(data_key, "df0");
                assert_eq!(expected, 3);
                assert_eq!(actual, 4);
            }
            other => panic!("expected axis length mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_baseline_requires_matching_axis() {
        assert!(Baseline::new(vec![0.0, 1.0], vec![0.0]).is_err());
    }

    #[test]
    fn test_identical_profiles_give_zero_curve() {
        let base = baseline(&[2.0, 3.0]);
        let curve = compute(&base, &[2.0, 3.0], 1e-5).unwrap();
        assert_eq!(curve.values, vec![0.0, 0.0]);
        assert_eq!(curve.positive_points().count(), 0);
    }
}
