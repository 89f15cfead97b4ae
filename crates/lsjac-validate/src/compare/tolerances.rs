//! Pointwise tolerance checks.

/// Check if two values match within absolute and relative tolerances.
pub fn values_match(expected: f64, actual: f64, abs_tol: f64, rel_tol: f64) -> bool {
    let abs_diff = (expected - actual).abs();

    if abs_diff <= abs_tol {
        return true;
    }

    // Relative to the expected value
    if expected.abs() > 0.0 {
        let rel_diff = abs_diff / expected.abs();
        if rel_diff <= rel_tol {
            return true;
        }
    }

    false
}

/// Calculate relative error between two values.
pub fn relative_error(expected: f64, actual: f64) -> f64 {
    if expected == 0.0 {
        if actual == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Error of `actual` relative to `scale`, falling back to the pointwise
/// relative error when the scale is zero.
pub fn scaled_error(expected: f64, actual: f64, scale: f64) -> f64 {
    if scale > 0.0 {
        (actual - expected).abs() / scale
    } else {
        relative_error(expected, actual)
    }
}

/// Largest finite magnitude in `values`.
pub fn peak_magnitude(values: &[f64]) -> f64 {
    values
        .iter()
        .map(|v| v.abs())
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
}

/// Check that every point of `actual` matches `expected`.
pub fn curves_match(expected: &[f64], actual: &[f64], abs_tol: f64, rel_tol: f64) -> bool {
    expected.len() == actual.len()
        && expected
            .iter()
            .zip(actual)
            .all(|(&e, &a)| values_match(e, a, abs_tol, rel_tol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_match() {
        // Exact match
        assert!(values_match(1.0, 1.0, 0.0, 0.0));

        // Within absolute tolerance
        assert!(values_match(0.0, 1e-10, 1e-9, 1e-9));

        // Within relative tolerance
        assert!(values_match(100.0, 100.5, 0.0, 1e-2));

        // Outside both tolerances
        assert!(!values_match(100.0, 102.0, 1e-9, 1e-2));

        // Zero expected needs the absolute tolerance
        assert!(!values_match(0.0, 1e-30, 0.0, 1.0));
    }

    #[test]
    fn test_relative_error() {
        assert_eq!(relative_error(2.0, 3.0), 0.5);
        assert_eq!(relative_error(-2.0, -3.0), 0.5);
        assert_eq!(relative_error(0.0, 0.0), 0.0);
        assert!(relative_error(0.0, 1e-300).is_infinite());
    }

    #[test]
    fn test_scaled_error() {
        assert_eq!(scaled_error(0.0, 0.5, 2.0), 0.25);
        assert_eq!(scaled_error(1.0, 1.0, 0.0), 0.0);
        assert!(scaled_error(0.0, 1e-9, 0.0).is_infinite());
        assert_eq!(peak_magnitude(&[0.5, -3.0, f64::NAN, 2.0]), 3.0);
        assert_eq!(peak_magnitude(&[]), 0.0);
    }

    #[test]
    fn test_curves_match() {
        assert!(curves_match(&[1.0, 2.0], &[1.001, 2.002], 0.0, 1e-2));
        assert!(!curves_match(&[1.0, 2.0], &[1.001, 2.5], 0.0, 1e-2));
        assert!(!curves_match(&[1.0, 2.0], &[1.0], 0.0, 1e-2));
    }
}
