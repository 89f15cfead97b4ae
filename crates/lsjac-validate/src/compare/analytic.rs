//! Finite-difference versus analytic derivative comparison.

use lsjac_core::{DerivativeTolerances, ErrorCurve, PerturbationEntry};

use crate::compare::report::{ComparisonStatus, EntryComparison, WorstPointInfo};
use crate::compare::tolerances::{curves_match, peak_magnitude, scaled_error};

/// Compare an entry's error curve with the magnitude of its analytic
/// derivative.
///
/// `analytic` must lie on the same axis as `curve`. A point matches when it
/// lies within `max(abs, rel * peak)` of the analytic magnitude, `peak` being
/// the largest analytic magnitude of the curve, so the truncation error of
/// the finite difference near a zero of the derivative is judged against the
/// curve's scale. Errors are reported normalized by `peak`.
///
/// Entries with a known deviation for `case` are checked against widened
/// tolerances and always reported as [`ComparisonStatus::KnownDeviation`].
pub fn compare_entry(
    entry: &PerturbationEntry,
    curve: &ErrorCurve,
    analytic: &[f64],
    tolerances: &DerivativeTolerances,
    case: &str,
) -> EntryComparison {
    let deviation = entry.known_deviation_for(case);
    let tol = match deviation {
        Some(_) => tolerances.widened(),
        None => *tolerances,
    };

    let expected: Vec<f64> = analytic.iter().map(|v| v.abs()).collect();
    let peak = peak_magnitude(&expected);
    let abs_tol = tol.abs.max(tol.rel * peak);
    let within_tolerance = curves_match(&expected, &curve.values, abs_tol, tol.rel);

    let mut max_rel_error = 0.0;
    let mut worst_point: Option<WorstPointInfo> = None;

    for ((&at, &actual), &expected) in curve.axis.iter().zip(&curve.values).zip(&expected) {
        let error = scaled_error(expected, actual, peak);
        if error > max_rel_error {
            max_rel_error = error;
            worst_point = Some(WorstPointInfo {
                at,
                expected,
                actual,
                error,
            });
        }
    }

    let status = match (deviation, within_tolerance) {
        (Some(_), _) => ComparisonStatus::KnownDeviation,
        (None, true) => ComparisonStatus::Pass,
        (None, false) => ComparisonStatus::Fail,
    };

    if status == ComparisonStatus::Fail {
        log::warn!(
            "{} ({}) exceeds tolerance: max relative error {:.3e}",
            entry.label,
            entry.data_key,
            max_rel_error
        );
    } else if deviation.is_some() && !within_tolerance {
        log::info!("{} deviates as documented for {}", entry.label, case);
    }

    EntryComparison {
        label: entry.label.clone(),
        data_key: entry.data_key.clone(),
        status,
        within_tolerance,
        max_rel_error,
        worst_point,
        note: deviation.map(|d| d.note.clone()),
    }
}
