//! Comparison report generation.

use std::fmt;

/// Outcome of comparing one entry with its analytic derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonStatus {
    /// Every point within tolerance.
    Pass,
    /// At least one point outside tolerance.
    Fail,
    /// The entry has a documented known deviation for this case.
    KnownDeviation,
}

impl ComparisonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonStatus::Pass => "PASS",
            ComparisonStatus::Fail => "FAIL",
            ComparisonStatus::KnownDeviation => "KNOWN",
        }
    }
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison result for a single catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryComparison {
    /// Entry label (e.g. "Temperature").
    pub label: String,
    /// Perturbed dataset key.
    pub data_key: String,
    pub status: ComparisonStatus,
    /// Whether every point matched (with widened tolerances for known
    /// deviations).
    pub within_tolerance: bool,
    /// Largest pointwise error relative to the peak analytic magnitude.
    pub max_rel_error: f64,
    /// Point with the largest error.
    pub worst_point: Option<WorstPointInfo>,
    /// Known-deviation note, if any.
    pub note: Option<String>,
}

/// Information about the worst deviation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorstPointInfo {
    /// Axis value (frequency).
    pub at: f64,
    /// Analytic derivative magnitude at this point.
    pub expected: f64,
    /// Finite-difference estimate at this point.
    pub actual: f64,
    /// Error at this point relative to the peak analytic magnitude.
    pub error: f64,
}

/// Summary statistics for a comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSummary {
    pub total_entries: usize,
    pub passed_entries: usize,
    pub failed_entries: usize,
    pub known_deviations: usize,
    /// Largest finite relative error over passing and failing entries.
    pub max_error: f64,
}

/// Comparison of every catalog entry of one case.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub case: String,
    /// False if any entry failed.
    pub passed: bool,
    pub comparisons: Vec<EntryComparison>,
    pub summary: ComparisonSummary,
}

impl ComparisonReport {
    /// Create an empty report.
    pub fn new(case: &str) -> Self {
        Self {
            case: case.to_string(),
            passed: true,
            comparisons: Vec::new(),
            summary: ComparisonSummary::default(),
        }
    }

    /// Add an entry comparison.
    pub fn add_comparison(&mut self, comp: EntryComparison) {
        match comp.status {
            ComparisonStatus::Pass => self.summary.passed_entries += 1,
            ComparisonStatus::Fail => {
                self.passed = false;
                self.summary.failed_entries += 1;
            }
            ComparisonStatus::KnownDeviation => self.summary.known_deviations += 1,
        }
        self.summary.total_entries += 1;
        self.comparisons.push(comp);
    }

    /// Finalize the report by computing summary statistics.
    pub fn finalize(&mut self) {
        self.summary.max_error = self
            .comparisons
            .iter()
            .filter(|c| c.status != ComparisonStatus::KnownDeviation)
            .map(|c| c.max_rel_error)
            .filter(|e| e.is_finite())
            .fold(0.0, f64::max);
    }

    /// Labels of failed entries in catalog order.
    pub fn failed_labels(&self) -> Vec<&str> {
        self.comparisons
            .iter()
            .filter(|c| c.status == ComparisonStatus::Fail)
            .map(|c| c.label.as_str())
            .collect()
    }

    /// Format as human-readable text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Derivative Check: {}\n", self.case));
        out.push_str(&format!("Status: {}\n", if self.passed { "PASS" } else { "FAIL" }));
        out.push_str(&format!(
            "Entries: {}/{} passed, {} known deviations\n\n",
            self.summary.passed_entries, self.summary.total_entries, self.summary.known_deviations
        ));

        for comp in &self.comparisons {
            out.push_str(&format!(
                "  {} ({}): {}  max rel error {:.3e}\n",
                comp.label, comp.data_key, comp.status, comp.max_rel_error
            ));

            if let Some(ref worst) = comp.worst_point {
                out.push_str(&format!(
                    "    Worst at: {:.6e} (analytic={:.6e}, finite-difference={:.6e}, error={:.3e})\n",
                    worst.at, worst.expected, worst.actual, worst.error
                ));
            }
            if let Some(ref note) = comp.note {
                out.push_str(&format!("    Known deviation: {}\n", note));
            }
        }

        if !self.passed {
            out.push_str("\nFailed entries:\n");
            for label in self.failed_labels() {
                out.push_str(&format!("  - {}\n", label));
            }
        }

        out
    }
}
