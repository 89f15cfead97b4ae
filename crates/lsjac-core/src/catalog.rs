//! Parameter catalog.
//!
//! The catalog is the table of perturbed quantities a run evaluates. Each
//! entry names the perturbed dataset to load, the finite-difference step that
//! produced it, and the panel it is drawn in. Everything parameter-specific
//! lives here so the run driver never branches on parameter identity.
//!
//! The built-in line-shape catalog is shipped as `catalog/lineshape.toml`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const BUILTIN_CATALOG: &str = include_str!("../catalog/lineshape.toml");

/// A documented deviation between the finite-difference and analytic
/// derivative that is known and accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownDeviation {
    /// Human-readable explanation.
    pub note: String,
    /// Cases the deviation applies to. Empty means every case.
    #[serde(default)]
    pub cases: Vec<String>,
}

impl KnownDeviation {
    /// Create a deviation that applies to every case.
    pub fn new(note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            cases: Vec::new(),
        }
    }

    /// Restrict the deviation to the given cases.
    pub fn for_cases<I, S>(mut self, cases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cases = cases.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the deviation applies to `case`.
    pub fn applies_to(&self, case: &str) -> bool {
        self.cases.is_empty() || self.cases.iter().any(|c| c == case)
    }
}

/// One row of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerturbationEntry {
    /// Panel title (e.g. "Temperature", "SELF-G0-X0").
    pub label: String,
    /// Suffix of the perturbed dataset (`propmat-<data_key>`).
    pub data_key: String,
    /// Finite-difference step used to normalize the difference.
    pub delta: f64,
    /// 1-based row-major panel position.
    #[serde(rename = "panel")]
    pub panel_index: usize,
    /// Record of the analytic-derivative dataset this entry is checked
    /// against. Defaults to `panel_index - 1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytic_index: Option<usize>,
    /// Accepted deviation from the analytic derivative, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_deviation: Option<KnownDeviation>,
}

impl PerturbationEntry {
    /// Create a new entry.
    pub fn new(
        label: impl Into<String>,
        data_key: impl Into<String>,
        delta: f64,
        panel_index: usize,
    ) -> Self {
        Self {
            label: label.into(),
            data_key: data_key.into(),
            delta,
            panel_index,
            analytic_index: None,
            known_deviation: None,
        }
    }

    /// Select an explicit analytic-derivative record.
    pub fn with_analytic_index(mut self, index: usize) -> Self {
        self.analytic_index = Some(index);
        self
    }

    /// Attach a known deviation.
    pub fn with_known_deviation(mut self, deviation: KnownDeviation) -> Self {
        self.known_deviation = Some(deviation);
        self
    }

    /// Index of the analytic-derivative record for this entry.
    pub fn analytic_record(&self) -> usize {
        self.analytic_index
            .unwrap_or_else(|| self.panel_index.saturating_sub(1))
    }

    /// The known deviation for `case`, if one is documented.
    pub fn known_deviation_for(&self, case: &str) -> Option<&KnownDeviation> {
        self.known_deviation
            .as_ref()
            .filter(|dev| dev.applies_to(case))
    }

    fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(Error::InvalidEntry(format!(
                "entry for {:?} has an empty label",
                self.data_key
            )));
        }
        if self.data_key.trim().is_empty() {
            return Err(Error::InvalidEntry(format!(
                "entry {:?} has an empty data key",
                self.label
            )));
        }
        if self.delta == 0.0 || !self.delta.is_finite() {
            return Err(Error::InvalidDelta {
                label: self.label.clone(),
                delta: self.delta,
            });
        }
        if self.panel_index == 0 {
            return Err(Error::InvalidEntry(format!(
                "entry {:?}: panel numbers start at 1",
                self.label
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogTable {
    #[serde(rename = "entry", default)]
    entries: Vec<PerturbationEntry>,
}

/// A validated, ordered list of perturbation entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<PerturbationEntry>,
}

impl Catalog {
    /// Validate `entries` and build a catalog.
    ///
    /// Rejects zero or non-finite deltas, empty labels and keys, panel 0,
    /// shared panels, and panels that do not increase in catalog order.
    pub fn new(entries: Vec<PerturbationEntry>) -> Result<Self> {
        let mut owners: HashMap<usize, String> = HashMap::with_capacity(entries.len());
        let mut previous = 0usize;

        for entry in &entries {
            entry.validate()?;

            if let Some(first) = owners.insert(entry.panel_index, entry.label.clone()) {
                return Err(Error::PanelCollision {
                    index: entry.panel_index,
                    first,
                    second: entry.label.clone(),
                });
            }
            if entry.panel_index <= previous {
                return Err(Error::PanelOrder {
                    label: entry.label.clone(),
                    index: entry.panel_index,
                    previous,
                });
            }
            previous = entry.panel_index;
        }

        Ok(Self { entries })
    }

    /// The built-in line-shape catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse a catalog from `[[entry]]` tables.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: CatalogTable = toml::from_str(text)?;
        Self::new(table.entries)
    }

    /// Entries in catalog order.
    pub fn entries(&self) -> &[PerturbationEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PerturbationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by label.
    pub fn get(&self, label: &str) -> Option<&PerturbationEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    /// Largest panel number claimed by the catalog.
    pub fn max_panel_index(&self) -> usize {
        self.entries.last().map(|e| e.panel_index).unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PerturbationEntry;
    type IntoIter = std::slice::Iter<'a, PerturbationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 31);

        let first = &catalog.entries()[0];
        assert_eq!(first.label, "Temperature");
        assert_eq!(first.data_key, "dT");
        assert_eq!(first.delta, 1e-4);
        assert_eq!(first.panel_index, 1);

        let strength = catalog.get("Line Strength").unwrap();
        assert_eq!(strength.delta, 1e-30);

        let air_dv = catalog.get("AIR-DV-X2").unwrap();
        assert_eq!(air_dv.data_key, "dlf-AIR-DV-X2");
        assert_eq!(air_dv.panel_index, 35);
        assert_eq!(catalog.max_panel_index(), 35);
    }

    #[test]
    fn test_builtin_skips_spacer_panels() {
        let catalog = Catalog::builtin().unwrap();
        let claimed: Vec<usize> = catalog.iter().map(|e| e.panel_index).collect();
        for spacer in [8, 11, 23, 26, 36] {
            assert!(!claimed.contains(&spacer), "panel {} should be a spacer", spacer);
        }
    }

    #[test]
    fn test_builtin_vmr_known_deviation() {
        let catalog = Catalog::builtin().unwrap();
        let vmr = catalog.get("VMR").unwrap();
        assert!(vmr.known_deviation_for("fake-htp").is_some());
        assert!(vmr.known_deviation_for("lorentz").is_none());

        let temperature = catalog.get("Temperature").unwrap();
        assert!(temperature.known_deviation_for("fake-htp").is_none());
    }

    #[test]
    fn test_analytic_record_defaults_to_panel_order() {
        let entry = PerturbationEntry::new("SELF-D0-X0", "dlf-SELF-D0-X0", 10.0, 9);
        assert_eq!(entry.analytic_record(), 8);

        let entry = entry.with_analytic_index(3);
        assert_eq!(entry.analytic_record(), 3);
    }

    #[test]
    fn test_rejects_zero_delta() {
        let result = Catalog::new(vec![PerturbationEntry::new("Temperature", "dT", 0.0, 1)]);
        assert!(matches!(result, Err(Error::InvalidDelta { .. })));

        let result = Catalog::new(vec![PerturbationEntry::new("Temperature", "dT", f64::NAN, 1)]);
        assert!(matches!(result, Err(Error::InvalidDelta { .. })));
    }

    #[test]
    fn test_rejects_missing_delta_in_toml() {
        let text = "[[entry]]\nlabel = \"Temperature\"\ndata_key = \"dT\"\npanel = 1\n";
        assert!(matches!(Catalog::from_toml_str(text), Err(Error::Toml(_))));
    }

    #[test]
    fn test_rejects_panel_collision() {
        let result = Catalog::new(vec![
            PerturbationEntry::new("Line Center", "df0", 10.0, 5),
            PerturbationEntry::new("SELF-G0-X0", "dlf-SELF-G0-X0", 10.0, 5),
        ]);
        match result {
            Err(Error::PanelCollision {
                index,
                first,
                second,
            }) => {
                assert_eq!(index, 5);
                assert_eq!(first, "Line Center");
                assert_eq!(second, "SELF-G0-X0");
            }
            other => panic!("expected panel collision, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_decreasing_panels() {
        let result = Catalog::new(vec![
            PerturbationEntry::new("Frequency", "df", 100.0, 2),
            PerturbationEntry::new("Temperature", "dT", 1e-4, 1),
        ]);
        assert!(matches!(result, Err(Error::PanelOrder { index: 1, .. })));
    }

    #[test]
    fn test_rejects_panel_zero_and_empty_names() {
        let result = Catalog::new(vec![PerturbationEntry::new("Temperature", "dT", 1e-4, 0)]);
        assert!(matches!(result, Err(Error::InvalidEntry(_))));

        let result = Catalog::new(vec![PerturbationEntry::new("", "dT", 1e-4, 1)]);
        assert!(matches!(result, Err(Error::InvalidEntry(_))));

        let result = Catalog::new(vec![PerturbationEntry::new("Temperature", " ", 1e-4, 1)]);
        assert!(matches!(result, Err(Error::InvalidEntry(_))));
    }

    #[test]
    fn test_append_keeps_existing_order() {
        let mut entries = Catalog::builtin().unwrap().entries().to_vec();
        entries.push(PerturbationEntry::new("Magnetic Field", "dB", 1e-9, 36));
        let catalog = Catalog::new(entries).unwrap();
        assert_eq!(catalog.len(), 32);
        assert_eq!(catalog.entries()[0].label, "Temperature");
        assert_eq!(catalog.max_panel_index(), 36);
    }

    #[test]
    fn test_known_deviation_cases() {
        let dev = KnownDeviation::new("analytic VMR derivative is stale");
        assert!(dev.applies_to("lorentz"));

        let dev = dev.for_cases(["fake-htp"]);
        assert!(dev.applies_to("fake-htp"));
        assert!(!dev.applies_to("voigt"));
    }
}
