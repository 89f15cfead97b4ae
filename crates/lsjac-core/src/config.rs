//! Run configuration.
//!
//! A check is configured by a TOML file with optional `[grid]`, `[axis]`,
//! `[field]` and `[tolerances]` tables and an optional list of `[[entry]]`
//! catalog rows. Omitted tables take their defaults; a file without entries
//! uses the built-in line-shape catalog.
//!
//! ```toml
//! [grid]
//! rows = 6
//! cols = 6
//!
//! [axis]
//! start = 90.0
//! stop = 110.0
//! points = 1001
//!
//! [tolerances]
//! rel = 1e-2
//!
//! [[entry]]
//! label = "Temperature"
//! data_key = "dT"
//! delta = 1e-4
//! panel = 1
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::axis::FrequencyGrid;
use crate::catalog::{Catalog, PerturbationEntry};
use crate::dataset::FieldSelector;
use crate::error::{Error, Result};
use crate::layout::GridLayout;

/// Tolerances for comparing finite-difference and analytic derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivativeTolerances {
    /// Relative tolerance (fraction of the analytic magnitude).
    #[serde(default = "DerivativeTolerances::default_rel")]
    pub rel: f64,
    /// Absolute tolerance.
    #[serde(default)]
    pub abs: f64,
    /// Factor applied to both tolerances for entries with a known deviation.
    #[serde(default = "DerivativeTolerances::default_known_deviation_factor")]
    pub known_deviation_factor: f64,
}

impl DerivativeTolerances {
    fn default_rel() -> f64 {
        1e-2
    }
    fn default_known_deviation_factor() -> f64 {
        1e3
    }

    /// Tolerances widened for a known deviation.
    pub fn widened(&self) -> Self {
        Self {
            rel: self.rel * self.known_deviation_factor,
            abs: self.abs * self.known_deviation_factor,
            ..*self
        }
    }

    fn validate(&self) -> Result<()> {
        let all = [self.rel, self.abs, self.known_deviation_factor];
        if all.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::InvalidConfig(format!(
                "tolerances must be finite and non-negative: {:?}",
                self
            )));
        }
        Ok(())
    }
}

impl Default for DerivativeTolerances {
    fn default() -> Self {
        Self {
            rel: Self::default_rel(),
            abs: 0.0,
            known_deviation_factor: Self::default_known_deviation_factor(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    grid: GridLayout,
    #[serde(default)]
    axis: FrequencyGrid,
    #[serde(default)]
    field: FieldSelector,
    #[serde(default)]
    tolerances: DerivativeTolerances,
    #[serde(rename = "entry", default)]
    entries: Vec<PerturbationEntry>,
}

/// Everything a run needs besides the data itself.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    pub grid: GridLayout,
    pub axis: FrequencyGrid,
    pub field: FieldSelector,
    pub tolerances: DerivativeTolerances,
    pub catalog: Catalog,
}

impl CheckConfig {
    /// Defaults with the built-in catalog.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            grid: GridLayout::default(),
            axis: FrequencyGrid::default(),
            field: FieldSelector::default(),
            tolerances: DerivativeTolerances::default(),
            catalog: Catalog::builtin()?,
        })
    }

    /// Replace the catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_grid(mut self, grid: GridLayout) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_axis(mut self, axis: FrequencyGrid) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_tolerances(mut self, tolerances: DerivativeTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Parse a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let catalog = if file.entries.is_empty() {
            Catalog::builtin()?
        } else {
            Catalog::new(file.entries)?
        };

        let config = Self {
            grid: file.grid,
            axis: file.axis,
            field: file.field,
            tolerances: file.tolerances,
            catalog,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        log::debug!("loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Check grid, axis and tolerances.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.axis.validate()?;
        self.tolerances.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CheckConfig::from_toml_str("").unwrap();
        assert_eq!(config.grid, GridLayout::new(6, 6));
        assert_eq!(config.axis, FrequencyGrid::default());
        assert_eq!(config.field, FieldSelector::default());
        assert_eq!(config.tolerances, DerivativeTolerances::default());
        assert_eq!(config.catalog, Catalog::builtin().unwrap());
    }

    #[test]
    fn test_custom_config() {
        let text = r#"
[grid]
rows = 2
cols = 3

[axis]
start = 0.0
stop = 2.0
points = 3

[field]
component = 1

[tolerances]
rel = 0.05

[[entry]]
label = "Temperature"
data_key = "dT"
delta = 1e-4
panel = 1

[[entry]]
label = "VMR"
data_key = "dvmr"
delta = 1e-4
panel = 3
analytic_index = 1
known_deviation = { note = "stale", cases = ["fake-htp"] }
"#;
        let config = CheckConfig::from_toml_str(text).unwrap();
        assert_eq!(config.grid, GridLayout::new(2, 3));
        assert_eq!(config.axis.values(), vec![0.0, 1.0, 2.0]);
        assert_eq!(config.field.component, 1);
        assert_eq!(config.field.record, 0);
        assert_eq!(config.tolerances.rel, 0.05);
        assert_eq!(config.tolerances.known_deviation_factor, 1e3);
        assert_eq!(config.catalog.len(), 2);

        let vmr = config.catalog.get("VMR").unwrap();
        assert_eq!(vmr.analytic_record(), 1);
        assert!(vmr.known_deviation_for("fake-htp").is_some());
    }

    #[test]
    fn test_partial_grid_table() {
        let config = CheckConfig::from_toml_str("[grid]\nrows = 4\n").unwrap();
        assert_eq!(config.grid, GridLayout::new(4, 6));

        let config = CheckConfig::from_toml_str("[grid]\ncols = 2\n").unwrap();
        assert_eq!(config.grid, GridLayout::new(6, 2));
    }

    #[test]
    fn test_rejects_zero_delta_entry() {
        let text = "[[entry]]\nlabel = \"T\"\ndata_key = \"dT\"\ndelta = 0.0\npanel = 1\n";
        assert!(matches!(
            CheckConfig::from_toml_str(text),
            Err(Error::InvalidDelta { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let text = "[tolerances]\nrel = -1.0\n";
        assert!(matches!(
            CheckConfig::from_toml_str(text),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_widened_tolerances() {
        let tol = DerivativeTolerances {
            rel: 1e-2,
            abs: 1e-6,
            known_deviation_factor: 10.0,
        };
        let wide = tol.widened();
        assert!((wide.rel - 0.1).abs() < 1e-15);
        assert!((wide.abs - 1e-5).abs() < 1e-18);
    }

    #[test]
    fn test_load_missing_file() {
        let result = CheckConfig::load(Path::new("/nonexistent/lsjac.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
