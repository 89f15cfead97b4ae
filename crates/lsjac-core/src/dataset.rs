//! In-memory spectral datasets.
//!
//! A dataset is a sequence of records. Each record holds one propagation
//! matrix profile as an `N x 4` matrix: one row per frequency point and one
//! column per Stokes component (I, Q, U, V).

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of Stokes components per frequency point.
pub const STOKES_COMPONENTS: usize = 4;

/// One propagation-matrix profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    data: DMatrix<f64>,
}

impl Record {
    /// Wrap an `N x 4` matrix.
    pub fn new(data: DMatrix<f64>) -> Result<Self> {
        if data.ncols() != STOKES_COMPONENTS {
            return Err(Error::FieldOutOfRange(format!(
                "record has {} components, expected {}",
                data.ncols(),
                STOKES_COMPONENTS
            )));
        }
        Ok(Self { data })
    }

    /// Build a record from rows of `[I, Q, U, V]`.
    pub fn from_rows(rows: &[[f64; STOKES_COMPONENTS]]) -> Self {
        let data = DMatrix::from_fn(rows.len(), STOKES_COMPONENTS, |i, k| rows[i][k]);
        Self { data }
    }

    /// Build a record whose first component is `values` and whose other
    /// components are zero.
    pub fn from_scalar(values: &[f64]) -> Self {
        let data = DMatrix::from_fn(values.len(), STOKES_COMPONENTS, |i, k| {
            if k == 0 { values[i] } else { 0.0 }
        });
        Self { data }
    }

    /// Number of frequency points.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Underlying matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Scalar profile of one Stokes component.
    pub fn component(&self, component: usize) -> Result<Vec<f64>> {
        if component >= STOKES_COMPONENTS {
            return Err(Error::FieldOutOfRange(format!(
                "component {} (records have {} components)",
                component, STOKES_COMPONENTS
            )));
        }
        Ok(self.data.column(component).iter().copied().collect())
    }
}

/// A sequence of records loaded for one dataset key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Extract the scalar field addressed by `selector`.
    pub fn field(&self, selector: FieldSelector) -> Result<Vec<f64>> {
        let record = self.record(selector.record).ok_or_else(|| {
            Error::FieldOutOfRange(format!(
                "record {} (dataset has {} records)",
                selector.record,
                self.records.len()
            ))
        })?;
        record.component(selector.component)
    }
}

/// Which scalar field of a dataset is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelector {
    /// Record index.
    #[serde(default)]
    pub record: usize,
    /// Stokes component index (0 = I).
    #[serde(default)]
    pub component: usize,
}

impl Default for FieldSelector {
    fn default() -> Self {
        Self {
            record: 0,
            component: 0,
        }
    }
}

impl FieldSelector {
    /// The same component of another record.
    pub fn with_record(self, record: usize) -> Self {
        Self { record, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_component() {
        let record = Record::from_rows(&[[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]]);
        assert_eq!(record.len(), 2);
        assert_eq!(record.component(0).unwrap(), vec![1.0, 5.0]);
        assert_eq!(record.component(3).unwrap(), vec![4.0, 8.0]);
        assert!(record.component(4).is_err());
    }

    #[test]
    fn test_record_rejects_wrong_width() {
        assert!(Record::new(DMatrix::zeros(3, 2)).is_err());
        assert!(Record::new(DMatrix::zeros(3, 4)).is_ok());
    }

    #[test]
    fn test_dataset_field() {
        let dataset = Dataset::new(vec![
            Record::from_scalar(&[1.0, 2.0]),
            Record::from_scalar(&[3.0, 4.0]),
        ]);

        let field = dataset.field(FieldSelector::default()).unwrap();
        assert_eq!(field, vec![1.0, 2.0]);

        let field = dataset
            .field(FieldSelector::default().with_record(1))
            .unwrap();
        assert_eq!(field, vec![3.0, 4.0]);

        let missing = dataset.field(FieldSelector::default().with_record(2));
        assert!(matches!(missing, Err(Error::FieldOutOfRange(_))));
    }
}
