//! On-disk dataset file format.
//!
//! ```json
//! {
//!   "generator": "lineshape-testdata",
//!   "description": "lorentz propagation matrix, T perturbed",
//!   "records": [ { "data": [[1.0e-3, 0.0, 0.0, 0.0], ...] } ]
//! }
//! ```
//!
//! Each record row is one frequency point with the four Stokes components.

use lsjac_core::{Dataset, Record, STOKES_COMPONENTS};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A dataset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFile {
    /// Program that wrote the file.
    #[serde(default)]
    pub generator: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Records in dataset order.
    pub records: Vec<RecordData>,
}

/// One record: rows of `[I, Q, U, V]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordData {
    pub data: Vec<Vec<f64>>,
}

impl DatasetFile {
    /// Convert to an in-memory dataset, checking every row width.
    pub fn into_dataset(self) -> Result<Dataset> {
        let mut records = Vec::with_capacity(self.records.len());

        for (r, record) in self.records.into_iter().enumerate() {
            let mut rows = Vec::with_capacity(record.data.len());
            for (i, row) in record.data.into_iter().enumerate() {
                let row: [f64; STOKES_COMPONENTS] = row.try_into().map_err(|row: Vec<f64>| {
                    Error::InvalidDataset(format!(
                        "record {} row {} has {} components, expected {}",
                        r,
                        i,
                        row.len(),
                        STOKES_COMPONENTS
                    ))
                })?;
                rows.push(row);
            }
            records.push(Record::from_rows(&rows));
        }

        Ok(Dataset::new(records))
    }

    /// Build a file from an in-memory dataset.
    pub fn from_dataset(dataset: &Dataset, generator: &str, description: &str) -> Self {
        let records = dataset
            .records()
            .iter()
            .map(|record| RecordData {
                data: record
                    .matrix()
                    .row_iter()
                    .map(|row| row.iter().copied().collect())
                    .collect(),
            })
            .collect();

        Self {
            generator: generator.to_string(),
            description: description.to_string(),
            records,
        }
    }
}
