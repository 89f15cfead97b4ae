//! Dataset access.
//!
//! A run asks a [`DatasetSource`] for three kinds of dataset per case: the
//! baseline propagation matrix, one perturbed propagation matrix per catalog
//! entry, and the analytic derivatives. Sources do not cache.

pub mod format;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use lsjac_core::Dataset;

use crate::error::{Error, Result};

pub use format::{DatasetFile, RecordData};

/// Which dataset of a case to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DatasetKey {
    /// The unperturbed propagation matrix.
    Baseline,
    /// The propagation matrix with one parameter perturbed.
    Perturbed(String),
    /// Analytic derivatives, one record per Jacobian quantity.
    AnalyticDerivatives,
}

impl DatasetKey {
    /// File stem of the dataset (`propmat`, `propmat-<key>`, `dpropmat`).
    pub fn stem(&self) -> String {
        match self {
            DatasetKey::Baseline => "propmat".to_string(),
            DatasetKey::Perturbed(key) => format!("propmat-{}", key),
            DatasetKey::AnalyticDerivatives => "dpropmat".to_string(),
        }
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem())
    }
}

/// Something that can resolve `(case, key)` to a dataset.
pub trait DatasetSource: Send + Sync {
    fn load(&self, case: &str, key: &DatasetKey) -> Result<Dataset>;
}

/// Load and convert a single dataset file.
pub fn load_dataset_file(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)?;
    let file: DatasetFile = serde_json::from_str(&content)
        .map_err(|e| Error::InvalidDataset(format!("{}: {}", path.display(), e)))?;
    file.into_dataset()
}

/// Datasets stored as `<root>/test-<case>/<stem>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the datasets of `case`.
    pub fn case_dir(&self, case: &str) -> PathBuf {
        self.root.join(format!("test-{}", case))
    }

    /// Path a dataset is expected at.
    pub fn path_for(&self, case: &str, key: &DatasetKey) -> PathBuf {
        self.case_dir(case).join(format!("{}.json", key.stem()))
    }

    /// Write a dataset where this source will find it.
    pub fn store(&self, case: &str, key: &DatasetKey, dataset: &Dataset) -> Result<PathBuf> {
        let path = self.path_for(case, key);
        std::fs::create_dir_all(self.case_dir(case))?;
        let file = DatasetFile::from_dataset(dataset, "lsjac", &format!("{} {}", case, key));
        std::fs::write(&path, serde_json::to_string(&file)?)?;
        Ok(path)
    }
}

impl DatasetSource for DirectorySource {
    fn load(&self, case: &str, key: &DatasetKey) -> Result<Dataset> {
        let path = self.path_for(case, key);
        if !path.is_file() {
            return Err(Error::DatasetNotFound {
                case: case.to_string(),
                key: key.stem(),
                path,
            });
        }

        log::debug!("loading {}", path.display());
        load_dataset_file(&path)
    }
}

/// In-memory datasets, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    datasets: HashMap<(String, DatasetKey), Dataset>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, case: &str, key: DatasetKey, dataset: Dataset) {
        self.datasets.insert((case.to_string(), key), dataset);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, case: &str, key: DatasetKey, dataset: Dataset) -> Self {
        self.insert(case, key, dataset);
        self
    }

    pub fn remove(&mut self, case: &str, key: &DatasetKey) -> Option<Dataset> {
        self.datasets.remove(&(case.to_string(), key.clone()))
    }
}

impl DatasetSource for MemorySource {
    fn load(&self, case: &str, key: &DatasetKey) -> Result<Dataset> {
        self.datasets
            .get(&(case.to_string(), key.clone()))
            .cloned()
            .ok_or_else(|| Error::DatasetNotFound {
                case: case.to_string(),
                key: key.stem(),
                path: PathBuf::from(format!("memory:{}", key.stem())),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsjac_core::Record;

    #[test]
    fn test_key_stems() {
        assert_eq!(DatasetKey::Baseline.stem(), "propmat");
        assert_eq!(DatasetKey::Perturbed("dT".into()).stem(), "propmat-dT");
        assert_eq!(
            DatasetKey::Perturbed("dlf-SELF-G0-X0".into()).to_string(),
            "propmat-dlf-SELF-G0-X0"
        );
        assert_eq!(DatasetKey::AnalyticDerivatives.stem(), "dpropmat");
    }

    #[test]
    fn test_directory_paths() {
        let source = DirectorySource::new("testdata");
        assert_eq!(
            source.path_for("lorentz", &DatasetKey::Perturbed("df".into())),
            PathBuf::from("testdata/test-lorentz/propmat-df.json")
        );
    }

    #[test]
    fn test_directory_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        let dataset = Dataset::new(vec![Record::from_scalar(&[1.0, 2.0, 3.0])]);

        let path = source
            .store("lorentz", &DatasetKey::Baseline, &dataset)
            .unwrap();
        assert!(path.ends_with("test-lorentz/propmat.json"));

        let loaded = source.load("lorentz", &DatasetKey::Baseline).unwrap();
        assert_eq!(loaded, dataset);
    }

    #[test]
    fn test_directory_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        match source.load("lorentz", &DatasetKey::Perturbed("dT".into())) {
            Err(Error::DatasetNotFound { case, key, .. }) => {
                assert_eq!(case, "lorentz");
                assert_eq!(key, "propmat-dT");
            }
            other => panic!("expected missing dataset, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        std::fs::create_dir_all(source.case_dir("voigt")).unwrap();
        std::fs::write(source.path_for("voigt", &DatasetKey::Baseline), "{ not json").unwrap();

        assert!(matches!(
            source.load("voigt", &DatasetKey::Baseline),
            Err(Error::InvalidDataset(_))
        ));
    }

    #[test]
    fn test_memory_source() {
        let dataset = Dataset::new(vec![Record::from_scalar(&[1.0])]);
        let mut source = MemorySource::new().with("lorentz", DatasetKey::Baseline, dataset.clone());

        assert_eq!(source.load("lorentz", &DatasetKey::Baseline).unwrap(), dataset);
        assert!(source.load("voigt", &DatasetKey::Baseline).is_err());

        source.remove("lorentz", &DatasetKey::Baseline);
        assert!(source.load("lorentz", &DatasetKey::Baseline).is_err());
    }
}
