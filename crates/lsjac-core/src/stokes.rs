//! Stokes-vector fields and their projection to scalar fields.
//!
//! A [`StokvecMatrix`] is a 2-D grid of four-component Stokes vectors. Before
//! it can be shown as a heatmap it is reduced to a scalar matrix by a fixed
//! linear combination of the components, `out[i, j] = data[i, j] . weights`.

use nalgebra::{DMatrix, Vector4};

use crate::error::{Error, Result};

/// A Stokes vector `[I, Q, U, V]`, also used as projection weights.
pub type Stokvec = Vector4<f64>;

/// Unit weights for the named Stokes components.
pub mod component {
    use super::Stokvec;

    pub fn i() -> Stokvec {
        Stokvec::new(1.0, 0.0, 0.0, 0.0)
    }
    pub fn q() -> Stokvec {
        Stokvec::new(0.0, 1.0, 0.0, 0.0)
    }
    pub fn u() -> Stokvec {
        Stokvec::new(0.0, 0.0, 1.0, 0.0)
    }
    pub fn v() -> Stokvec {
        Stokvec::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Parse a component name ("I", "Q", "U" or "V").
    pub fn named(name: &str) -> Option<Stokvec> {
        match name.trim().to_ascii_uppercase().as_str() {
            "I" => Some(i()),
            "Q" => Some(q()),
            "U" => Some(u()),
            "V" => Some(v()),
            _ => None,
        }
    }
}

/// Row-major grid of Stokes vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct StokvecMatrix {
    nrows: usize,
    ncols: usize,
    data: Vec<Stokvec>,
}

impl StokvecMatrix {
    /// A grid of zero vectors.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            data: vec![Stokvec::zeros(); nrows * ncols],
        }
    }

    /// Wrap row-major data.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<Stokvec>) -> Result<Self> {
        if data.len() != nrows * ncols {
            return Err(Error::LengthMismatch {
                expected: nrows * ncols,
                actual: data.len(),
            });
        }
        Ok(Self { nrows, ncols, data })
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Stokvec> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        self.data.get(row * self.ncols + col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: Stokvec) -> Result<()> {
        if row >= self.nrows || col >= self.ncols {
            return Err(Error::CellOutOfRange {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        self.data[row * self.ncols + col] = value;
        Ok(())
    }

    /// Reduce to a scalar field by a linear combination of the components.
    pub fn project(&self, weights: &Stokvec) -> DMatrix<f64> {
        DMatrix::from_fn(self.nrows, self.ncols, |i, j| {
            self.data[i * self.ncols + j].dot(weights)
        })
    }
}
