//! Panel layout engine.
//!
//! Maps catalog panel numbers onto cells of a fixed `rows x cols` grid in
//! row-major order: panel 1 is `(0, 0)`, panel 2 is `(0, 1)`, and so on,
//! wrapping at `cols`. Every cell not claimed by an entry is reported as a
//! blank so the renderer can reserve it; blanks are what separate parameter
//! families in the figure.
//!
//! Placement is pure and independent of entry order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::PerturbationEntry;
use crate::error::{Error, Result};

/// A cell of the grid, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelCoord {
    pub row: usize,
    pub col: usize,
}

impl PanelCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Fixed grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    #[serde(default = "GridLayout::default_rows")]
    pub rows: usize,
    #[serde(default = "GridLayout::default_cols")]
    pub cols: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: Self::default_rows(),
            cols: Self::default_cols(),
        }
    }
}

impl GridLayout {
    fn default_rows() -> usize {
        6
    }
    fn default_cols() -> usize {
        6
    }

    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of panels.
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// Cell of a 1-based panel number, or `None` outside the grid.
    pub fn coord(&self, index: usize) -> Option<PanelCoord> {
        if index == 0 || index > self.capacity() {
            return None;
        }
        let offset = index - 1;
        Some(PanelCoord::new(offset / self.cols, offset % self.cols))
    }

    /// Panel number of a cell, or `None` outside the grid.
    pub fn index_of(&self, coord: PanelCoord) -> Option<usize> {
        if coord.row >= self.rows || coord.col >= self.cols {
            return None;
        }
        Some(coord.row * self.cols + coord.col + 1)
    }
}

/// One cell of a placed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    /// 1-based panel number.
    pub index: usize,
    pub coord: PanelCoord,
    /// Reserved spacer with no content.
    pub blank: bool,
}

/// Result of placing catalog entries on a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    grid: GridLayout,
    claimed: BTreeMap<usize, PanelCoord>,
    blanks: Vec<usize>,
}

impl Placement {
    pub fn grid(&self) -> GridLayout {
        self.grid
    }

    /// Claimed panel numbers and their cells, in panel order.
    pub fn claimed(&self) -> &BTreeMap<usize, PanelCoord> {
        &self.claimed
    }

    /// Unclaimed panel numbers, ascending.
    pub fn blanks(&self) -> &[usize] {
        &self.blanks
    }

    /// Cell of a claimed panel.
    pub fn coord_of(&self, index: usize) -> Option<PanelCoord> {
        self.claimed.get(&index).copied()
    }

    pub fn is_blank(&self, index: usize) -> bool {
        self.blanks.binary_search(&index).is_ok()
    }

    /// Every panel of the grid in row-major order.
    pub fn panels(&self) -> impl Iterator<Item = Panel> + '_ {
        (1..=self.grid.capacity()).filter_map(move |index| {
            self.grid.coord(index).map(|coord| Panel {
                index,
                coord,
                blank: !self.claimed.contains_key(&index),
            })
        })
    }
}

/// Place `entries` on `grid`.
///
/// Fails on a panel number outside `[1, rows * cols]` and on two entries
/// sharing a panel, so a bad catalog is caught before any data is loaded.
pub fn place<'a, I>(entries: I, grid: GridLayout) -> Result<Placement>
where
    I: IntoIterator<Item = &'a PerturbationEntry>,
{
    grid.validate()?;

    let mut owners: BTreeMap<usize, &str> = BTreeMap::new();
    let mut claimed = BTreeMap::new();

    for entry in entries {
        let coord = grid.coord(entry.panel_index).ok_or_else(|| Error::PanelOverflow {
            label: entry.label.clone(),
            index: entry.panel_index,
            rows: grid.rows,
            cols: grid.cols,
        })?;

        if let Some(first) = owners.insert(entry.panel_index, &entry.label) {
            return Err(Error::PanelCollision {
                index: entry.panel_index,
                first: first.to_string(),
                second: entry.label.clone(),
            });
        }
        claimed.insert(entry.panel_index, coord);
    }

    let blanks = (1..=grid.capacity())
        .filter(|index| !claimed.contains_key(index))
        .collect();

    log::debug!(
        "placed {} panels on a {}x{} grid",
        claimed.len(),
        grid.rows,
        grid.cols
    );

    Ok(Placement {
        grid,
        claimed,
        blanks,
    })
}
