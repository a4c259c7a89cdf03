//! Types used by grid storage.

use serde::{Deserialize, Serialize};

/// Occupancy state of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// No supporting point landed in the cell.
    #[default]
    Free = 0,
    /// At least one supporting point landed in the cell (or morphology
    /// filled it).
    Occupied = 1,
}

impl CellState {
    /// Decode from the raw storage byte. Unknown values read as `Free`.
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => CellState::Occupied,
            _ => CellState::Free,
        }
    }

    /// Whether this is `Occupied`.
    #[inline]
    pub fn is_occupied(self) -> bool {
        self == CellState::Occupied
    }
}

/// Cell address: `row` runs along the plane's v axis, `col` along u.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    /// Row (v direction).
    pub row: usize,
    /// Column (u direction).
    pub col: usize,
}

impl CellIndex {
    /// Create a new cell index.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for CellIndex {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Cell counts by state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    /// Free cells.
    pub free: usize,
    /// Occupied cells.
    pub occupied: usize,
}

impl CellCounts {
    /// Total cells.
    pub fn total(&self) -> usize {
        self.free + self.occupied
    }

    /// Fraction of cells that are occupied (0 for an empty grid).
    pub fn occupied_ratio(&self) -> f32 {
        match self.total() {
            0 => 0.0,
            total => self.occupied as f32 / total as f32,
        }
    }
}
