//! Binary morphology on row-major occupancy states (4-neighborhood).

use super::storage::CellState;

const OCCUPIED: u8 = CellState::Occupied as u8;
const FREE: u8 = CellState::Free as u8;

/// One dilation step: a cell becomes occupied if it or any 4-neighbor is.
pub(crate) fn dilate(states: &[u8], rows: usize, cols: usize) -> Vec<u8> {
    let mut out = states.to_vec();
    for row in 0..rows {
        for col in 0..cols {
            let i = row * cols + col;
            if states[i] != OCCUPIED
                && neighbors(row, col, rows, cols).any(|j| states[j] == OCCUPIED)
            {
                out[i] = OCCUPIED;
            }
        }
    }
    out
}

/// One erosion step: an occupied cell stays occupied only if all four
/// neighbors exist and are occupied.
pub(crate) fn erode(states: &[u8], rows: usize, cols: usize) -> Vec<u8> {
    let mut out = states.to_vec();
    for row in 0..rows {
        for col in 0..cols {
            let i = row * cols + col;
            if states[i] != OCCUPIED {
                continue;
            }
            let interior = row > 0 && col > 0 && row + 1 < rows && col + 1 < cols;
            if !interior || neighbors(row, col, rows, cols).any(|j| states[j] != OCCUPIED) {
                out[i] = FREE;
            }
        }
    }
    out
}

/// Flat indices of the in-grid 4-neighbors of `(row, col)`.
fn neighbors(row: usize, col: usize, rows: usize, cols: usize) -> impl Iterator<Item = usize> {
    let up = (row + 1 < rows).then(|| (row + 1) * cols + col);
    let down = (row > 0).then(|| (row - 1) * cols + col);
    let right = (col + 1 < cols).then(|| row * cols + col + 1);
    let left = (col > 0).then(|| row * cols + col - 1);
    [up, down, right, left].into_iter().flatten()
}
