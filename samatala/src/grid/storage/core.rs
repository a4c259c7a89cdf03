//! Grid storage core implementation.
//!
//! Uses Structure-of-Arrays (SoA) layout: one byte of occupancy state and
//! one support counter per cell, row-major.

use nalgebra::Vector3;
use serde::Serialize;

use crate::core::{PlaneBounds, PlaneCoefficients, PlaneFrame, PlanePoint};
use crate::error::{ModelingError, Result};
use crate::geometry::ConvexPolygon;
use crate::grid::morphology;

use super::types::{CellCounts, CellIndex, CellState};

/// Occupancy grid laid over the plane of one polygon.
///
/// The grid uses the polygon's plane-local coordinate system where:
/// - cell (0, 0) has its lower corner at `origin` (the polygon's bounding
///   box minimum)
/// - columns advance along the u axis, rows along the v axis
/// - cell (row, col) covers `origin + [col, col+1) × [row, row+1)` scaled by
///   `resolution`
///
/// ## Memory Layout
///
/// ```text
/// states:  [S S S S S S S S S S S S ...]   u8, CellState
/// support: [N N N N N N N N N N N N ...]   u32, points per cell
///           └ row 0 ┘└ row 1 ┘ ...
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct GridPlane {
    // === SoA Data Arrays ===
    pub(super) states: Vec<u8>,
    pub(super) support: Vec<u32>,

    // === Grid Metadata ===
    pub(super) rows: usize,
    pub(super) cols: usize,
    pub(super) resolution: f32,
    /// Pre-computed 1.0 / resolution for faster plane-to-cell conversion.
    #[serde(skip)]
    pub(super) inv_resolution: f32,
    pub(super) origin: PlanePoint,
    pub(super) polygon: ConvexPolygon,
}

impl GridPlane {
    // === Constructors ===

    /// Create an all-free grid covering the polygon's bounding box.
    ///
    /// `rows = ceil(height / resolution)` and `cols = ceil(width /
    /// resolution)`, each at least 1. Fails with `InvalidResolution` for a
    /// non-positive or non-finite resolution, and with `GridTooLarge` when
    /// either axis exceeds `max_cells_per_axis`.
    pub fn new(polygon: ConvexPolygon, resolution: f32, max_cells_per_axis: usize) -> Result<Self> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(ModelingError::InvalidResolution(resolution));
        }

        let bounds = polygon.bounds_2d();
        let rows = cells_along(bounds.height(), resolution);
        let cols = cells_along(bounds.width(), resolution);
        if rows > max_cells_per_axis || cols > max_cells_per_axis {
            return Err(ModelingError::GridTooLarge {
                rows,
                cols,
                max: max_cells_per_axis,
            });
        }

        let size = rows * cols;
        Ok(Self {
            states: vec![CellState::Free as u8; size],
            support: vec![0; size],
            rows,
            cols,
            resolution,
            inv_resolution: 1.0 / resolution,
            origin: bounds.min,
            polygon,
        })
    }

    // === Accessors ===

    /// Number of rows (v direction).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (u direction).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell edge length in meters.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Plane-local position of the lower corner of cell (0, 0).
    #[inline]
    pub fn origin(&self) -> PlanePoint {
        self.origin
    }

    /// Polygon the grid was built over.
    #[inline]
    pub fn polygon(&self) -> &ConvexPolygon {
        &self.polygon
    }

    /// Plane frame shared with the polygon.
    #[inline]
    pub fn frame(&self) -> &PlaneFrame {
        self.polygon.frame()
    }

    /// Plane coefficients.
    #[inline]
    pub fn coefficients(&self) -> &PlaneCoefficients {
        self.polygon.coefficients()
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.states.len()
    }

    /// Plane-local area covered by the cells (at least the polygon bbox).
    pub fn extent(&self) -> PlaneBounds {
        PlaneBounds::new(
            self.origin,
            PlanePoint::new(
                self.origin.u + self.cols as f32 * self.resolution,
                self.origin.v + self.rows as f32 * self.resolution,
            ),
        )
    }

    // === Coordinate Conversion ===

    /// Check if a cell index is within the grid.
    #[inline]
    pub fn contains_cell(&self, cell: CellIndex) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Convert a cell index to a flat array index.
    #[inline]
    pub fn cell_to_index(&self, cell: CellIndex) -> Option<usize> {
        self.contains_cell(cell)
            .then(|| cell.row * self.cols + cell.col)
    }

    /// Convert a flat array index to a cell index.
    #[inline]
    pub fn index_to_cell(&self, index: usize) -> CellIndex {
        CellIndex::new(index / self.cols, index % self.cols)
    }

    /// Map a plane-local point to the cell containing it.
    ///
    /// Points on the far edge of the grid belong to the last row/column.
    /// Returns `None` outside the grid extent.
    pub fn plane_to_cell(&self, point: PlanePoint) -> Option<CellIndex> {
        let fc = (point.u - self.origin.u) * self.inv_resolution;
        let fr = (point.v - self.origin.v) * self.inv_resolution;
        if fc.is_nan() || fr.is_nan() || fc < 0.0 || fr < 0.0 {
            return None;
        }
        if fc > self.cols as f32 || fr > self.rows as f32 {
            return None;
        }
        Some(CellIndex::new(
            (fr as usize).min(self.rows - 1),
            (fc as usize).min(self.cols - 1),
        ))
    }

    /// Map a plane-local point to a cell, clamping into range.
    ///
    /// Used for points already known to lie inside the polygon, where only
    /// rounding can push them past the grid edge.
    pub(crate) fn clamped_cell(&self, point: PlanePoint) -> CellIndex {
        let fc = ((point.u - self.origin.u) * self.inv_resolution).max(0.0);
        let fr = ((point.v - self.origin.v) * self.inv_resolution).max(0.0);
        CellIndex::new(
            (fr as usize).min(self.rows - 1),
            (fc as usize).min(self.cols - 1),
        )
    }

    /// Plane-local center of a cell.
    #[inline]
    pub fn cell_to_plane(&self, row: usize, col: usize) -> PlanePoint {
        PlanePoint::new(
            self.origin.u + (col as f32 + 0.5) * self.resolution,
            self.origin.v + (row as f32 + 0.5) * self.resolution,
        )
    }

    /// 3D center of a cell, on the plane.
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> Vector3<f32> {
        self.frame().unproject(self.cell_to_plane(row, col))
    }

    /// Map a 3D point (projected onto the plane) to its cell.
    pub fn world_to_cell(&self, point: &Vector3<f32>) -> Option<CellIndex> {
        self.plane_to_cell(self.frame().project(point))
    }

    // === Cell Access ===

    /// State of a cell (`Free` when out of range).
    #[inline]
    pub fn state(&self, row: usize, col: usize) -> CellState {
        self.cell_to_index(CellIndex::new(row, col))
            .map(|i| CellState::from_u8(self.states[i]))
            .unwrap_or(CellState::Free)
    }

    /// Whether a cell is occupied (false when out of range).
    #[inline]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.state(row, col).is_occupied()
    }

    /// Whether the cell under a 3D point is occupied.
    ///
    /// The point is projected onto the plane first; points outside the grid
    /// extent are never occupied.
    pub fn is_occupied_at(&self, point: &Vector3<f32>) -> bool {
        self.world_to_cell(point)
            .is_some_and(|cell| self.is_occupied(cell.row, cell.col))
    }

    /// Number of cloud points that landed in a cell (0 when out of range).
    #[inline]
    pub fn support(&self, row: usize, col: usize) -> u32 {
        self.cell_to_index(CellIndex::new(row, col))
            .map(|i| self.support[i])
            .unwrap_or(0)
    }

    /// Set the state of a cell. Returns true if the state changed.
    pub fn set_state(&mut self, cell: CellIndex, state: CellState) -> bool {
        match self.cell_to_index(cell) {
            Some(i) => {
                let changed = self.states[i] != state as u8;
                self.states[i] = state as u8;
                changed
            }
            None => false,
        }
    }

    /// Record one supporting point in a cell and mark it occupied.
    #[inline]
    pub(crate) fn add_support(&mut self, cell: CellIndex) {
        if let Some(i) = self.cell_to_index(cell) {
            self.states[i] = CellState::Occupied as u8;
            self.support[i] = self.support[i].saturating_add(1);
        }
    }

    /// Reset all cells to free with zero support.
    pub fn clear(&mut self) {
        self.states.fill(CellState::Free as u8);
        self.support.fill(0);
    }

    // === Queries ===

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.states
            .iter()
            .filter(|&&s| s == CellState::Occupied as u8)
            .count()
    }

    /// Cell counts by state.
    pub fn counts(&self) -> CellCounts {
        let occupied = self.occupied_count();
        CellCounts {
            free: self.cell_count() - occupied,
            occupied,
        }
    }

    /// Total points recorded across all cells.
    pub fn total_support(&self) -> u64 {
        self.support.iter().map(|&n| n as u64).sum()
    }

    /// Occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == CellState::Occupied as u8)
            .map(|(i, _)| self.index_to_cell(i))
    }

    /// 3D centers of the occupied cells in row-major order.
    pub fn occupied_centers(&self) -> Vec<Vector3<f32>> {
        self.occupied_cells()
            .map(|c| self.cell_center(c.row, c.col))
            .collect()
    }

    /// Number of cells whose center lies inside the polygon.
    pub fn cells_inside_polygon(&self) -> usize {
        (0..self.cell_count())
            .map(|i| self.index_to_cell(i))
            .filter(|c| {
                self.polygon
                    .contains_2d(self.cell_to_plane(c.row, c.col), 0.0)
            })
            .count()
    }

    /// Occupied cells divided by cells inside the polygon.
    ///
    /// Polygons smaller than one cell have no interior centers; the ratio
    /// is then taken over the whole grid.
    pub fn coverage_ratio(&self) -> f32 {
        let inside = match self.cells_inside_polygon() {
            0 => self.cell_count(),
            n => n,
        };
        (self.occupied_count() as f32 / inside as f32).min(1.0)
    }

    // === Morphology ===

    /// Grow occupied regions by one 4-neighbor step per iteration.
    ///
    /// Newly occupied cells have zero support.
    pub fn dilate(&mut self, iterations: usize) {
        for _ in 0..iterations {
            self.states = morphology::dilate(&self.states, self.rows, self.cols);
        }
    }

    /// Shrink occupied regions by one 4-neighbor step per iteration.
    ///
    /// Cells outside the grid count as free. Cleared cells keep their
    /// support count so the raw evidence survives.
    pub fn erode(&mut self, iterations: usize) {
        for _ in 0..iterations {
            self.states = morphology::erode(&self.states, self.rows, self.cols);
        }
    }

    // === Raw Slice Access ===

    /// Raw cell states (row-major, `CellState as u8`).
    #[inline]
    pub fn states_raw(&self) -> &[u8] {
        &self.states
    }

    /// Raw support counters (row-major).
    #[inline]
    pub fn support_raw(&self) -> &[u32] {
        &self.support
    }
}

/// Cells needed to cover `extent` at `resolution`, at least one.
fn cells_along(extent: f32, resolution: f32) -> usize {
    let n = (extent / resolution).ceil();
    if n.is_nan() {
        return 1;
    }
    // Float-to-int casts saturate, so huge extents stay huge
    (n as usize).max(1)
}
