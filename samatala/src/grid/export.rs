//! Serializable snapshot of a grid for downstream consumers.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::core::PlanePoint;
use crate::grid::storage::GridPlane;

/// Occupancy grid in a transport-friendly form.
///
/// Carries what a consumer needs to reconstruct cell geometry without the
/// library: the plane, the cell size and layout, and the occupied cell
/// centers in 3D.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OccupancyGridMessage {
    /// Plane coefficients `[a, b, c, d]` with a unit normal
    pub coefficients: [f32; 4],
    /// Cell edge length in meters
    pub resolution: f32,
    /// Rows (v direction)
    pub rows: usize,
    /// Columns (u direction)
    pub cols: usize,
    /// Plane-local lower corner of cell (0, 0)
    pub origin: PlanePoint,
    /// Frame origin in 3D
    pub frame_origin: Vector3<f32>,
    /// Frame u axis in 3D
    pub u_axis: Vector3<f32>,
    /// Frame v axis in 3D
    pub v_axis: Vector3<f32>,
    /// Occupied cell centers in 3D, row-major
    pub occupied_centers: Vec<Vector3<f32>>,
}

impl GridPlane {
    /// Build a transport message for this grid.
    pub fn to_message(&self) -> OccupancyGridMessage {
        let frame = self.frame();
        OccupancyGridMessage {
            coefficients: self.coefficients().to_array(),
            resolution: self.resolution(),
            rows: self.rows(),
            cols: self.cols(),
            origin: self.origin(),
            frame_origin: frame.origin(),
            u_axis: frame.u_axis(),
            v_axis: frame.v_axis(),
            occupied_centers: self.occupied_centers(),
        }
    }
}

impl From<&GridPlane> for OccupancyGridMessage {
    fn from(grid: &GridPlane) -> Self {
        grid.to_message()
    }
}
