//! Configuration types for grid rasterization.

use serde::{Deserialize, Serialize};

/// Default points farther than this from the plane are ignored (meters).
pub const DEFAULT_DISTANCE_THRESHOLD: f32 = 0.01;

/// Default per-axis cell limit.
pub const DEFAULT_MAX_CELLS_PER_AXIS: usize = 4096;

/// Slack for the closed point-in-polygon test, so points sitting exactly on
/// an edge are not lost to rounding (meters).
pub const BOUNDARY_EPS: f32 = 1e-5;

/// Options for [`rasterize`](super::rasterize).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RasterOptions {
    /// Maximum point-to-plane distance for a point to count (meters).
    /// Non-positive or infinite values disable the check.
    pub distance_threshold: f32,

    /// Maximum rows or columns a single grid may have.
    pub max_cells_per_axis: usize,

    /// Boundary tolerance for the point-in-polygon test (meters).
    pub boundary_tolerance: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            max_cells_per_axis: DEFAULT_MAX_CELLS_PER_AXIS,
            boundary_tolerance: BOUNDARY_EPS,
        }
    }
}

impl RasterOptions {
    /// Options that accept every point regardless of its plane distance.
    pub fn unfiltered() -> Self {
        Self {
            distance_threshold: 0.0,
            ..Self::default()
        }
    }

    /// Whether the plane-distance filter is active.
    #[inline]
    pub fn filters_by_distance(&self) -> bool {
        self.distance_threshold > 0.0 && self.distance_threshold.is_finite()
    }
}
