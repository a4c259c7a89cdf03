//! Point cloud rasterization onto a polygon's plane grid.
//!
//! Every cloud point is tested against one polygon:
//! - points farther than the plane-distance threshold are rejected
//! - survivors are projected into the plane frame
//! - a bounding-box test rejects most outsiders cheaply
//! - the closed point-in-polygon test decides the rest
//!
//! Accepted points mark their cell occupied and bump its support count.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::PointCloud;
use crate::error::Result;
use crate::geometry::ConvexPolygon;
use crate::grid::config::RasterOptions;
use crate::grid::storage::GridPlane;

/// Per-grid point statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterStats {
    /// Points that landed in a cell
    pub accepted: usize,
    /// Points with NaN or infinite coordinates
    pub rejected_invalid: usize,
    /// Points too far from the plane
    pub rejected_off_plane: usize,
    /// Points outside the polygon's bounding box
    pub rejected_bounds: usize,
    /// Points inside the bounding box but outside the polygon
    pub rejected_outside: usize,
}

impl RasterStats {
    /// Merge another result into this one
    pub fn merge(&mut self, other: &RasterStats) {
        self.accepted += other.accepted;
        self.rejected_invalid += other.rejected_invalid;
        self.rejected_off_plane += other.rejected_off_plane;
        self.rejected_bounds += other.rejected_bounds;
        self.rejected_outside += other.rejected_outside;
    }

    /// Total points examined
    pub fn total(&self) -> usize {
        self.accepted
            + self.rejected_invalid
            + self.rejected_off_plane
            + self.rejected_bounds
            + self.rejected_outside
    }
}

/// Rasterize the cloud points supporting `polygon` into a new grid.
///
/// See [`rasterize_with_stats`].
pub fn rasterize(
    polygon: &ConvexPolygon,
    cloud: &PointCloud,
    resolution: f32,
    options: &RasterOptions,
) -> Result<GridPlane> {
    rasterize_with_stats(polygon, cloud, resolution, options).map(|(grid, _)| grid)
}

/// Rasterize and also report how many points were accepted or rejected.
///
/// Fails with `InvalidResolution` or `GridTooLarge` before touching the
/// cloud.
pub fn rasterize_with_stats(
    polygon: &ConvexPolygon,
    cloud: &PointCloud,
    resolution: f32,
    options: &RasterOptions,
) -> Result<(GridPlane, RasterStats)> {
    let mut grid = GridPlane::new(polygon.clone(), resolution, options.max_cells_per_axis)?;
    let mut stats = RasterStats::default();

    let frame = polygon.frame();
    let coefficients = polygon.coefficients();
    let tolerance = options.boundary_tolerance.max(0.0);
    let bounds = polygon.bounds_2d().expand(tolerance);
    let filter = options.filters_by_distance();

    for point in cloud.points() {
        if !point.is_finite() {
            stats.rejected_invalid += 1;
            continue;
        }
        if filter && coefficients.distance(&point.position) > options.distance_threshold {
            stats.rejected_off_plane += 1;
            continue;
        }

        let local = frame.project(&point.position);
        if !bounds.contains(local) {
            stats.rejected_bounds += 1;
            continue;
        }
        if !polygon.contains_2d(local, tolerance) {
            stats.rejected_outside += 1;
            continue;
        }

        grid.add_support(grid.clamped_cell(local));
        stats.accepted += 1;
    }

    trace!(
        "Rasterized {}x{} grid: {} accepted, {} off-plane, {} outside",
        grid.rows(),
        grid.cols(),
        stats.accepted,
        stats.rejected_off_plane,
        stats.rejected_bounds + stats.rejected_outside
    );

    Ok((grid, stats))
}
