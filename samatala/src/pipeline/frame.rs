//! Per-frame input and output types.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::diagnostics::{FailureCounts, HealthStatus};
use crate::core::PointCloud;
use crate::error::ModelingError;
use crate::geometry::ConvexPolygon;
use crate::grid::{GridPlane, OccupancyGridMessage, RasterStats};

/// Everything one frame of plane modeling needs.
///
/// `coefficients[i]` and `clusters[i]` describe the same plane. The
/// reference `polygons` are optional and only used for debug comparison.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Frame identifier (sensor frame name, file stem, ...)
    #[serde(default)]
    pub frame_id: String,
    /// Acquisition time in seconds
    #[serde(default)]
    pub stamp: f64,
    /// Shared point cloud
    pub cloud: PointCloud,
    /// Reference boundary per cluster (may be empty)
    #[serde(default)]
    pub polygons: Vec<Vec<Vector3<f32>>>,
    /// Raw `[a, b, c, d]` per cluster
    pub coefficients: Vec<Vec<f32>>,
    /// Point indices per cluster
    pub clusters: Vec<Vec<usize>>,
}

impl FrameInput {
    /// Create an input without reference polygons.
    pub fn new(cloud: PointCloud, coefficients: Vec<Vec<f32>>, clusters: Vec<Vec<usize>>) -> Self {
        Self {
            cloud,
            coefficients,
            clusters,
            ..Self::default()
        }
    }

    /// Attach reference boundaries.
    pub fn with_reference_polygons(mut self, polygons: Vec<Vec<Vector3<f32>>>) -> Self {
        self.polygons = polygons;
        self
    }

    /// Set the frame identifier and stamp.
    pub fn with_header(mut self, frame_id: impl Into<String>, stamp: f64) -> Self {
        self.frame_id = frame_id.into();
        self.stamp = stamp;
        self
    }

    /// Number of clusters.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Reference boundary for a cluster, if one with at least 3 points was
    /// supplied.
    pub fn reference_polygon(&self, cluster: usize) -> Option<&[Vector3<f32>]> {
        self.polygons
            .get(cluster)
            .filter(|p| p.len() >= 3)
            .map(Vec::as_slice)
    }
}

/// Outcome of one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Clusters in the input
    pub clusters_in: usize,
    /// Surfaces produced
    pub surfaces_out: usize,
    /// Dropped clusters by failure kind
    pub failures: FailureCounts,
    /// Frame-fatal error, if the frame aborted
    pub fatal: Option<ModelingError>,
    /// Point statistics summed over all grids
    pub raster: RasterStats,
    /// `(cluster, reconstructed / reference area)` for clusters with a
    /// reference polygon
    pub reference_area_ratios: Vec<(usize, f32)>,
    /// Wall time for the frame (milliseconds)
    pub elapsed_ms: f32,
}

impl FrameReport {
    /// Health of this frame on its own.
    pub fn health(&self) -> HealthStatus {
        if self.fatal.is_some() {
            HealthStatus::Error
        } else if self.failures.total() > 0 {
            HealthStatus::Degraded
        } else {
            HealthStatus::Ok
        }
    }
}

/// Surfaces produced for one frame.
///
/// `magnified_polygons[k]` and `grids[k]` describe the same surface, built
/// from input cluster `source_clusters[k]`. Surfaces appear in input
/// cluster order.
#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    /// Identifier copied from the input
    pub frame_id: String,
    /// Stamp copied from the input
    pub stamp: f64,
    /// Magnified convex polygon per surface
    pub magnified_polygons: Vec<ConvexPolygon>,
    /// Occupancy grid per surface
    pub grids: Vec<GridPlane>,
    /// Input cluster index per surface
    pub source_clusters: Vec<usize>,
    /// What happened
    pub report: FrameReport,
}

impl FrameOutput {
    /// Output for an aborted frame: no surfaces, the error in the report.
    pub fn fatal(input: &FrameInput, error: ModelingError) -> Self {
        Self {
            frame_id: input.frame_id.clone(),
            stamp: input.stamp,
            report: FrameReport {
                clusters_in: input.cluster_count(),
                fatal: Some(error),
                ..FrameReport::default()
            },
            ..Self::default()
        }
    }

    /// Number of surfaces.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// True when no surface was produced.
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// `(cluster, polygon, grid)` per surface.
    pub fn surfaces(&self) -> impl Iterator<Item = (usize, &ConvexPolygon, &GridPlane)> + '_ {
        self.source_clusters
            .iter()
            .zip(&self.magnified_polygons)
            .zip(&self.grids)
            .map(|((&c, p), g)| (c, p, g))
    }

    /// Transport messages for every grid.
    pub fn grid_messages(&self) -> Vec<OccupancyGridMessage> {
        self.grids.iter().map(GridPlane::to_message).collect()
    }
}
