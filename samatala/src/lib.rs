//! # Samatala
//!
//! Planar surface modeling for clustered point clouds.
//!
//! ## Overview
//!
//! Upstream segmentation hands over a point cloud, the points belonging to
//! each detected plane, and the `[a, b, c, d]` coefficients of that plane.
//! For every plane Samatala produces two things:
//!
//! - **Magnified polygon** - the convex hull of the cluster on its plane,
//!   pushed outward by a fixed margin
//! - **Grid plane** - a 2D occupancy grid laid over that polygon, with a
//!   cell marked occupied when a cloud point lying on the plane falls in it
//!
//! ```text
//!   cloud + clusters + coefficients
//!               │
//!               ▼
//!      ┌─────────────────┐    ┌───────────┐    ┌─────────────┐
//!      │ convex hull     │───►│ magnify   │───►│ rasterize   │───► GridPlane
//!      │ on the plane    │    │ by margin │    │ whole cloud │
//!      └─────────────────┘    └───────────┘    └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use samatala::{FrameInput, ModelingParams, PointCloud, process_frame};
//!
//! let cloud = PointCloud::from_positions(&positions);
//! let input = FrameInput::new(cloud, vec![vec![0.0, 0.0, 1.0, 0.0]], vec![indices]);
//! let output = process_frame(&input, &ModelingParams::default());
//!
//! for (cluster, polygon, grid) in output.surfaces() {
//!     println!("cluster {cluster}: {} vertices, {} occupied", polygon.len(), grid.occupied_count());
//! }
//! ```
//!
//! ## Coordinate System
//!
//! Every plane gets an orthonormal frame `(origin, u, v, n)` with `n` the
//! unit normal. Polygons and grids live in plane-local `(u, v)` metres;
//! grid rows run along `v` and columns along `u`.

#![warn(missing_docs)]

// Core types
pub mod core;

// Error types
pub mod error;

// Convex hulls and polygon offsetting
pub mod geometry;

// Grid storage and rasterization
pub mod grid;

// Per-frame driver
pub mod pipeline;

// Unified configuration
pub mod config;

// Frame files and SVG export
pub mod io;

use parking_lot::Mutex;

// Re-export commonly used types
pub use config::{ConfigLoadError, SamatalaConfig};
pub use core::{CloudPoint, PlaneCoefficients, PlaneFrame, PlanePoint, PointCloud};
pub use error::{ModelingError, Result};
pub use geometry::{ConvexPolygon, build_convex_polygon, magnify};
pub use grid::{CellState, GridPlane, OccupancyGridMessage, RasterOptions, rasterize};
pub use pipeline::{
    FrameInput, FrameOutput, FrameReport, HealthStatus, ModelingParams, PipelineDiagnostics,
    SharedParams, process_frame,
};

/// Long-lived plane modeler.
///
/// Holds reconfigurable parameters and cumulative diagnostics. Each frame
/// takes a snapshot of the parameters when it starts, so a concurrent
/// [`update_params`](Self::update_params) never changes a frame midway.
pub struct PlaneModeler {
    params: SharedParams,
    diagnostics: Mutex<PipelineDiagnostics>,
}

impl PlaneModeler {
    /// Create a modeler, rejecting unusable parameters.
    pub fn new(params: ModelingParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params: SharedParams::new(params),
            diagnostics: Mutex::new(PipelineDiagnostics::new()),
        })
    }

    /// Create a modeler from loaded configuration.
    pub fn from_config(config: &SamatalaConfig) -> std::result::Result<Self, ConfigLoadError> {
        let params = config.to_validated_params()?;
        Self::new(params).map_err(|e| ConfigLoadError::Invalid(e.to_string()))
    }

    /// Process one frame with the current parameters.
    pub fn process(&self, input: &FrameInput) -> FrameOutput {
        let params = self.params.snapshot();
        let output = process_frame(input, &params);
        self.diagnostics.lock().record(&output.report);
        output
    }

    /// Replace the parameters used by subsequent frames.
    ///
    /// Invalid parameters are rejected and the previous ones stay active.
    pub fn update_params(&self, params: ModelingParams) -> Result<()> {
        self.params.update(params)
    }

    /// Current parameters.
    pub fn params(&self) -> ModelingParams {
        self.params.snapshot()
    }

    /// Handle for reconfiguring from another thread.
    pub fn shared_params(&self) -> SharedParams {
        self.params.clone()
    }

    /// Copy of the cumulative diagnostics.
    pub fn diagnostics(&self) -> PipelineDiagnostics {
        self.diagnostics.lock().clone()
    }

    /// Health of the most recent frame.
    pub fn health(&self) -> HealthStatus {
        self.diagnostics.lock().health()
    }

    /// Clear the cumulative diagnostics.
    pub fn reset_diagnostics(&self) {
        *self.diagnostics.lock() = PipelineDiagnostics::new();
    }
}

impl Default for PlaneModeler {
    fn default() -> Self {
        Self {
            params: SharedParams::default(),
            diagnostics: Mutex::new(PipelineDiagnostics::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn square_frame() -> FrameInput {
        let cloud = PointCloud::from_positions(&[
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.5, 0.5, 0.0),
        ]);
        FrameInput::new(cloud, vec![vec![0.0, 0.0, 1.0, 0.0]], vec![vec![0, 1, 2, 3, 4]])
    }

    fn params() -> ModelingParams {
        ModelingParams::default()
            .with_magnify_distance(0.1)
            .with_resolution(0.5)
    }

    #[test]
    fn test_modeler_creation() {
        let modeler = PlaneModeler::new(params()).unwrap();
        assert_eq!(modeler.params(), params());
        assert_eq!(modeler.health(), HealthStatus::Ok);
        assert_eq!(modeler.diagnostics().frames_processed, 0);

        assert!(PlaneModeler::new(params().with_resolution(-1.0)).is_err());
    }

    #[test]
    fn test_process_records_diagnostics() {
        let modeler = PlaneModeler::new(params()).unwrap();
        let output = modeler.process(&square_frame());
        assert_eq!(output.len(), 1);

        let diag = modeler.diagnostics();
        assert_eq!(diag.frames_processed, 1);
        assert_eq!(diag.surfaces_out, 1);
        assert_eq!(modeler.health(), HealthStatus::Ok);

        modeler.reset_diagnostics();
        assert_eq!(modeler.diagnostics().frames_processed, 0);
    }

    #[test]
    fn test_update_params() {
        let modeler = PlaneModeler::new(params()).unwrap();
        modeler.update_params(params().with_resolution(0.25)).unwrap();
        let output = modeler.process(&square_frame());
        assert_eq!((output.grids[0].rows(), output.grids[0].cols()), (5, 5));

        assert!(modeler.update_params(params().with_resolution(0.0)).is_err());
        assert_eq!(modeler.params().resolution, 0.25);
    }

    #[test]
    fn test_shared_params_handle() {
        let modeler = PlaneModeler::new(params()).unwrap();
        let handle = modeler.shared_params();
        std::thread::spawn(move || handle.update(params().with_magnify_distance(0.3)))
            .join()
            .unwrap()
            .unwrap();
        assert_eq!(modeler.params().magnify_distance, 0.3);
    }

    #[test]
    fn test_from_config() {
        let mut config = SamatalaConfig::default();
        config.modeling.resolution = 0.05;
        let modeler = PlaneModeler::from_config(&config).unwrap();
        assert_eq!(modeler.params().resolution, 0.05);

        config.modeling.resolution = 0.0;
        assert!(matches!(
            PlaneModeler::from_config(&config),
            Err(ConfigLoadError::Invalid(_))
        ));
    }

    #[test]
    fn test_health_follows_last_frame() {
        let modeler = PlaneModeler::new(params()).unwrap();

        let mut degraded = square_frame();
        degraded.coefficients.push(vec![0.0, 0.0, 1.0, 0.0]);
        degraded.clusters.push(vec![0, 1]);
        modeler.process(&degraded);
        assert_eq!(modeler.health(), HealthStatus::Degraded);

        let mut fatal = square_frame();
        fatal.coefficients.clear();
        modeler.process(&fatal);
        assert_eq!(modeler.health(), HealthStatus::Error);

        modeler.process(&square_frame());
        assert_eq!(modeler.health(), HealthStatus::Ok);
        assert_eq!(modeler.diagnostics().fatal_frames, 1);
    }
}
