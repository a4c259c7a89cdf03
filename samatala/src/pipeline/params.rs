//! Modeling parameters and the shared, reconfigurable holder.
//!
//! A frame never reads [`SharedParams`] directly: it takes one
//! [`snapshot`](SharedParams::snapshot) when it starts and uses that copy
//! throughout, so an update landing mid-frame only affects the next frame.

use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{ModelingError, Result};
use crate::grid::{BOUNDARY_EPS, RasterOptions};

/// Parameters for one frame of plane modeling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelingParams {
    /// Outward margin added to every hull (meters). `<= 0` disables.
    pub magnify_distance: f32,
    /// Grid cell edge length (meters).
    pub resolution: f32,
    /// Maximum point-to-plane distance for rasterized points (meters).
    /// `0` disables the filter.
    pub distance_threshold: f32,
    /// Per-axis cell limit for a single grid.
    pub max_cells_per_axis: usize,
    /// Dilation steps applied to every grid after rasterization.
    pub dilate_iterations: usize,
    /// Erosion steps applied after dilation.
    pub erode_iterations: usize,
    /// Process clusters on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ModelingParams {
    fn default() -> Self {
        Self {
            magnify_distance: 0.2,
            resolution: 0.01,
            distance_threshold: 0.01,
            max_cells_per_axis: 4096,
            dilate_iterations: 0,
            erode_iterations: 0,
            parallel: true,
        }
    }
}

impl ModelingParams {
    /// Check that every value is usable.
    ///
    /// - `resolution` must be positive and finite (`InvalidResolution`)
    /// - `magnify_distance` must not be NaN or infinite
    /// - `distance_threshold` must be non-negative and not NaN
    /// - `max_cells_per_axis` must be at least 1
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(ModelingError::InvalidResolution(self.resolution));
        }
        if !self.magnify_distance.is_finite() {
            return Err(ModelingError::InvalidParameter(format!(
                "magnify_distance must be finite, got {}",
                self.magnify_distance
            )));
        }
        if self.distance_threshold.is_nan() || self.distance_threshold < 0.0 {
            return Err(ModelingError::InvalidParameter(format!(
                "distance_threshold must be >= 0, got {}",
                self.distance_threshold
            )));
        }
        if self.max_cells_per_axis == 0 {
            return Err(ModelingError::InvalidParameter(
                "max_cells_per_axis must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Rasterizer options derived from these parameters.
    pub fn raster_options(&self) -> RasterOptions {
        RasterOptions {
            distance_threshold: self.distance_threshold,
            max_cells_per_axis: self.max_cells_per_axis,
            boundary_tolerance: BOUNDARY_EPS,
        }
    }

    /// Whether a morphology pass runs after rasterization.
    pub fn has_morphology(&self) -> bool {
        self.dilate_iterations > 0 || self.erode_iterations > 0
    }

    /// Set the grid resolution.
    pub fn with_resolution(mut self, resolution: f32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the magnify distance.
    pub fn with_magnify_distance(mut self, distance: f32) -> Self {
        self.magnify_distance = distance;
        self
    }

    /// Set the plane-distance threshold.
    pub fn with_distance_threshold(mut self, threshold: f32) -> Self {
        self.distance_threshold = threshold;
        self
    }

    /// Enable or disable parallel cluster processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Thread-safe parameter holder shared between the processing loop and
/// whatever reconfigures it.
#[derive(Clone, Debug, Default)]
pub struct SharedParams {
    inner: Arc<RwLock<ModelingParams>>,
}

impl SharedParams {
    /// Wrap initial parameters.
    pub fn new(params: ModelingParams) -> Self {
        Self {
            inner: Arc::new(RwLock::new(params)),
        }
    }

    /// Copy of the current parameters.
    pub fn snapshot(&self) -> ModelingParams {
        self.inner.read().clone()
    }

    /// Validate and replace the parameters.
    ///
    /// Invalid parameters are rejected and the previous values stay active.
    pub fn update(&self, params: ModelingParams) -> Result<()> {
        params.validate()?;
        debug!("Updating modeling parameters: {params:?}");
        *self.inner.write() = params;
        Ok(())
    }
}
