//! Modeling configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Polygon and rasterization settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelingSection {
    /// Outward hull margin (meters, <= 0 disables)
    #[serde(default = "defaults::magnify_distance")]
    pub magnify_distance: f32,

    /// Grid cell size (meters)
    #[serde(default = "defaults::resolution")]
    pub resolution: f32,

    /// Maximum point-to-plane distance for rasterized points (meters)
    #[serde(default = "defaults::distance_threshold")]
    pub distance_threshold: f32,
}

impl Default for ModelingSection {
    fn default() -> Self {
        Self {
            magnify_distance: 0.2,
            resolution: 0.01,
            distance_threshold: 0.01,
        }
    }
}
