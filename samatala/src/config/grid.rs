//! Grid configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Grid size limits and post-processing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Maximum rows or columns per grid
    #[serde(default = "defaults::max_cells_per_axis")]
    pub max_cells_per_axis: usize,

    /// Dilation steps after rasterization
    #[serde(default)]
    pub dilate_iterations: usize,

    /// Erosion steps after dilation
    #[serde(default)]
    pub erode_iterations: usize,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            max_cells_per_axis: 4096,
            dilate_iterations: 0,
            erode_iterations: 0,
        }
    }
}
