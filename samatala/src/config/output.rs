//! Output configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Debug output settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Directory for SVG renders
    #[serde(default = "defaults::output_dir")]
    pub svg_dir: String,

    /// Write an SVG per processed frame
    #[serde(default)]
    pub write_svg: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            svg_dir: "./output".to_string(),
            write_svg: false,
        }
    }
}
