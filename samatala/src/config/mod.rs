//! Unified configuration loading for Samatala.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use samatala::config::SamatalaConfig;
//!
//! // Load from default path (configs/config.yaml)
//! let config = SamatalaConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = SamatalaConfig::default();
//!
//! // Convert to pipeline parameters
//! let params = config.to_validated_params()?;
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`ModelingSection`] | Magnify distance, resolution, plane-distance threshold |
//! | [`GridSection`] | Per-axis size limit, dilate/erode iterations |
//! | [`RuntimeSection`] | Parallel cluster processing |
//! | [`OutputSection`] | SVG debug output |
//!
//! ## Example YAML
//!
//! ```yaml
//! modeling:
//!   magnify_distance: 0.2     # 20cm margin around each hull
//!   resolution: 0.01          # 1cm cells
//!   distance_threshold: 0.01  # ignore points >1cm off the plane
//!
//! grid:
//!   max_cells_per_axis: 4096
//!   dilate_iterations: 0
//!   erode_iterations: 0
//!
//! runtime:
//!   parallel: true
//!
//! output:
//!   svg_dir: ./output
//!   write_svg: false
//! ```

mod defaults;
mod error;
mod grid;
mod modeling;
mod output;
mod runtime;
mod samatala;

// Re-export main types
pub use error::ConfigLoadError;
pub use samatala::{DEFAULT_CONFIG_PATH, SamatalaConfig};

// Re-export section types
pub use grid::GridSection;
pub use modeling::ModelingSection;
pub use output::OutputSection;
pub use runtime::RuntimeSection;
