//! Frame files and debug export.
//!
//! This module provides load/save and visualization helpers around the
//! pipeline:
//!
//! - **Frame files**: one [`FrameInput`](crate::pipeline::FrameInput) as YAML
//! - **SVG export**: per-surface panels with grid cells and polygon outline
//!
//! ## Loading Frames
//!
//! ```rust,ignore
//! use samatala::io::load_frame;
//! use std::path::Path;
//!
//! let frame = load_frame(Path::new("data/square_frame.yaml"))?;
//! ```
//!
//! ## SVG Visualization
//!
//! ```rust,ignore
//! use samatala::io::{SvgConfig, SvgVisualizer};
//!
//! let output = samatala::process_frame(&frame, &params);
//! SvgVisualizer::new(SvgConfig::default())
//!     .with_title(&output.frame_id)
//!     .with_frame(&output)
//!     .save(Path::new("frame.svg"))?;
//! ```

pub mod frame_file;
pub mod svg;

pub use frame_file::{FrameLoadError, frame_from_yaml, frame_to_yaml, load_frame, save_frame};
pub use svg::{SvgColorScheme, SvgConfig, SvgVisualizer, render_frame};
