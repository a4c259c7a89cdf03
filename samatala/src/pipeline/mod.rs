//! Per-frame processing pipeline.
//!
//! ## Flow
//!
//! ```text
//!  FrameInput ──► frame-fatal checks ──► per cluster (rayon) ──► FrameOutput
//!                 │                      │
//!                 │ params.validate()    │ build_convex_polygon
//!                 │ coefficient count    │ magnify
//!                 │ coefficient shape    │ rasterize
//!                 │ degenerate normals   │ dilate / erode
//!                 ▼                      ▼
//!           empty output +         failed clusters counted,
//!           report.fatal           survivors kept in input order
//! ```
//!
//! ## Key Components
//!
//! - [`process_frame`]: run one frame with explicit parameters
//! - [`ModelingParams`] / [`SharedParams`]: parameters and the
//!   reconfigurable holder frames snapshot from
//! - [`FrameInput`] / [`FrameOutput`] / [`FrameReport`]: data in and out
//! - [`PipelineDiagnostics`]: failure counts and timing across frames

mod diagnostics;
mod driver;
mod frame;
mod params;

pub use diagnostics::{FailureCounts, FailureKind, HealthStatus, PipelineDiagnostics};
pub use driver::process_frame;
pub use frame::{FrameInput, FrameOutput, FrameReport};
pub use params::{ModelingParams, SharedParams};
