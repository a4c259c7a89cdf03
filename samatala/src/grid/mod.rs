//! Per-plane occupancy grids.
//!
//! A [`GridPlane`] is laid over the bounding box of one (magnified) convex
//! polygon, in that polygon's plane-local coordinates. Cloud points that lie
//! on the plane and inside the polygon mark their cell occupied.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐
//! │  ConvexPolygon   │   │    PointCloud    │
//! │  (magnified)     │   │  (whole frame)   │
//! └────────┬─────────┘   └────────┬─────────┘
//!          │                      │
//!          └──────────┬───────────┘
//!                     ▼
//!          ┌─────────────────────┐
//!          │     rasterize       │  plane-distance reject
//!          │                     │  bbox pre-filter
//!          │                     │  closed point-in-polygon
//!          └──────────┬──────────┘
//!                     ▼
//!          ┌─────────────────────┐     ┌─────────────────────┐
//!          │     GridPlane       │ ──► │ OccupancyGridMessage│
//!          │  (SoA states +      │     │  (serde snapshot)   │
//!          │   support counts)   │     └─────────────────────┘
//!          └─────────────────────┘
//!                     │
//!                     ▼
//!            dilate / erode (optional)
//! ```
//!
//! ## Key Components
//!
//! - [`GridPlane`]: cell storage, plane ↔ cell mapping, occupancy queries
//! - [`rasterize`]: fill a grid from a point cloud
//! - [`RasterOptions`]: plane-distance threshold and size limits
//! - [`OccupancyGridMessage`]: serializable export
//!
//! ## Cell Mapping
//!
//! ```text
//! row = floor((v - v_min) / resolution)
//! col = floor((u - u_min) / resolution)
//! ```
//!
//! Points on the far edge of the bounding box are clamped into the last
//! row/column.

pub mod config;
mod export;
mod morphology;
mod rasterize;
pub mod storage;

pub use config::{BOUNDARY_EPS, RasterOptions};
pub use export::OccupancyGridMessage;
pub use rasterize::{RasterStats, rasterize, rasterize_with_stats};
pub use storage::{CellCounts, CellIndex, CellState, GridPlane};
