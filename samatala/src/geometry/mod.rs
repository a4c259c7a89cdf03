//! Convex polygon reconstruction and offsetting on detected planes.
//!
//! ## Pipeline
//!
//! ```text
//!   cluster indices + plane coefficients + cloud
//!                     │ build_convex_polygon()
//!                     ▼
//!   ┌──────────────────────────────────────┐
//!   │ project to PlaneFrame → monotone     │
//!   │ chain hull (CCW, strictly convex) →  │
//!   │ unproject hull vertices              │
//!   └──────────────────┬───────────────────┘
//!                      │ magnify(distance)
//!                      ▼
//!   ┌──────────────────────────────────────┐
//!   │ shift every edge outward, intersect  │
//!   │ neighbouring shifted edges           │
//!   └──────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`ConvexPolygon`]: Plane-embedded, CCW, strictly convex polygon
//! - [`build_convex_polygon`]: Cluster → polygon
//! - [`magnify`]: Outward offset by a safety margin
//! - [`hull`]: 2D hull and convex predicates

pub mod hull;
mod magnify;
mod polygon;

pub use magnify::magnify;
pub use polygon::{ConvexPolygon, MIN_CLUSTER_POINTS, build_convex_polygon};
