//! Core types for the Samatala library.
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`PlanePoint`]: Plane-local 2D coordinates `(u, v)`
//! - [`PlaneBounds`]: Axis-aligned bounds in plane-local coordinates
//!
//! ### Point Clouds
//! - [`CloudPoint`]: 3D position with an optional surface normal
//! - [`PointCloud`]: Ordered, read-only cloud shared by all clusters of a frame
//!
//! ### Planes
//! - [`PlaneCoefficients`]: Unit normal + offset (`n·x + d = 0`)
//! - [`PlaneFrame`]: Deterministic tangent basis for 3D ↔ 2D conversion
//!
//! ## Example
//!
//! ```rust
//! use nalgebra::Vector3;
//! use samatala::core::{PlaneFrame, PlanePoint};
//!
//! // Table top at z = 0.75
//! let frame = PlaneFrame::from_coefficients(Vector3::new(0.0, 0.0, 1.0), -0.75).unwrap();
//!
//! let local = frame.project(&Vector3::new(0.2, 0.4, 0.75));
//! let world = frame.unproject(local);
//! assert!((world - Vector3::new(0.2, 0.4, 0.75)).norm() < 1e-5);
//! ```

mod bounds;
mod plane;
mod point;

pub use bounds::PlaneBounds;
pub use plane::{NORMAL_EPS, PlaneCoefficients, PlaneFrame};
pub use point::{CloudPoint, PlanePoint, PointCloud};
