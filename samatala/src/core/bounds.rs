//! Axis-aligned bounding box in plane-local coordinates.
//!
//! [`PlaneBounds`] is used to size occupancy grids and as a cheap
//! pre-filter before the exact point-in-polygon test.
//!
//! ```rust
//! use samatala::core::{PlaneBounds, PlanePoint};
//!
//! let mut bounds = PlaneBounds::empty();
//! bounds.expand_to_include(PlanePoint::new(1.0, 1.0));
//! bounds.expand_to_include(PlanePoint::new(-2.0, 3.0));
//! assert_eq!(bounds.width(), 3.0);
//! assert_eq!(bounds.height(), 2.0);
//! ```

use serde::{Deserialize, Serialize};

use super::point::PlanePoint;

/// Axis-aligned bounding box on a plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaneBounds {
    /// Minimum corner (smallest u and v values).
    pub min: PlanePoint,
    /// Maximum corner (largest u and v values).
    pub max: PlanePoint,
}

impl PlaneBounds {
    /// Create a new bounding box from min and max corners.
    #[inline]
    pub const fn new(min: PlanePoint, max: PlanePoint) -> Self {
        Self { min, max }
    }

    /// Create an empty (invalid) bounding box.
    ///
    /// The empty bounds has min > max, so it will expand to fit any point.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: PlanePoint::new(f32::INFINITY, f32::INFINITY),
            max: PlanePoint::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Smallest bounds containing all points (empty for no points).
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a PlanePoint>) -> Self {
        let mut bounds = Self::empty();
        for p in points {
            bounds.expand_to_include(*p);
        }
        bounds
    }

    /// Check if the bounds are empty (invalid).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.u > self.max.u || self.min.v > self.max.v
    }

    /// Width of the bounding box (u extent).
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.u - self.min.u
    }

    /// Height of the bounding box (v extent).
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.v - self.min.v
    }

    /// Center of the bounding box.
    #[inline]
    pub fn center(&self) -> PlanePoint {
        PlanePoint::new(
            (self.min.u + self.max.u) * 0.5,
            (self.min.v + self.max.v) * 0.5,
        )
    }

    /// Check if a point is inside the bounding box (closed).
    #[inline]
    pub fn contains(&self, point: PlanePoint) -> bool {
        point.u >= self.min.u
            && point.u <= self.max.u
            && point.v >= self.min.v
            && point.v <= self.max.v
    }

    /// Expand bounds to include a point.
    #[inline]
    pub fn expand_to_include(&mut self, point: PlanePoint) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Expand bounds by a margin on all sides.
    #[inline]
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min: PlanePoint::new(self.min.u - margin, self.min.v - margin),
            max: PlanePoint::new(self.max.u + margin, self.max.v + margin),
        }
    }

    /// Get corners of the bounding box in CCW order.
    #[inline]
    pub fn corners(&self) -> [PlanePoint; 4] {
        [
            self.min,
            PlanePoint::new(self.max.u, self.min.v),
            self.max,
            PlanePoint::new(self.min.u, self.max.v),
        ]
    }
}
