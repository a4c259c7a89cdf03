//! Point types: plane-local 2D coordinates and 3D cloud points.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Plane-local coordinates (signed distances along the frame's u/v axes)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanePoint {
    /// Coordinate along the frame's u axis
    pub u: f32,
    /// Coordinate along the frame's v axis
    pub v: f32,
}

impl PlanePoint {
    /// Create a new plane point
    #[inline]
    pub fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    /// Zero point (plane origin)
    pub const ZERO: PlanePoint = PlanePoint { u: 0.0, v: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &PlanePoint) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &PlanePoint) -> f32 {
        let du = self.u - other.u;
        let dv = self.v - other.v;
        du * du + dv * dv
    }

    /// Length (magnitude) of this point as a vector from origin
    #[inline]
    pub fn length(&self) -> f32 {
        (self.u * self.u + self.v * self.v).sqrt()
    }

    /// Dot product with another point (as vectors)
    #[inline]
    pub fn dot(&self, other: &PlanePoint) -> f32 {
        self.u * other.u + self.v * other.v
    }

    /// Cross product (z-component of 3D cross product)
    #[inline]
    pub fn cross(&self, other: &PlanePoint) -> f32 {
        self.u * other.v - self.v * other.u
    }

    /// Rotate by -90°. For an edge of a CCW polygon this points outward.
    #[inline]
    pub fn perp_cw(&self) -> PlanePoint {
        PlanePoint::new(self.v, -self.u)
    }

    /// Component-wise minimum
    #[inline]
    pub fn min(&self, other: PlanePoint) -> PlanePoint {
        PlanePoint::new(self.u.min(other.u), self.v.min(other.v))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max(&self, other: PlanePoint) -> PlanePoint {
        PlanePoint::new(self.u.max(other.u), self.v.max(other.v))
    }

    /// Both coordinates are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.u.is_finite() && self.v.is_finite()
    }
}

impl Add for PlanePoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        PlanePoint::new(self.u + other.u, self.v + other.v)
    }
}

impl Sub for PlanePoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        PlanePoint::new(self.u - other.u, self.v - other.v)
    }
}

impl Mul<f32> for PlanePoint {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        PlanePoint::new(self.u * scalar, self.v * scalar)
    }
}

/// A single point of the input cloud.
///
/// The surface normal is carried through untouched; the modeling core
/// only reads `position`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloudPoint {
    /// Position in the sensor frame (meters)
    pub position: Vector3<f32>,
    /// Optional estimated surface normal
    #[serde(default)]
    pub normal: Option<Vector3<f32>>,
}

impl CloudPoint {
    /// Create a point without a normal
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            normal: None,
        }
    }

    /// Create a point with a surface normal
    #[inline]
    pub fn with_normal(position: Vector3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            position,
            normal: Some(normal),
        }
    }

    /// Whether all position components are finite (NaN marks invalid
    /// returns in organized clouds)
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
    }
}

impl From<Vector3<f32>> for CloudPoint {
    fn from(position: Vector3<f32>) -> Self {
        Self {
            position,
            normal: None,
        }
    }
}

/// Ordered point cloud shared read-only by every cluster of a frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointCloud {
    points: Vec<CloudPoint>,
}

impl PointCloud {
    /// Create an empty cloud
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cloud from points
    pub fn from_points(points: Vec<CloudPoint>) -> Self {
        Self { points }
    }

    /// Create a cloud from bare positions
    pub fn from_positions(positions: &[Vector3<f32>]) -> Self {
        Self {
            points: positions.iter().copied().map(CloudPoint::from).collect(),
        }
    }

    /// Number of points
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is the cloud empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&CloudPoint> {
        self.points.get(index)
    }

    /// All points
    #[inline]
    pub fn points(&self) -> &[CloudPoint] {
        &self.points
    }

    /// Iterate over point positions
    pub fn positions(&self) -> impl Iterator<Item = &Vector3<f32>> + '_ {
        self.points.iter().map(|p| &p.position)
    }

    /// Append a point
    pub fn push(&mut self, point: CloudPoint) {
        self.points.push(point);
    }
}

impl FromIterator<CloudPoint> for PointCloud {
    fn from_iter<I: IntoIterator<Item = CloudPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_point_distance() {
        let a = PlanePoint::new(0.0, 0.0);
        let b = PlanePoint::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_plane_point_cross() {
        let east = PlanePoint::new(1.0, 0.0);
        let north = PlanePoint::new(0.0, 1.0);
        assert_eq!(east.cross(&north), 1.0);
        assert_eq!(north.cross(&east), -1.0);
    }

    #[test]
    fn test_perp_cw_points_outward_for_ccw_edge() {
        // Bottom edge of a CCW unit square runs +u; outward is -v
        let edge = PlanePoint::new(1.0, 0.0);
        assert_eq!(edge.perp_cw(), PlanePoint::new(0.0, -1.0));
    }

    #[test]
    fn test_cloud_from_positions() {
        let cloud = PointCloud::from_positions(&[
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        ]);
        assert_eq!(cloud.len(), 2);
        assert!(cloud.get(1).is_some());
        assert!(cloud.get(2).is_none());
        assert!(cloud.get(0).is_some_and(|p| p.normal.is_none()));
    }

    #[test]
    fn test_cloud_point_finite() {
        assert!(CloudPoint::new(1.0, 2.0, 3.0).is_finite());
        assert!(!CloudPoint::new(f32::NAN, 2.0, 3.0).is_finite());
    }
}
