//! Plane models and plane-local coordinate frames.
//!
//! A plane is stored as a unit normal `n` and offset `d` with
//! `n·x + d = 0`. [`PlaneFrame`] adds a deterministic orthonormal tangent
//! basis `(u, v)` so points can be moved between 3D and plane-local 2D:
//!
//! ```text
//!            n (normal)
//!            ▲
//!            │   v = n × u
//!            │  ╱
//!            │ ╱
//!   origin ──●──────► u  (world axis least aligned with n,
//!        (= -d·n)         orthogonalized against n)
//! ```
//!
//! The basis depends only on the normal, so grids built from the same
//! plane are aligned identically across frames.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::point::PlanePoint;
use crate::error::{ModelingError, Result};

/// Normals shorter than this are rejected as degenerate.
pub const NORMAL_EPS: f32 = 1e-6;

/// Plane model `n·x + d = 0` with a unit normal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneCoefficients {
    normal: Vector3<f32>,
    offset: f32,
}

impl PlaneCoefficients {
    /// Create plane coefficients, normalizing the normal.
    ///
    /// The offset is divided by the same norm so the plane itself is
    /// unchanged. Fails with [`ModelingError::DegeneratePlane`] when the
    /// normal has near-zero (or non-finite) magnitude.
    pub fn new(normal: Vector3<f32>, offset: f32) -> Result<Self> {
        let norm = normal.norm();
        if !norm.is_finite() || !offset.is_finite() || norm < NORMAL_EPS {
            return Err(ModelingError::DegeneratePlane);
        }
        Ok(Self {
            normal: normal / norm,
            offset: offset / norm,
        })
    }

    /// Create from `[a, b, c, d]`.
    pub fn from_array(coefficients: [f32; 4]) -> Result<Self> {
        let [a, b, c, d] = coefficients;
        Self::new(Vector3::new(a, b, c), d)
    }

    /// Create from a raw coefficient slice as delivered upstream.
    ///
    /// Slices that are not exactly 4 long fail with
    /// [`ModelingError::InvalidCoefficients`].
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        match values {
            [a, b, c, d] => Self::from_array([*a, *b, *c, *d]),
            _ => Err(ModelingError::InvalidCoefficients { len: values.len() }),
        }
    }

    /// Unit normal.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Offset `d` (signed distance of the world origin along `-n`).
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Coefficients as `[a, b, c, d]` with a unit normal.
    pub fn to_array(&self) -> [f32; 4] {
        [self.normal.x, self.normal.y, self.normal.z, self.offset]
    }

    /// Signed distance of a point from the plane (positive on the normal side).
    #[inline]
    pub fn signed_distance(&self, point: &Vector3<f32>) -> f32 {
        self.normal.dot(point) + self.offset
    }

    /// Absolute distance of a point from the plane.
    #[inline]
    pub fn distance(&self, point: &Vector3<f32>) -> f32 {
        self.signed_distance(point).abs()
    }

    /// Orthogonal projection of a point onto the plane.
    #[inline]
    pub fn project_point(&self, point: &Vector3<f32>) -> Vector3<f32> {
        point - self.normal * self.signed_distance(point)
    }
}

/// Orthonormal 2D basis embedded on a plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneFrame {
    coefficients: PlaneCoefficients,
    origin: Vector3<f32>,
    u_axis: Vector3<f32>,
    v_axis: Vector3<f32>,
}

impl PlaneFrame {
    /// Build the frame for validated plane coefficients.
    pub fn new(coefficients: PlaneCoefficients) -> Self {
        let n = coefficients.normal();
        let seed = least_aligned_axis(&n);
        let u_axis = (seed - n * n.dot(&seed)).normalize();
        let v_axis = n.cross(&u_axis);

        Self {
            coefficients,
            origin: -n * coefficients.offset(),
            u_axis,
            v_axis,
        }
    }

    /// Build the frame directly from a normal and offset.
    pub fn from_coefficients(normal: Vector3<f32>, offset: f32) -> Result<Self> {
        Ok(Self::new(PlaneCoefficients::new(normal, offset)?))
    }

    /// Plane coefficients the frame was built from.
    #[inline]
    pub fn coefficients(&self) -> &PlaneCoefficients {
        &self.coefficients
    }

    /// Unit normal.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.coefficients.normal()
    }

    /// Frame origin: projection of the world origin onto the plane.
    #[inline]
    pub fn origin(&self) -> Vector3<f32> {
        self.origin
    }

    /// First tangent axis.
    #[inline]
    pub fn u_axis(&self) -> Vector3<f32> {
        self.u_axis
    }

    /// Second tangent axis (`n × u`).
    #[inline]
    pub fn v_axis(&self) -> Vector3<f32> {
        self.v_axis
    }

    /// Project a 3D point into plane-local coordinates.
    ///
    /// The normal component is discarded, so off-plane points land on
    /// their orthogonal foot.
    #[inline]
    pub fn project(&self, point: &Vector3<f32>) -> PlanePoint {
        let rel = point - self.origin;
        PlanePoint::new(rel.dot(&self.u_axis), rel.dot(&self.v_axis))
    }

    /// Map plane-local coordinates back to a 3D point on the plane.
    #[inline]
    pub fn unproject(&self, point: PlanePoint) -> Vector3<f32> {
        self.origin + self.u_axis * point.u + self.v_axis * point.v
    }

    /// Project a batch of points.
    pub fn project_all<'a>(
        &self,
        points: impl IntoIterator<Item = &'a Vector3<f32>>,
    ) -> Vec<PlanePoint> {
        points.into_iter().map(|p| self.project(p)).collect()
    }
}

/// World axis with the smallest absolute component in `n`.
/// Ties resolve to x, then y, then z.
fn least_aligned_axis(n: &Vector3<f32>) -> Vector3<f32> {
    let (ax, ay, az) = (n.x.abs(), n.y.abs(), n.z.abs());
    if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    }
}
