//! Outward offsetting (planar Minkowski expansion with mitered corners).
//!
//! Every edge's supporting line is pushed outward by the margin. For a
//! convex polygon the offset half-planes intersect in a polygon whose
//! vertex `i` is where the shifted lines of edges `i-1` and `i` meet:
//!
//! ```text
//!   v'ᵢ = vᵢ + d · (oᵢ₋₁ + oᵢ) / (1 + oᵢ₋₁·oᵢ)
//! ```
//!
//! with `oₖ` the unit outward normal of edge `k`. For a CCW polygon the
//! outward normal is the edge direction rotated by -90°.

use log::debug;

use super::hull::{self, is_strictly_convex};
use super::polygon::ConvexPolygon;
use crate::core::PlanePoint;
use crate::error::{ModelingError, Result};

/// Adjacent edges whose normals are this close to opposite cannot be
/// mitered.
const MITER_DENOM_EPS: f32 = 1e-6;

/// Offset a convex polygon outward by `distance`.
///
/// `distance <= 0` returns an unchanged copy. The result keeps the plane,
/// frame and winding of the input. Non-finite or non-convex results fail
/// with [`ModelingError::CollapsedPolygon`].
pub fn magnify(polygon: &ConvexPolygon, distance: f32) -> Result<ConvexPolygon> {
    if distance <= 0.0 || distance.is_nan() {
        if distance < 0.0 {
            debug!("Negative magnify distance {distance} treated as no-op");
        }
        return Ok(polygon.clone());
    }
    if !distance.is_finite() {
        return Err(ModelingError::CollapsedPolygon);
    }

    let src = polygon.vertices_2d();
    let n = src.len();
    let normals = outward_normals(src).ok_or(ModelingError::CollapsedPolygon)?;

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = normals[(i + n - 1) % n];
        let next = normals[i];
        let denom = 1.0 + prev.dot(&next);
        if denom < MITER_DENOM_EPS {
            return Err(ModelingError::CollapsedPolygon);
        }
        let vertex = src[i] + (prev + next) * (distance / denom);
        if !vertex.is_finite() {
            return Err(ModelingError::CollapsedPolygon);
        }
        out.push(vertex);
    }

    // Outward offset never shrinks; allow for rounding on tiny margins
    let min_area = polygon.area() * (1.0 - 1e-5);
    if !is_strictly_convex(&out) || hull::signed_area(&out) < min_area {
        return Err(ModelingError::CollapsedPolygon);
    }

    Ok(ConvexPolygon::from_valid_vertices(*polygon.frame(), out))
}

/// Unit outward normal of each edge `i → i+1`; `None` for zero-length edges.
fn outward_normals(vertices: &[PlanePoint]) -> Option<Vec<PlanePoint>> {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let edge = vertices[(i + 1) % n] - vertices[i];
            let len = edge.length();
            (len > f32::EPSILON).then(|| edge.perp_cw() * (1.0 / len))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlaneCoefficients, PlaneFrame};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn polygon(frame: PlaneFrame, pts: &[(f32, f32)]) -> ConvexPolygon {
        let vertices = pts.iter().map(|&(u, v)| PlanePoint::new(u, v)).collect();
        ConvexPolygon::new(frame, vertices).unwrap()
    }

    fn z_frame() -> PlaneFrame {
        PlaneFrame::new(PlaneCoefficients::from_array([0.0, 0.0, 1.0, 0.0]).unwrap())
    }

    fn unit_square() -> ConvexPolygon {
        polygon(z_frame(), &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_square_offset() {
        let grown = magnify(&unit_square(), 0.1).unwrap();
        let expected = [(-0.1, -0.1), (1.1, -0.1), (1.1, 1.1), (-0.1, 1.1)];

        assert_eq!(grown.len(), 4);
        for (v, (eu, ev)) in grown.vertices_2d().iter().zip(expected) {
            assert_relative_eq!(v.u, eu, epsilon = 1e-6);
            assert_relative_eq!(v.v, ev, epsilon = 1e-6);
        }
        assert_relative_eq!(grown.area(), 1.44, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_distance_is_identity() {
        let square = unit_square();
        assert_eq!(magnify(&square, 0.0).unwrap(), square);
    }

    #[test]
    fn test_negative_distance_is_identity() {
        let square = unit_square();
        assert_eq!(magnify(&square, -0.5).unwrap(), square);
    }

    #[test]
    fn test_vertices_at_least_margin_from_original_edges() {
        let tri = polygon(z_frame(), &[(0.0, 0.0), (4.0, 0.0), (1.0, 2.0)]);
        let margin = 0.25;
        let grown = magnify(&tri, margin).unwrap();

        for v in grown.vertices_2d() {
            assert!(!tri.contains_2d(*v, 0.0));
            assert!(tri.boundary_distance_2d(*v) >= margin - 1e-5);
        }
        assert!(grown.area() > tri.area());
    }

    #[test]
    fn test_original_contained_in_result() {
        let hex: Vec<(f32, f32)> = (0..6)
            .map(|i| {
                let a = i as f32 * std::f32::consts::PI / 3.0;
                (a.cos(), a.sin())
            })
            .collect();
        let poly = polygon(z_frame(), &hex);
        let grown = magnify(&poly, 0.3).unwrap();

        for v in poly.vertices_2d() {
            assert!(grown.contains_2d(*v, 0.0));
            assert!(grown.boundary_distance_2d(*v) >= 0.3 - 1e-5);
        }
    }

    #[test]
    fn test_keeps_plane_embedding() {
        let frame =
            PlaneFrame::from_coefficients(Vector3::new(0.2, -0.4, 0.9), -0.6).unwrap();
        let poly = polygon(frame, &[(0.0, 0.0), (1.0, 0.0), (0.5, 0.8)]);
        let grown = magnify(&poly, 0.05).unwrap();

        assert_eq!(grown.frame(), poly.frame());
        for v in grown.vertices() {
            assert_relative_eq!(grown.coefficients().distance(v), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_infinite_distance_collapses() {
        assert_eq!(
            magnify(&unit_square(), f32::INFINITY),
            Err(ModelingError::CollapsedPolygon)
        );
    }
}
