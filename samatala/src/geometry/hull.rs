//! 2D convex hull and convex-polygon predicates in plane-local coordinates.
//!
//! All polygons here are counter-clockwise and strictly convex: collinear
//! and duplicate points are dropped during the hull sweep.

use std::cmp::Ordering;

use crate::core::{PlaneBounds, PlanePoint};
use crate::grid::BOUNDARY_EPS;

/// Relative tolerance for collinearity, scaled by the extent of the input
/// so it behaves the same for table tops and floors.
pub const COLLINEAR_TOLERANCE: f32 = 1e-6;

/// Upper bound on the collinearity distance. A vertex dropped as collinear
/// stays this close to the hull, well inside [`BOUNDARY_EPS`].
const MAX_COLLINEAR_DISTANCE: f32 = 0.1 * BOUNDARY_EPS;

/// Orientation of `c` relative to the directed line `a → b`
/// (positive = left turn).
#[inline]
pub fn orientation(a: PlanePoint, b: PlanePoint, c: PlanePoint) -> f32 {
    (b - a).cross(&(c - a))
}

/// How far `b` bulges out of the chord `a → c`, positive when
/// `a → b → c` turns left.
///
/// Zero when `a` and `c` coincide.
#[inline]
pub fn turn_distance(a: PlanePoint, b: PlanePoint, c: PlanePoint) -> f32 {
    let chord = (c - a).length();
    if chord <= f32::MIN_POSITIVE {
        return 0.0;
    }
    orientation(a, b, c) / chord
}

/// Collinearity distance for a point set.
pub fn collinear_tolerance(points: &[PlanePoint]) -> f32 {
    let bounds = PlaneBounds::from_points(points);
    if bounds.is_empty() {
        return 0.0;
    }
    let scale = bounds.width().max(bounds.height());
    (COLLINEAR_TOLERANCE * scale).min(MAX_COLLINEAR_DISTANCE)
}

/// Convex hull using Andrew's monotone chain.
///
/// Returns hull vertices in counter-clockwise order starting from the
/// lexicographically smallest point. Points that are collinear with a hull
/// edge (within tolerance) or duplicated are discarded, so the result is
/// strictly convex. Inputs with fewer than 3 distinct non-collinear points
/// produce fewer than 3 vertices.
pub fn convex_hull(points: &[PlanePoint]) -> Vec<PlanePoint> {
    let mut sorted: Vec<PlanePoint> = points.iter().copied().filter(|p| p.is_finite()).collect();
    if sorted.len() < 3 {
        sorted.dedup();
        return sorted;
    }
    sorted.sort_by(|a, b| match a.u.total_cmp(&b.u) {
        Ordering::Equal => a.v.total_cmp(&b.v),
        ord => ord,
    });

    let tol = collinear_tolerance(&sorted);
    let mut hull: Vec<PlanePoint> = Vec::with_capacity(sorted.len() + 1);

    // Lower chain
    for &p in &sorted {
        while hull.len() >= 2
            && turn_distance(hull[hull.len() - 2], hull[hull.len() - 1], p) <= tol
        {
            hull.pop();
        }
        hull.push(p);
    }

    // Upper chain
    let lower_len = hull.len() + 1;
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && turn_distance(hull[hull.len() - 2], hull[hull.len() - 1], p) <= tol
        {
            hull.pop();
        }
        hull.push(p);
    }

    // Last point repeats the first
    hull.pop();
    hull
}

/// Signed area (shoelace). Positive for counter-clockwise polygons.
pub fn signed_area(polygon: &[PlanePoint]) -> f32 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let twice: f32 = polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(a, b)| a.cross(b))
        .sum();
    twice * 0.5
}

/// Area centroid of a simple polygon (vertex mean for degenerate input).
pub fn centroid(polygon: &[PlanePoint]) -> PlanePoint {
    let area = signed_area(polygon);
    if area.abs() <= f32::EPSILON {
        let n = polygon.len().max(1) as f32;
        let sum = polygon.iter().fold(PlanePoint::ZERO, |acc, p| acc + *p);
        return sum * (1.0 / n);
    }
    let mut cu = 0.0;
    let mut cv = 0.0;
    for (a, b) in polygon.iter().zip(polygon.iter().cycle().skip(1)) {
        let w = a.cross(b);
        cu += (a.u + b.u) * w;
        cv += (a.v + b.v) * w;
    }
    let k = 1.0 / (6.0 * area);
    PlanePoint::new(cu * k, cv * k)
}

/// Whether the polygon is counter-clockwise and strictly convex
/// (every vertex sits left of the chord joining its neighbours by more
/// than the collinearity distance, no repeated vertices).
pub fn is_strictly_convex(polygon: &[PlanePoint]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let tol = collinear_tolerance(polygon);
    (0..n).all(|i| {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let c = polygon[(i + 2) % n];
        a.is_finite() && turn_distance(a, b, c) > tol
    }) && signed_area(polygon) > 0.0
}

/// Closed point-in-convex-polygon test.
///
/// `tolerance` is a distance: points up to `tolerance` outside an edge
/// still count as inside, and points exactly on the boundary are inside.
pub fn contains_convex(polygon: &[PlanePoint], point: PlanePoint, tolerance: f32) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let edge = b - a;
        let len = edge.length();
        // Signed distance of the point to the left of the edge
        edge.cross(&(point - a)) >= -tolerance * len
    })
}

/// Distance from a point to the segment `a → b`.
pub fn distance_to_segment(point: PlanePoint, a: PlanePoint, b: PlanePoint) -> f32 {
    let ab = b - a;
    let len_sq = ab.dot(&ab);
    if len_sq <= f32::EPSILON {
        return point.distance(&a);
    }
    let t = ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    point.distance(&(a + ab * t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(u: f32, v: f32) -> PlanePoint {
        PlanePoint::new(u, v)
    }

    fn unit_square() -> Vec<PlanePoint> {
        vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
    }

    #[test]
    fn test_hull_drops_interior_point() {
        let mut pts = unit_square();
        pts.push(p(0.5, 0.5));
        let hull = convex_hull(&pts);

        assert_eq!(hull, unit_square());
    }

    #[test]
    fn test_hull_is_ccw() {
        let pts = vec![p(1.0, 1.0), p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0)];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert!(signed_area(&hull) > 0.0);
        assert!(is_strictly_convex(&hull));
    }

    #[test]
    fn test_hull_drops_collinear_edge_points() {
        let pts = vec![
            p(0.0, 0.0),
            p(0.5, 0.0),
            p(1.0, 0.0),
            p(1.0, 0.5),
            p(1.0, 1.0),
            p(0.0, 1.0),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
    }

    #[test]
    fn test_hull_duplicates() {
        let pts = vec![
            p(0.0, 0.0),
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 0.0),
            p(1.0, 1.0),
            p(1.0, 1.0),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull, vec![p(0.0, 0.0), p(2.0, 0.0), p(1.0, 1.0)]);
    }

    #[test]
    fn test_hull_collinear_input() {
        let pts = vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0)];
        let hull = convex_hull(&pts);
        assert!(hull.len() < 3);
    }

    #[test]
    fn test_hull_idempotent() {
        let pts: Vec<PlanePoint> = (0..40)
            .map(|i| {
                let a = i as f32 * 0.37;
                let r = 1.0 + 0.3 * (i as f32 * 1.3).sin();
                p(r * a.cos(), r * a.sin())
            })
            .collect();
        let hull = convex_hull(&pts);
        assert_eq!(convex_hull(&hull), hull);
    }

    #[test]
    fn test_signed_area() {
        assert_relative_eq!(signed_area(&unit_square()), 1.0);
        let mut cw = unit_square();
        cw.reverse();
        assert_relative_eq!(signed_area(&cw), -1.0);
    }

    #[test]
    fn test_centroid() {
        let c = centroid(&unit_square());
        assert_relative_eq!(c.u, 0.5, epsilon = 1e-6);
        assert_relative_eq!(c.v, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_contains_closed_boundary() {
        let sq = unit_square();
        assert!(contains_convex(&sq, p(0.5, 0.5), 0.0));
        assert!(contains_convex(&sq, p(0.0, 0.5), 0.0)); // Edge
        assert!(contains_convex(&sq, p(1.0, 1.0), 0.0)); // Vertex
        assert!(!contains_convex(&sq, p(1.01, 0.5), 0.0));
        assert!(contains_convex(&sq, p(1.01, 0.5), 0.02));
    }

    #[test]
    fn test_strict_convexity_rejects_collinear_vertex() {
        let pts = vec![p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0), p(0.5, 1.0)];
        assert!(!is_strictly_convex(&pts));
    }

    #[test]
    fn test_turn_distance_is_length_normalised() {
        // Same angle, chord ten times shorter
        assert_relative_eq!(turn_distance(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)), -1.0);
        assert_relative_eq!(
            turn_distance(p(0.0, 0.0), p(0.1, 0.1), p(0.2, 0.0)),
            -0.1,
            epsilon = 1e-6
        );
        assert_relative_eq!(turn_distance(p(0.0, 0.0), p(1.0, -1.0), p(2.0, 0.0)), 1.0);
        assert_eq!(turn_distance(p(1.0, 1.0), p(2.0, 0.0), p(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_hull_keeps_dense_arc() {
        let n = 2000;
        let pts: Vec<PlanePoint> = (0..n)
            .map(|i| {
                let a = i as f32 / n as f32 * std::f32::consts::TAU;
                p(a.cos(), a.sin())
            })
            .collect();
        let hull = convex_hull(&pts);

        assert!(is_strictly_convex(&hull));
        for q in &pts {
            assert!(contains_convex(&hull, *q, BOUNDARY_EPS), "{q:?} outside hull");
        }
    }

    #[test]
    fn test_distance_to_segment() {
        let d = distance_to_segment(p(0.5, 1.0), p(0.0, 0.0), p(1.0, 0.0));
        assert_relative_eq!(d, 1.0);
        let d = distance_to_segment(p(2.0, 0.0), p(0.0, 0.0), p(1.0, 0.0));
        assert_relative_eq!(d, 1.0);
    }
}
