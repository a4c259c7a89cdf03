//! Convex polygons embedded on a plane, and their construction from
//! clustered cloud points.

use nalgebra::Vector3;
use serde::Serialize;

use super::hull::{self, convex_hull, is_strictly_convex};
use crate::core::{PlaneBounds, PlaneCoefficients, PlaneFrame, PlanePoint, PointCloud};
use crate::error::{ModelingError, Result};

/// Minimum number of points needed to span a polygon.
pub const MIN_CLUSTER_POINTS: usize = 3;

/// Convex polygon lying on a plane.
///
/// Vertices are stored both in 3D and in the plane frame's 2D
/// coordinates. Winding is counter-clockwise when viewed from the side the
/// plane normal points to, and the polygon is strictly convex (no
/// collinear or repeated vertices).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConvexPolygon {
    frame: PlaneFrame,
    vertices_2d: Vec<PlanePoint>,
    vertices: Vec<Vector3<f32>>,
}

impl ConvexPolygon {
    /// Create a polygon from plane-local vertices.
    ///
    /// The vertices must already be counter-clockwise and strictly convex;
    /// anything else fails with [`ModelingError::DegenerateHull`].
    pub fn new(frame: PlaneFrame, vertices_2d: Vec<PlanePoint>) -> Result<Self> {
        if !is_strictly_convex(&vertices_2d) {
            return Err(ModelingError::DegenerateHull);
        }
        Ok(Self::from_valid_vertices(frame, vertices_2d))
    }

    /// Caller guarantees the vertices are CCW and strictly convex.
    pub(crate) fn from_valid_vertices(frame: PlaneFrame, vertices_2d: Vec<PlanePoint>) -> Self {
        let vertices = vertices_2d.iter().map(|p| frame.unproject(*p)).collect();
        Self {
            frame,
            vertices_2d,
            vertices,
        }
    }

    /// Convex hull of arbitrary 3D points, projected onto the frame's plane.
    pub fn from_points<'a>(
        frame: PlaneFrame,
        points: impl IntoIterator<Item = &'a Vector3<f32>>,
    ) -> Result<Self> {
        let projected = frame.project_all(points);
        let hull = convex_hull(&projected);
        if hull.len() < 3 || hull::signed_area(&hull) <= 0.0 {
            return Err(ModelingError::DegenerateHull);
        }
        Self::new(frame, hull)
    }

    /// Plane frame the polygon is embedded in.
    #[inline]
    pub fn frame(&self) -> &PlaneFrame {
        &self.frame
    }

    /// Plane coefficients.
    #[inline]
    pub fn coefficients(&self) -> &PlaneCoefficients {
        self.frame.coefficients()
    }

    /// 3D vertices (CCW about the normal).
    #[inline]
    pub fn vertices(&self) -> &[Vector3<f32>] {
        &self.vertices
    }

    /// Plane-local vertices (CCW).
    #[inline]
    pub fn vertices_2d(&self) -> &[PlanePoint] {
        &self.vertices_2d
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices_2d.len()
    }

    /// Always false for a constructed polygon.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices_2d.is_empty()
    }

    /// Enclosed area.
    pub fn area(&self) -> f32 {
        hull::signed_area(&self.vertices_2d)
    }

    /// Boundary length.
    pub fn perimeter(&self) -> f32 {
        self.edges_2d().map(|(a, b)| a.distance(&b)).sum()
    }

    /// Area centroid in 3D.
    pub fn centroid(&self) -> Vector3<f32> {
        self.frame.unproject(hull::centroid(&self.vertices_2d))
    }

    /// Plane-local bounding box.
    pub fn bounds_2d(&self) -> PlaneBounds {
        PlaneBounds::from_points(&self.vertices_2d)
    }

    /// Edges as `(start, end)` pairs, closing back to the first vertex.
    pub fn edges_2d(&self) -> impl Iterator<Item = (PlanePoint, PlanePoint)> + '_ {
        let n = self.vertices_2d.len();
        (0..n).map(move |i| (self.vertices_2d[i], self.vertices_2d[(i + 1) % n]))
    }

    /// Closed containment test for a plane-local point.
    #[inline]
    pub fn contains_2d(&self, point: PlanePoint, tolerance: f32) -> bool {
        hull::contains_convex(&self.vertices_2d, point, tolerance)
    }

    /// Containment test for a 3D point, using its projection onto the plane.
    pub fn contains_projected(&self, point: &Vector3<f32>, tolerance: f32) -> bool {
        self.contains_2d(self.frame.project(point), tolerance)
    }

    /// Distance from a plane-local point to the polygon boundary.
    pub fn boundary_distance_2d(&self, point: PlanePoint) -> f32 {
        self.edges_2d()
            .map(|(a, b)| hull::distance_to_segment(point, a, b))
            .fold(f32::INFINITY, f32::min)
    }

    /// Outward offset by `distance` (no-op for `distance <= 0`).
    pub fn magnify(&self, distance: f32) -> Result<ConvexPolygon> {
        super::magnify::magnify(self, distance)
    }
}

/// Build the convex polygon supported by one cluster of the cloud.
///
/// 1. Clusters with fewer than 3 indices fail with `InsufficientPoints`.
/// 2. Indices past the end of the cloud fail with `IndexOutOfRange`.
/// 3. Indexed points are projected into the plane frame and hulled.
/// 4. Fewer than 3 hull vertices or zero area fail with `DegenerateHull`.
pub fn build_convex_polygon(
    cloud: &PointCloud,
    indices: &[usize],
    coefficients: &PlaneCoefficients,
) -> Result<ConvexPolygon> {
    if indices.len() < MIN_CLUSTER_POINTS {
        return Err(ModelingError::InsufficientPoints {
            count: indices.len(),
        });
    }

    let frame = PlaneFrame::new(*coefficients);
    let mut projected = Vec::with_capacity(indices.len());
    for &index in indices {
        let point = cloud.get(index).ok_or(ModelingError::IndexOutOfRange {
            index,
            len: cloud.len(),
        })?;
        projected.push(frame.project(&point.position));
    }

    let hull = convex_hull(&projected);
    if hull.len() < 3 || hull::signed_area(&hull) <= 0.0 {
        return Err(ModelingError::DegenerateHull);
    }

    ConvexPolygon::new(frame, hull)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn z_plane() -> PlaneCoefficients {
        PlaneCoefficients::from_array([0.0, 0.0, 1.0, 0.0]).unwrap()
    }

    fn square_with_center() -> PointCloud {
        PointCloud::from_positions(&[
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.5, 0.5, 0.0),
        ])
    }

    #[test]
    fn test_square_with_center() {
        let cloud = square_with_center();
        let polygon = build_convex_polygon(&cloud, &[0, 1, 2, 3, 4], &z_plane()).unwrap();

        assert_eq!(polygon.len(), 4);
        assert_relative_eq!(polygon.area(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(polygon.perimeter(), 4.0, epsilon = 1e-6);
        // Center point is interior and not a vertex
        let center = Vector3::new(0.5, 0.5, 0.0);
        assert!(polygon.vertices().iter().all(|v| (v - center).norm() > 0.1));
        assert_relative_eq!(polygon.centroid(), center, epsilon = 1e-6);
    }

    #[test]
    fn test_triangle() {
        let cloud = square_with_center();
        let polygon = build_convex_polygon(&cloud, &[0, 1, 3], &z_plane()).unwrap();
        assert_eq!(polygon.len(), 3);
        assert_relative_eq!(polygon.area(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_insufficient_points() {
        let cloud = square_with_center();
        assert_eq!(
            build_convex_polygon(&cloud, &[0, 1], &z_plane()),
            Err(ModelingError::InsufficientPoints { count: 2 })
        );
        assert_eq!(
            build_convex_polygon(&cloud, &[], &z_plane()),
            Err(ModelingError::InsufficientPoints { count: 0 })
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let cloud = square_with_center();
        assert_eq!(
            build_convex_polygon(&cloud, &[0, 1, 9], &z_plane()),
            Err(ModelingError::IndexOutOfRange { index: 9, len: 5 })
        );
    }

    #[test]
    fn test_collinear_cluster() {
        let cloud = PointCloud::from_positions(&[
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(2.0, 2.0, 0.0),
            Vector3::new(3.0, 3.0, 0.0),
        ]);
        assert_eq!(
            build_convex_polygon(&cloud, &[0, 1, 2, 3], &z_plane()),
            Err(ModelingError::DegenerateHull)
        );
    }

    #[test]
    fn test_vertices_on_plane() {
        // Tilted plane x + y + z = 1, points slightly off the plane
        let coeffs = PlaneCoefficients::from_array([1.0, 1.0, 1.0, -1.0]).unwrap();
        let cloud = PointCloud::from_positions(&[
            Vector3::new(1.0, 0.0, 0.01),
            Vector3::new(0.0, 1.0, -0.01),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.34, 0.33, 0.33),
        ]);
        let polygon = build_convex_polygon(&cloud, &[0, 1, 2, 3], &coeffs).unwrap();
        for v in polygon.vertices() {
            assert_relative_eq!(coeffs.distance(v), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_winding_ccw_about_normal() {
        let cloud = square_with_center();
        let polygon = build_convex_polygon(&cloud, &[0, 1, 2, 3], &z_plane()).unwrap();
        let v = polygon.vertices();
        // (v1 - v0) × (v2 - v1) points along +n for CCW
        let turn = (v[1] - v[0]).cross(&(v[2] - v[1]));
        assert!(turn.dot(&polygon.coefficients().normal()) > 0.0);
    }

    #[test]
    fn test_contains_projected() {
        let cloud = square_with_center();
        let polygon = build_convex_polygon(&cloud, &[0, 1, 2, 3], &z_plane()).unwrap();
        assert!(polygon.contains_projected(&Vector3::new(0.5, 0.5, 2.0), 0.0));
        assert!(polygon.contains_projected(&Vector3::new(1.0, 0.5, 0.0), 0.0));
        assert!(!polygon.contains_projected(&Vector3::new(1.5, 0.5, 0.0), 0.0));
    }

    #[test]
    fn test_new_rejects_clockwise() {
        let frame = PlaneFrame::new(z_plane());
        let cw = vec![
            PlanePoint::new(0.0, 0.0),
            PlanePoint::new(0.0, 1.0),
            PlanePoint::new(1.0, 1.0),
            PlanePoint::new(1.0, 0.0),
        ];
        assert_eq!(
            ConvexPolygon::new(frame, cw),
            Err(ModelingError::DegenerateHull)
        );
    }
}
