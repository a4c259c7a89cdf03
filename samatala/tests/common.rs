//! Test utilities for Samatala.
//!
//! This module provides helpers for building clouds, clusters and frames.

#![allow(dead_code)]

use nalgebra::{Unit, UnitQuaternion, Vector3};
use rand::{SeedableRng, rngs::StdRng};
use samatala::{FrameInput, ModelingParams, PlaneCoefficients, PointCloud};

/// Corners of the unit square plus its center, on z = 0.
pub fn unit_square_with_center() -> Vec<Vector3<f32>> {
    vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.5, 0.5, 0.0),
    ]
}

/// The canonical unit-square frame: one cluster over all five points.
pub fn unit_square_frame() -> FrameInput {
    FrameInput::new(
        PointCloud::from_positions(&unit_square_with_center()),
        vec![vec![0.0, 0.0, 1.0, 0.0]],
        vec![vec![0, 1, 2, 3, 4]],
    )
    .with_header("unit_square", 0.0)
}

/// Parameters used by the unit-square scenario.
pub fn scenario_params() -> ModelingParams {
    ModelingParams::default()
        .with_magnify_distance(0.1)
        .with_resolution(0.5)
}

/// Regular `n × n` lattice spanning `[0, size]²` on z = `height`.
pub fn lattice(n: usize, size: f32, height: f32) -> Vec<Vector3<f32>> {
    let step = size / (n - 1).max(1) as f32;
    let mut points = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            points.push(Vector3::new(i as f32 * step, j as f32 * step, height));
        }
    }
    points
}

/// Rotation taking +Z to `normal`.
pub fn rotation_to(normal: Vector3<f32>) -> UnitQuaternion<f32> {
    UnitQuaternion::rotation_between(&Vector3::z(), &normal).unwrap_or_else(|| {
        UnitQuaternion::from_axis_angle(&Unit::new_normalize(Vector3::x()), std::f32::consts::PI)
    })
}

/// Place z = 0 points onto the plane with the given unit normal through
/// `anchor`, returning the points and the plane's `[a, b, c, d]`.
pub fn tilt_onto_plane(
    points: &[Vector3<f32>],
    normal: Vector3<f32>,
    anchor: Vector3<f32>,
) -> (Vec<Vector3<f32>>, Vec<f32>) {
    let normal = normal.normalize();
    let rotation = rotation_to(normal);
    let moved = points.iter().map(|p| rotation * p + anchor).collect();
    let d = -normal.dot(&anchor);
    (moved, vec![normal.x, normal.y, normal.z, d])
}

/// Plane coefficients from raw values, panicking on invalid input.
pub fn plane(values: [f32; 4]) -> PlaneCoefficients {
    PlaneCoefficients::from_array(values).unwrap()
}

/// A set of non-axis-aligned unit normals.
pub fn test_normals() -> Vec<Vector3<f32>> {
    vec![
        Vector3::z(),
        -Vector3::z(),
        Vector3::x(),
        Vector3::y(),
        Vector3::new(1.0, 1.0, 1.0).normalize(),
        Vector3::new(0.3, -0.8, 0.2).normalize(),
        Vector3::new(-0.05, 0.02, 0.99).normalize(),
    ]
}

/// Seeded generator so scattered-point tests are reproducible.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
