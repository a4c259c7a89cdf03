//! Frame driver: build → magnify → rasterize for every cluster.

use std::time::Instant;

use log::{debug, error};
use rayon::prelude::*;

use super::frame::{FrameInput, FrameOutput, FrameReport};
use super::params::ModelingParams;
use crate::core::{PlaneCoefficients, PlaneFrame, PointCloud};
use crate::error::{ModelingError, Result};
use crate::geometry::{ConvexPolygon, build_convex_polygon};
use crate::grid::{GridPlane, RasterOptions, RasterStats, rasterize_with_stats};

/// Everything produced for one successful cluster.
struct ClusterSurface {
    hull_area: f32,
    magnified: ConvexPolygon,
    grid: GridPlane,
    stats: RasterStats,
}

/// Process one frame.
///
/// Never panics and never returns an error: frame-fatal problems (invalid
/// parameters, mismatched or malformed coefficients) produce an empty
/// output with `report.fatal` set, and cluster-scoped problems drop just
/// that cluster and count it in `report.failures`.
pub fn process_frame(input: &FrameInput, params: &ModelingParams) -> FrameOutput {
    let start = Instant::now();
    log_input_summary(input);

    let mut output = match validate_frame(input, params) {
        Ok(planes) => run_clusters(input, params, &planes),
        Err(err) => {
            error!("Frame '{}' aborted: {err}", input.frame_id);
            FrameOutput::fatal(input, err)
        }
    };

    output.report.elapsed_ms = start.elapsed().as_secs_f32() * 1000.0;
    debug!(
        "Frame '{}': {}/{} surfaces, failures: {}, {:.2}ms",
        output.frame_id,
        output.report.surfaces_out,
        output.report.clusters_in,
        output.report.failures.summary(),
        output.report.elapsed_ms
    );
    output
}

/// Frame-fatal checks. Returns the validated plane per cluster.
fn validate_frame(input: &FrameInput, params: &ModelingParams) -> Result<Vec<PlaneCoefficients>> {
    params.validate()?;

    if input.coefficients.len() != input.clusters.len() {
        return Err(ModelingError::ClusterCountMismatch {
            coefficients: input.coefficients.len(),
            clusters: input.clusters.len(),
        });
    }

    input
        .coefficients
        .iter()
        .map(|c| PlaneCoefficients::from_slice(c))
        .collect()
}

fn run_clusters(
    input: &FrameInput,
    params: &ModelingParams,
    planes: &[PlaneCoefficients],
) -> FrameOutput {
    let options = params.raster_options();
    let cloud = &input.cloud;

    let process =
        |i: usize| process_cluster(cloud, &input.clusters[i], &planes[i], params, &options);

    // Indexed parallel collect keeps input order
    let results: Vec<Result<ClusterSurface>> = if params.parallel {
        (0..planes.len()).into_par_iter().map(process).collect()
    } else {
        (0..planes.len()).map(process).collect()
    };

    let mut output = FrameOutput {
        frame_id: input.frame_id.clone(),
        stamp: input.stamp,
        report: FrameReport {
            clusters_in: planes.len(),
            ..FrameReport::default()
        },
        ..FrameOutput::default()
    };

    for (cluster, result) in results.into_iter().enumerate() {
        match result {
            Ok(surface) => {
                let ratio =
                    reference_area_ratio(input, cluster, &planes[cluster], surface.hull_area);
                if let Some(ratio) = ratio {
                    debug!("Cluster {cluster}: hull/reference area ratio {ratio:.3}");
                    output.report.reference_area_ratios.push((cluster, ratio));
                }
                output.report.raster.merge(&surface.stats);
                output.magnified_polygons.push(surface.magnified);
                output.grids.push(surface.grid);
                output.source_clusters.push(cluster);
            }
            Err(err) if err.is_frame_fatal() => {
                error!("Frame '{}' aborted in cluster {cluster}: {err}", input.frame_id);
                return FrameOutput::fatal(input, err);
            }
            Err(err) => {
                debug!("Cluster {cluster} skipped: {err}");
                output.report.failures.record_error(&err);
            }
        }
    }

    output.report.surfaces_out = output.grids.len();
    output
}

fn process_cluster(
    cloud: &PointCloud,
    indices: &[usize],
    plane: &PlaneCoefficients,
    params: &ModelingParams,
    options: &RasterOptions,
) -> Result<ClusterSurface> {
    let hull = build_convex_polygon(cloud, indices, plane)?;
    let magnified = hull.magnify(params.magnify_distance)?;
    let (mut grid, stats) = rasterize_with_stats(&magnified, cloud, params.resolution, options)?;

    if params.has_morphology() {
        grid.dilate(params.dilate_iterations);
        grid.erode(params.erode_iterations);
    }

    Ok(ClusterSurface {
        hull_area: hull.area(),
        magnified,
        grid,
        stats,
    })
}

/// Reconstructed hull area over the area of the supplied reference
/// boundary, both measured on the cluster's plane.
fn reference_area_ratio(
    input: &FrameInput,
    cluster: usize,
    plane: &PlaneCoefficients,
    hull_area: f32,
) -> Option<f32> {
    let reference = input.reference_polygon(cluster)?;
    let polygon = ConvexPolygon::from_points(PlaneFrame::new(*plane), reference).ok()?;
    let area = polygon.area();
    (area > f32::EPSILON).then(|| hull_area / area)
}

fn log_input_summary(input: &FrameInput) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    let sizes: Vec<usize> = input.clusters.iter().map(Vec::len).collect();
    let with_normals = input
        .cloud
        .points()
        .iter()
        .filter(|p| p.normal.is_some())
        .count();
    debug!(
        "Frame '{}' @ {:.3}: {} points ({} with normals), {} reference polygons, {} coefficient sets, cluster sizes {:?}",
        input.frame_id,
        input.stamp,
        input.cloud.len(),
        with_normals,
        input.polygons.len(),
        input.coefficients.len(),
        sizes
    );
}
