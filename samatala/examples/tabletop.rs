//! Synthetic table-top scene run through the plane modeler.
//!
//! This example demonstrates:
//! - Building a frame in code (floor, table top, tilted ramp)
//! - Reconfiguring the modeler between frames
//! - Exporting the result as SVG visualization
//!
//! # Usage
//!
//! ```bash
//! cargo run --example tabletop
//! cargo run --example tabletop -- --resolution 0.02 --output output/
//! ```

use std::path::PathBuf;

use clap::Parser;
use nalgebra::Vector3;
use rand::prelude::*;

use samatala::io::{SvgConfig, SvgVisualizer};
use samatala::{FrameInput, ModelingParams, PlaneModeler, PointCloud};

/// Synthetic table-top scene
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid resolution (metres per cell)
    #[arg(short, long, default_value_t = 0.05)]
    resolution: f32,

    /// Output directory for SVG renders
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Seed for the sensor noise
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Height noise of the synthetic depth sensor (metres).
const HEIGHT_NOISE: f32 = 0.003;

/// Grid of points over a rectangle on z = `height`, with one rectangular
/// hole.
fn surface(
    rng: &mut StdRng,
    origin: (f32, f32),
    size: (f32, f32),
    height: f32,
    step: f32,
    hole: Option<((f32, f32), (f32, f32))>,
) -> Vec<Vector3<f32>> {
    let nx = (size.0 / step) as usize + 1;
    let ny = (size.1 / step) as usize + 1;
    let mut points = Vec::with_capacity(nx * ny);
    for i in 0..nx {
        for j in 0..ny {
            let x = origin.0 + i as f32 * step;
            let y = origin.1 + j as f32 * step;
            if let Some(((x0, y0), (x1, y1))) = hole
                && x > x0
                && x < x1
                && y > y0
                && y < y1
            {
                continue;
            }
            let z = height + rng.random_range(-HEIGHT_NOISE..=HEIGHT_NOISE);
            points.push(Vector3::new(x, y, z));
        }
    }
    points
}

fn build_frame(seed: u64) -> FrameInput {
    let mut rng = StdRng::seed_from_u64(seed);

    // Floor with the table's footprint missing
    let hole = Some(((1.0, 0.5), (2.0, 1.2)));
    let floor = surface(&mut rng, (0.0, 0.0), (3.0, 2.0), 0.0, 0.05, hole);
    let table = surface(&mut rng, (1.0, 0.5), (1.0, 0.7), 0.72, 0.03, None);

    // Ramp rising 0.3 over 1m along x, next to the floor
    let ramp: Vec<Vector3<f32>> = surface(&mut rng, (3.2, 0.0), (1.0, 0.8), 0.0, 0.05, None)
        .into_iter()
        .map(|p| Vector3::new(p.x, p.y, p.z + (p.x - 3.2) * 0.3))
        .collect();
    let ramp_normal = Vector3::new(-0.3, 0.0, 1.0).normalize();
    let ramp_d = -ramp_normal.dot(&Vector3::new(3.2, 0.0, 0.0));

    let mut positions = floor.clone();
    positions.extend(&table);
    positions.extend(&ramp);

    let floor_idx: Vec<usize> = (0..floor.len()).collect();
    let table_idx: Vec<usize> = (floor.len()..floor.len() + table.len()).collect();
    let ramp_idx: Vec<usize> = (floor.len() + table.len()..positions.len()).collect();

    FrameInput::new(
        PointCloud::from_positions(&positions),
        vec![
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0, -0.72],
            vec![ramp_normal.x, ramp_normal.y, ramp_normal.z, ramp_d],
        ],
        vec![floor_idx, table_idx, ramp_idx],
    )
    .with_header("tabletop", 0.0)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let params = ModelingParams::default()
        .with_resolution(args.resolution)
        .with_magnify_distance(0.1);
    let modeler = match PlaneModeler::new(params) {
        Ok(modeler) => modeler,
        Err(e) => {
            eprintln!("Invalid parameters: {e}");
            std::process::exit(2);
        }
    };

    let frame = build_frame(args.seed);
    println!(
        "Scene: {} points, {} clusters",
        frame.cloud.len(),
        frame.cluster_count()
    );

    std::fs::create_dir_all(&args.output).ok();

    // Same frame at the requested resolution and at twice as coarse
    for (pass, resolution) in [args.resolution, args.resolution * 2.0].into_iter().enumerate() {
        if let Err(e) = modeler.update_params(modeler.params().with_resolution(resolution)) {
            eprintln!("Rejected resolution {resolution}: {e}");
            continue;
        }

        let output = modeler.process(&frame);
        println!("\nPass {pass} @ {resolution}m:");
        for (cluster, polygon, grid) in output.surfaces() {
            println!(
                "  cluster {cluster}: {} vertices, grid {}x{}, {} occupied ({:.0}% coverage)",
                polygon.len(),
                grid.rows(),
                grid.cols(),
                grid.occupied_count(),
                grid.coverage_ratio() * 100.0
            );
        }

        let path = args.output.join(format!("tabletop_{pass}.svg"));
        let saved = SvgVisualizer::new(SvgConfig::default())
            .with_title(format!("tabletop @ {resolution}m"))
            .with_frame(&output)
            .save(&path);
        match saved {
            Ok(()) => println!("  saved {}", path.display()),
            Err(e) => eprintln!("  failed to save {}: {e}", path.display()),
        }
    }

    println!("\n{}", modeler.diagnostics().summary());
}
