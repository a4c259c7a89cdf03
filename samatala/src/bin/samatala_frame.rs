//! Run plane modeling on one frame file and print what came out.
//!
//! Usage:
//!   cargo run --bin samatala-frame -- --frame data/square_frame.yaml
//!   cargo run --bin samatala-frame -- --frame data/square_frame.yaml --svg out.svg --resolution 0.05

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{info, warn};

use samatala::io::{SvgConfig, SvgVisualizer, load_frame};
use samatala::{PlaneModeler, SamatalaConfig};

/// Plane modeling for a single frame
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Frame file (YAML)
    #[arg(short, long)]
    frame: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = samatala::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Write an SVG render to this path
    #[arg(short, long)]
    svg: Option<PathBuf>,

    /// Override grid resolution (metres per cell)
    #[arg(long)]
    resolution: Option<f32>,

    /// Override polygon magnification distance (metres)
    #[arg(long)]
    magnify: Option<f32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = if args.config.exists() {
        SamatalaConfig::load(&args.config).unwrap_or_else(|e| {
            warn!("Failed to load config {}: {e}, using defaults", args.config.display());
            SamatalaConfig::default()
        })
    } else {
        info!("Config not found at {}, using defaults", args.config.display());
        SamatalaConfig::default()
    };

    let mut params = config.to_params();
    if let Some(resolution) = args.resolution {
        params = params.with_resolution(resolution);
    }
    if let Some(distance) = args.magnify {
        params = params.with_magnify_distance(distance);
    }

    let modeler = match PlaneModeler::new(params) {
        Ok(modeler) => modeler,
        Err(e) => {
            eprintln!("Invalid parameters: {e}");
            std::process::exit(2);
        }
    };

    let frame = match load_frame(&args.frame) {
        Ok(frame) => frame,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", args.frame.display());
            std::process::exit(1);
        }
    };

    let output = modeler.process(&frame);
    let report = &output.report;

    println!(
        "Frame '{}': {} clusters in, {} surfaces out ({:.2}ms)",
        output.frame_id, report.clusters_in, report.surfaces_out, report.elapsed_ms
    );
    if let Some(err) = &report.fatal {
        println!("  aborted: {err}");
    }
    for (cluster, polygon, grid) in output.surfaces() {
        println!(
            "  cluster {cluster}: {} vertices, area {:.3}m², grid {}x{} @ {}m, {} occupied, coverage {:.1}%",
            polygon.len(),
            polygon.area(),
            grid.rows(),
            grid.cols(),
            grid.resolution(),
            grid.occupied_count(),
            grid.coverage_ratio() * 100.0
        );
    }
    for (cluster, ratio) in &report.reference_area_ratios {
        println!("  cluster {cluster}: hull/reference area {ratio:.3}");
    }
    println!("  failures: {}", report.failures.summary());
    println!("  health: {:?}", modeler.health());

    let svg_path = args.svg.or_else(|| {
        config
            .output
            .write_svg
            .then(|| config.svg_dir().join(format!("{}.svg", output.frame_id)))
    });
    if let Some(path) = svg_path {
        if let Err(e) = save_svg(&output, &path) {
            eprintln!("Failed to write {}: {e}", path.display());
            std::process::exit(1);
        }
        println!("  svg: {}", path.display());
    }
}

fn save_svg(output: &samatala::FrameOutput, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    SvgVisualizer::new(SvgConfig::default())
        .with_title(&output.frame_id)
        .with_frame(output)
        .save(path)
}
