//! SVG visualization for per-frame plane modeling audit.
//!
//! Renders each surface of a frame as its own panel, in plane-local
//! coordinates:
//! - The grid extent (free cells)
//! - Occupied cells
//! - The magnified polygon outline and its vertices
//!
//! Panels are laid out left to right in output order, each scaled to fit
//! a fixed square so small table tops and large floors are equally readable.

use std::fmt::{self, Write};
use std::path::Path;

use crate::core::PlanePoint;
use crate::geometry::ConvexPolygon;
use crate::grid::GridPlane;
use crate::pipeline::FrameOutput;

/// SVG color scheme for visualization
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    /// Occupied cell color
    pub occupied: &'static str,
    /// Free cell color
    pub free: &'static str,
    /// Polygon outline color
    pub polygon: &'static str,
    /// Page background color
    pub background: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            occupied: "#333333",
            free: "#FFFFFF",
            polygon: "#2222AA",
            background: "#F8F8F8",
        }
    }
}

/// Configuration for SVG rendering
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Side of the square each panel is scaled into (pixels)
    pub panel_size: f32,
    /// Gap between panels (pixels)
    pub panel_gap: f32,
    /// Padding around the page (pixels)
    pub padding: f32,
    /// Polygon outline width (pixels)
    pub outline_width: f32,
    /// Vertex marker radius (pixels)
    pub vertex_radius: f32,
    /// Color scheme
    pub colors: SvgColorScheme,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            panel_size: 300.0,
            panel_gap: 20.0,
            padding: 20.0,
            outline_width: 2.0,
            vertex_radius: 3.0,
            colors: SvgColorScheme::default(),
        }
    }
}

/// One surface to draw.
#[derive(Clone, Copy, Debug)]
struct Panel<'a> {
    cluster: usize,
    polygon: &'a ConvexPolygon,
    grid: &'a GridPlane,
}

/// SVG visualization builder
pub struct SvgVisualizer<'a> {
    config: SvgConfig,
    title: Option<String>,
    panels: Vec<Panel<'a>>,
}

impl<'a> SvgVisualizer<'a> {
    /// Create a new SVG visualizer
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            title: None,
            panels: Vec::new(),
        }
    }

    /// Set a title to display
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add one surface
    pub fn with_surface(
        mut self,
        cluster: usize,
        polygon: &'a ConvexPolygon,
        grid: &'a GridPlane,
    ) -> Self {
        self.panels.push(Panel {
            cluster,
            polygon,
            grid,
        });
        self
    }

    /// Add every surface of a frame output
    pub fn with_frame(mut self, output: &'a FrameOutput) -> Self {
        for (cluster, polygon, grid) in output.surfaces() {
            self.panels.push(Panel {
                cluster,
                polygon,
                grid,
            });
        }
        self
    }

    /// Number of panels
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Render to SVG string
    pub fn render(&self) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = self.write_svg(&mut svg);
        svg
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        std::fs::write(path, self.render())
    }

    fn write_svg(&self, svg: &mut String) -> fmt::Result {
        let cfg = &self.config;
        let title_height = if self.title.is_some() { 30.0 } else { 0.0 };
        let label_height = 20.0;
        let n = self.panels.len().max(1) as f32;

        let width = 2.0 * cfg.padding + n * cfg.panel_size + (n - 1.0) * cfg.panel_gap;
        let height = 2.0 * cfg.padding + title_height + cfg.panel_size + label_height;

        writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            width, height, width, height
        )?;
        writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            cfg.colors.background
        )?;

        if let Some(ref title) = self.title {
            writeln!(
                svg,
                r##"  <text x="{:.0}" y="22" font-family="sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#333">{}</text>"##,
                width / 2.0,
                escape(title)
            )?;
        }

        if self.panels.is_empty() {
            writeln!(
                svg,
                r##"  <text x="{:.0}" y="{:.0}" font-family="sans-serif" font-size="12" text-anchor="middle" fill="#999">no surfaces</text>"##,
                width / 2.0,
                cfg.padding + title_height + cfg.panel_size / 2.0
            )?;
        }

        for (k, panel) in self.panels.iter().enumerate() {
            let x0 = cfg.padding + k as f32 * (cfg.panel_size + cfg.panel_gap);
            let y0 = cfg.padding + title_height;
            self.write_panel(svg, panel, x0, y0)?;
        }

        writeln!(svg, "</svg>")
    }

    fn write_panel(&self, svg: &mut String, panel: &Panel<'_>, x0: f32, y0: f32) -> fmt::Result {
        let cfg = &self.config;
        let grid = panel.grid;
        let res = grid.resolution();
        let extent_w = grid.cols() as f32 * res;
        let extent_h = grid.rows() as f32 * res;
        let scale = cfg.panel_size / extent_w.max(extent_h).max(f32::EPSILON);
        let cell_px = res * scale;
        let origin = grid.origin();

        // Plane-local point to page pixels, v axis flipped
        let to_px = |p: PlanePoint| {
            (
                x0 + (p.u - origin.u) * scale,
                y0 + (extent_h - (p.v - origin.v)) * scale,
            )
        };

        writeln!(svg, r#"  <g id="surface-{}">"#, panel.cluster)?;

        writeln!(
            svg,
            r##"    <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" stroke="#CCC"/>"##,
            x0,
            y0 + cfg.panel_size - extent_h * scale,
            extent_w * scale,
            extent_h * scale,
            cfg.colors.free
        )?;

        for cell in grid.occupied_cells() {
            let corner = PlanePoint::new(
                origin.u + cell.col as f32 * res,
                origin.v + (cell.row + 1) as f32 * res,
            );
            let (px, py) = to_px(corner);
            writeln!(
                svg,
                r#"    <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                px,
                py + cfg.panel_size - extent_h * scale,
                cell_px,
                cell_px,
                cfg.colors.occupied
            )?;
        }

        let shift = cfg.panel_size - extent_h * scale;
        let mut points = String::new();
        for v in panel.polygon.vertices_2d() {
            let (px, py) = to_px(*v);
            write!(points, "{:.1},{:.1} ", px, py + shift)?;
        }
        writeln!(
            svg,
            r#"    <polygon points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            points.trim_end(),
            cfg.colors.polygon,
            cfg.outline_width
        )?;
        for v in panel.polygon.vertices_2d() {
            let (px, py) = to_px(*v);
            writeln!(
                svg,
                r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                px,
                py + shift,
                cfg.vertex_radius,
                cfg.colors.polygon
            )?;
        }

        writeln!(
            svg,
            r##"    <text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="12" fill="#333">cluster {}: {}x{} cells, {} occupied</text>"##,
            x0,
            y0 + cfg.panel_size + 15.0,
            panel.cluster,
            grid.rows(),
            grid.cols(),
            grid.occupied_count()
        )?;

        writeln!(svg, "  </g>")
    }
}

/// Render every surface of a frame with a title taken from its frame id.
pub fn render_frame(output: &FrameOutput, config: SvgConfig) -> String {
    let title = if output.frame_id.is_empty() {
        "frame".to_string()
    } else {
        output.frame_id.clone()
    };
    SvgVisualizer::new(config)
        .with_title(title)
        .with_frame(output)
        .render()
}

/// Minimal XML text escaping.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PointCloud;
    use crate::pipeline::{FrameInput, ModelingParams, process_frame};
    use nalgebra::Vector3;

    fn output() -> FrameOutput {
        let cloud = PointCloud::from_positions(&[
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ]);
        let input = FrameInput::new(cloud, vec![vec![0.0, 0.0, 1.0, 0.0]], vec![vec![0, 1, 2, 3]])
            .with_header("a<b", 0.0);
        process_frame(&input, &ModelingParams::default().with_resolution(0.25))
    }

    #[test]
    fn test_svg_render_basic() {
        let out = output();
        let svg = render_frame(&out, SvgConfig::default());

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"id="surface-0""#));
        assert!(svg.contains("<polygon"));
        assert!(svg.contains("a&lt;b"));
    }

    #[test]
    fn test_one_rect_per_occupied_cell() {
        let out = output();
        let visualizer = SvgVisualizer::new(SvgConfig::default()).with_frame(&out);
        assert_eq!(visualizer.panel_count(), 1);

        let svg = visualizer.render();
        let occupied_fill = format!(r#"fill="{}""#, SvgColorScheme::default().occupied);
        assert_eq!(svg.matches(&occupied_fill).count(), out.grids[0].occupied_count());
    }

    #[test]
    fn test_empty_frame() {
        let svg = render_frame(&FrameOutput::default(), SvgConfig::default());
        assert!(svg.contains("no surfaces"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.svg");
        SvgVisualizer::new(SvgConfig::default())
            .with_frame(&output())
            .save(&path)
            .unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("</svg>"));
    }
}
