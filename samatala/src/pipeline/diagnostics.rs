//! Failure accounting and cumulative pipeline health.

use serde::{Deserialize, Serialize};

use super::frame::FrameReport;
use crate::error::ModelingError;

/// Category of a cluster-scoped failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Cluster had fewer than 3 indices.
    InsufficientPoints,
    /// Cluster referenced a point past the end of the cloud.
    IndexOutOfRange,
    /// Hull collapsed to a line or point.
    DegenerateHull,
    /// Magnification failed.
    CollapsedPolygon,
    /// Grid would exceed the per-axis limit.
    GridTooLarge,
    /// Anything else.
    Other,
}

impl FailureKind {
    /// Every kind, in reporting order.
    pub const ALL: [FailureKind; 6] = [
        FailureKind::InsufficientPoints,
        FailureKind::IndexOutOfRange,
        FailureKind::DegenerateHull,
        FailureKind::CollapsedPolygon,
        FailureKind::GridTooLarge,
        FailureKind::Other,
    ];

    /// Classify an error.
    pub fn of(error: &ModelingError) -> Self {
        match error {
            ModelingError::InsufficientPoints { .. } => FailureKind::InsufficientPoints,
            ModelingError::IndexOutOfRange { .. } => FailureKind::IndexOutOfRange,
            ModelingError::DegenerateHull => FailureKind::DegenerateHull,
            ModelingError::CollapsedPolygon => FailureKind::CollapsedPolygon,
            ModelingError::GridTooLarge { .. } => FailureKind::GridTooLarge,
            _ => FailureKind::Other,
        }
    }

    /// Short name for log lines and summaries.
    pub fn name(self) -> &'static str {
        match self {
            FailureKind::InsufficientPoints => "insufficient_points",
            FailureKind::IndexOutOfRange => "index_out_of_range",
            FailureKind::DegenerateHull => "degenerate_hull",
            FailureKind::CollapsedPolygon => "collapsed_polygon",
            FailureKind::GridTooLarge => "grid_too_large",
            FailureKind::Other => "other",
        }
    }
}

/// Cluster failure counts by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCounts {
    /// Clusters with fewer than 3 indices
    pub insufficient_points: usize,
    /// Clusters with out-of-range indices
    pub index_out_of_range: usize,
    /// Collinear or coincident clusters
    pub degenerate_hull: usize,
    /// Magnification failures
    pub collapsed_polygon: usize,
    /// Oversized grids
    pub grid_too_large: usize,
    /// Unclassified failures
    pub other: usize,
}

impl FailureCounts {
    /// Count one failure.
    pub fn record(&mut self, kind: FailureKind) {
        *self.slot(kind) += 1;
    }

    /// Count one failure from its error.
    pub fn record_error(&mut self, error: &ModelingError) {
        self.record(FailureKind::of(error));
    }

    /// Count for one kind.
    pub fn get(&self, kind: FailureKind) -> usize {
        match kind {
            FailureKind::InsufficientPoints => self.insufficient_points,
            FailureKind::IndexOutOfRange => self.index_out_of_range,
            FailureKind::DegenerateHull => self.degenerate_hull,
            FailureKind::CollapsedPolygon => self.collapsed_polygon,
            FailureKind::GridTooLarge => self.grid_too_large,
            FailureKind::Other => self.other,
        }
    }

    /// Total failures.
    pub fn total(&self) -> usize {
        FailureKind::ALL.iter().map(|&k| self.get(k)).sum()
    }

    /// Merge another set of counts into this one.
    pub fn merge(&mut self, other: &FailureCounts) {
        for kind in FailureKind::ALL {
            *self.slot(kind) += other.get(kind);
        }
    }

    /// Non-zero counts as `name=count` pairs.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = FailureKind::ALL
            .iter()
            .filter(|&&k| self.get(k) > 0)
            .map(|&k| format!("{}={}", k.name(), self.get(k)))
            .collect();
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(", ")
        }
    }

    fn slot(&mut self, kind: FailureKind) -> &mut usize {
        match kind {
            FailureKind::InsufficientPoints => &mut self.insufficient_points,
            FailureKind::IndexOutOfRange => &mut self.index_out_of_range,
            FailureKind::DegenerateHull => &mut self.degenerate_hull,
            FailureKind::CollapsedPolygon => &mut self.collapsed_polygon,
            FailureKind::GridTooLarge => &mut self.grid_too_large,
            FailureKind::Other => &mut self.other,
        }
    }
}

/// Health of the most recent frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Every cluster produced a surface (or nothing has run yet).
    #[default]
    Ok,
    /// Some clusters were dropped.
    Degraded,
    /// The frame aborted with a frame-fatal error.
    Error,
}

/// Cumulative statistics across frames.
#[derive(Clone, Debug, Default)]
pub struct PipelineDiagnostics {
    /// Frames processed, including aborted ones.
    pub frames_processed: u64,
    /// Frames aborted by a frame-fatal error.
    pub fatal_frames: u64,
    /// Surfaces produced.
    pub surfaces_out: u64,
    /// Cluster failures by kind.
    pub failures: FailureCounts,
    /// Most recent frame-fatal error.
    pub last_fatal: Option<ModelingError>,
    /// Health of the most recent frame.
    pub last_health: HealthStatus,
    /// Total processing time (milliseconds).
    pub total_ms: f32,
    /// Slowest frame (milliseconds).
    pub max_ms: f32,
}

impl PipelineDiagnostics {
    /// Create empty diagnostics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame report in.
    pub fn record(&mut self, report: &FrameReport) {
        self.frames_processed += 1;
        self.surfaces_out += report.surfaces_out as u64;
        self.failures.merge(&report.failures);
        self.total_ms += report.elapsed_ms;
        self.max_ms = self.max_ms.max(report.elapsed_ms);
        if let Some(err) = &report.fatal {
            self.fatal_frames += 1;
            self.last_fatal = Some(err.clone());
        }
        self.last_health = report.health();
    }

    /// Health of the most recent frame.
    pub fn health(&self) -> HealthStatus {
        self.last_health
    }

    /// Mean processing time per frame (milliseconds).
    pub fn mean_ms(&self) -> f32 {
        if self.frames_processed == 0 {
            0.0
        } else {
            self.total_ms / self.frames_processed as f32
        }
    }

    /// Format as a single line.
    pub fn summary(&self) -> String {
        format!(
            "frames={} fatal={} surfaces={} failures=[{}] mean={:.2}ms max={:.2}ms",
            self.frames_processed,
            self.fatal_frames,
            self.surfaces_out,
            self.failures.summary(),
            self.mean_ms(),
            self.max_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_of() {
        assert_eq!(
            FailureKind::of(&ModelingError::InsufficientPoints { count: 1 }),
            FailureKind::InsufficientPoints
        );
        assert_eq!(
            FailureKind::of(&ModelingError::CollapsedPolygon),
            FailureKind::CollapsedPolygon
        );
        assert_eq!(
            FailureKind::of(&ModelingError::DegeneratePlane),
            FailureKind::Other
        );
    }

    #[test]
    fn test_counts_merge() {
        let mut a = FailureCounts::default();
        a.record(FailureKind::DegenerateHull);
        a.record(FailureKind::DegenerateHull);
        let mut b = FailureCounts::default();
        b.record_error(&ModelingError::GridTooLarge {
            rows: 1,
            cols: 9000,
            max: 4096,
        });
        a.merge(&b);

        assert_eq!(a.degenerate_hull, 2);
        assert_eq!(a.grid_too_large, 1);
        assert_eq!(a.total(), 3);
        assert_eq!(a.summary(), "degenerate_hull=2, grid_too_large=1");
        assert_eq!(FailureCounts::default().summary(), "none");
    }

    #[test]
    fn test_health_transitions() {
        let mut diag = PipelineDiagnostics::new();
        assert_eq!(diag.health(), HealthStatus::Ok);

        let mut degraded = FrameReport {
            clusters_in: 2,
            surfaces_out: 1,
            elapsed_ms: 4.0,
            ..FrameReport::default()
        };
        degraded.failures.record(FailureKind::DegenerateHull);
        diag.record(&degraded);
        assert_eq!(diag.health(), HealthStatus::Degraded);

        let fatal = FrameReport {
            fatal: Some(ModelingError::InvalidResolution(0.0)),
            elapsed_ms: 2.0,
            ..FrameReport::default()
        };
        diag.record(&fatal);
        assert_eq!(diag.health(), HealthStatus::Error);
        assert_eq!(diag.fatal_frames, 1);

        let clean = FrameReport {
            clusters_in: 1,
            surfaces_out: 1,
            ..FrameReport::default()
        };
        diag.record(&clean);
        assert_eq!(diag.health(), HealthStatus::Ok);

        assert_eq!(diag.frames_processed, 3);
        assert_eq!(diag.surfaces_out, 2);
        assert_eq!(diag.max_ms, 4.0);
        assert_eq!(diag.mean_ms(), 2.0);
        assert!(diag.last_fatal.is_some());
    }
}
