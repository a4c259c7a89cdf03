//! Error types for Samatala.
//!
//! Errors are split into two scopes:
//!
//! - **Cluster-scoped**: the offending cluster is dropped from the frame
//!   output and counted, processing continues with the remaining clusters.
//! - **Frame-fatal**: malformed input or a misconfigured parameter that
//!   affects every cluster. The whole frame yields an empty output.
//!
//! Use [`ModelingError::is_frame_fatal`] to tell them apart.

/// Result type alias
pub type Result<T> = std::result::Result<T, ModelingError>;

/// Samatala modeling errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelingError {
    /// Plane normal has (near) zero magnitude
    #[error("Degenerate plane: normal has near-zero magnitude")]
    DegeneratePlane,

    /// Plane coefficients are not a 4-element `[a, b, c, d]` array
    #[error("Invalid plane coefficients: expected 4 values, got {len}")]
    InvalidCoefficients {
        /// Number of values received
        len: usize,
    },

    /// Cluster has fewer than 3 points
    #[error("Insufficient points: need at least 3, got {count}")]
    InsufficientPoints {
        /// Number of indices in the cluster
        count: usize,
    },

    /// Cluster index points past the end of the cloud
    #[error("Point index {index} out of range for cloud of {len} points")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Cloud size
        len: usize,
    },

    /// Hull has fewer than 3 vertices or zero area (collinear input)
    #[error("Degenerate hull: points are collinear or coincident")]
    DegenerateHull,

    /// Offsetting produced an empty or non-convex polygon
    #[error("Polygon collapsed during magnification")]
    CollapsedPolygon,

    /// Grid resolution is not a positive finite number
    #[error("Invalid resolution: {0} (must be > 0)")]
    InvalidResolution(f32),

    /// Grid dimensions exceed the configured maximum
    #[error("Grid too large: {rows}x{cols} cells exceeds {max} per axis")]
    GridTooLarge {
        /// Required rows
        rows: usize,
        /// Required columns
        cols: usize,
        /// Per-axis limit
        max: usize,
    },

    /// Number of coefficient sets does not match the number of clusters
    #[error("Cluster count mismatch: {coefficients} coefficient sets for {clusters} clusters")]
    ClusterCountMismatch {
        /// Coefficient sets in the frame
        coefficients: usize,
        /// Clusters in the frame
        clusters: usize,
    },

    /// Parameter value rejected by validation
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ModelingError {
    /// Whether this error aborts the whole frame rather than one cluster.
    pub fn is_frame_fatal(&self) -> bool {
        matches!(
            self,
            ModelingError::DegeneratePlane
                | ModelingError::InvalidCoefficients { .. }
                | ModelingError::InvalidResolution(_)
                | ModelingError::ClusterCountMismatch { .. }
                | ModelingError::InvalidParameter(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(ModelingError::DegeneratePlane.is_frame_fatal());
        assert!(ModelingError::InvalidResolution(0.0).is_frame_fatal());
        assert!(
            ModelingError::ClusterCountMismatch {
                coefficients: 1,
                clusters: 2
            }
            .is_frame_fatal()
        );

        assert!(!ModelingError::DegenerateHull.is_frame_fatal());
        assert!(!ModelingError::CollapsedPolygon.is_frame_fatal());
        assert!(!ModelingError::InsufficientPoints { count: 2 }.is_frame_fatal());
        assert!(
            !ModelingError::GridTooLarge {
                rows: 10,
                cols: 10,
                max: 5
            }
            .is_frame_fatal()
        );
    }

    #[test]
    fn test_display() {
        let err = ModelingError::GridTooLarge {
            rows: 5000,
            cols: 12,
            max: 4096,
        };
        assert_eq!(
            err.to_string(),
            "Grid too large: 5000x12 cells exceeds 4096 per axis"
        );
    }
}
