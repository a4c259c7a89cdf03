//! Frame files: one [`FrameInput`] serialized as YAML.
//!
//! ```yaml
//! frame_id: table_top
//! stamp: 12.5
//! cloud:
//!   - position: [0.0, 0.0, 0.75]
//!   - position: [1.0, 0.0, 0.75]
//!     normal: [0.0, 0.0, 1.0]
//! coefficients:
//!   - [0.0, 0.0, 1.0, -0.75]
//! clusters:
//!   - [0, 1, 2]
//! polygons: []           # optional reference boundaries
//! ```

use std::path::Path;

use crate::pipeline::FrameInput;

/// Frame file error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameLoadError {
    /// I/O error reading or writing the file
    #[error("I/O error: {0}")]
    Io(String),
    /// YAML parsing error
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Load a frame from a YAML file.
///
/// Frames without a `frame_id` take the file stem.
pub fn load_frame(path: &Path) -> Result<FrameInput, FrameLoadError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| FrameLoadError::Io(e.to_string()))?;
    let mut frame = frame_from_yaml(&contents)?;
    if frame.frame_id.is_empty()
        && let Some(stem) = path.file_stem()
    {
        frame.frame_id = stem.to_string_lossy().into_owned();
    }
    Ok(frame)
}

/// Parse a frame from a YAML string.
pub fn frame_from_yaml(yaml: &str) -> Result<FrameInput, FrameLoadError> {
    serde_yaml::from_str(yaml).map_err(|e| FrameLoadError::Parse(e.to_string()))
}

/// Serialize a frame to a YAML string.
pub fn frame_to_yaml(frame: &FrameInput) -> Result<String, FrameLoadError> {
    serde_yaml::to_string(frame).map_err(|e| FrameLoadError::Parse(e.to_string()))
}

/// Write a frame to a YAML file.
pub fn save_frame(frame: &FrameInput, path: &Path) -> Result<(), FrameLoadError> {
    let yaml = frame_to_yaml(frame)?;
    std::fs::write(path, yaml).map_err(|e| FrameLoadError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    const FRAME: &str = r#"
frame_id: desk
stamp: 3.25
cloud:
  - position: [0.0, 0.0, 0.0]
  - position: [1.0, 0.0, 0.0]
    normal: [0.0, 0.0, 1.0]
  - position: [0.0, 1.0, 0.0]
coefficients:
  - [0.0, 0.0, 1.0, 0.0]
clusters:
  - [0, 1, 2]
"#;

    #[test]
    fn test_parse_frame() {
        let frame = frame_from_yaml(FRAME).unwrap();
        assert_eq!(frame.frame_id, "desk");
        assert_eq!(frame.stamp, 3.25);
        assert_eq!(frame.cloud.len(), 3);
        assert_eq!(frame.cloud.points()[0].normal, None);
        assert_eq!(frame.cloud.points()[1].normal, Some(Vector3::z()));
        assert_eq!(frame.clusters, vec![vec![0, 1, 2]]);
        assert!(frame.polygons.is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let err = frame_from_yaml("frame_id: x\ncloud: []\n").unwrap_err();
        assert!(matches!(err, FrameLoadError::Parse(_)));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let frame = frame_from_yaml(FRAME).unwrap();
        let yaml = frame_to_yaml(&frame).unwrap();
        assert_eq!(frame_from_yaml(&yaml).unwrap(), frame);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_frame(Path::new("/nonexistent/frame.yaml")).unwrap_err();
        assert!(matches!(err, FrameLoadError::Io(_)));
    }
}
