//! Main SamatalaConfig and conversion methods.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::grid::RasterOptions;
use crate::pipeline::ModelingParams;

use super::error::ConfigLoadError;
use super::grid::GridSection;
use super::modeling::ModelingSection;
use super::output::OutputSection;
use super::runtime::RuntimeSection;

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

/// Full Samatala configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct SamatalaConfig {
    /// Polygon and rasterization settings
    #[serde(default)]
    pub modeling: ModelingSection,

    /// Grid limits and morphology
    #[serde(default)]
    pub grid: GridSection,

    /// Execution settings
    #[serde(default)]
    pub runtime: RuntimeSection,

    /// Debug output settings
    #[serde(default)]
    pub output: OutputSection,
}

impl SamatalaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Convert to ModelingParams for the pipeline
    pub fn to_params(&self) -> ModelingParams {
        ModelingParams {
            magnify_distance: self.modeling.magnify_distance,
            resolution: self.modeling.resolution,
            distance_threshold: self.modeling.distance_threshold,
            max_cells_per_axis: self.grid.max_cells_per_axis,
            dilate_iterations: self.grid.dilate_iterations,
            erode_iterations: self.grid.erode_iterations,
            parallel: self.runtime.parallel,
        }
    }

    /// Convert to ModelingParams, rejecting unusable values
    pub fn to_validated_params(&self) -> Result<ModelingParams, ConfigLoadError> {
        let params = self.to_params();
        params
            .validate()
            .map_err(|e| ConfigLoadError::Invalid(e.to_string()))?;
        Ok(params)
    }

    /// Get the rasterizer options
    pub fn raster_options(&self) -> RasterOptions {
        self.to_params().raster_options()
    }

    /// Directory for SVG renders
    pub fn svg_dir(&self) -> PathBuf {
        PathBuf::from(&self.output.svg_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SamatalaConfig::default();
        assert_eq!(config.modeling.magnify_distance, 0.2);
        assert_eq!(config.modeling.resolution, 0.01);
        assert_eq!(config.grid.max_cells_per_axis, 4096);
        assert!(config.runtime.parallel);
        assert!(!config.output.write_svg);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = SamatalaConfig::default();
        config.modeling.resolution = 0.05;
        config.grid.dilate_iterations = 2;
        let yaml = config.to_yaml().unwrap();
        let parsed = SamatalaConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "modeling:\n  resolution: 0.02\nruntime:\n  parallel: false\n";
        let config = SamatalaConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.modeling.resolution, 0.02);
        assert_eq!(config.modeling.magnify_distance, 0.2);
        assert_eq!(config.modeling.distance_threshold, 0.01);
        assert!(!config.runtime.parallel);
        assert_eq!(config.output.svg_dir, "./output");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = SamatalaConfig::from_yaml("{}").unwrap();
        assert_eq!(config, SamatalaConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let err = SamatalaConfig::from_yaml("modeling: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse(_)));
    }

    #[test]
    fn test_to_params() {
        let config = SamatalaConfig::default();
        let params = config.to_params();
        assert_eq!(params, ModelingParams::default());
        assert!(config.to_validated_params().is_ok());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut config = SamatalaConfig::default();
        config.modeling.resolution = 0.0;
        assert!(matches!(
            config.to_validated_params(),
            Err(ConfigLoadError::Invalid(_))
        ));
    }
}
