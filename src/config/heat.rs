//! Main HeatConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::layout::{LayoutFile, Topology};

use super::cache::CacheSection;
use super::display::DisplaySection;
use super::error::ConfigLoadError;
use super::grid::GridSection;
use super::search::SearchSection;

/// Full vastu-heat configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct HeatConfig {
    /// Sampling grid settings
    #[serde(default)]
    pub grid: GridSection,

    /// Path search settings
    #[serde(default)]
    pub search: SearchSection,

    /// Field cache settings
    #[serde(default)]
    pub cache: CacheSection,

    /// Display metadata
    #[serde(default)]
    pub display: DisplaySection,
}

impl HeatConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|e| e.in_file(path.to_path_buf()))
    }

    /// Load from default config path (configs/heatmap.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/heatmap.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|source| ConfigLoadError::Parse { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the grid and search cannot work with.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let positive = [
            ("grid.resolution", self.grid.resolution),
            ("search.door_offset", self.search.door_offset),
            ("search.corner_nudge", self.search.corner_nudge),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigLoadError::Invalid {
                    key,
                    value,
                    reason: "must be a positive number",
                });
            }
        }
        Ok(())
    }

    /// Build a topology using this config's door offset and corner nudge
    pub fn build_topology(&self, layout: &LayoutFile) -> crate::error::Result<Topology> {
        Topology::from_layout(layout, self.search.door_offset, self.search.corner_nudge)
    }
}
