//! Field cache configuration section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Field cache settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheSection {
    /// Directory holding one artifact per sensor
    #[serde(default = "defaults::cache_dir")]
    pub dir: String,

    /// Artifact file name prefix (followed by the sensor index)
    #[serde(default = "defaults::file_prefix")]
    pub file_prefix: String,

    /// Skip search and load every field from the cache
    #[serde(default)]
    pub read_from_cache: bool,

    /// Persist freshly computed fields
    #[serde(default = "defaults::enabled")]
    pub write: bool,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            dir: defaults::cache_dir(),
            file_prefix: defaults::file_prefix(),
            read_from_cache: false,
            write: true,
        }
    }
}

impl CacheSection {
    /// Cache directory as a path
    pub fn dir_path(&self) -> PathBuf {
        PathBuf::from(&self.dir)
    }
}
