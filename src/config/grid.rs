//! Grid configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Sampling grid settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridSection {
    /// Samples per layout unit along each axis
    #[serde(default = "defaults::resolution")]
    pub resolution: f64,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            resolution: defaults::resolution(),
        }
    }
}
