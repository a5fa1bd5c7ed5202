//! Display metadata forwarded to renderers.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Display settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplaySection {
    /// Temperature range [min, max] for colour scaling
    #[serde(default = "defaults::t_range")]
    pub t_range: [f64; 2],
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            t_range: defaults::t_range(),
        }
    }
}
