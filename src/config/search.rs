//! Path search configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Path search settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchSection {
    /// Per-axis probe offset applied to room corners
    #[serde(default = "defaults::corner_nudge")]
    pub corner_nudge: f64,

    /// Distance of door offset points from the door segment
    #[serde(default = "defaults::door_offset")]
    pub door_offset: f64,

    /// Run one worker per sensor (false = serial, for debugging)
    #[serde(default = "defaults::enabled")]
    pub use_parallel: bool,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            corner_nudge: defaults::corner_nudge(),
            door_offset: defaults::door_offset(),
            use_parallel: true,
        }
    }
}
