//! Error types for vastu-heat

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigLoadError;

/// vastu-heat error type
#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum HeatmapError {
    #[error("Error in layout. Door [{door}] not connected to [{room1}] and [{room2}]")]
    UnknownRoom {
        door: String,
        room1: String,
        room2: String,
    },

    #[error("Error in layout. Room name [{name}] is used more than once")]
    DuplicateRoom { name: String },

    #[error("Error in layout. Room [{room}] has {corners} corners, at least 3 are required")]
    DegenerateRoom { room: String, corners: usize },

    #[error("Error in layout. Door [{door}] connects room [{room}] to itself")]
    SelfLoopDoor { door: String, room: String },

    #[error("Cached field for sensor {index} at [{}] does not exist. Try running without read-from-cache", path.display())]
    CacheMiss { index: usize, path: PathBuf },

    #[error("Invalid field cache format: {0}")]
    CacheFormat(String),

    #[error("Cached field for sensor {index} has shape {found:?}, grid expects {expected:?}")]
    CacheShape {
        index: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Unknown sensor [{sensor_id}]")]
    UnknownSensor { sensor_id: String },

    #[error("Unknown door [{door}]")]
    UnknownDoor { door: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Layout parse error: {0}")]
    Layout(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),
}

impl HeatmapError {
    /// Whether the error stems from static input and aborts initialisation.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::UnknownSensor { .. } | Self::UnknownDoor { .. }
        )
    }
}

/// Result alias for vastu-heat operations
pub type Result<T> = std::result::Result<T, HeatmapError>;
