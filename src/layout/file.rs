//! JSON layout file describing rooms, doors, sensors and objects of interest.
//!
//! ```json
//! {
//!   "rooms": [{
//!     "name": "kitchen",
//!     "corners": [{"x": 0, "y": 0}, {"x": 4, "y": 0}, {"x": 4, "y": 3}, {"x": 0, "y": 3}],
//!     "sensors": [{"x": 1.0, "y": 1.0, "sensor_id": "t-01", "t0": 21.5}]
//!   }],
//!   "doors": [{
//!     "name": "kitchen-hall", "room1": "kitchen", "room2": "hall",
//!     "sensor_id": "c-01", "p1": {"x": 4, "y": 1}, "p2": {"x": 4, "y": 2},
//!     "closed": false
//!   }],
//!   "oofs": [{"x": 2.0, "y": 2.0, "sensor_id": "o-01"}]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Point2D;
use crate::error::Result;

/// Coordinate pair as written in the layout file
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointEntry {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl From<PointEntry> for Point2D {
    fn from(p: PointEntry) -> Self {
        Point2D::new(p.x, p.y)
    }
}

impl From<Point2D> for PointEntry {
    fn from(p: Point2D) -> Self {
        PointEntry { x: p.x, y: p.y }
    }
}

/// Temperature sensor or object of interest
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorEntry {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Sensor identifier
    pub sensor_id: String,
    /// Initial temperature reading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t0: Option<f64>,
}

/// Room polygon with the sensors placed inside it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomEntry {
    /// Unique room name
    pub name: String,
    /// Polygon corners in order
    pub corners: Vec<PointEntry>,
    /// Sensors inside the room
    #[serde(default)]
    pub sensors: Vec<SensorEntry>,
}

/// Door between two named rooms
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoorEntry {
    /// Door name
    pub name: String,
    /// First connected room
    pub room1: String,
    /// Second connected room
    pub room2: String,
    /// Door contact sensor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<String>,
    /// First endpoint
    pub p1: PointEntry,
    /// Second endpoint
    pub p2: PointEntry,
    /// Initial state
    #[serde(default)]
    pub closed: bool,
}

/// Parsed layout file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutFile {
    /// Rooms
    #[serde(default)]
    pub rooms: Vec<RoomEntry>,
    /// Doors
    #[serde(default)]
    pub doors: Vec<DoorEntry>,
    /// Objects of interest
    #[serde(default)]
    pub oofs: Vec<SensorEntry>,
}

impl LayoutFile {
    /// Load a layout from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
