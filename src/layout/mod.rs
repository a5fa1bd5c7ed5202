//! Floor-plan topology: rooms, corners, doors, sensors.
//!
//! The topology is built once from a [`LayoutFile`] (or a
//! [`TopologyBuilder`]) and is read-only afterwards, so it can be shared by
//! every per-sensor search without locking.

mod build;
mod file;
mod types;

pub use build::{DEFAULT_CORNER_NUDGE, TopologyBuilder};
pub use file::{DoorEntry, LayoutFile, PointEntry, RoomEntry, SensorEntry};
pub use types::{
    Corner, CornerId, Door, DoorId, DoorSide, PointOfInterest, Room, RoomId, Sensor, Topology,
};
