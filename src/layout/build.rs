//! Topology construction from a parsed layout.

use log::{info, warn};

use crate::core::{Point2D, corner_nudge, point_in_polygon};
use crate::error::{HeatmapError, Result};

use super::file::{DoorEntry, LayoutFile, PointEntry, RoomEntry, SensorEntry};
use super::types::{Corner, Door, PointOfInterest, Room, RoomId, Sensor, Topology};

/// Nudge magnitude used for corner probes when none is configured.
pub const DEFAULT_CORNER_NUDGE: f64 = 1e-3;

impl Topology {
    /// Build the topology from a parsed layout.
    ///
    /// Fails if room names repeat, a room has fewer than three corners, or a
    /// door names a room that does not exist.
    pub fn from_layout(layout: &LayoutFile, door_offset: f64, nudge: f64) -> Result<Self> {
        let mut topology = Topology::default();

        for (ri, entry) in layout.rooms.iter().enumerate() {
            if topology.room_by_name(&entry.name).is_some() {
                return Err(HeatmapError::DuplicateRoom {
                    name: entry.name.clone(),
                });
            }
            if entry.corners.len() < 3 {
                return Err(HeatmapError::DegenerateRoom {
                    room: entry.name.clone(),
                    corners: entry.corners.len(),
                });
            }

            let room_id = RoomId(ri);
            let polygon: Vec<Point2D> = entry.corners.iter().map(|&c| c.into()).collect();

            let first = topology.corners.len();
            for i in 0..polygon.len() {
                topology.corners.push(Corner {
                    position: polygon[i],
                    room: room_id,
                    nudge: corner_nudge(&polygon, i, nudge),
                });
            }

            let mut sensors = Vec::with_capacity(entry.sensors.len());
            for s in &entry.sensors {
                sensors.push(topology.sensors.len());
                topology.sensors.push(Sensor {
                    id: s.sensor_id.clone(),
                    position: Point2D::new(s.x, s.y),
                    room: room_id,
                    initial_reading: s.t0,
                });
            }

            topology.rooms.push(Room {
                name: entry.name.clone(),
                corners: first..topology.corners.len(),
                polygon,
                sensors,
            });
        }

        for entry in &layout.doors {
            let door = build_door(&topology, entry, door_offset)?;
            topology.doors.push(door);
        }

        topology.oofs = layout
            .oofs
            .iter()
            .map(|o| PointOfInterest {
                id: o.sensor_id.clone(),
                position: Point2D::new(o.x, o.y),
                initial_reading: o.t0,
            })
            .collect();

        info!(
            "Layout: {} rooms, {} corners, {} doors, {} sensors, {} oofs",
            topology.rooms.len(),
            topology.corners.len(),
            topology.doors.len(),
            topology.sensors.len(),
            topology.oofs.len()
        );

        Ok(topology)
    }
}

fn build_door(topology: &Topology, entry: &DoorEntry, door_offset: f64) -> Result<Door> {
    let (r1, r2) = match (
        topology.room_by_name(&entry.room1),
        topology.room_by_name(&entry.room2),
    ) {
        (Some(r1), Some(r2)) => (r1, r2),
        _ => {
            return Err(HeatmapError::UnknownRoom {
                door: entry.name.clone(),
                room1: entry.room1.clone(),
                room2: entry.room2.clone(),
            });
        }
    };
    if r1 == r2 {
        return Err(HeatmapError::SelfLoopDoor {
            door: entry.name.clone(),
            room: entry.room1.clone(),
        });
    }

    let p1: Point2D = entry.p1.into();
    let p2: Point2D = entry.p2.into();

    let mid = p1.midpoint(&p2);
    let normal = (p2 - p1).normalize().perpendicular();
    let left = mid + normal * door_offset;
    let right = mid - normal * door_offset;

    let room1 = &topology.room(r1).polygon;
    let offsets = if point_in_polygon(left, room1) {
        [left, right]
    } else if point_in_polygon(right, room1) {
        [right, left]
    } else {
        warn!(
            "Door [{}]: no offset point lies inside [{}], using default orientation",
            entry.name, entry.room1
        );
        [left, right]
    };

    Ok(Door {
        name: entry.name.clone(),
        sensor_id: entry.sensor_id.clone(),
        p1,
        p2,
        rooms: [r1, r2],
        offsets,
        initially_closed: entry.closed,
    })
}

/// Programmatic layout construction.
///
/// ```rust
/// use vastu_heat::layout::TopologyBuilder;
///
/// let topology = TopologyBuilder::new()
///     .room("a", &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
///     .room("b", &[(4.0, 0.0), (8.0, 0.0), (8.0, 4.0), (4.0, 4.0)])
///     .sensor("a", "s1", (1.0, 1.0), Some(21.0))
///     .door("ab", "a", "b", (4.0, 1.5), (4.0, 2.5))
///     .build()
///     .unwrap();
///
/// assert_eq!(topology.rooms.len(), 2);
/// assert_eq!(topology.doors.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TopologyBuilder {
    layout: LayoutFile,
    door_offset: f64,
    corner_nudge: f64,
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyBuilder {
    /// Create an empty builder with default offsets.
    pub fn new() -> Self {
        Self {
            layout: LayoutFile::default(),
            door_offset: 0.05,
            corner_nudge: DEFAULT_CORNER_NUDGE,
        }
    }

    /// Distance of door offset points from the door segment.
    pub fn door_offset(mut self, offset: f64) -> Self {
        self.door_offset = offset;
        self
    }

    /// Per-axis corner probe nudge.
    pub fn corner_nudge(mut self, nudge: f64) -> Self {
        self.corner_nudge = nudge;
        self
    }

    /// Add a room polygon.
    pub fn room(mut self, name: &str, corners: &[(f64, f64)]) -> Self {
        self.layout.rooms.push(RoomEntry {
            name: name.to_string(),
            corners: corners.iter().map(|&(x, y)| PointEntry { x, y }).collect(),
            sensors: Vec::new(),
        });
        self
    }

    /// Add a sensor to an already added room. Unknown rooms are ignored.
    pub fn sensor(mut self, room: &str, id: &str, at: (f64, f64), t0: Option<f64>) -> Self {
        if let Some(entry) = self.layout.rooms.iter_mut().find(|r| r.name == room) {
            entry.sensors.push(SensorEntry {
                x: at.0,
                y: at.1,
                sensor_id: id.to_string(),
                t0,
            });
        }
        self
    }

    /// Add an open door between two rooms.
    pub fn door(self, name: &str, room1: &str, room2: &str, p1: (f64, f64), p2: (f64, f64)) -> Self {
        self.door_with_state(name, room1, room2, p1, p2, false)
    }

    /// Add a door with an explicit initial state.
    pub fn door_with_state(
        mut self,
        name: &str,
        room1: &str,
        room2: &str,
        p1: (f64, f64),
        p2: (f64, f64),
        closed: bool,
    ) -> Self {
        self.layout.doors.push(DoorEntry {
            name: name.to_string(),
            room1: room1.to_string(),
            room2: room2.to_string(),
            sensor_id: None,
            p1: PointEntry { x: p1.0, y: p1.1 },
            p2: PointEntry { x: p2.0, y: p2.1 },
            closed,
        });
        self
    }

    /// Add an object of interest.
    pub fn oof(mut self, id: &str, at: (f64, f64), t0: Option<f64>) -> Self {
        self.layout.oofs.push(SensorEntry {
            x: at.0,
            y: at.1,
            sensor_id: id.to_string(),
            t0,
        });
        self
    }

    /// The layout assembled so far.
    pub fn layout(&self) -> &LayoutFile {
        &self.layout
    }

    /// Validate and build the topology.
    pub fn build(&self) -> Result<Topology> {
        Topology::from_layout(&self.layout, self.door_offset, self.corner_nudge)
    }
}
