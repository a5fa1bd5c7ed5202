//! Static floor-plan topology.
//!
//! Rooms, corners, doors and sensors live in flat arenas owned by
//! [`Topology`] and reference each other through index newtypes. Nothing in
//! here changes once the topology is built; per-search scratch state lives in
//! [`crate::search::SearchContext`].

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::{Bounds, Point2D, line_of_sight};

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub usize);

        impl $name {
            /// Get the arena index.
            #[inline]
            pub fn index(&self) -> usize {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

arena_id!(
    /// Index of a room in [`Topology::rooms`].
    RoomId,
    "Room"
);
arena_id!(
    /// Index of a corner in [`Topology::corners`].
    CornerId,
    "Corner"
);
arena_id!(
    /// Index of a door in [`Topology::doors`]. Recorded in door-list fields.
    DoorId,
    "Door"
);

/// One of the two sides of a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DoorSide {
    /// Side facing `room1`.
    First,
    /// Side facing `room2`.
    Second,
}

impl DoorSide {
    /// Both sides in canonical order.
    pub const BOTH: [DoorSide; 2] = [DoorSide::First, DoorSide::Second];

    /// The other side of the door.
    #[inline]
    pub fn opposite(self) -> DoorSide {
        match self {
            DoorSide::First => DoorSide::Second,
            DoorSide::Second => DoorSide::First,
        }
    }

    #[inline]
    fn slot(self) -> usize {
        match self {
            DoorSide::First => 0,
            DoorSide::Second => 1,
        }
    }
}

/// A polygon vertex of exactly one room.
#[derive(Clone, Debug)]
pub struct Corner {
    /// Vertex position.
    pub position: Point2D,
    /// Owning room.
    pub room: RoomId,
    /// Offset applied to the position when probing line of sight.
    pub nudge: Point2D,
}

impl Corner {
    /// Position used as the line-of-sight endpoint.
    #[inline]
    pub fn probe(&self) -> Point2D {
        self.position + self.nudge
    }
}

/// A simple closed polygon with a unique name.
#[derive(Clone, Debug)]
pub struct Room {
    /// Unique room name.
    pub name: String,
    /// Corner positions in polygon order (closing edge implied).
    pub polygon: Vec<Point2D>,
    /// Corner ids, parallel to `polygon`.
    pub corners: Range<usize>,
    /// Global indices of the sensors inside this room.
    pub sensors: Vec<usize>,
}

impl Room {
    /// Iterate the ids of this room's corners in polygon order.
    pub fn corner_ids(&self) -> impl Iterator<Item = CornerId> + '_ {
        self.corners.clone().map(CornerId)
    }

    /// Check whether segment a-b crosses none of this room's walls.
    #[inline]
    pub fn has_line_of_sight(&self, a: Point2D, b: Point2D) -> bool {
        line_of_sight(a, b, &self.polygon)
    }
}

/// A door segment connecting two distinct rooms.
#[derive(Clone, Debug)]
pub struct Door {
    /// Door name from the layout.
    pub name: String,
    /// Contact sensor reporting the door state, if any.
    pub sensor_id: Option<String>,
    /// First endpoint of the door segment.
    pub p1: Point2D,
    /// Second endpoint of the door segment.
    pub p2: Point2D,
    /// Rooms on the first and second side.
    pub rooms: [RoomId; 2],
    /// Offset points just inside the first and second room.
    pub offsets: [Point2D; 2],
    /// State from the layout file.
    pub initially_closed: bool,
}

impl Door {
    /// Room on the given side.
    #[inline]
    pub fn room(&self, side: DoorSide) -> RoomId {
        self.rooms[side.slot()]
    }

    /// Offset point on the given side.
    #[inline]
    pub fn offset(&self, side: DoorSide) -> Point2D {
        self.offsets[side.slot()]
    }

    /// Which side of the door faces `room`, if the door touches it.
    #[inline]
    pub fn side_in(&self, room: RoomId) -> Option<DoorSide> {
        DoorSide::BOTH.into_iter().find(|&side| self.room(side) == room)
    }

    /// Whether `key` names this door or its contact sensor.
    pub fn matches(&self, key: &str) -> bool {
        self.name == key || self.sensor_id.as_deref() == Some(key)
    }
}

/// A temperature sensor placed inside a room.
#[derive(Clone, Debug)]
pub struct Sensor {
    /// Sensor identifier.
    pub id: String,
    /// Sensor position.
    pub position: Point2D,
    /// Owning room.
    pub room: RoomId,
    /// Reading from the layout file, if any.
    pub initial_reading: Option<f64>,
}

/// Display-only point with an optional temperature.
#[derive(Clone, Debug)]
pub struct PointOfInterest {
    /// Identifier.
    pub id: String,
    /// Position.
    pub position: Point2D,
    /// Reading from the layout file, if any.
    pub initial_reading: Option<f64>,
}

/// Read-only floor-plan topology shared by every sensor search.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    /// Room arena.
    pub rooms: Vec<Room>,
    /// Corner arena, grouped by room.
    pub corners: Vec<Corner>,
    /// Door arena in layout order.
    pub doors: Vec<Door>,
    /// Sensors in room order, then in-room order.
    pub sensors: Vec<Sensor>,
    /// Objects of interest.
    pub oofs: Vec<PointOfInterest>,
}

impl Topology {
    /// Get a room by id.
    #[inline]
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    /// Get a corner by id.
    #[inline]
    pub fn corner(&self, id: CornerId) -> &Corner {
        &self.corners[id.0]
    }

    /// Get a door by id.
    #[inline]
    pub fn door(&self, id: DoorId) -> &Door {
        &self.doors[id.0]
    }

    /// Iterate door ids in layout order.
    pub fn door_ids(&self) -> impl Iterator<Item = DoorId> {
        (0..self.doors.len()).map(DoorId)
    }

    /// Iterate room ids in layout order.
    pub fn room_ids(&self) -> impl Iterator<Item = RoomId> {
        (0..self.rooms.len()).map(RoomId)
    }

    /// Find a room by name.
    pub fn room_by_name(&self, name: &str) -> Option<RoomId> {
        self.rooms.iter().position(|r| r.name == name).map(RoomId)
    }

    /// Find a sensor's global index by identifier.
    pub fn sensor_index(&self, sensor_id: &str) -> Option<usize> {
        self.sensors.iter().position(|s| s.id == sensor_id)
    }

    /// Find a door by name or contact sensor id.
    pub fn find_door(&self, key: &str) -> Option<DoorId> {
        self.doors.iter().position(|d| d.matches(key)).map(DoorId)
    }

    /// Bounding box of every room corner.
    pub fn bounds(&self) -> Bounds {
        self.corners.iter().map(|c| c.position).collect()
    }
}
