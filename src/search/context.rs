//! Per-sensor scratch state for the path search.
//!
//! One [`SearchContext`] is created per sensor search and owned by the
//! worker running it, so searches for different sensors never share mutable
//! state. The topology it indexes stays read-only.

use crate::layout::{CornerId, DoorId, DoorSide, Topology};

/// A node of the search graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// The sensor the search starts from (global sensor index).
    Sensor(usize),
    /// A room corner.
    Corner(CornerId),
    /// The offset point on one side of a door.
    DoorSide(DoorId, DoorSide),
}

/// Best known path to one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeState {
    /// Shortest known cumulative distance from the sensor (`None` = unvisited).
    pub dmin: Option<f64>,
    /// Nodes from the sensor to this node, inclusive.
    pub shortest_path: Vec<NodeId>,
    /// Doors crossed on `shortest_path`, in crossing order.
    pub visited_doors: Vec<DoorId>,
}

impl NodeState {
    /// Whether a path to this node has been recorded.
    #[inline]
    pub fn is_finalized(&self) -> bool {
        !self.shortest_path.is_empty()
    }

    fn reset(&mut self) {
        self.dmin = None;
        self.shortest_path.clear();
        self.visited_doors.clear();
    }
}

/// Search counters, logged after each sensor search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose best path was (re)recorded.
    pub expanded: usize,
    /// Branches cut because a strictly shorter path was known.
    pub pruned: usize,
}

/// Scratch state for one sensor's search, keyed by node.
#[derive(Clone, Debug)]
pub struct SearchContext {
    sensor: usize,
    origin: NodeState,
    corners: Vec<NodeState>,
    door_sides: Vec<[NodeState; 2]>,
    corner_in_use: Vec<bool>,
    door_in_use: Vec<bool>,
    /// Counters for the last search.
    pub stats: SearchStats,
}

impl SearchContext {
    /// Create an unset context sized for `topology`, starting at `sensor`.
    pub fn new(topology: &Topology, sensor: usize) -> Self {
        Self {
            sensor,
            origin: NodeState::default(),
            corners: vec![NodeState::default(); topology.corners.len()],
            door_sides: vec![Default::default(); topology.doors.len()],
            corner_in_use: vec![false; topology.corners.len()],
            door_in_use: vec![false; topology.doors.len()],
            stats: SearchStats::default(),
        }
    }

    /// Global index of the sensor this context searches from.
    #[inline]
    pub fn sensor(&self) -> usize {
        self.sensor
    }

    /// Return every node to its unset state, optionally for a new sensor.
    pub fn reset(&mut self, sensor: usize) {
        self.sensor = sensor;
        self.origin.reset();
        self.corners.iter_mut().for_each(NodeState::reset);
        for sides in &mut self.door_sides {
            sides.iter_mut().for_each(NodeState::reset);
        }
        self.corner_in_use.fill(false);
        self.door_in_use.fill(false);
        self.stats = SearchStats::default();
    }

    /// State of a node.
    ///
    /// `NodeId::Sensor` always resolves to this context's own sensor.
    pub fn state(&self, node: NodeId) -> &NodeState {
        match node {
            NodeId::Sensor(_) => &self.origin,
            NodeId::Corner(c) => &self.corners[c.index()],
            NodeId::DoorSide(d, side) => &self.door_sides[d.index()][side_slot(side)],
        }
    }

    pub(super) fn state_mut(&mut self, node: NodeId) -> &mut NodeState {
        match node {
            NodeId::Sensor(_) => &mut self.origin,
            NodeId::Corner(c) => &mut self.corners[c.index()],
            NodeId::DoorSide(d, side) => &mut self.door_sides[d.index()][side_slot(side)],
        }
    }

    #[inline]
    pub(super) fn corner_in_use(&self, id: CornerId) -> bool {
        self.corner_in_use[id.index()]
    }

    #[inline]
    pub(super) fn set_corner_in_use(&mut self, id: CornerId, in_use: bool) {
        self.corner_in_use[id.index()] = in_use;
    }

    #[inline]
    pub(super) fn door_in_use(&self, id: DoorId) -> bool {
        self.door_in_use[id.index()]
    }

    #[inline]
    pub(super) fn set_door_in_use(&mut self, id: DoorId, in_use: bool) {
        self.door_in_use[id.index()] = in_use;
    }

    /// Whether any visited-mark is still held (none should be after a search).
    pub fn has_marks(&self) -> bool {
        self.corner_in_use.iter().chain(&self.door_in_use).any(|&m| m)
    }
}

#[inline]
fn side_slot(side: DoorSide) -> usize {
    match side {
        DoorSide::First => 0,
        DoorSide::Second => 1,
    }
}
