//! Branch-and-bound path search from one sensor.
//!
//! The search walks line-of-sight hops between the sensor, room corners and
//! door offset points. Every node keeps the shortest cumulative distance seen
//! so far; a branch arriving with a strictly greater distance is cut.
//! Visited-marks on corners and doors stop a branch from revisiting a node
//! that an enclosing level is already exploring.
//!
//! Only doors incident to the current room are considered, so a hop through
//! a door always ends in the room on its far side.

use log::{debug, trace};

use crate::core::Point2D;
use crate::layout::{CornerId, DoorId, DoorSide, RoomId, Topology};

use super::context::{NodeId, SearchContext};

/// A door reachable by line of sight from the node being expanded.
#[derive(Clone, Copy, Debug)]
struct DoorCandidate {
    door: DoorId,
    /// Offset on the side of the current room.
    inbound: Point2D,
    /// Side the search continues from.
    outbound: DoorSide,
    /// Room on the far side.
    outbound_room: RoomId,
}

/// Depth-first search state for one sensor.
///
/// The path prefix and crossed-door list are pushed on entry and popped on
/// exit, and snapshotted into the node state whenever a node's best distance
/// is recorded.
pub struct PathSearch<'a> {
    topology: &'a Topology,
    ctx: SearchContext,
    path: Vec<NodeId>,
    doors: Vec<DoorId>,
}

impl<'a> PathSearch<'a> {
    /// Prepare a search from the sensor with global index `sensor`.
    pub fn new(topology: &'a Topology, sensor: usize) -> Self {
        Self::with_context(topology, SearchContext::new(topology, sensor))
    }

    /// Reuse an existing context; it is reset before searching.
    pub fn with_context(topology: &'a Topology, ctx: SearchContext) -> Self {
        Self {
            topology,
            ctx,
            path: Vec::new(),
            doors: Vec::new(),
        }
    }

    /// Run the search and return the filled context.
    pub fn run(mut self) -> SearchContext {
        let sensor = self.ctx.sensor();
        self.ctx.reset(sensor);
        self.path.clear();
        self.doors.clear();

        let topology = self.topology;
        let Some(start) = topology.sensors.get(sensor) else {
            return self.ctx;
        };
        let room = start.room;
        self.visit(NodeId::Sensor(sensor), room, 0.0);

        debug!(
            "Sensor [{}]: search expanded {} nodes, pruned {}",
            start.id, self.ctx.stats.expanded, self.ctx.stats.pruned
        );
        self.ctx
    }

    fn visit(&mut self, node: NodeId, room: RoomId, dr: f64) {
        self.path.push(node);
        self.expand(node, room, dr);
        self.path.pop();
    }

    fn expand(&mut self, node: NodeId, room: RoomId, dr: f64) {
        {
            let state = self.ctx.state_mut(node);
            if let Some(dmin) = state.dmin
                && dr > dmin
            {
                trace!("Prune {:?}: {:.4} > {:.4}", node, dr, dmin);
                self.ctx.stats.pruned += 1;
                return;
            }
            state.dmin = Some(dr);
            state.shortest_path.clone_from(&self.path);
            state.visited_doors.clone_from(&self.doors);
        }
        self.ctx.stats.expanded += 1;

        let (here, probe) = node_geometry(self.topology, node);

        let corners = self.corner_candidates(probe, room);
        let doors = self.door_candidates(probe, room);

        for &corner in &corners {
            let d = here.distance(&self.topology.corner(corner).position);
            self.visit(NodeId::Corner(corner), room, dr + d);
        }
        for &corner in &corners {
            self.ctx.set_corner_in_use(corner, false);
        }

        for cand in &doors {
            let d = here.distance(&cand.inbound);
            self.doors.push(cand.door);
            self.visit(
                NodeId::DoorSide(cand.door, cand.outbound),
                cand.outbound_room,
                dr + d,
            );
            self.doors.pop();
        }
        for cand in &doors {
            self.ctx.set_door_in_use(cand.door, false);
        }
    }

    /// Unused corners of `room` visible from `probe`; marks them in use.
    fn corner_candidates(&mut self, probe: Point2D, room: RoomId) -> Vec<CornerId> {
        let topology = self.topology;
        let room = topology.room(room);
        let mut out = Vec::new();
        for id in room.corner_ids() {
            if self.ctx.corner_in_use(id) {
                continue;
            }
            if room.has_line_of_sight(probe, topology.corner(id).probe()) {
                self.ctx.set_corner_in_use(id, true);
                out.push(id);
            }
        }
        out
    }

    /// Unused doors of `room` whose near offset is visible from `probe`;
    /// marks them in use.
    fn door_candidates(&mut self, probe: Point2D, room_id: RoomId) -> Vec<DoorCandidate> {
        let topology = self.topology;
        let room = topology.room(room_id);
        let mut out = Vec::new();
        for id in topology.door_ids() {
            if self.ctx.door_in_use(id) {
                continue;
            }
            let door = topology.door(id);
            let Some(side) = door.side_in(room_id) else {
                continue;
            };
            let inbound = door.offset(side);
            if room.has_line_of_sight(probe, inbound) {
                self.ctx.set_door_in_use(id, true);
                let outbound = side.opposite();
                out.push(DoorCandidate {
                    door: id,
                    inbound,
                    outbound,
                    outbound_room: door.room(outbound),
                });
            }
        }
        out
    }
}

/// Search every path from one sensor and return the per-node results.
pub fn search_sensor(topology: &Topology, sensor: usize) -> SearchContext {
    PathSearch::new(topology, sensor).run()
}

/// Position and line-of-sight probe of a node.
///
/// Sensors and door offsets probe from their own position; corners probe
/// from their nudged position.
pub fn node_geometry(topology: &Topology, node: NodeId) -> (Point2D, Point2D) {
    match node {
        NodeId::Sensor(i) => {
            let p = topology.sensors[i].position;
            (p, p)
        }
        NodeId::Corner(c) => {
            let corner = topology.corner(c);
            (corner.position, corner.probe())
        }
        NodeId::DoorSide(d, side) => {
            let p = topology.door(d).offset(side);
            (p, p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TopologyBuilder;
    use approx::assert_relative_eq;

    fn two_rooms() -> Topology {
        TopologyBuilder::new()
            .room("a", &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
            .room("b", &[(4.0, 0.0), (8.0, 0.0), (8.0, 4.0), (4.0, 4.0)])
            .sensor("a", "s1", (1.0, 2.0), Some(20.0))
            .door("ab", "a", "b", (4.0, 1.5), (4.0, 2.5))
            .build()
            .unwrap()
    }

    /// L-shaped room with the reflex corner at (2, 2).
    fn l_room() -> Topology {
        TopologyBuilder::new()
            .room(
                "l",
                &[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 2.0), (2.0, 4.0), (0.0, 4.0)],
            )
            .sensor("l", "s1", (3.5, 1.0), None)
            .build()
            .unwrap()
    }

    #[test]
    fn test_sensor_node_is_root() {
        let topology = two_rooms();
        let ctx = search_sensor(&topology, 0);
        let root = ctx.state(NodeId::Sensor(0));
        assert_eq!(root.dmin, Some(0.0));
        assert_eq!(root.shortest_path, vec![NodeId::Sensor(0)]);
        assert!(root.visited_doors.is_empty());
        assert!(!ctx.has_marks());
    }

    #[test]
    fn test_convex_corners_do_not_relay() {
        let topology = two_rooms();
        let ctx = search_sensor(&topology, 0);
        // Convex probes sit outside the walls, so no path bends there.
        for id in 0..topology.corners.len() {
            assert!(!ctx.state(NodeId::Corner(CornerId(id))).is_finalized());
        }
    }

    #[test]
    fn test_door_crossing_records_door() {
        let topology = two_rooms();
        let ctx = search_sensor(&topology, 0);
        let door = topology.door(DoorId(0));

        let near = ctx.state(NodeId::DoorSide(DoorId(0), DoorSide::First));
        assert!(!near.is_finalized());

        let far = ctx.state(NodeId::DoorSide(DoorId(0), DoorSide::Second));
        let expected = topology.sensors[0]
            .position
            .distance(&door.offset(DoorSide::First));
        assert_relative_eq!(far.dmin.unwrap(), expected, epsilon = 1e-12);
        assert_eq!(far.visited_doors, vec![DoorId(0)]);
        assert_eq!(
            far.shortest_path,
            vec![NodeId::Sensor(0), NodeId::DoorSide(DoorId(0), DoorSide::Second)]
        );
    }

    #[test]
    fn test_reflex_corner_reached_directly() {
        let topology = l_room();
        let ctx = search_sensor(&topology, 0);

        let reflex = ctx.state(NodeId::Corner(CornerId(3)));
        let sensor = topology.sensors[0].position;
        assert_relative_eq!(
            reflex.dmin.unwrap(),
            sensor.distance(&Point2D::new(2.0, 2.0)),
            epsilon = 1e-12
        );
        assert_eq!(
            reflex.shortest_path,
            vec![NodeId::Sensor(0), NodeId::Corner(CornerId(3))]
        );
        for id in [0, 1, 2, 4, 5] {
            assert!(!ctx.state(NodeId::Corner(CornerId(id))).is_finalized());
        }
    }

    #[test]
    fn test_door_chain_accumulates_doors() {
        let topology = TopologyBuilder::new()
            .room("a", &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
            .room("b", &[(4.0, 0.0), (8.0, 0.0), (8.0, 4.0), (4.0, 4.0)])
            .room("c", &[(8.0, 0.0), (12.0, 0.0), (12.0, 4.0), (8.0, 4.0)])
            .sensor("a", "s1", (1.0, 2.0), None)
            .door("ab", "a", "b", (4.0, 1.5), (4.0, 2.5))
            .door("bc", "b", "c", (8.0, 1.5), (8.0, 2.5))
            .build()
            .unwrap();
        let ctx = search_sensor(&topology, 0);

        let end = ctx.state(NodeId::DoorSide(DoorId(1), DoorSide::Second));
        assert_eq!(end.visited_doors, vec![DoorId(0), DoorId(1)]);
        let ab = topology.door(DoorId(0));
        let bc = topology.door(DoorId(1));
        let expected = topology.sensors[0].position.distance(&ab.offset(DoorSide::First))
            + ab.offset(DoorSide::Second).distance(&bc.offset(DoorSide::First));
        assert_relative_eq!(end.dmin.unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_search_is_deterministic() {
        let topology = two_rooms();
        let a = search_sensor(&topology, 0);
        let b = search_sensor(&topology, 0);
        for id in 0..topology.corners.len() {
            let node = NodeId::Corner(CornerId(id));
            assert_eq!(a.state(node), b.state(node));
        }
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_isolated_room_unreached() {
        let topology = TopologyBuilder::new()
            .room("a", &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
            .room("b", &[(5.0, 0.0), (8.0, 0.0), (8.0, 4.0), (5.0, 4.0)])
            .sensor("a", "s1", (1.0, 1.0), None)
            .build()
            .unwrap();
        let ctx = search_sensor(&topology, 0);
        for id in topology.rooms[1].corner_ids() {
            assert!(!ctx.state(NodeId::Corner(id)).is_finalized());
        }
    }

    #[test]
    fn test_node_geometry_probes() {
        let topology = l_room();
        let (pos, probe) = node_geometry(&topology, NodeId::Corner(CornerId(3)));
        assert_eq!(pos, Point2D::new(2.0, 2.0));
        assert_ne!(pos, probe);
        let (pos, probe) = node_geometry(&topology, NodeId::Sensor(0));
        assert_eq!(pos, probe);
    }
}
