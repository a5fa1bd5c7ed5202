//! Rasterize search results onto the sampling grid.
//!
//! Every node with a recorded shortest path paints the cells it can see
//! within its room with `|node - cell| + dmin`. A cell keeps the smallest
//! distance offered to it, together with the door list of the path that
//! produced it.

use log::debug;

use crate::grid::{DistanceField, SampleGrid};
use crate::layout::{DoorSide, RoomId, Topology};
use crate::search::{NodeId, SearchContext, node_geometry, search_sensor};

/// Paint the cells visible from one node.
///
/// For each cell with line of sight from the node's probe within `room`:
/// 1. `d = |position - cell| + dmin`
/// 2. Store `d` if the cell is unset or `d` is strictly shorter, along with
///    the doors crossed on the node's path
///
/// Nodes without a recorded path are skipped. Returns the number of cells
/// overwritten.
pub fn rasterize_node(
    field: &mut DistanceField,
    grid: &SampleGrid,
    topology: &Topology,
    ctx: &SearchContext,
    node: NodeId,
    room: RoomId,
) -> usize {
    let state = ctx.state(node);
    let Some(dmin) = state.dmin else {
        return 0;
    };
    if !state.is_finalized() {
        return 0;
    }

    let (position, probe) = node_geometry(topology, node);
    let room = topology.room(room);

    let mut updated = 0;
    for (index, cell) in grid.cells() {
        if !room.has_line_of_sight(probe, cell) {
            continue;
        }
        let d = position.distance(&cell) + dmin;
        if field.offer(index, d, &state.visited_doors) {
            updated += 1;
        }
    }
    updated
}

/// Build a sensor's field from a finished search.
///
/// Order: the sensor within its own room, then per room (layout order) every
/// door side lying in that room, then that room's corners.
pub fn rasterize_sensor(
    topology: &Topology,
    grid: &SampleGrid,
    ctx: &SearchContext,
) -> DistanceField {
    let mut field = DistanceField::new(grid.rows(), grid.cols());
    let sensor = ctx.sensor();
    let Some(origin) = topology.sensors.get(sensor) else {
        return field;
    };

    rasterize_node(&mut field, grid, topology, ctx, NodeId::Sensor(sensor), origin.room);

    for room in topology.room_ids() {
        for door in topology.door_ids() {
            for side in DoorSide::BOTH {
                if topology.door(door).room(side) == room {
                    rasterize_node(
                        &mut field,
                        grid,
                        topology,
                        ctx,
                        NodeId::DoorSide(door, side),
                        room,
                    );
                }
            }
        }
        for corner in topology.room(room).corner_ids() {
            rasterize_node(&mut field, grid, topology, ctx, NodeId::Corner(corner), room);
        }
    }

    debug!(
        "Sensor [{}]: {} of {} cells reached",
        origin.id,
        field.reached_count(),
        grid.len()
    );
    field
}

/// Search and rasterize one sensor.
pub fn compute_sensor_field(topology: &Topology, grid: &SampleGrid, sensor: usize) -> DistanceField {
    let ctx = search_sensor(topology, sensor);
    rasterize_sensor(topology, grid, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Point2D, line_of_sight, point_in_polygon};
    use crate::layout::{DoorId, TopologyBuilder};
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

    /// Whether a cell lies strictly inside an axis-aligned box, off the walls.
    fn interior(cell: Point2D, min: (f64, f64), max: (f64, f64)) -> bool {
        const MARGIN: f64 = 0.01;
        cell.x > min.0 + MARGIN
            && cell.x < max.0 - MARGIN
            && cell.y > min.1 + MARGIN
            && cell.y < max.1 - MARGIN
    }

    #[test]
    fn test_visible_cells_get_euclidean_distance() {
        let topology = two_rooms();
        let grid = SampleGrid::from_topology(&topology, 2.0);
        let field = compute_sensor_field(&topology, &grid, 0);

        let sensor = topology.sensors[0].position;
        let mut checked = 0;
        for (index, cell) in grid.cells() {
            if interior(cell, (0.0, 0.0), (4.0, 4.0)) {
                checked += 1;
                assert_relative_eq!(field.distance(index), sensor.distance(&cell), epsilon = 1e-12);
                assert_eq!(field.door_count(index), 0);
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_door_counts_match_door_lists() {
        let topology = two_rooms();
        let grid = SampleGrid::from_topology(&topology, 2.0);
        let field = compute_sensor_field(&topology, &grid, 0);

        for index in 0..grid.len() {
            if field.is_reached(index) {
                assert_eq!(field.door_count(index) as usize, field.doors(index).len());
            }
        }
    }

    #[test]
    fn test_far_room_reached_through_door_only() {
        let topology = two_rooms();
        let grid = SampleGrid::from_topology(&topology, 2.0);
        let field = compute_sensor_field(&topology, &grid, 0);

        let sensor = topology.sensors[0].position;
        let inbound = topology.door(DoorId(0)).offset(DoorSide::First);
        let outbound = topology.door(DoorId(0)).offset(DoorSide::Second);

        let mut checked = 0;
        for (index, cell) in grid.cells() {
            if !interior(cell, (4.0, 0.0), (8.0, 4.0)) {
                continue;
            }
            checked += 1;
            assert_eq!(field.doors(index), &[DoorId(0)]);
            let via_door = sensor.distance(&inbound) + outbound.distance(&cell);
            assert_relative_eq!(field.distance(index), via_door, epsilon = 1e-12);
            assert!(field.distance(index) >= sensor.distance(&cell));
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_hidden_arm_reached_around_reflex_corner() {
        let polygon = [(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 2.0), (2.0, 4.0), (0.0, 4.0)];
        let topology = TopologyBuilder::new()
            .room("l", &polygon)
            .sensor("l", "s1", (3.5, 1.0), None)
            .build()
            .unwrap();
        let grid = SampleGrid::from_topology(&topology, 2.0);
        let field = compute_sensor_field(&topology, &grid, 0);

        let sensor = topology.sensors[0].position;
        let reflex = Point2D::new(2.0, 2.0);
        let walls = &topology.rooms[0].polygon;

        let mut hidden = 0;
        for (index, cell) in grid.cells() {
            // Upper arm only; the lower arm is visible from the sensor.
            if !interior(cell, (0.0, 2.0), (2.0, 4.0)) {
                continue;
            }
            let expected = if line_of_sight(sensor, cell, walls) {
                sensor.distance(&cell)
            } else {
                hidden += 1;
                sensor.distance(&reflex) + reflex.distance(&cell)
            };
            assert_relative_eq!(field.distance(index), expected, epsilon = 1e-12);
        }
        assert!(hidden > 0);
    }

    #[test]
    fn test_disconnected_room_unreached() {
        let topology = TopologyBuilder::new()
            .room("a", &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
            .room("b", &[(6.0, 0.0), (8.0, 0.0), (8.0, 4.0), (6.0, 4.0)])
            .sensor("a", "s1", (1.0, 1.0), None)
            .build()
            .unwrap();
        let grid = SampleGrid::from_topology(&topology, 2.0);
        let field = compute_sensor_field(&topology, &grid, 0);

        for (index, cell) in grid.cells() {
            if point_in_polygon(cell, &topology.rooms[1].polygon) {
                assert!(!field.is_reached(index));
            }
        }
    }

    #[test]
    fn test_rasterization_is_deterministic() {
        let topology = two_rooms();
        let grid = SampleGrid::from_topology(&topology, 2.0);
        let a = compute_sensor_field(&topology, &grid, 0);
        let b = compute_sensor_field(&topology, &grid, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_on_sensor_reads_unreached() {
        let topology = TopologyBuilder::new()
            .room("a", &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
            .sensor("a", "s1", (2.0, 2.0), Some(20.0))
            .build()
            .unwrap();
        let grid = SampleGrid::from_topology(&topology, 1.25);
        assert_eq!(grid.point(2, 2), Point2D::new(2.0, 2.0));

        let field = compute_sensor_field(&topology, &grid, 0);
        assert!(!field.is_reached(grid.index(2, 2)));
        assert_relative_eq!(field.distance(grid.index(2, 1)), 1.0, epsilon = 1e-12);
    }
}
