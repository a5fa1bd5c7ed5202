//! Shortest line-of-sight paths from a sensor through corners and doors.
//!
//! [`search_sensor`] runs a depth-first branch-and-bound search and returns a
//! [`SearchContext`] holding, for every reachable node, the shortest
//! cumulative distance from the sensor, the node path and the doors crossed.
//! Each search owns its context, so sensors can be searched in parallel over
//! one shared [`Topology`](crate::layout::Topology).

mod context;
mod engine;

pub use context::{NodeId, NodeState, SearchContext, SearchStats};
pub use engine::{PathSearch, node_geometry, search_sensor};
