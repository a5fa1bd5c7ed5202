//! Test utilities for vastu-heat.
//!
//! Layouts and configs shared by the integration tests.

#![allow(dead_code)]

use std::path::Path;

use vastu_heat::{HeatConfig, LayoutFile, Point2D, Topology, TopologyBuilder};

/// Three-room apartment.
///
/// - `hall`: strip along the bottom, `(0,0)-(10,2)`
/// - `kitchen`: `(0,2)-(4,6)`, door to the hall and to the living room
/// - `living`: L-shape with a reflex corner at `(7,5)`, door to the hall
///
/// The area `(0,6)-(7,8)` lies outside every room.
pub const APARTMENT_JSON: &str = r#"{
  "rooms": [
    {
      "name": "hall",
      "corners": [{"x": 0, "y": 0}, {"x": 10, "y": 0}, {"x": 10, "y": 2}, {"x": 0, "y": 2}],
      "sensors": [{"x": 1.0, "y": 1.0, "sensor_id": "t-hall", "t0": 19.0}]
    },
    {
      "name": "kitchen",
      "corners": [{"x": 0, "y": 2}, {"x": 4, "y": 2}, {"x": 4, "y": 6}, {"x": 0, "y": 6}],
      "sensors": [{"x": 2.0, "y": 4.0, "sensor_id": "t-kitchen", "t0": 22.0}]
    },
    {
      "name": "living",
      "corners": [
        {"x": 4, "y": 2}, {"x": 10, "y": 2}, {"x": 10, "y": 8},
        {"x": 7, "y": 8}, {"x": 7, "y": 5}, {"x": 4, "y": 5}
      ],
      "sensors": [{"x": 5.0, "y": 3.0, "sensor_id": "t-living", "t0": 21.0}]
    }
  ],
  "doors": [
    {"name": "hall-kitchen", "room1": "hall", "room2": "kitchen",
     "p1": {"x": 1.5, "y": 2}, "p2": {"x": 2.5, "y": 2}},
    {"name": "hall-living", "room1": "hall", "room2": "living",
     "p1": {"x": 8, "y": 2}, "p2": {"x": 9, "y": 2}},
    {"name": "kitchen-living", "room1": "kitchen", "room2": "living", "sensor_id": "c-kl",
     "p1": {"x": 4, "y": 3}, "p2": {"x": 4, "y": 4}, "closed": false}
  ],
  "oofs": [{"x": 1.0, "y": 5.0, "sensor_id": "fridge"}]
}"#;

/// Initialise logging once for the test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parsed apartment layout.
pub fn apartment_layout() -> LayoutFile {
    LayoutFile::from_json(APARTMENT_JSON).expect("apartment layout parses")
}

/// Apartment topology with default offsets.
pub fn apartment() -> Topology {
    HeatConfig::default()
        .build_topology(&apartment_layout())
        .expect("apartment topology builds")
}

/// Two square rooms joined by one door on `x = 4`.
pub fn two_rooms() -> Topology {
    TopologyBuilder::new()
        .room("a", &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
        .room("b", &[(4.0, 0.0), (8.0, 0.0), (8.0, 4.0), (4.0, 4.0)])
        .sensor("a", "s1", (1.0, 2.0), Some(20.0))
        .sensor("b", "s2", (6.0, 2.0), Some(30.0))
        .door("ab", "a", "b", (4.0, 1.5), (4.0, 2.5))
        .build()
        .expect("two rooms build")
}

/// Coarse config with the cache in `dir`.
pub fn test_config(dir: &Path) -> HeatConfig {
    let mut config = HeatConfig::default();
    config.grid.resolution = 2.0;
    config.cache.dir = dir.to_string_lossy().into_owned();
    config
}

/// Whether `p` lies strictly inside the box `min..max`, away from walls.
pub fn interior(p: Point2D, min: (f64, f64), max: (f64, f64)) -> bool {
    const MARGIN: f64 = 0.01;
    p.x > min.0 + MARGIN && p.x < max.0 - MARGIN && p.y > min.1 + MARGIN && p.y < max.1 - MARGIN
}

/// Hall `a` below room `b`, joined by two doors mirrored about `x = 2`,
/// with room `c` above `b` through a door centred on the same axis.
///
/// Both routes from the sensor at (2, 1) into `c` have bit-identical
/// lengths.
pub fn mirrored_doors() -> Topology {
    TopologyBuilder::new()
        .room("a", &[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)])
        .room("b", &[(0.0, 2.0), (4.0, 2.0), (4.0, 6.0), (0.0, 6.0)])
        .room("c", &[(0.0, 6.0), (4.0, 6.0), (4.0, 8.0), (0.0, 8.0)])
        .sensor("a", "s1", (2.0, 1.0), Some(20.0))
        .door("left", "a", "b", (0.5, 2.0), (1.5, 2.0))
        .door("right", "a", "b", (2.5, 2.0), (3.5, 2.0))
        .door("top", "b", "c", (1.5, 6.0), (2.5, 6.0))
        .build()
        .expect("mirrored doors build")
}
