//! # VastuHeat
//!
//! Line-of-sight temperature fields over polygonal floor plans.
//!
//! ## Overview
//!
//! Readings from point sensors are spread through rooms and doors. For every
//! sensor, a branch-and-bound search finds the shortest line-of-sight path
//! to every cell of a sampling grid, bending only at room corners and passing
//! rooms only through door openings. The resulting distance fields also
//! record which doors each path crosses, so closing a door removes a sensor
//! from the cells behind it without recomputing any geometry.
//!
//! - **Geometry**: exact segment intersection and line-of-sight predicates
//! - **Topology**: arenas of rooms, corners, doors and sensors
//! - **Search**: per-sensor path search, parallel across sensors
//! - **Fields**: per-sensor distance, door-count and door-list grids, cached
//!   on disk
//! - **Aggregation**: inverse-square distance weighting of live readings
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vastu_heat::{FloorHeatmap, HeatConfig, LayoutFile};
//!
//! let config = HeatConfig::load_default()?;
//! let layout = LayoutFile::load("layout.json".as_ref())?;
//! let mut heatmap = FloorHeatmap::from_layout(&layout, &config)?;
//!
//! heatmap.update_temperature("t-01", 22.5)?;
//! heatmap.set_door_closed("kitchen-hall", true)?;
//! let field = heatmap.recompute_field();
//! println!("{} cells covered", field.covered());
//! ```

#![warn(missing_docs)]

// Core types and geometry
pub mod core;

// Floor-plan topology
pub mod layout;

// Sampling grid and per-sensor fields
pub mod grid;

// Path search
pub mod search;

// Field rasterization
pub mod raster;

// Field cache
pub mod io;

// Temperature aggregation
pub mod aggregate;

// Orchestration and live updates
pub mod heatmap;

// Unified configuration
pub mod config;

// Error types
pub mod error;

// Re-export commonly used types
pub use aggregate::{HeatField, aggregate};
pub use config::HeatConfig;
pub use crate::core::{Bounds, Point2D};
pub use error::{HeatmapError, Result};
pub use grid::{DistanceField, SampleGrid};
pub use heatmap::{FieldSnapshot, FloorHeatmap, compute_fields};
pub use io::FieldCache;
pub use layout::{LayoutFile, Topology, TopologyBuilder};
pub use raster::compute_sensor_field;
pub use search::{SearchContext, search_sensor};
