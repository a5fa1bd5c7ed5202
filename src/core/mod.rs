//! Core types for the vastu-heat field engine.
//!
//! - [`Point2D`]: floor-plan coordinate
//! - [`Bounds`]: axis-aligned bounding box
//! - [`geometry`]: orientation, segment intersection and line-of-sight predicates

mod bounds;
pub mod geometry;
mod point;

pub use bounds::Bounds;
pub use geometry::{
    Orientation, corner_nudge, line_of_sight, on_segment, orientation, point_in_polygon,
    segments_intersect,
};
pub use point::Point2D;
