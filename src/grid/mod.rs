//! Sampling grid and per-sensor fields.
//!
//! - [`SampleGrid`]: regular mesh over the rounded bounding box of all corners
//! - [`DistanceField`]: distance (`D`), door-count (`N`) and door-list (`M`)
//!   grids produced for one sensor

mod field;
mod sampling;

pub use field::DistanceField;
pub use sampling::{SampleGrid, linspace};
