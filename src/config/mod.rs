//! YAML configuration for the heatmap engine.
//!
//! Every key is optional and falls back to the value in `defaults.rs`.
//! Lengths and the grid resolution must be positive; anything else is
//! rejected by [`HeatConfig::validate`] when the file is parsed.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vastu_heat::config::HeatConfig;
//!
//! // Load from default path (configs/heatmap.yaml)
//! let config = HeatConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = HeatConfig::default();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | Sampling density |
//! | [`SearchSection`] | Probe nudges, door offsets, parallel workers |
//! | [`CacheSection`] | Field cache directory and mode |
//! | [`DisplaySection`] | Temperature range for renderers |
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   resolution: 5.0        # samples per unit
//! search:
//!   corner_nudge: 0.001
//!   door_offset: 0.05
//!   use_parallel: true
//! cache:
//!   dir: /tmp/
//!   file_prefix: hmap_
//!   read_from_cache: false
//! display:
//!   t_range: [18.0, 27.0]
//! ```

mod cache;
mod defaults;
mod display;
mod error;
mod grid;
mod heat;
mod search;

pub use error::ConfigLoadError;
pub use heat::HeatConfig;

pub use cache::CacheSection;
pub use display::DisplaySection;
pub use grid::GridSection;
pub use search::SearchSection;
