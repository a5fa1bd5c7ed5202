//! Default value functions for serde deserialization.

pub fn resolution() -> f64 {
    5.0
}

pub fn corner_nudge() -> f64 {
    1e-3
}

pub fn door_offset() -> f64 {
    0.05
}

pub fn enabled() -> bool {
    true
}

pub fn cache_dir() -> String {
    "/tmp/".to_string()
}

pub fn file_prefix() -> String {
    "hmap_".to_string()
}

pub fn t_range() -> [f64; 2] {
    [0.0, 40.0]
}
