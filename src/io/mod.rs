//! Persistence for computed fields.

mod field_cache;

pub use field_cache::{FieldCache, read_field, write_field};
