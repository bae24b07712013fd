// src/writer/mod.rs
mod format;
mod raw_writer;

pub use format::{field_decimals, format_number, format_value, PROFILE_VARIABLES};
pub use raw_writer::{rebuild_raw, write_slice};
