// src/archive/mod.rs
mod bind;
mod store;

pub use bind::bind_index;
pub use store::{BoundArchive, FileRecord};
