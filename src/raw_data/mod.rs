// src/raw_data/mod.rs
mod block;
mod profile;

pub use block::RawBlock;
pub use profile::{Profile, SIGNAL_CHANNELS};
