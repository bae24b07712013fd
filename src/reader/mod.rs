// src/reader/mod.rs
mod raw_file;

pub use raw_file::RawFile;
