// src/utils/mod.rs
pub mod latin1;
pub mod timecode;
