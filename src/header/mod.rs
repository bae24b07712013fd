// src/header/mod.rs
mod parser;
mod section;
mod value;

pub use parser::{HeaderParser, ParsedHeader, DEFAULT_SCAN_BOUND};
pub use section::{Header, Section};
pub use value::FieldValue;
