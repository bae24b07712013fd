// src/error.rs
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RawError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("truncated file: expected {expected} profiles, read {got}")]
    TruncatedFile { expected: usize, got: usize },

    #[error("missing header field: {0}")]
    MissingField(String),

    #[error("invalid time string: {0:?}")]
    InvalidTimeString(String),

    #[error("bind index overflow: {0}")]
    IndexOverflow(String),

    #[error("non-monotonic append: file starts at {file_start}, archive ends at {archive_end}")]
    NonMonotonicAppend { file_start: i64, archive_end: i64 },
}

pub type Result<T> = std::result::Result<T, RawError>;
