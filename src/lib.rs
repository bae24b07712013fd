// src/lib.rs
//! # als-raw
//!
//! A Rust library for reading, archiving and re-serializing the raw binary
//! files produced by Leosphere ALS airborne lidar instruments.
//!
//! A raw file is a hybrid of a CRLF/Latin-1 text header (ordered sections of
//! `KEY=VALUE` fields) and big-endian 32-bit integer blocks: one
//! blind-reference calibration block followed by a run of timestamped signal
//! and photon-count profiles. This crate decodes those files into a typed
//! model, accumulates them in an append-only session archive that binds each
//! profile to its governing blind reference, and writes archive slices back
//! out byte-for-byte.
//!
//! ## Reading raw files
//!
//! ```rust,no_run
//! use als_raw::*;
//!
//! fn main() -> Result<()> {
//!     let raw = RawFile::open("_2020-01-01_12-00-00_12-10-00.raw")?;
//!     println!("{} profiles, {} blind channels",
//!              raw.profiles.len(), raw.blind.rows());
//!
//!     let mut archive = BoundArchive::new();
//!     archive.append(raw)?;
//!     assert_eq!(archive.bind()[0], 0);
//!     Ok(())
//! }
//! ```
//!
//! ## Rebuilding instrument files
//!
//! ```rust,no_run
//! use als_raw::*;
//!
//! fn main() -> Result<()> {
//!     let mut archive = BoundArchive::new();
//!     archive.append(RawFile::open("input.raw")?)?;
//!     // one file per blind-reference scope, byte-compatible with the input
//!     let files = rebuild_raw(&archive, "out")?;
//!     println!("wrote {} files", files.len());
//!     Ok(())
//! }
//! ```

// Modules
pub mod archive;
pub mod error;
pub mod header;
pub mod raw_data;
pub mod reader;
pub mod writer;

mod utils;

// Re-export commonly used types at the crate root for convenience
pub use error::{RawError, Result};

// Header exports
pub use header::{FieldValue, Header, HeaderParser, ParsedHeader, Section};

// Raw data exports
pub use raw_data::{Profile, RawBlock, SIGNAL_CHANNELS};

// Reader exports
pub use reader::RawFile;

// Archive exports
pub use archive::{bind_index, BoundArchive, FileRecord};

// Writer exports
pub use writer::{field_decimals, format_value, rebuild_raw, write_slice, PROFILE_VARIABLES};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use als_raw::prelude::*;
    //! ```

    pub use crate::archive::BoundArchive;
    pub use crate::error::{RawError, Result};
    pub use crate::header::{FieldValue, Header};
    pub use crate::raw_data::{Profile, RawBlock};
    pub use crate::reader::RawFile;
    pub use crate::writer::rebuild_raw;
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
