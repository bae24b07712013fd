// src/reader/raw_file.rs
use crate::error::{RawError, Result};
use crate::header::{Header, HeaderParser};
use crate::raw_data::{Profile, RawBlock};
use crate::utils::timecode::{base_time, decode_time, TIME_STAMP_LEN};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Seek, SeekFrom};
use std::path::Path;

/// One fully decoded raw file: parsed header, the file's blind-reference
/// calibration block, and its declared run of timestamped profiles.
///
/// Decoding is all-or-nothing; a stream that ends before
/// `NbOfProfilesPerFile` blocks have been read yields
/// [`RawError::TruncatedFile`] and no partial file escapes.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub header: Header,
    pub blind: RawBlock,
    pub profiles: Vec<Profile>,
}

impl RawFile {
    /// Open and decode a raw file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let raw = Self::read(&mut BufReader::with_capacity(65536, file))?;
        info!(
            "decoded {} profiles from {}",
            raw.profiles.len(),
            path.display()
        );
        Ok(raw)
    }

    /// Decode a raw file from any seekable stream.
    pub fn read<R: BufRead + Seek>(reader: &mut R) -> Result<Self> {
        let parsed = HeaderParser::parse(reader)?;
        let header = parsed.header;

        let date_run = header.str_field(Header::CONFIG, "DateRun")?;
        let base = base_time(date_run)?;
        let nprof = header.int_field(Header::CONFIG, "NbOfProfilesPerFile")?;
        if nprof < 0 {
            return Err(RawError::MalformedHeader(format!(
                "negative NbOfProfilesPerFile: {nprof}"
            )));
        }
        let nprof = nprof as usize;

        reader.seek(SeekFrom::Start(parsed.payload_start))?;

        let blind = RawBlock::read_from(reader).map_err(|e| truncation(e, nprof, 0))?;

        let mut profiles = Vec::with_capacity(nprof);
        for n in 0..nprof {
            let mut stamp = [0u8; TIME_STAMP_LEN];
            reader
                .read_exact(&mut stamp)
                .map_err(|e| truncation(e.into(), nprof, n))?;
            let time = base + i64::from(decode_time(&stamp)?);
            let block = RawBlock::read_from(reader).map_err(|e| truncation(e, nprof, n))?;
            profiles.push(Profile::new(time, block));
        }

        Ok(RawFile {
            header,
            blind,
            profiles,
        })
    }

    /// Timestamp of the first profile.
    pub fn start_time(&self) -> Option<i64> {
        self.profiles.first().map(|p| p.time)
    }

    /// Timestamp of the last profile.
    pub fn end_time(&self) -> Option<i64> {
        self.profiles.last().map(|p| p.time)
    }
}

fn truncation(err: RawError, expected: usize, got: usize) -> RawError {
    match err {
        RawError::Io(e) if e.kind() == ErrorKind::UnexpectedEof => {
            RawError::TruncatedFile { expected, got }
        }
        other => other,
    }
}
