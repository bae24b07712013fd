// src/archive/store.rs
use crate::archive::bind_index;
use crate::error::{RawError, Result};
use crate::header::{FieldValue, Header};
use crate::raw_data::{Profile, RawBlock};
use crate::reader::RawFile;
use crate::utils::timecode::filename_timestamp;
use log::{info, warn};
use std::path::PathBuf;

/// Per-file bookkeeping inside a [`BoundArchive`]: the parsed header, the
/// blind calibration block, and the archive position of the file's first
/// profile (its blind boundary).
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub start: usize,
    pub header: Header,
    pub blind: RawBlock,
}

/// The ordered concatenation of every profile ingested this session, plus
/// the derived blind binding.
///
/// The archive is append-only and strictly time-ordered: a file whose first
/// timestamp does not exceed the last archived timestamp is rejected whole.
/// Each append leaves one blind boundary at the file's first profile
/// position (the original writes a file's blind reference once, at its first
/// slot, rather than smearing it across the file span), and `bind` is
/// re-derived so every position maps to the most recent boundary at or
/// before it.
#[derive(Debug, Clone, Default)]
pub struct BoundArchive {
    profiles: Vec<Profile>,
    records: Vec<FileRecord>,
    bind: Vec<usize>,
}

impl BoundArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn profile(&self, p: usize) -> &Profile {
        &self.profiles[p]
    }

    pub fn time(&self, p: usize) -> i64 {
        self.profiles[p].time
    }

    pub fn last_time(&self) -> Option<i64> {
        self.profiles.last().map(|p| p.time)
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Archive positions that start a blind-reference scope, in order.
    pub fn whereblind(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.start).collect()
    }

    /// The blind binding: `bind()[p]` is the boundary position governing `p`.
    pub fn bind(&self) -> &[usize] {
        &self.bind
    }

    /// Append one decoded file.
    ///
    /// Fails with [`RawError::NonMonotonicAppend`] when the file does not
    /// strictly follow the archive in time; the archive is untouched on any
    /// failure. A file with no profiles is skipped whole, so every recorded
    /// blind boundary starts a non-empty scope.
    pub fn append(&mut self, file: RawFile) -> Result<()> {
        if file.profiles.is_empty() {
            warn!("skipping file with no profiles");
            return Ok(());
        }
        if let (Some(file_start), Some(archive_end)) = (file.start_time(), self.last_time()) {
            if file_start <= archive_end {
                return Err(RawError::NonMonotonicAppend {
                    file_start,
                    archive_end,
                });
            }
        }

        let start = self.profiles.len();
        let mut boundaries = self.whereblind();
        boundaries.push(start);
        let bind = bind_index(&boundaries, start + file.profiles.len())?;

        self.records.push(FileRecord {
            start,
            header: file.header,
            blind: file.blind,
        });
        self.profiles.extend(file.profiles);
        self.bind = bind;
        Ok(())
    }

    /// Ingest every listed `.raw` file that is newer than the archive tail.
    ///
    /// Candidates are ordered by name (the embedded timestamp makes that
    /// chronological) and gated on the filename stamp before any parsing, so
    /// already-archived files are skipped cheaply on re-scan. Names without a
    /// recognizable stamp are skipped with a warning. Returns the number of
    /// files appended.
    pub fn append_newer(&mut self, paths: &[PathBuf]) -> Result<usize> {
        let mut paths: Vec<&PathBuf> = paths.iter().collect();
        paths.sort();

        let mut added = 0;
        for path in paths {
            let name = path.to_string_lossy();
            let Some(stamp) = filename_timestamp(&name) else {
                warn!("skipping {name}: no timestamp in file name");
                continue;
            };
            if self.last_time().is_some_and(|last| stamp <= last) {
                continue;
            }
            self.append(RawFile::open(path)?)?;
            info!("appended {name}");
            added += 1;
        }
        Ok(added)
    }

    /// The record whose blind scope covers position `p`.
    ///
    /// # Panics
    ///
    /// Panics when `p >= len()`.
    pub fn record_for(&self, p: usize) -> &FileRecord {
        let boundary = self.bind[p];
        let idx = self.records.partition_point(|r| r.start <= boundary) - 1;
        &self.records[idx]
    }

    /// `(start, stop)` profile ranges of each blind scope, the last one
    /// running to the end of the archive.
    pub fn record_ranges(&self) -> Vec<(usize, usize)> {
        let bounds = self.whereblind();
        bounds
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let stop = bounds.get(i + 1).copied().unwrap_or(self.profiles.len());
                (start, stop)
            })
            .collect()
    }

    /// Global configuration field, from the first ingested file.
    pub fn config_field(&self, name: &str) -> Result<&FieldValue> {
        let record = self
            .records
            .first()
            .ok_or_else(|| RawError::MissingField(name.to_string()))?;
        record
            .header
            .section(Header::CONFIG)
            .and_then(|s| s.get(name))
            .ok_or_else(|| RawError::MissingField(format!("{}.{name}", Header::CONFIG)))
    }

    /// Header field of the file governing position `p`.
    pub fn header_field(&self, section: &str, name: &str, p: usize) -> Result<&FieldValue> {
        self.record_for(p)
            .header
            .section(section)
            .and_then(|s| s.get(name))
            .ok_or_else(|| RawError::MissingField(format!("{section}.{name}")))
    }

    /// Per-profile auxiliary variable (altitude, position, ...) at `p`, from
    /// the governing file's `VARIABLES` section.
    pub fn variable_value(&self, name: &str, p: usize) -> Result<f64> {
        let record = self.record_for(p);
        let value = record
            .header
            .section("VARIABLES")
            .and_then(|s| s.get(name))
            .ok_or_else(|| RawError::MissingField(format!("VARIABLES.{name}")))?;
        match value {
            FieldValue::FloatSeq(seq) => {
                let local = p - record.start;
                seq.get(local).copied().ok_or_else(|| {
                    RawError::MissingField(format!("VARIABLES.{name} has no value at {p}"))
                })
            }
            other => other
                .as_f64()
                .ok_or_else(|| RawError::MissingField(format!("VARIABLES.{name} is not numeric"))),
        }
    }

    /// Raw signal channel row of the profile at `p`, `None` when either the
    /// channel or the position is out of range.
    pub fn signal_column(&self, chan: usize, p: usize) -> Option<&[i32]> {
        self.profiles.get(p)?.signal(chan)
    }

    /// Raw photon-count channel row of the profile at `p`, `None` when
    /// either the channel or the position is out of range.
    pub fn photon_column(&self, chan: usize, p: usize) -> Option<&[i32]> {
        self.profiles.get(p)?.photon(chan)
    }

    /// Blind calibration channel governing position `p`.
    pub fn blind_column(&self, chan: usize, p: usize) -> Option<&[i32]> {
        let blind = &self.record_for(p).blind;
        if chan < blind.rows() as usize {
            Some(blind.row(chan))
        } else {
            None
        }
    }
}
