// src/utils/timecode.rs
use crate::error::{RawError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Length of the ASCII `HH-MM-SS` stamp preceding every data block.
pub const TIME_STAMP_LEN: usize = 8;

/// Decode an 8-byte ASCII `HH-MM-SS` stamp into seconds since midnight.
///
/// Only the digit pairs are interpreted; the separator bytes are not
/// validated, matching the instrument's writer which always emits `-`.
pub fn decode_time(bytes: &[u8]) -> Result<u32> {
    if bytes.len() != TIME_STAMP_LEN {
        return Err(RawError::InvalidTimeString(
            String::from_utf8_lossy(bytes).into_owned(),
        ));
    }
    let h = digit_pair(bytes, 0)?;
    let m = digit_pair(bytes, 3)?;
    let s = digit_pair(bytes, 6)?;
    Ok(h * 3600 + m * 60 + s)
}

fn digit_pair(bytes: &[u8], at: usize) -> Result<u32> {
    let (a, b) = (bytes[at], bytes[at + 1]);
    if !a.is_ascii_digit() || !b.is_ascii_digit() {
        return Err(RawError::InvalidTimeString(
            String::from_utf8_lossy(bytes).into_owned(),
        ));
    }
    Ok((a - b'0') as u32 * 10 + (b - b'0') as u32)
}

/// Encode a unix timestamp as the 8-byte `HH-MM-SS` stamp (UTC time of day).
pub fn encode_time(t: i64) -> Result<[u8; 8]> {
    let s = fmt_utc(t, "%H-%M-%S")?;
    let mut out = [0u8; 8];
    out.copy_from_slice(s.as_bytes());
    Ok(out)
}

/// Midnight UTC of a `DateRun` header value (`YYYY-MM-DD`).
pub fn base_time(date_run: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(date_run, "%Y-%m-%d")
        .map_err(|_| RawError::MalformedHeader(format!("bad DateRun value {date_run:?}")))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp())
}

/// Format a unix timestamp with a UTC strftime pattern.
pub fn fmt_utc(t: i64, pattern: &str) -> Result<String> {
    let dt: DateTime<Utc> = DateTime::from_timestamp(t, 0)
        .ok_or_else(|| RawError::InvalidTimeString(format!("timestamp {t} out of range")))?;
    Ok(dt.format(pattern).to_string())
}

/// Extract the start timestamp embedded in a raw file name.
///
/// Names follow `_<YYYY-MM-DD_HH-MM-SS>_<HH-MM-SS>.raw`; the start stamp sits
/// at a fixed offset from the end, so arbitrary folder prefixes are fine.
/// Returns `None` for names that do not carry the pattern.
pub fn filename_timestamp(name: &str) -> Option<i64> {
    let bytes = name.as_bytes();
    if bytes.len() < 32 {
        return None;
    }
    let stamp = std::str::from_utf8(&bytes[bytes.len() - 32..bytes.len() - 13]).ok()?;
    let dt = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d_%H-%M-%S").ok()?;
    Some(dt.and_utc().timestamp())
}

/// File name for a reconstructed slice, from its first and last timestamps.
pub fn slice_filename(start: i64, end: i64) -> Result<String> {
    Ok(format!(
        "_{}_{}.raw",
        fmt_utc(start, "%Y-%m-%d_%H-%M-%S")?,
        fmt_utc(end, "%H-%M-%S")?
    ))
}
