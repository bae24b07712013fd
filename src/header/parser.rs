// src/header/parser.rs
use crate::error::{RawError, Result};
use crate::header::{FieldValue, Header};
use crate::utils::latin1::{decode_header_line, is_header_text};
use log::{info, warn};
use std::io::{BufRead, Seek, SeekFrom};

/// Maximum header lines scanned before giving up, unless a `HeaderSize`
/// field shrinks the bound mid-parse.
pub const DEFAULT_SCAN_BOUND: usize = 1000;

/// Firmware versions from here on always write `WritingPosition (byte)`.
const WRITING_POSITION_FIRMWARE: u32 = 11200;

/// A parsed text preamble plus the stream offset where binary payload begins.
#[derive(Debug, Clone)]
pub struct ParsedHeader {
    pub header: Header,
    pub payload_start: u64,
}

/// Parser for the hybrid text preamble of a raw file.
///
/// Lines are CRLF-terminated Latin-1; `[Name]` opens a section, `KEY=VALUE`
/// assigns a field in the active section, and uppercase keys route to the
/// global `ConfigSoftware` section (with `VARIABLES` opening its own nested
/// section). Free text before the first marker becomes that section's
/// `Description` field, which models flights predating section markers.
pub struct HeaderParser;

impl HeaderParser {
    pub fn parse<R: BufRead + Seek>(reader: &mut R) -> Result<ParsedHeader> {
        let mut header = Header::new();
        let mut active: Option<String> = None;
        let mut description: Option<String> = None;
        let mut max_lines = DEFAULT_SCAN_BOUND;
        let mut lines = 0usize;
        let mut buf = Vec::with_capacity(128);

        while lines < max_lines {
            let line_start = reader.stream_position()?;
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let content = trim_crlf(&buf);
            if !is_header_text(content) {
                // First binary bytes. Rewind so the payload offset is the end
                // of the last recognized line.
                reader.seek(SeekFrom::Start(line_start))?;
                break;
            }
            lines += 1;

            let text = decode_header_line(content);
            let text = text.trim();

            if let Some((key, raw_value)) = text.split_once('=') {
                let value = FieldValue::coerce(raw_value);
                if key == "HeaderSize" {
                    if let Some(n) = value.as_i64() {
                        max_lines = n.max(0) as usize;
                    }
                }
                if key == key.to_uppercase() {
                    if key == "VARIABLES" {
                        // The name list stays with the section in force; the
                        // per-profile variables that follow get their own.
                        let owner = active.as_deref().unwrap_or(Header::CONFIG);
                        header.section_mut(owner).insert(key, value);
                        header.section_mut("VARIABLES");
                        active = Some("VARIABLES".to_string());
                    } else {
                        header.section_mut(Header::CONFIG).insert(key, value);
                        active = Some(Header::CONFIG.to_string());
                    }
                } else if let Some(section) = &active {
                    header.section_mut(section).insert(key, value);
                } else {
                    return Err(RawError::MalformedHeader(format!(
                        "field {key:?} before any section marker"
                    )));
                }
            } else if let Some(rest) = text.strip_prefix('[') {
                let name = rest.trim_end_matches(']');
                let section = header.section_mut(name);
                if let Some(d) = description.take() {
                    section.insert("Description", FieldValue::Str(d));
                }
                active = Some(name.to_string());
            } else if active.is_none() && !text.is_empty() {
                description = Some(text.to_string());
            }
        }

        if header.is_empty() {
            return Err(RawError::MalformedHeader(format!(
                "no section marker within {lines} lines"
            )));
        }

        let payload_start = match header.int_field(Header::CONFIG, "WritingPosition (byte)") {
            Ok(pos) if pos >= 0 => pos as u64,
            Ok(pos) => {
                return Err(RawError::MalformedHeader(format!(
                    "negative WritingPosition (byte): {pos}"
                )))
            }
            Err(_) => {
                match header.firmware_number() {
                    Ok(v) if v >= WRITING_POSITION_FIRMWARE => {
                        warn!("firmware {v} should carry WritingPosition (byte); using header end")
                    }
                    Ok(v) => info!("firmware {v} predates WritingPosition (byte)"),
                    Err(_) => warn!("cannot determine firmware version; using header end"),
                }
                reader.stream_position()?
            }
        };

        Ok(ParsedHeader {
            header,
            payload_start,
        })
    }
}

fn trim_crlf(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && (line[end - 1] == b'\n' || line[end - 1] == b'\r') {
        end -= 1;
    }
    &line[..end]
}
