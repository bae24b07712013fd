// src/utils/latin1.rs

/// The byte the instrument writes in place of the substring `deg` in unit
/// labels, e.g. `Longitude (\xb0)` for `Longitude (deg)`.
pub const DEGREE_BYTE: u8 = 0xB0;

/// Decode one header line from its on-disk Latin-1 encoding.
///
/// The degree byte is expanded to `deg` so that field names can be matched
/// against the plain-ASCII format table.
pub fn decode_header_line(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if b == DEGREE_BYTE {
            out.push_str("deg");
        } else {
            out.push(b as char);
        }
    }
    out
}

/// Encode one header line back to Latin-1, re-substituting the degree byte.
///
/// Inverse of [`decode_header_line`] for every line this crate itself
/// produced. Characters outside Latin-1 never occur in instrument headers and
/// are replaced with `?`.
pub fn encode_header_line(line: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len());
    let mut rest = line;
    while let Some(idx) = rest.find("deg") {
        for c in rest[..idx].chars() {
            out.push(char_to_latin1(c));
        }
        out.push(DEGREE_BYTE);
        rest = &rest[idx + 3..];
    }
    for c in rest.chars() {
        out.push(char_to_latin1(c));
    }
    out
}

fn char_to_latin1(c: char) -> u8 {
    let code = c as u32;
    if code <= 0xFF {
        code as u8
    } else {
        b'?'
    }
}

/// Whether a line of bytes (CRLF already stripped) can be header text.
///
/// Binary payloads contain control bytes almost immediately (block dimension
/// words start with zero bytes), so this is what ends the header scan for
/// legacy files that carry neither `HeaderSize` nor a writing position.
pub fn is_header_text(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == b'\t' || (0x20..0x7F).contains(&b) || b >= 0xA0)
}
