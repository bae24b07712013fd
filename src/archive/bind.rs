// src/archive/bind.rs
use crate::error::{RawError, Result};

/// Forward-fill every profile position with its governing blind boundary.
///
/// `boundaries` holds the archive positions where a blind-reference record
/// was written, in increasing order; each boundary's scope runs until the
/// next boundary, with the last extending to the end of the archive. The
/// result has length `len` and `result[p]` is the greatest boundary `<= p`.
///
/// A single left-to-right scan with a running boundary pointer; positions a
/// degenerate boundary list can never resolve fail with
/// [`RawError::IndexOverflow`] instead of scanning forever.
pub fn bind_index(boundaries: &[usize], len: usize) -> Result<Vec<usize>> {
    if len == 0 {
        return Ok(Vec::new());
    }
    if boundaries.is_empty() {
        return Err(RawError::IndexOverflow(
            "no blind boundaries recorded for a non-empty archive".to_string(),
        ));
    }

    let mut bind = Vec::with_capacity(len);
    let mut b = 0usize;
    for p in 0..len {
        while b + 1 < boundaries.len() && boundaries[b + 1] <= p {
            b += 1;
        }
        if boundaries[b] > p {
            return Err(RawError::IndexOverflow(format!(
                "position {p} precedes the first blind boundary {}",
                boundaries[b]
            )));
        }
        bind.push(boundaries[b]);
    }
    Ok(bind)
}
