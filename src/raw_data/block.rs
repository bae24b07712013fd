// src/raw_data/block.rs
use crate::error::{RawError, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Largest plausible block payload, in values. Instrument blocks are a few
/// channels by a few thousand range bins; dimension words implying more than
/// this come from corrupt or misaligned bytes, not from a real file.
const MAX_BLOCK_VALUES: u64 = 1 << 24;

/// A rectangular grid of signed 32-bit big-endian integers, preceded on disk
/// by its dimensions as two unsigned 32-bit words.
///
/// Rows are instrument channels, columns are range-bin samples. The payload
/// is stored flat in file order (row-major over `(rows, cols)`).
///
/// # Example
///
/// ```
/// use als_raw::RawBlock;
/// use std::io::Cursor;
///
/// let block = RawBlock::new(2, 3, vec![1, 2, 3, 4, 5, 6]);
/// let mut bytes = Vec::new();
/// block.write_to(&mut bytes).unwrap();
/// assert_eq!(bytes.len(), 8 + 6 * 4);
///
/// let back = RawBlock::read_from(&mut Cursor::new(&bytes)).unwrap();
/// assert_eq!(back, block);
/// assert_eq!(back.row(1), &[4, 5, 6]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    rows: u32,
    cols: u32,
    data: Vec<i32>,
}

impl RawBlock {
    /// Build a block from its dimensions and flat payload.
    ///
    /// # Panics
    ///
    /// Panics when `data.len() != rows * cols`.
    pub fn new(rows: u32, cols: u32, data: Vec<i32>) -> Self {
        assert_eq!(data.len(), rows as usize * cols as usize);
        RawBlock { rows, cols, data }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// One channel row.
    ///
    /// # Panics
    ///
    /// Panics when `r >= rows`.
    pub fn row(&self, r: usize) -> &[i32] {
        let cols = self.cols as usize;
        &self.data[r * cols..(r + 1) * cols]
    }

    pub fn value(&self, r: usize, c: usize) -> i32 {
        self.row(r)[c]
    }

    /// Read a dimension header and payload from the stream.
    ///
    /// Dimension words whose product exceeds any plausible block size are
    /// rejected as [`RawError::MalformedHeader`] before anything is
    /// allocated, so a corrupt or misaligned file fails like any other
    /// decode error instead of exhausting memory.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let rows = reader.read_u32::<BigEndian>()?;
        let cols = reader.read_u32::<BigEndian>()?;
        if u64::from(rows) * u64::from(cols) > MAX_BLOCK_VALUES {
            return Err(RawError::MalformedHeader(format!(
                "implausible block dimensions {rows}x{cols}"
            )));
        }
        let count = rows as usize * cols as usize;

        let mut bytes = vec![0u8; count * 4];
        reader.read_exact(&mut bytes)?;
        let data = bytes
            .chunks_exact(4)
            .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(RawBlock { rows, cols, data })
    }

    /// Write the dimension header and payload, the exact inverse of
    /// [`RawBlock::read_from`].
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<BigEndian>(self.rows)?;
        writer.write_u32::<BigEndian>(self.cols)?;
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for &v in &self.data {
            bytes.extend_from_slice(&v.to_be_bytes());
        }
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// On-disk size in bytes, dimension header included.
    pub fn byte_len(&self) -> usize {
        8 + self.data.len() * 4
    }
}
