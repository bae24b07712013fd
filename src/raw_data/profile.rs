// src/raw_data/profile.rs
use crate::raw_data::RawBlock;

/// Number of analogue signal channels at the top of every data block; the
/// remaining rows are photon-count channels.
pub const SIGNAL_CHANNELS: usize = 2;

/// One timestamped measurement cycle: a data block whose first two rows are
/// signal channels and whose remaining rows are photon-count channels.
///
/// The channel split is data-driven from the block's declared row count, not
/// assumed fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Unix timestamp (UTC) of the shot cycle.
    pub time: i64,
    /// The decoded data block.
    pub block: RawBlock,
}

impl Profile {
    pub fn new(time: i64, block: RawBlock) -> Self {
        Profile { time, block }
    }

    pub fn signal(&self, chan: usize) -> Option<&[i32]> {
        if chan < SIGNAL_CHANNELS && chan < self.block.rows() as usize {
            Some(self.block.row(chan))
        } else {
            None
        }
    }

    pub fn photon(&self, chan: usize) -> Option<&[i32]> {
        let row = SIGNAL_CHANNELS + chan;
        if row < self.block.rows() as usize {
            Some(self.block.row(row))
        } else {
            None
        }
    }

    pub fn photon_channels(&self) -> usize {
        (self.block.rows() as usize).saturating_sub(SIGNAL_CHANNELS)
    }

    pub fn samples(&self) -> usize {
        self.block.cols() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(rows: u32, cols: u32) -> Profile {
        let data = (0..(rows * cols) as i32).collect();
        Profile::new(0, RawBlock::new(rows, cols, data))
    }

    #[test]
    fn test_channel_split() {
        let p = profile(4, 3);
        assert_eq!(p.signal(0).unwrap(), &[0, 1, 2]);
        assert_eq!(p.signal(1).unwrap(), &[3, 4, 5]);
        assert_eq!(p.photon(0).unwrap(), &[6, 7, 8]);
        assert_eq!(p.photon(1).unwrap(), &[9, 10, 11]);
        assert!(p.signal(2).is_none());
        assert!(p.photon(2).is_none());
        assert_eq!(p.photon_channels(), 2);
    }

    #[test]
    fn test_data_driven_channel_count() {
        let p = profile(6, 2);
        assert_eq!(p.photon_channels(), 4);
        assert!(p.photon(3).is_some());

        let p = profile(2, 2);
        assert_eq!(p.photon_channels(), 0);
        assert!(p.photon(0).is_none());
    }
}
