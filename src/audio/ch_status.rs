//! Per-channel audio status table shared between host and microcontroller
//!
//! The table is an array of 4 byte entries, one per audio channel, padded to a
//! 16 byte boundary. A channel is muted unless its `UNMUTE` flag is set.

use std::ops::Range;

use crate::{Error, Result};

/// Channel unmute flag
pub const AUDIO_CH_STATUS_FLAGS_UNMUTE: u8 = 0x01;

/// Wire size of one status entry
pub const AUDIO_CH_STATUS_SIZE: usize = 4;

/// Status of one audio channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AudioChStatus {
    /// `AUDIO_CH_STATUS_FLAGS_*` bits
    pub flags: u8,
    /// Reserved for future use
    pub rfu: [u8; 3],
}

impl AudioChStatus {
    /// Whether the channel is muted
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.flags & AUDIO_CH_STATUS_FLAGS_UNMUTE == 0
    }

    /// Convert to bytes
    #[must_use]
    pub const fn to_bytes(self) -> [u8; AUDIO_CH_STATUS_SIZE] {
        [self.flags, self.rfu[0], self.rfu[1], self.rfu[2]]
    }

    /// Parse from bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; AUDIO_CH_STATUS_SIZE]) -> Self {
        Self {
            flags: bytes[0],
            rfu: [bytes[1], bytes[2], bytes[3]],
        }
    }
}

const _: () = assert!(std::mem::size_of::<AudioChStatus>() == AUDIO_CH_STATUS_SIZE);

/// Number of 32-bit words needed for `num_channels` entries, 16 byte aligned
#[must_use]
pub const fn status_array_size_in_words(num_channels: usize) -> usize {
    4 * num_channels.div_ceil(4)
}

/// Number of bytes needed for `num_channels` entries, 16 byte aligned
#[must_use]
pub const fn status_array_size_in_bytes(num_channels: usize) -> usize {
    4 * status_array_size_in_words(num_channels)
}

/// Reset `channels` to muted with cleared reserved bytes
pub fn init_channel_status(table: &mut [AudioChStatus], channels: Range<usize>) -> Result<()> {
    slice_mut(table, channels)?.fill(AudioChStatus::default());
    Ok(())
}

/// Whether channel `index` is muted
pub fn is_channel_muted(table: &[AudioChStatus], index: usize) -> Result<bool> {
    table
        .get(index)
        .map(AudioChStatus::is_muted)
        .ok_or(Error::IndexOutOfRange {
            index,
            len: table.len(),
        })
}

/// Mute or unmute `channels`, returning whether any entry changed
pub fn set_channel_mute(
    table: &mut [AudioChStatus],
    channels: Range<usize>,
    muted: bool,
) -> Result<bool> {
    let mut changed = false;
    for status in slice_mut(table, channels)? {
        let flags = if muted {
            status.flags & !AUDIO_CH_STATUS_FLAGS_UNMUTE
        } else {
            status.flags | AUDIO_CH_STATUS_FLAGS_UNMUTE
        };
        if flags != status.flags {
            status.flags = flags;
            changed = true;
        }
    }
    Ok(changed)
}

fn slice_mut(table: &mut [AudioChStatus], channels: Range<usize>) -> Result<&mut [AudioChStatus]> {
    let len = table.len();
    let index = channels.end;
    table
        .get_mut(channels)
        .ok_or(Error::IndexOutOfRange { index, len })
}
