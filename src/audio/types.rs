//! Audio command registry

use std::fmt;

/// Audio command codes (`cmd_msb`)
///
/// Values sit outside the range of line noise and printable characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AudioCommand {
    /// No command; packet only carries trailer state
    #[default]
    Null = 0,
    /// Mute the audio outputs
    Mute = 100,
    /// Unmute the audio outputs
    Unmute = 101,
    /// Stop producing audio altogether
    Cease = 102,
    /// Payload carries GPIO data blobs, `cmd_lsb` holds the blob count
    GpioData = 179,
    /// Payload carries MIDI bytes, `cmd_lsb` holds the byte count
    MidiData = 186,
}

impl AudioCommand {
    /// Convert from byte
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Null),
            100 => Some(Self::Mute),
            101 => Some(Self::Unmute),
            102 => Some(Self::Cease),
            179 => Some(Self::GpioData),
            186 => Some(Self::MidiData),
            _ => None,
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AudioCommand {
    type Error = crate::Error;

    fn try_from(value: u8) -> crate::Result<Self> {
        Self::from_u8(value).ok_or(crate::Error::UnknownCommand {
            family: crate::PacketFamily::Audio,
            cmd: value,
        })
    }
}

impl fmt::Display for AudioCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "Null",
            Self::Mute => "Mute",
            Self::Unmute => "Unmute",
            Self::Cease => "Cease",
            Self::GpioData => "GpioData",
            Self::MidiData => "MidiData",
        };
        write!(f, "{name}")
    }
}
