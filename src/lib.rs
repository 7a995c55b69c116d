//! Audio control protocol - fixed-size control packets between an audio host and
//! its secondary microcontroller
//!
//! Two packet families travel over the same byte-oriented link (UART/SPI):
//!
//! - [`audio`] packets (`'m' 'd' ... 'z'`, 152 bytes) carry mute/unmute/cease
//!   commands, MIDI bytes and GPIO blobs together with timing error and CV gate
//!   state.
//! - [`device`] packets (`'x' 'i' ... 'd'`, 128 bytes) carry device management
//!   commands: ping, version check, system and channel info, start/stop, gain,
//!   volume, LED and phantom power control.
//!
//! # Quick Start
//!
//! ```rust
//! use audio_ctrl::device;
//!
//! // Host side: ask the board to start with 256 frame buffers
//! let pkt = device::make_start(256);
//! let bytes = device::encode(&pkt);
//!
//! // Device side: validate, decode and dispatch
//! assert!(device::validate_framing(&bytes));
//! let received = device::decode(&bytes)?;
//! assert_eq!(device::check_for_start(&received), Some(256));
//! assert!(!device::check_for_stop(&received));
//! # Ok::<(), audio_ctrl::Error>(())
//! ```
//!
//! # Wire Compatibility
//!
//! Both ends must agree on the protocol version out of band. This crate pins
//! version [`PROTOCOL_VERSION`]; all multi-byte fields are little-endian. The
//! audio packet's CRC slot is carried but never computed here.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

use std::fmt;

pub mod audio;
pub mod device;
mod error;
mod sequence;
mod wire;

pub use error::{Error, Result};
pub use sequence::SequenceCounter;

/// Protocol version implemented by this crate (major, minor, revision)
pub const PROTOCOL_VERSION: (u8, u8, u8) = (0, 4, 1);

/// Packet family, identified on the wire by its sentinel bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PacketFamily {
    /// Audio control packets (`'m' 'd' ... 'z'`)
    Audio,
    /// Device control packets (`'x' 'i' ... 'd'`)
    Device,
}

impl PacketFamily {
    /// Fixed wire size of the family's packets
    #[must_use]
    pub const fn packet_size(self) -> usize {
        match self {
            Self::Audio => audio::AUDIO_CTRL_PKT_SIZE,
            Self::Device => device::DEVICE_CTRL_PKT_SIZE,
        }
    }

    /// Start sentinel
    #[must_use]
    pub const fn magic_start(self) -> [u8; 2] {
        match self {
            Self::Audio => audio::MAGIC_START,
            Self::Device => device::MAGIC_START,
        }
    }

    /// Stop sentinel
    #[must_use]
    pub const fn magic_stop(self) -> u8 {
        match self {
            Self::Audio => audio::MAGIC_STOP,
            Self::Device => device::MAGIC_STOP,
        }
    }

    /// Identify the family of a buffer from its start sentinel
    ///
    /// Only the first two bytes are inspected; the buffer must still pass the
    /// family's framing check before anything else is trusted.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        let start = bytes.get(0..2)?;
        [Self::Audio, Self::Device]
            .into_iter()
            .find(|family| start == family.magic_start())
    }
}

impl fmt::Display for PacketFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Audio => "audio",
            Self::Device => "device",
        };
        write!(f, "{name}")
    }
}
