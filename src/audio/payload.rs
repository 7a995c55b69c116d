//! Payload views of the audio packet
//!
//! The 128 byte payload region is interpreted according to the command. Each
//! command owns exactly one view; [`AudioPayload`] ties the two together so a
//! packet can never carry MIDI bytes under a GPIO command or vice versa.

use super::{
    AUDIO_CTRL_PKT_PAYLOAD_SIZE as PAYLOAD_SIZE, AudioCommand, GPIO_DATA_BLOB_SIZE,
    MAX_NUM_GPIO_DATA_BLOBS,
};
use crate::{Result, wire};

/// One GPIO data blob as produced by the GPIO controller firmware
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpioBlob(pub [u8; GPIO_DATA_BLOB_SIZE]);

impl GpioBlob {
    /// Build a blob from at most [`GPIO_DATA_BLOB_SIZE`] bytes, zero padded
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let mut blob = [0u8; GPIO_DATA_BLOB_SIZE];
        wire::copy_bounded(&mut blob, data, "gpio_data_blob")?;
        Ok(Self(blob))
    }

    /// Blob contents
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; GPIO_DATA_BLOB_SIZE] {
        &self.0
    }
}

/// GPIO blob array view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<GpioBlob>", into = "Vec<GpioBlob>")
)]
pub struct GpioData {
    blobs: [GpioBlob; MAX_NUM_GPIO_DATA_BLOBS],
    count: u8,
}

impl GpioData {
    /// Pack `blobs` into the payload slots
    ///
    /// Fails without copying anything if there are more blobs than slots.
    pub fn new(blobs: &[GpioBlob]) -> Result<Self> {
        let count = check_count(blobs.len(), MAX_NUM_GPIO_DATA_BLOBS, "gpio_data_blobs")?;
        let mut data = Self {
            count,
            ..Self::default()
        };
        data.blobs[..blobs.len()].copy_from_slice(blobs);
        Ok(data)
    }

    /// Number of valid blobs
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.count
    }

    /// The valid blobs
    #[must_use]
    pub fn blobs(&self) -> &[GpioBlob] {
        &self.blobs[..usize::from(self.count)]
    }

    /// Every slot of the payload, unused ones zeroed
    #[must_use]
    pub const fn slots(&self) -> &[GpioBlob; MAX_NUM_GPIO_DATA_BLOBS] {
        &self.blobs
    }

    fn read(count: u8, payload: &[u8; PAYLOAD_SIZE]) -> Result<Self> {
        let count = check_count(usize::from(count), MAX_NUM_GPIO_DATA_BLOBS, "gpio_data_blobs")?;
        let mut data = Self {
            count,
            ..Self::default()
        };
        for (slot, chunk) in data
            .blobs
            .iter_mut()
            .zip(payload.chunks_exact(GPIO_DATA_BLOB_SIZE))
            .take(usize::from(count))
        {
            slot.0.copy_from_slice(chunk);
        }
        Ok(data)
    }

    fn write(&self, payload: &mut [u8; PAYLOAD_SIZE]) {
        for (chunk, blob) in payload
            .chunks_exact_mut(GPIO_DATA_BLOB_SIZE)
            .zip(self.blobs())
        {
            chunk.copy_from_slice(&blob.0);
        }
    }
}

/// MIDI byte stream view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct MidiData {
    bytes: [u8; PAYLOAD_SIZE],
    len: u8,
}

impl MidiData {
    /// Copy `bytes` into the payload
    ///
    /// Fails without copying anything if `bytes` is longer than the payload.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        let len = check_count(bytes.len(), PAYLOAD_SIZE, "midi_data")?;
        let mut data = Self {
            len,
            ..Self::default()
        };
        data.bytes[..bytes.len()].copy_from_slice(bytes);
        Ok(data)
    }

    /// Number of valid MIDI bytes
    #[must_use]
    pub const fn len(&self) -> u8 {
        self.len
    }

    /// Whether no MIDI bytes are carried
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The valid MIDI bytes
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    /// The whole payload region, including bytes past `len`
    #[must_use]
    pub const fn region(&self) -> &[u8; PAYLOAD_SIZE] {
        &self.bytes
    }

    fn read(len: u8, payload: &[u8; PAYLOAD_SIZE]) -> Result<Self> {
        let len = usize::from(len);
        check_count(len, PAYLOAD_SIZE, "midi_data")?;
        Self::new(&payload[..len])
    }
}

impl TryFrom<Vec<GpioBlob>> for GpioData {
    type Error = crate::Error;

    fn try_from(blobs: Vec<GpioBlob>) -> Result<Self> {
        Self::new(&blobs)
    }
}

impl From<GpioData> for Vec<GpioBlob> {
    fn from(data: GpioData) -> Self {
        data.blobs().to_vec()
    }
}

impl TryFrom<Vec<u8>> for MidiData {
    type Error = crate::Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::new(&bytes)
    }
}

impl From<MidiData> for Vec<u8> {
    fn from(data: MidiData) -> Self {
        data.as_slice().to_vec()
    }
}

impl Default for MidiData {
    fn default() -> Self {
        Self {
            bytes: [0; PAYLOAD_SIZE],
            len: 0,
        }
    }
}

/// Command together with its payload view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AudioPayload {
    /// No command
    #[default]
    Null,
    /// Mute request; no payload
    Mute,
    /// Unmute request; no payload
    Unmute,
    /// Cease request; no payload
    Cease,
    /// GPIO blobs
    GpioData(GpioData),
    /// MIDI bytes
    MidiData(MidiData),
}

impl AudioPayload {
    /// Command tag of this view
    #[must_use]
    pub const fn command(&self) -> AudioCommand {
        match self {
            Self::Null => AudioCommand::Null,
            Self::Mute => AudioCommand::Mute,
            Self::Unmute => AudioCommand::Unmute,
            Self::Cease => AudioCommand::Cease,
            Self::GpioData(_) => AudioCommand::GpioData,
            Self::MidiData(_) => AudioCommand::MidiData,
        }
    }

    /// Value travelling in `cmd_lsb`
    #[must_use]
    pub const fn cmd_lsb(&self) -> u8 {
        match self {
            Self::GpioData(data) => data.count(),
            Self::MidiData(data) => data.len(),
            _ => 0,
        }
    }

    /// Interpret a payload region as the view registered for `command`
    ///
    /// `cmd_lsb` supplies the element count of counted views; a count larger
    /// than the view's capacity is rejected.
    pub fn view_as(
        command: AudioCommand,
        cmd_lsb: u8,
        payload: &[u8; PAYLOAD_SIZE],
    ) -> Result<Self> {
        Ok(match command {
            AudioCommand::Null => Self::Null,
            AudioCommand::Mute => Self::Mute,
            AudioCommand::Unmute => Self::Unmute,
            AudioCommand::Cease => Self::Cease,
            AudioCommand::GpioData => Self::GpioData(GpioData::read(cmd_lsb, payload)?),
            AudioCommand::MidiData => Self::MidiData(MidiData::read(cmd_lsb, payload)?),
        })
    }

    /// Serialize the view into a zeroed payload region
    #[must_use]
    pub fn to_payload_bytes(&self) -> [u8; PAYLOAD_SIZE] {
        let mut payload = [0u8; PAYLOAD_SIZE];
        match self {
            Self::GpioData(data) => data.write(&mut payload),
            Self::MidiData(data) => {
                payload[..data.as_slice().len()].copy_from_slice(data.as_slice());
            }
            Self::Null | Self::Mute | Self::Unmute | Self::Cease => {}
        }
        payload
    }
}

fn check_count(requested: usize, max: usize, field: &'static str) -> Result<u8> {
    if requested > max {
        tracing::debug!(field, requested, max, "rejecting oversized payload view");
        return Err(crate::Error::PayloadOverflow {
            field,
            requested,
            max,
        });
    }
    u8::try_from(requested).map_err(|_| crate::Error::PayloadOverflow {
        field,
        requested,
        max: usize::from(u8::MAX),
    })
}
