//! Device command registry and enumerated payload fields

use std::fmt;

use crate::{Error, PacketFamily, Result};

/// Device command codes (`device_cmd`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DeviceCommand {
    /// No command
    #[default]
    Null = 0,
    /// Liveness check carrying an opaque code
    Ping = 1,
    /// Start audio with the given buffer size
    Start = 123,
    /// Change a jack's input gain
    ChangeInputGain = 124,
    /// Change the headphone volume
    ChangeHpVolume = 125,
    /// Set an RGB LED
    SetRgbLedValue = 126,
    /// Switch phantom power of a jack
    SetPhantomPower = 127,
    /// Firmware version query or reply
    FirmwareVersionCheck = 191,
    /// System information query or reply
    SystemInfo = 192,
    /// Audio channel information request or reply
    AudioChannelInfo = 193,
    /// Stop audio
    Stop = 234,
    /// Opaque bytes filling the payload
    RawData = 254,
}

impl DeviceCommand {
    /// Convert from byte
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Null),
            1 => Some(Self::Ping),
            123 => Some(Self::Start),
            124 => Some(Self::ChangeInputGain),
            125 => Some(Self::ChangeHpVolume),
            126 => Some(Self::SetRgbLedValue),
            127 => Some(Self::SetPhantomPower),
            191 => Some(Self::FirmwareVersionCheck),
            192 => Some(Self::SystemInfo),
            193 => Some(Self::AudioChannelInfo),
            234 => Some(Self::Stop),
            254 => Some(Self::RawData),
            _ => None,
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for DeviceCommand {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_u8(value).ok_or(Error::UnknownCommand {
            family: PacketFamily::Device,
            cmd: value,
        })
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "Null",
            Self::Ping => "Ping",
            Self::Start => "Start",
            Self::ChangeInputGain => "ChangeInputGain",
            Self::ChangeHpVolume => "ChangeHpVolume",
            Self::SetRgbLedValue => "SetRgbLedValue",
            Self::SetPhantomPower => "SetPhantomPower",
            Self::FirmwareVersionCheck => "FirmwareVersionCheck",
            Self::SystemInfo => "SystemInfo",
            Self::AudioChannelInfo => "AudioChannelInfo",
            Self::Stop => "Stop",
            Self::RawData => "RawData",
        };
        write!(f, "{name}")
    }
}

/// Audio channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ChannelDirection {
    /// Capture channel
    Input = 0,
    /// Playback channel
    Output = 1,
}

impl TryFrom<u8> for ChannelDirection {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Input),
            1 => Ok(Self::Output),
            _ => Err(Error::InvalidField {
                field: "direction",
                value: u32::from(value),
            }),
        }
    }
}

/// Sample format of an audio channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SampleFormat {
    /// 24 bit samples, left justified (`0xXXXXXX00`)
    Int24Lj = 1,
    /// 24 bit samples in I2S format; the first bit is always 0
    Int24I2s = 2,
    /// 24 bit samples, right justified (`0x00XXXXXX`)
    Int24Rj = 3,
    /// 24 bit samples converted to 32 bit
    Int24In32Rj = 4,
    /// 32 bit samples
    Int32 = 5,
    /// Binary data; must not be processed as audio
    Binary = 6,
}

impl TryFrom<u8> for SampleFormat {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Int24Lj),
            2 => Ok(Self::Int24I2s),
            3 => Ok(Self::Int24Rj),
            4 => Ok(Self::Int24In32Rj),
            5 => Ok(Self::Int32),
            6 => Ok(Self::Binary),
            _ => Err(Error::InvalidField {
                field: "sample_format",
                value: u32::from(value),
            }),
        }
    }
}
