//! Payload views of the device packet
//!
//! Field layouts follow the microcontroller firmware's structs with natural
//! alignment, little-endian. Views shorter than the 120 byte payload leave the
//! remaining bytes zero.

use bytes::{Buf, BufMut};

use super::{
    AUDIO_CHANNEL_NAME_SIZE, AUDIO_CHANNEL_NOT_VALID, ChannelDirection,
    DEVICE_CTRL_PKT_PAYLOAD_SIZE as PAYLOAD_SIZE, DeviceCommand, HAT_NAME_SIZE,
    SYSTEM_INFO_FLAGS_HAS_MICROCONTROLLER_USB, SampleFormat,
};
use crate::{Error, Result, wire};

/// Fixed-layout structure stored at the start of the payload
trait View: Sized {
    /// Bytes occupied in the payload
    const SIZE: usize;

    fn read(buf: &mut impl Buf) -> Result<Self>;

    fn write(&self, buf: &mut impl BufMut);
}

const _: () = assert!(<VersionData as View>::SIZE <= PAYLOAD_SIZE);
const _: () = assert!(<SystemInfo as View>::SIZE <= PAYLOAD_SIZE);
const _: () = assert!(<ChannelInfoRequest as View>::SIZE <= PAYLOAD_SIZE);
const _: () = assert!(<ChannelInfo as View>::SIZE <= PAYLOAD_SIZE);
const _: () = assert!(<InputGain as View>::SIZE <= PAYLOAD_SIZE);
const _: () = assert!(<RgbLed as View>::SIZE <= PAYLOAD_SIZE);
const _: () = assert!(<PhantomPower as View>::SIZE <= PAYLOAD_SIZE);
// shared with the firmware, which requires word sized structs
const _: () = assert!(<SystemInfo as View>::SIZE % 4 == 0);
const _: () = assert!(<ChannelInfo as View>::SIZE % 4 == 0);

/// Firmware version carried by a version check reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VersionData {
    /// Major version
    pub major: u8,
    /// Minor version
    pub minor: u8,
    /// Board revision
    pub board: u8,
}

impl View for VersionData {
    const SIZE: usize = 3;

    fn read(buf: &mut impl Buf) -> Result<Self> {
        Ok(Self {
            major: buf.get_u8(),
            minor: buf.get_u8(),
            board: buf.get_u8(),
        })
    }

    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.major);
        buf.put_u8(self.minor);
        buf.put_u8(self.board);
    }
}

/// System description sent by the device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemInfo {
    /// Null-terminated hat name
    pub hat_name: [u8; HAT_NAME_SIZE],
    /// `SYSTEM_INFO_FLAGS_*` bits
    pub flags: u32,
    /// Sampling rate in Hz
    pub sampling_rate: u32,
    /// Number of audio input channels
    pub num_audio_inputs: u8,
    /// Number of audio output channels
    pub num_audio_outputs: u8,
    /// Number of MIDI input ports
    pub num_midi_inputs: u8,
    /// Number of MIDI output ports
    pub num_midi_outputs: u8,
}

impl SystemInfo {
    /// System info for the named hat, every other field zero
    ///
    /// The name must leave room for its terminator.
    pub fn new(hat_name: &str) -> Result<Self> {
        Ok(Self {
            hat_name: wire::encode_name(hat_name, "hat_name")?,
            ..Self::default()
        })
    }

    /// Hat name without terminator
    pub fn hat_name_str(&self) -> Result<&str> {
        wire::decode_name(&self.hat_name, "hat_name")
    }

    /// Whether the board exposes a USB connected microcontroller
    #[must_use]
    pub const fn has_microcontroller_usb(&self) -> bool {
        self.flags & SYSTEM_INFO_FLAGS_HAS_MICROCONTROLLER_USB != 0
    }
}

impl View for SystemInfo {
    const SIZE: usize = HAT_NAME_SIZE + 4 + 4 + 4;

    fn read(buf: &mut impl Buf) -> Result<Self> {
        let mut hat_name = [0u8; HAT_NAME_SIZE];
        buf.copy_to_slice(&mut hat_name);
        Ok(Self {
            hat_name,
            flags: buf.get_u32_le(),
            sampling_rate: buf.get_u32_le(),
            num_audio_inputs: buf.get_u8(),
            num_audio_outputs: buf.get_u8(),
            num_midi_inputs: buf.get_u8(),
            num_midi_outputs: buf.get_u8(),
        })
    }

    fn write(&self, buf: &mut impl BufMut) {
        buf.put_slice(&self.hat_name);
        buf.put_u32_le(self.flags);
        buf.put_u32_le(self.sampling_rate);
        buf.put_u8(self.num_audio_inputs);
        buf.put_u8(self.num_audio_outputs);
        buf.put_u8(self.num_midi_inputs);
        buf.put_u8(self.num_midi_outputs);
    }
}

/// Host request for the layout of one audio channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelInfoRequest {
    /// Audio buffer size in frames
    pub buffer_size_in_frames: u32,
    /// Software channel id
    pub sw_ch_id: u8,
    /// Channel direction
    pub direction: ChannelDirection,
}

impl View for ChannelInfoRequest {
    // two bytes of trailing alignment padding
    const SIZE: usize = 8;

    fn read(buf: &mut impl Buf) -> Result<Self> {
        let buffer_size_in_frames = buf.get_u32_le();
        let sw_ch_id = buf.get_u8();
        let direction = ChannelDirection::try_from(buf.get_u8())?;
        Ok(Self {
            buffer_size_in_frames,
            sw_ch_id,
            direction,
        })
    }

    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u32_le(self.buffer_size_in_frames);
        buf.put_u8(self.sw_ch_id);
        buf.put_u8(self.direction as u8);
    }
}

/// Device reply describing one audio channel
///
/// Direction and sample format are kept as raw bytes: a reply for a channel
/// that does not exist carries [`AUDIO_CHANNEL_NOT_VALID`] ids and leaves them
/// unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelInfo {
    /// Software channel id
    pub sw_ch_id: u8,
    /// Hardware channel id
    pub hw_ch_id: u8,
    /// Raw [`ChannelDirection`]
    pub direction: u8,
    /// Raw [`SampleFormat`]
    pub sample_format: u8,
    /// Null-terminated channel name
    pub channel_name: [u8; AUDIO_CHANNEL_NAME_SIZE],
    /// Offset of the channel's first sample, in words
    pub start_offset_in_words: u32,
    /// Distance between consecutive samples, in words
    pub stride_in_words: u32,
}

impl ChannelInfo {
    /// Describe an existing channel
    pub fn new(
        sw_ch_id: u8,
        hw_ch_id: u8,
        direction: ChannelDirection,
        sample_format: SampleFormat,
        name: &str,
        start_offset_in_words: u32,
        stride_in_words: u32,
    ) -> Result<Self> {
        Ok(Self {
            sw_ch_id,
            hw_ch_id,
            direction: direction as u8,
            sample_format: sample_format as u8,
            channel_name: wire::encode_name(name, "channel_name")?,
            start_offset_in_words,
            stride_in_words,
        })
    }

    /// Reply for a channel the device does not have
    #[must_use]
    pub const fn not_valid() -> Self {
        Self {
            sw_ch_id: AUDIO_CHANNEL_NOT_VALID,
            hw_ch_id: AUDIO_CHANNEL_NOT_VALID,
            direction: 0,
            sample_format: 0,
            channel_name: [0; AUDIO_CHANNEL_NAME_SIZE],
            start_offset_in_words: 0,
            stride_in_words: 0,
        }
    }

    /// Whether the reply describes an existing channel
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.sw_ch_id != AUDIO_CHANNEL_NOT_VALID && self.hw_ch_id != AUDIO_CHANNEL_NOT_VALID
    }

    /// Channel direction
    pub fn direction(&self) -> Result<ChannelDirection> {
        ChannelDirection::try_from(self.direction)
    }

    /// Sample format
    pub fn sample_format(&self) -> Result<SampleFormat> {
        SampleFormat::try_from(self.sample_format)
    }

    /// Channel name without terminator
    pub fn channel_name_str(&self) -> Result<&str> {
        wire::decode_name(&self.channel_name, "channel_name")
    }
}

impl View for ChannelInfo {
    const SIZE: usize = 4 + AUDIO_CHANNEL_NAME_SIZE + 4 + 4;

    fn read(buf: &mut impl Buf) -> Result<Self> {
        let sw_ch_id = buf.get_u8();
        let hw_ch_id = buf.get_u8();
        let direction = buf.get_u8();
        let sample_format = buf.get_u8();
        let mut channel_name = [0u8; AUDIO_CHANNEL_NAME_SIZE];
        buf.copy_to_slice(&mut channel_name);
        Ok(Self {
            sw_ch_id,
            hw_ch_id,
            direction,
            sample_format,
            channel_name,
            start_offset_in_words: buf.get_u32_le(),
            stride_in_words: buf.get_u32_le(),
        })
    }

    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.sw_ch_id);
        buf.put_u8(self.hw_ch_id);
        buf.put_u8(self.direction);
        buf.put_u8(self.sample_format);
        buf.put_slice(&self.channel_name);
        buf.put_u32_le(self.start_offset_in_words);
        buf.put_u32_le(self.stride_in_words);
    }
}

/// Input gain change for one jack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputGain {
    /// Value copied to the codec gain register
    pub gain_val: u32,
    /// Jack the gain applies to
    pub jack_id: u32,
}

impl View for InputGain {
    const SIZE: usize = 8;

    fn read(buf: &mut impl Buf) -> Result<Self> {
        Ok(Self {
            gain_val: buf.get_u32_le(),
            jack_id: buf.get_u32_le(),
        })
    }

    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u32_le(self.gain_val);
        buf.put_u32_le(self.jack_id);
    }
}

/// Value written to an RGB LED
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RgbLedValue {
    /// Overall brightness
    pub brightness: u8,
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

/// RGB LED update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RgbLed {
    /// LED to control
    pub led_id: u32,
    /// Value to set
    pub value: RgbLedValue,
}

impl View for RgbLed {
    const SIZE: usize = 8;

    fn read(buf: &mut impl Buf) -> Result<Self> {
        Ok(Self {
            led_id: buf.get_u32_le(),
            value: RgbLedValue {
                brightness: buf.get_u8(),
                r: buf.get_u8(),
                g: buf.get_u8(),
                b: buf.get_u8(),
            },
        })
    }

    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u32_le(self.led_id);
        buf.put_u8(self.value.brightness);
        buf.put_u8(self.value.r);
        buf.put_u8(self.value.g);
        buf.put_u8(self.value.b);
    }
}

/// Phantom power switch for one jack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhantomPower {
    /// Jack to switch
    pub jack_id: u32,
    /// Whether 48V is applied
    pub enabled: bool,
}

impl View for PhantomPower {
    const SIZE: usize = 8;

    fn read(buf: &mut impl Buf) -> Result<Self> {
        let jack_id = buf.get_u32_le();
        let enabled = match buf.get_u32_le() {
            0 => false,
            1 => true,
            value => {
                return Err(Error::InvalidField {
                    field: "phantom_power.enabled",
                    value,
                });
            }
        };
        Ok(Self { jack_id, enabled })
    }

    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u32_le(self.jack_id);
        buf.put_u32_le(u32::from(self.enabled));
    }
}

/// Opaque byte blob filling the whole payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct RawData {
    bytes: [u8; PAYLOAD_SIZE],
}

impl RawData {
    /// Copy `bytes` into the payload, zero padding the rest
    ///
    /// Fails without copying anything if `bytes` is longer than the payload.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        let mut data = Self::default();
        wire::copy_bounded(&mut data.bytes, bytes, "raw_data")?;
        Ok(data)
    }

    /// The whole payload region
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; PAYLOAD_SIZE] {
        &self.bytes
    }
}

impl Default for RawData {
    fn default() -> Self {
        Self {
            bytes: [0; PAYLOAD_SIZE],
        }
    }
}

impl TryFrom<Vec<u8>> for RawData {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::new(&bytes)
    }
}

impl From<RawData> for Vec<u8> {
    fn from(data: RawData) -> Self {
        data.bytes.to_vec()
    }
}

/// Payload of an audio channel info packet
///
/// Requests and replies share the command and nothing on the wire tells them
/// apart, so the region is kept as received and read as either view on
/// demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct ChannelInfoData {
    bytes: [u8; PAYLOAD_SIZE],
}

impl ChannelInfoData {
    /// Region holding a host request
    #[must_use]
    pub fn from_request(request: &ChannelInfoRequest) -> Self {
        Self::from_view(request)
    }

    /// Region holding a device reply
    #[must_use]
    pub fn from_info(info: &ChannelInfo) -> Self {
        Self::from_view(info)
    }

    /// Read the region as a host request
    ///
    /// Fails if the direction byte is not a [`ChannelDirection`].
    pub fn request(&self) -> Result<ChannelInfoRequest> {
        ChannelInfoRequest::read(&mut &self.bytes[..])
    }

    /// Read the region as a device reply
    pub fn info(&self) -> Result<ChannelInfo> {
        ChannelInfo::read(&mut &self.bytes[..])
    }

    /// The region as carried on the wire
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; PAYLOAD_SIZE] {
        &self.bytes
    }

    fn from_view(view: &impl View) -> Self {
        let mut bytes = [0u8; PAYLOAD_SIZE];
        let mut buf = &mut bytes[..];
        view.write(&mut buf);
        Self { bytes }
    }
}

impl Default for ChannelInfoData {
    fn default() -> Self {
        Self {
            bytes: [0; PAYLOAD_SIZE],
        }
    }
}

impl TryFrom<Vec<u8>> for ChannelInfoData {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        let mut data = Self::default();
        wire::copy_bounded(&mut data.bytes, &bytes, "channel_info")?;
        Ok(data)
    }
}

impl From<ChannelInfoData> for Vec<u8> {
    fn from(data: ChannelInfoData) -> Self {
        data.bytes.to_vec()
    }
}

/// Command together with its payload view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DevicePayload {
    /// No command
    #[default]
    Null,
    /// Ping code
    Ping(u32),
    /// Start with the given buffer size
    Start(u32),
    /// Stop; no payload
    Stop,
    /// Input gain change
    InputGain(InputGain),
    /// Headphone volume register value
    HpVolume(u32),
    /// RGB LED update
    RgbLed(RgbLed),
    /// Phantom power switch
    PhantomPower(PhantomPower),
    /// Version query (all zero) or reply
    Version(VersionData),
    /// System info query (all zero) or reply
    SystemInfo(SystemInfo),
    /// Channel info request or reply
    ChannelInfo(ChannelInfoData),
    /// Opaque bytes
    RawData(RawData),
}

impl DevicePayload {
    /// Command tag of this view
    #[must_use]
    pub const fn command(&self) -> DeviceCommand {
        match self {
            Self::Null => DeviceCommand::Null,
            Self::Ping(_) => DeviceCommand::Ping,
            Self::Start(_) => DeviceCommand::Start,
            Self::Stop => DeviceCommand::Stop,
            Self::InputGain(_) => DeviceCommand::ChangeInputGain,
            Self::HpVolume(_) => DeviceCommand::ChangeHpVolume,
            Self::RgbLed(_) => DeviceCommand::SetRgbLedValue,
            Self::PhantomPower(_) => DeviceCommand::SetPhantomPower,
            Self::Version(_) => DeviceCommand::FirmwareVersionCheck,
            Self::SystemInfo(_) => DeviceCommand::SystemInfo,
            Self::ChannelInfo(_) => DeviceCommand::AudioChannelInfo,
            Self::RawData(_) => DeviceCommand::RawData,
        }
    }

    /// Interpret a payload region as the view registered for `command`
    pub fn view_as(command: DeviceCommand, payload: &[u8; PAYLOAD_SIZE]) -> Result<Self> {
        let mut buf = &payload[..];
        Ok(match command {
            DeviceCommand::Null => Self::Null,
            DeviceCommand::Ping => Self::Ping(buf.get_u32_le()),
            DeviceCommand::Start => Self::Start(buf.get_u32_le()),
            DeviceCommand::Stop => Self::Stop,
            DeviceCommand::ChangeInputGain => Self::InputGain(InputGain::read(&mut buf)?),
            DeviceCommand::ChangeHpVolume => Self::HpVolume(buf.get_u32_le()),
            DeviceCommand::SetRgbLedValue => Self::RgbLed(RgbLed::read(&mut buf)?),
            DeviceCommand::SetPhantomPower => Self::PhantomPower(PhantomPower::read(&mut buf)?),
            DeviceCommand::FirmwareVersionCheck => Self::Version(VersionData::read(&mut buf)?),
            DeviceCommand::SystemInfo => Self::SystemInfo(SystemInfo::read(&mut buf)?),
            DeviceCommand::AudioChannelInfo => {
                Self::ChannelInfo(ChannelInfoData { bytes: *payload })
            }
            DeviceCommand::RawData => Self::RawData(RawData { bytes: *payload }),
        })
    }

    /// Serialize the view into a zeroed payload region
    #[must_use]
    pub fn to_payload_bytes(&self) -> [u8; PAYLOAD_SIZE] {
        let mut payload = [0u8; PAYLOAD_SIZE];
        let mut buf = &mut payload[..];
        match self {
            Self::Null | Self::Stop => {}
            Self::Ping(value) | Self::Start(value) | Self::HpVolume(value) => {
                buf.put_u32_le(*value);
            }
            Self::InputGain(data) => data.write(&mut buf),
            Self::RgbLed(data) => data.write(&mut buf),
            Self::PhantomPower(data) => data.write(&mut buf),
            Self::Version(data) => data.write(&mut buf),
            Self::SystemInfo(data) => data.write(&mut buf),
            Self::ChannelInfo(data) => buf.put_slice(data.as_bytes()),
            Self::RawData(data) => buf.put_slice(data.as_bytes()),
        }
        payload
    }
}
