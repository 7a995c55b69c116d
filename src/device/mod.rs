//! Device control packets
//!
//! Used by the host driver to query and configure the secondary
//! microcontroller: firmware version, system and channel layout, start/stop of
//! the audio stream and codec/LED settings.
//!
//! # Wire Format
//!
//! ```text
//! offset  size  field
//! 0       2     magic_start ('x', 'i')
//! 2       1     device_cmd
//! 3       1     device_subcmd (padding, sent as zero and ignored)
//! 4       120   payload
//! 124     3     reserved
//! 127     1     magic_stop ('d')
//! ```

use std::ops::Range;

mod codec;
mod packet;
mod payload;
mod types;

pub use codec::{
    check_for_channel_info, check_for_channel_info_request, check_for_hp_volume,
    check_for_input_gain, check_for_null, check_for_phantom_power, check_for_ping,
    check_for_raw_data, check_for_rgb_led, check_for_start, check_for_stop,
    check_for_system_info, check_for_version_check, check_if_fw_version_matches, command_of,
    decode, encode, get_board_version, make_channel_info, make_channel_info_request,
    make_default, make_hp_volume, make_input_gain, make_phantom_power, make_ping, make_raw_data,
    make_rgb_led, make_start, make_stop, make_system_info, make_system_info_query,
    make_version_query, make_version_reply, peek_command, validate_framing,
};
pub use packet::DeviceCtrlPkt;
pub use payload::{
    ChannelInfo, ChannelInfoData, ChannelInfoRequest, DevicePayload, InputGain, PhantomPower,
    RawData, RgbLed, RgbLedValue, SystemInfo, VersionData,
};
pub use types::{ChannelDirection, DeviceCommand, SampleFormat};

/// Start sentinel: "xi"
pub const MAGIC_START: [u8; 2] = *b"xi";

/// Stop sentinel: 'd'
pub const MAGIC_STOP: u8 = b'd';

/// Bytes of payload carried by every packet
pub const DEVICE_CTRL_PKT_PAYLOAD_SIZE: usize = 120;

/// Total packet size in bytes
pub const DEVICE_CTRL_PKT_SIZE: usize = 128;

/// Total packet size in 32-bit words
pub const DEVICE_CTRL_PKT_SIZE_WORDS: usize = 32;

/// Hat name slot size, terminator included
pub const HAT_NAME_SIZE: usize = 32;

/// Audio channel name slot size, terminator included
pub const AUDIO_CHANNEL_NAME_SIZE: usize = 32;

/// System info flag: the board exposes a USB connected microcontroller
pub const SYSTEM_INFO_FLAGS_HAS_MICROCONTROLLER_USB: u32 = 0x0000_0001;

/// Channel id marking a channel that does not exist
pub const AUDIO_CHANNEL_NOT_VALID: u8 = 255;

pub(crate) const MAGIC_START_RANGE: Range<usize> = 0..2;
pub(crate) const DEVICE_CMD_OFFSET: usize = 2;
pub(crate) const DEVICE_SUBCMD_OFFSET: usize = 3;
pub(crate) const PAYLOAD_RANGE: Range<usize> = 4..4 + DEVICE_CTRL_PKT_PAYLOAD_SIZE;
pub(crate) const RESERVED_RANGE: Range<usize> = PAYLOAD_RANGE.end..PAYLOAD_RANGE.end + 3;
pub(crate) const MAGIC_STOP_OFFSET: usize = RESERVED_RANGE.end;

const _: () = assert!(MAGIC_START_RANGE.end == DEVICE_CMD_OFFSET);
const _: () = assert!(DEVICE_SUBCMD_OFFSET + 1 == PAYLOAD_RANGE.start);
const _: () = assert!(MAGIC_STOP_OFFSET + 1 == DEVICE_CTRL_PKT_SIZE);
const _: () = assert!(DEVICE_CTRL_PKT_SIZE / 4 == DEVICE_CTRL_PKT_SIZE_WORDS);
const _: () = assert!(DEVICE_CTRL_PKT_SIZE % 4 == 0);
