//! Audio control packets
//!
//! Exchanged once per audio buffer between the host and the microcontroller.
//! Besides the command and its payload every packet carries the timing error
//! between both clocks and the state of the CV gates.
//!
//! # Wire Format
//!
//! ```text
//! offset  size  field
//! 0       2     magic_start ('m', 'd')
//! 2       1     cmd_msb
//! 3       1     cmd_lsb
//! 4       128   payload
//! 132     4     seq
//! 136     4     timing_error
//! 140     4     cv_gate_in
//! 144     4     cv_gate_out
//! 148     1     continuation
//! 149     1     magic_stop ('z')
//! 150     2     crc
//! ```

use std::ops::Range;

mod ch_status;
mod codec;
mod packet;
mod payload;
mod types;

pub use ch_status::{
    AUDIO_CH_STATUS_FLAGS_UNMUTE, AUDIO_CH_STATUS_SIZE, AudioChStatus, init_channel_status,
    is_channel_muted, set_channel_mute, status_array_size_in_bytes, status_array_size_in_words,
};
pub use codec::{
    check_for_cease, check_for_gpio_data, check_for_midi_data, check_for_mute, check_for_unmute,
    command_of, copy_midi_data, decode, encode, get_gpio_blobs, get_midi_data, make_cease,
    make_default, make_gpio, make_midi, make_mute, make_unmute, peek_command, validate_framing,
};
pub use packet::AudioCtrlPkt;
pub use payload::{AudioPayload, GpioBlob, GpioData, MidiData};
pub use types::AudioCommand;

/// Start sentinel: "md"
pub const MAGIC_START: [u8; 2] = *b"md";

/// Stop sentinel: 'z'
pub const MAGIC_STOP: u8 = b'z';

/// Bytes of payload carried by every packet
pub const AUDIO_CTRL_PKT_PAYLOAD_SIZE: usize = 128;

/// Size of one GPIO data blob
pub const GPIO_DATA_BLOB_SIZE: usize = 32;

/// Number of GPIO blobs that fit in the payload
pub const MAX_NUM_GPIO_DATA_BLOBS: usize = AUDIO_CTRL_PKT_PAYLOAD_SIZE / GPIO_DATA_BLOB_SIZE;

/// Number of CV input gates tracked in `cv_gate_in`
pub const MAX_NUM_CV_IN_GATES: usize = 16;

/// Number of CV output gates tracked in `cv_gate_out`
pub const MAX_NUM_CV_OUT_GATES: usize = 16;

/// Total packet size in bytes
pub const AUDIO_CTRL_PKT_SIZE: usize = 152;

/// Total packet size in 32-bit words
pub const AUDIO_CTRL_PKT_SIZE_WORDS: usize = 38;

pub(crate) const MAGIC_START_RANGE: Range<usize> = 0..2;
pub(crate) const CMD_MSB_OFFSET: usize = 2;
pub(crate) const CMD_LSB_OFFSET: usize = 3;
pub(crate) const PAYLOAD_RANGE: Range<usize> = 4..4 + AUDIO_CTRL_PKT_PAYLOAD_SIZE;
pub(crate) const SEQ_RANGE: Range<usize> = PAYLOAD_RANGE.end..PAYLOAD_RANGE.end + 4;
pub(crate) const TIMING_ERROR_RANGE: Range<usize> = SEQ_RANGE.end..SEQ_RANGE.end + 4;
pub(crate) const CV_GATE_IN_RANGE: Range<usize> = TIMING_ERROR_RANGE.end..TIMING_ERROR_RANGE.end + 4;
pub(crate) const CV_GATE_OUT_RANGE: Range<usize> = CV_GATE_IN_RANGE.end..CV_GATE_IN_RANGE.end + 4;
pub(crate) const CONTINUATION_OFFSET: usize = CV_GATE_OUT_RANGE.end;
pub(crate) const MAGIC_STOP_OFFSET: usize = CONTINUATION_OFFSET + 1;
pub(crate) const CRC_RANGE: Range<usize> = MAGIC_STOP_OFFSET + 1..MAGIC_STOP_OFFSET + 3;

const _: () = assert!(MAGIC_START_RANGE.end == CMD_MSB_OFFSET);
const _: () = assert!(CMD_LSB_OFFSET + 1 == PAYLOAD_RANGE.start);
const _: () = assert!(CRC_RANGE.end == AUDIO_CTRL_PKT_SIZE);
const _: () = assert!(AUDIO_CTRL_PKT_SIZE / 4 == AUDIO_CTRL_PKT_SIZE_WORDS);
const _: () = assert!(AUDIO_CTRL_PKT_SIZE % 4 == 0);
const _: () = assert!(
    GPIO_DATA_BLOB_SIZE * MAX_NUM_GPIO_DATA_BLOBS == AUDIO_CTRL_PKT_PAYLOAD_SIZE
);
const _: () = assert!(MAX_NUM_CV_IN_GATES <= 32 && MAX_NUM_CV_OUT_GATES <= 32);
// the count of a payload view travels in cmd_lsb
const _: () = assert!(AUDIO_CTRL_PKT_PAYLOAD_SIZE <= u8::MAX as usize);
