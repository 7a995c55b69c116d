//! Audio control packet layout

use bytes::{Buf, BufMut};

use super::{
    AUDIO_CTRL_PKT_PAYLOAD_SIZE, AUDIO_CTRL_PKT_SIZE, AudioCommand, AudioPayload, CMD_LSB_OFFSET,
    CMD_MSB_OFFSET, MAGIC_START, MAGIC_STOP, MAX_NUM_CV_IN_GATES, MAX_NUM_CV_OUT_GATES,
    PAYLOAD_RANGE, SEQ_RANGE,
};
use crate::{Error, PacketFamily, Result, wire};

/// Audio control packet (152 bytes on the wire)
///
/// Command and payload are fixed at construction; only the trailer fields
/// (timing error, CV gates, continuation, CRC) can be updated afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioCtrlPkt {
    payload: AudioPayload,
    seq: u32,
    timing_error: i32,
    cv_gate_in: u32,
    cv_gate_out: u32,
    continuation: u8,
    crc: u16,
}

impl AudioCtrlPkt {
    /// Create a packet carrying `payload`
    #[must_use]
    pub fn new(payload: AudioPayload, seq: u32) -> Self {
        Self {
            payload,
            seq,
            ..Self::default()
        }
    }

    /// Command tag (`cmd_msb`)
    #[must_use]
    pub const fn command(&self) -> AudioCommand {
        self.payload.command()
    }

    /// Sub-parameter (`cmd_lsb`)
    #[must_use]
    pub const fn cmd_lsb(&self) -> u8 {
        self.payload.cmd_lsb()
    }

    /// Payload view
    #[must_use]
    pub const fn payload(&self) -> &AudioPayload {
        &self.payload
    }

    /// Sequence number
    #[must_use]
    pub const fn seq(&self) -> u32 {
        self.seq
    }

    /// Timing error between the microcontroller and the audio host
    #[must_use]
    pub const fn timing_error(&self) -> i32 {
        self.timing_error
    }

    /// Set timing error
    pub fn set_timing_error(&mut self, timing_error: i32) {
        self.timing_error = timing_error;
    }

    /// CV gate input mask, one bit per gate
    #[must_use]
    pub const fn cv_gate_in(&self) -> u32 {
        self.cv_gate_in
    }

    /// Set CV gate input mask
    pub fn set_cv_gate_in(&mut self, mask: u32) {
        self.cv_gate_in = mask;
    }

    /// CV gate output mask, one bit per gate
    #[must_use]
    pub const fn cv_gate_out(&self) -> u32 {
        self.cv_gate_out
    }

    /// Set CV gate output mask
    pub fn set_cv_gate_out(&mut self, mask: u32) {
        self.cv_gate_out = mask;
    }

    /// State of a single input gate
    pub fn cv_gate_in_state(&self, gate: usize) -> Result<bool> {
        gate_bit(gate, MAX_NUM_CV_IN_GATES).map(|bit| self.cv_gate_in & bit != 0)
    }

    /// Drive a single output gate
    pub fn set_cv_gate_out_state(&mut self, gate: usize, on: bool) -> Result<()> {
        let bit = gate_bit(gate, MAX_NUM_CV_OUT_GATES)?;
        if on {
            self.cv_gate_out |= bit;
        } else {
            self.cv_gate_out &= !bit;
        }
        Ok(())
    }

    /// Packets remaining in the current message
    #[must_use]
    pub const fn continuation(&self) -> u8 {
        self.continuation
    }

    /// Set continuation counter
    pub fn set_continuation(&mut self, continuation: u8) {
        self.continuation = continuation;
    }

    /// CRC slot, carried verbatim
    #[must_use]
    pub const fn crc(&self) -> u16 {
        self.crc
    }

    /// Set CRC slot
    pub fn set_crc(&mut self, crc: u16) {
        self.crc = crc;
    }

    /// Convert to bytes (little-endian)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; AUDIO_CTRL_PKT_SIZE] {
        let mut bytes = [0u8; AUDIO_CTRL_PKT_SIZE];
        let mut buf = &mut bytes[..];

        buf.put_slice(&MAGIC_START);
        buf.put_u8(self.command().as_u8());
        buf.put_u8(self.cmd_lsb());
        buf.put_slice(&self.payload.to_payload_bytes());
        buf.put_u32_le(self.seq);
        buf.put_i32_le(self.timing_error);
        buf.put_u32_le(self.cv_gate_in);
        buf.put_u32_le(self.cv_gate_out);
        buf.put_u8(self.continuation);
        buf.put_u8(MAGIC_STOP);
        buf.put_u16_le(self.crc);
        debug_assert!(buf.is_empty());

        bytes
    }

    /// Parse from bytes (little-endian)
    ///
    /// Framing is checked before any other field is read.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        wire::check_framing(PacketFamily::Audio, bytes)?;

        let command = AudioCommand::try_from(bytes[CMD_MSB_OFFSET]).inspect_err(|_| {
            tracing::debug!(cmd = bytes[CMD_MSB_OFFSET], "rejecting unknown audio command");
        })?;
        let mut payload = [0u8; AUDIO_CTRL_PKT_PAYLOAD_SIZE];
        payload.copy_from_slice(&bytes[PAYLOAD_RANGE]);
        let payload = AudioPayload::view_as(command, bytes[CMD_LSB_OFFSET], &payload)?;

        let mut buf = &bytes[SEQ_RANGE.start..];
        let seq = buf.get_u32_le();
        let timing_error = buf.get_i32_le();
        let cv_gate_in = buf.get_u32_le();
        let cv_gate_out = buf.get_u32_le();
        let continuation = buf.get_u8();
        buf.advance(1); // magic_stop
        let crc = buf.get_u16_le();

        Ok(Self {
            payload,
            seq,
            timing_error,
            cv_gate_in,
            cv_gate_out,
            continuation,
            crc,
        })
    }
}

fn gate_bit(gate: usize, len: usize) -> Result<u32> {
    if gate >= len {
        return Err(Error::IndexOutOfRange { index: gate, len });
    }
    Ok(1 << gate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{CRC_RANGE, MidiData, TIMING_ERROR_RANGE};

    #[test]
    fn test_packet_size() {
        let bytes = AudioCtrlPkt::default().to_bytes();
        assert_eq!(bytes.len(), 152);
        assert_eq!(&bytes[0..2], b"md");
        assert_eq!(bytes[149], b'z');
    }

    #[test]
    fn test_packet_roundtrip() {
        let midi = MidiData::new(&[0xB0, 0x07, 0x64]).unwrap();
        let mut pkt = AudioCtrlPkt::new(AudioPayload::MidiData(midi), 42);
        pkt.set_timing_error(-17);
        pkt.set_cv_gate_in(0x0000_8001);
        pkt.set_cv_gate_out(0x0000_00F0);
        pkt.set_continuation(2);
        pkt.set_crc(0xBEEF);

        let decoded = AudioCtrlPkt::from_bytes(&pkt.to_bytes()).unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn test_trailer_byte_offsets() {
        let mut pkt = AudioCtrlPkt::new(AudioPayload::Mute, 0x0102_0304);
        pkt.set_timing_error(-2);
        pkt.set_crc(0xA55A);
        let bytes = pkt.to_bytes();

        assert_eq!(bytes[CMD_MSB_OFFSET], 100);
        assert_eq!(&bytes[SEQ_RANGE], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[TIMING_ERROR_RANGE], &(-2i32).to_le_bytes());
        assert_eq!(&bytes[CRC_RANGE], &[0x5A, 0xA5]);
    }

    #[test]
    fn test_invalid_magic() {
        let mut bytes = AudioCtrlPkt::default().to_bytes();
        bytes[0] = b'x';

        let result = AudioCtrlPkt::from_bytes(&bytes);
        assert!(matches!(
            result,
            Err(Error::InvalidMagic {
                family: PacketFamily::Audio,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_command() {
        let mut bytes = AudioCtrlPkt::default().to_bytes();
        bytes[CMD_MSB_OFFSET] = 123;

        let result = AudioCtrlPkt::from_bytes(&bytes);
        assert!(matches!(result, Err(Error::UnknownCommand { cmd: 123, .. })));
    }

    #[test]
    fn test_wrong_length() {
        let bytes = AudioCtrlPkt::default().to_bytes();
        let result = AudioCtrlPkt::from_bytes(&bytes[..151]);
        assert!(matches!(
            result,
            Err(Error::InvalidLength {
                expected: 152,
                got: 151,
                ..
            })
        ));
    }

    #[test]
    fn test_gate_bits() {
        let mut pkt = AudioCtrlPkt::default();
        pkt.set_cv_gate_out_state(3, true).unwrap();
        pkt.set_cv_gate_out_state(15, true).unwrap();
        assert_eq!(pkt.cv_gate_out(), 0x8008);
        pkt.set_cv_gate_out_state(3, false).unwrap();
        assert_eq!(pkt.cv_gate_out(), 0x8000);
        assert!(pkt.set_cv_gate_out_state(16, true).is_err());

        pkt.set_cv_gate_in(0b10);
        assert!(pkt.cv_gate_in_state(1).unwrap());
        assert!(!pkt.cv_gate_in_state(0).unwrap());
        assert!(matches!(
            pkt.cv_gate_in_state(16),
            Err(Error::IndexOutOfRange { index: 16, len: 16 })
        ));
    }
}
