//! Audio packet builders and inspectors
//!
//! Builders start from [`make_default`] and always produce packets that pass
//! [`validate_framing`]. Inspectors return `None`/`false` when the packet
//! carries a different command, so a zero count is never mistaken for
//! "not this command".

use tracing::trace;

use super::{
    AUDIO_CTRL_PKT_PAYLOAD_SIZE, AUDIO_CTRL_PKT_SIZE, AudioCommand, AudioCtrlPkt, AudioPayload,
    CMD_MSB_OFFSET, GpioBlob, GpioData, MidiData,
};
use crate::{Error, PacketFamily, Result, wire};

/// Packet with sentinels set, `Null` command and everything else zeroed
#[must_use]
pub fn make_default() -> AudioCtrlPkt {
    AudioCtrlPkt::default()
}

/// Mute packet
#[must_use]
pub fn make_mute(seq: u32) -> AudioCtrlPkt {
    AudioCtrlPkt::new(AudioPayload::Mute, seq)
}

/// Unmute packet
#[must_use]
pub fn make_unmute(seq: u32) -> AudioCtrlPkt {
    AudioCtrlPkt::new(AudioPayload::Unmute, seq)
}

/// Cease packet
#[must_use]
pub fn make_cease(seq: u32) -> AudioCtrlPkt {
    AudioCtrlPkt::new(AudioPayload::Cease, seq)
}

/// GPIO data packet; the blob count travels in `cmd_lsb`
///
/// Fails with [`Error::PayloadOverflow`] if more blobs are given than the
/// payload has slots for.
pub fn make_gpio(blobs: &[GpioBlob], seq: u32) -> Result<AudioCtrlPkt> {
    let data = GpioData::new(blobs)?;
    Ok(AudioCtrlPkt::new(AudioPayload::GpioData(data), seq))
}

/// MIDI data packet; the byte count travels in `cmd_lsb`
///
/// Fails with [`Error::PayloadOverflow`] if `midi` does not fit the payload.
pub fn make_midi(midi: &[u8], seq: u32) -> Result<AudioCtrlPkt> {
    let data = MidiData::new(midi)?;
    Ok(AudioCtrlPkt::new(AudioPayload::MidiData(data), seq))
}

/// Encode a packet to its wire image
#[must_use]
pub fn encode(pkt: &AudioCtrlPkt) -> [u8; AUDIO_CTRL_PKT_SIZE] {
    trace!(cmd = %pkt.command(), seq = pkt.seq(), "encoding audio packet");
    pkt.to_bytes()
}

/// Decode a packet from a received buffer
///
/// # Errors
///
/// Returns an error if:
/// - Buffer length is not [`AUDIO_CTRL_PKT_SIZE`]
/// - Sentinels are wrong
/// - Command is not registered
/// - `cmd_lsb` holds a count larger than the payload view
pub fn decode(bytes: &[u8]) -> Result<AudioCtrlPkt> {
    let pkt = AudioCtrlPkt::from_bytes(bytes)?;
    trace!(cmd = %pkt.command(), seq = pkt.seq(), "decoded audio packet");
    Ok(pkt)
}

/// Whether `bytes` is a correctly framed audio packet
///
/// Callers must discard buffers failing this check without looking at any
/// other field.
#[must_use]
pub fn validate_framing(bytes: &[u8]) -> bool {
    wire::check_framing(PacketFamily::Audio, bytes).is_ok()
}

/// Raw command byte of a framed buffer, without decoding the payload
pub fn peek_command(bytes: &[u8]) -> Result<u8> {
    wire::check_framing(PacketFamily::Audio, bytes)?;
    Ok(bytes[CMD_MSB_OFFSET])
}

/// Command carried by the packet
#[must_use]
pub const fn command_of(pkt: &AudioCtrlPkt) -> AudioCommand {
    pkt.command()
}

/// Whether the packet is a mute command
#[must_use]
pub fn check_for_mute(pkt: &AudioCtrlPkt) -> bool {
    pkt.command() == AudioCommand::Mute
}

/// Whether the packet is an unmute command
#[must_use]
pub fn check_for_unmute(pkt: &AudioCtrlPkt) -> bool {
    pkt.command() == AudioCommand::Unmute
}

/// Whether the packet is a cease command
#[must_use]
pub fn check_for_cease(pkt: &AudioCtrlPkt) -> bool {
    pkt.command() == AudioCommand::Cease
}

/// Number of GPIO blobs, if the packet carries GPIO data
#[must_use]
pub fn check_for_gpio_data(pkt: &AudioCtrlPkt) -> Option<u8> {
    match pkt.payload() {
        AudioPayload::GpioData(data) => Some(data.count()),
        _ => None,
    }
}

/// Number of MIDI bytes, if the packet carries MIDI data
#[must_use]
pub fn check_for_midi_data(pkt: &AudioCtrlPkt) -> Option<u8> {
    match pkt.payload() {
        AudioPayload::MidiData(data) => Some(data.len()),
        _ => None,
    }
}

/// Valid GPIO blobs, if the packet carries GPIO data
#[must_use]
pub fn get_gpio_blobs(pkt: &AudioCtrlPkt) -> Option<&[GpioBlob]> {
    match pkt.payload() {
        AudioPayload::GpioData(data) => Some(data.blobs()),
        _ => None,
    }
}

/// Valid MIDI bytes, if the packet carries MIDI data
#[must_use]
pub fn get_midi_data(pkt: &AudioCtrlPkt) -> Option<&[u8]> {
    match pkt.payload() {
        AudioPayload::MidiData(data) => Some(data.as_slice()),
        _ => None,
    }
}

/// Copy a section of the MIDI payload starting at `offset` into `dest`
///
/// Returns `Ok(false)` when the packet carries no MIDI data. The section must
/// lie within the payload region; otherwise nothing is copied and
/// [`Error::PayloadOverflow`] is returned.
pub fn copy_midi_data(pkt: &AudioCtrlPkt, offset: usize, dest: &mut [u8]) -> Result<bool> {
    let AudioPayload::MidiData(data) = pkt.payload() else {
        return Ok(false);
    };

    let end = offset.saturating_add(dest.len());
    if end > AUDIO_CTRL_PKT_PAYLOAD_SIZE {
        return Err(Error::PayloadOverflow {
            field: "midi_data",
            requested: end,
            max: AUDIO_CTRL_PKT_PAYLOAD_SIZE,
        });
    }
    dest.copy_from_slice(&data.region()[offset..end]);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequenceCounter;
    use crate::audio::{MAX_NUM_GPIO_DATA_BLOBS, TIMING_ERROR_RANGE};

    #[test]
    fn test_default_packet() {
        let pkt = make_default();
        let bytes = encode(&pkt);

        assert!(validate_framing(&bytes));
        assert_eq!(command_of(&pkt), AudioCommand::Null);
        assert!(!check_for_mute(&pkt));
        assert!(!check_for_unmute(&pkt));
        assert!(!check_for_cease(&pkt));
        assert_eq!(check_for_gpio_data(&pkt), None);
        assert_eq!(check_for_midi_data(&pkt), None);
        assert!(bytes[2..149].iter().all(|&b| b == 0));
        assert_eq!(&bytes[150..], &[0, 0]);
    }

    #[test]
    fn test_mute_unmute_cease() {
        let mut seq = SequenceCounter::new();

        let mute = make_mute(seq.next());
        assert!(check_for_mute(&mute));
        assert!(!check_for_unmute(&mute));
        assert_eq!(mute.seq(), 1);

        let unmute = make_unmute(seq.next());
        assert!(check_for_unmute(&unmute));
        assert_eq!(unmute.seq(), 2);

        let cease = make_cease(seq.next());
        assert!(check_for_cease(&cease));
        assert_eq!(check_for_midi_data(&cease), None);
    }

    #[test]
    fn test_gpio_scenario() {
        let blobs = [GpioBlob([0x11; 32]), GpioBlob([0x22; 32]), GpioBlob([0x33; 32])];
        let pkt = make_gpio(&blobs, 7).unwrap();

        assert_eq!(command_of(&pkt), AudioCommand::GpioData);
        assert_eq!(check_for_gpio_data(&pkt), Some(3));
        assert_eq!(get_gpio_blobs(&pkt), Some(&blobs[..]));

        let bytes = encode(&pkt);
        assert_eq!(bytes[3], 3);
        assert!(bytes[4 + 96..4 + 128].iter().all(|&b| b == 0));

        let decoded = decode(&bytes).unwrap();
        let AudioPayload::GpioData(data) = decoded.payload() else {
            panic!("expected gpio view");
        };
        assert_eq!(data.slots()[MAX_NUM_GPIO_DATA_BLOBS - 1], GpioBlob::default());
    }

    #[test]
    fn test_gpio_zero_blobs_is_not_absence() {
        let pkt = make_gpio(&[], 0).unwrap();
        assert_eq!(check_for_gpio_data(&pkt), Some(0));
        assert_eq!(check_for_gpio_data(&make_mute(0)), None);
    }

    #[test]
    fn test_midi_roundtrip() {
        let midi = [0x90, 0x3C, 0x7F, 0x80, 0x3C, 0x00];
        let pkt = make_midi(&midi, 9).unwrap();
        let decoded = decode(&encode(&pkt)).unwrap();

        assert_eq!(check_for_midi_data(&decoded), Some(6));
        assert_eq!(get_midi_data(&decoded), Some(&midi[..]));
        assert_eq!(get_gpio_blobs(&decoded), None);
    }

    #[test]
    fn test_copy_midi_data_bounds() {
        let pkt = make_midi(&[1, 2, 3, 4], 0).unwrap();

        let mut dest = [0u8; 2];
        assert!(copy_midi_data(&pkt, 1, &mut dest).unwrap());
        assert_eq!(dest, [2, 3]);

        let mut dest = [0xFFu8; 4];
        let result = copy_midi_data(&pkt, 126, &mut dest);
        assert!(matches!(result, Err(Error::PayloadOverflow { .. })));
        assert_eq!(dest, [0xFF; 4]);

        assert!(!copy_midi_data(&make_mute(0), 0, &mut dest).unwrap());
    }

    #[test]
    fn test_trailer_accessors_survive_encoding() {
        let mut pkt = make_mute(1);
        pkt.set_timing_error(-250);
        pkt.set_cv_gate_out(0xFFFF);

        let bytes = encode(&pkt);
        assert_eq!(&bytes[TIMING_ERROR_RANGE], &(-250i32).to_le_bytes());

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.timing_error(), -250);
        assert_eq!(decoded.cv_gate_out(), 0xFFFF);
        assert_eq!(decoded.cv_gate_in(), 0);
    }

    #[test]
    fn test_corrupted_second_magic_byte() {
        let mut bytes = encode(&make_mute(1));
        bytes[0..2].copy_from_slice(b"xd");

        assert!(!validate_framing(&bytes));
        assert!(matches!(decode(&bytes), Err(Error::InvalidMagic { .. })));
        assert!(peek_command(&bytes).is_err());
    }

    #[test]
    fn test_peek_unknown_command() {
        let mut bytes = encode(&make_default());
        bytes[CMD_MSB_OFFSET] = 200;

        assert!(validate_framing(&bytes));
        assert_eq!(peek_command(&bytes).unwrap(), 200);
        assert!(matches!(
            decode(&bytes),
            Err(Error::UnknownCommand { cmd: 200, .. })
        ));
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use crate::audio::MAGIC_STOP_OFFSET;
        use proptest::prelude::*;

        fn blob_strategy() -> impl Strategy<Value = GpioBlob> {
            prop::array::uniform32(any::<u8>()).prop_map(GpioBlob)
        }

        // Strategy to generate every buildable packet
        fn packet_strategy() -> impl Strategy<Value = AudioCtrlPkt> {
            prop_oneof![
                Just(make_default()),
                any::<u32>().prop_map(make_mute),
                any::<u32>().prop_map(make_unmute),
                any::<u32>().prop_map(make_cease),
                (prop::collection::vec(blob_strategy(), 0..=MAX_NUM_GPIO_DATA_BLOBS), any::<u32>())
                    .prop_map(|(blobs, seq)| make_gpio(&blobs, seq).unwrap()),
                (prop::collection::vec(any::<u8>(), 0..=AUDIO_CTRL_PKT_PAYLOAD_SIZE), any::<u32>())
                    .prop_map(|(midi, seq)| make_midi(&midi, seq).unwrap()),
            ]
        }

        proptest! {
            /// Property: every builder produces a correctly framed packet
            #[test]
            fn prop_builders_are_framed(pkt in packet_strategy()) {
                prop_assert!(validate_framing(&encode(&pkt)));
            }

            /// Property: decode inverts encode, trailer included
            #[test]
            fn prop_roundtrip(
                pkt in packet_strategy(),
                timing_error in any::<i32>(),
                gates in any::<(u32, u32)>(),
                continuation in any::<u8>(),
                crc in any::<u16>(),
            ) {
                let mut pkt = pkt;
                pkt.set_timing_error(timing_error);
                pkt.set_cv_gate_in(gates.0);
                pkt.set_cv_gate_out(gates.1);
                pkt.set_continuation(continuation);
                pkt.set_crc(crc);

                let decoded = decode(&encode(&pkt)).unwrap();
                prop_assert_eq!(decoded, pkt);
            }

            /// Property: MIDI bytes come back exactly
            #[test]
            fn prop_midi_bytes_exact(
                midi in prop::collection::vec(any::<u8>(), 0..=AUDIO_CTRL_PKT_PAYLOAD_SIZE),
            ) {
                let pkt = decode(&encode(&make_midi(&midi, 0).unwrap())).unwrap();
                prop_assert_eq!(get_midi_data(&pkt), Some(&midi[..]));
            }

            /// Property: any change to a sentinel byte fails framing
            #[test]
            fn prop_corrupt_sentinel_rejected(
                pkt in packet_strategy(),
                which in 0usize..3,
                corrupt_value in 1u8..=255,
            ) {
                let mut bytes = encode(&pkt);
                let offset = [0, 1, MAGIC_STOP_OFFSET][which];
                bytes[offset] ^= corrupt_value;

                prop_assert!(!validate_framing(&bytes));
                prop_assert!(decode(&bytes).is_err());
            }

            /// Property: oversized MIDI data is rejected
            #[test]
            fn prop_oversized_midi_rejected(
                len in AUDIO_CTRL_PKT_PAYLOAD_SIZE + 1..=AUDIO_CTRL_PKT_PAYLOAD_SIZE + 1000,
            ) {
                let midi = vec![0x42u8; len];
                let result = make_midi(&midi, 0);
                let is_overflow = matches!(result, Err(Error::PayloadOverflow { .. }));
                prop_assert!(is_overflow);
            }

            /// Property: oversized GPIO blob arrays are rejected
            #[test]
            fn prop_oversized_gpio_rejected(
                count in MAX_NUM_GPIO_DATA_BLOBS + 1..=MAX_NUM_GPIO_DATA_BLOBS + 1000,
            ) {
                let blobs = vec![GpioBlob([0xA5; 32]); count];
                let result = make_gpio(&blobs, 0);
                let is_overflow = matches!(result, Err(Error::PayloadOverflow { .. }));
                prop_assert!(is_overflow);
            }
        }
    }
}
