use audio_ctrl::audio::{self, AudioCommand, AudioCtrlPkt, GpioBlob};
use audio_ctrl::device::{
    self, AUDIO_CHANNEL_NOT_VALID, ChannelDirection, ChannelInfo, ChannelInfoRequest,
    DeviceCommand, DeviceCtrlPkt, SampleFormat, SystemInfo,
};
use audio_ctrl::{PROTOCOL_VERSION, PacketFamily, SequenceCounter};

/// Minimal board model answering device queries the way the firmware does.
struct Board {
    channels: Vec<ChannelInfo>,
    running_buffer_size: Option<u32>,
    gain: Vec<u32>,
}

impl Board {
    fn new() -> Self {
        let channels = (0..4)
            .map(|i| {
                ChannelInfo::new(
                    i,
                    i,
                    if i < 2 {
                        ChannelDirection::Input
                    } else {
                        ChannelDirection::Output
                    },
                    SampleFormat::Int24Lj,
                    &format!("ch {i}"),
                    u32::from(i),
                    4,
                )
                .unwrap()
            })
            .collect();
        Self {
            channels,
            running_buffer_size: None,
            gain: vec![0; 2],
        }
    }

    fn handle(&mut self, bytes: &[u8]) -> Option<[u8; device::DEVICE_CTRL_PKT_SIZE]> {
        if !device::validate_framing(bytes) {
            return None;
        }
        let pkt = device::decode(bytes).ok()?;

        let reply = match device::command_of(&pkt) {
            DeviceCommand::Ping => device::make_ping(device::check_for_ping(&pkt)?),
            DeviceCommand::FirmwareVersionCheck => {
                let (major, minor, _) = PROTOCOL_VERSION;
                device::make_version_reply(major, minor, 3)
            }
            DeviceCommand::SystemInfo => {
                let mut info = SystemInfo::new("test-hat").unwrap();
                info.sampling_rate = 48_000;
                info.num_audio_inputs = 2;
                info.num_audio_outputs = 2;
                device::make_system_info(&info)
            }
            DeviceCommand::AudioChannelInfo => {
                let request = device::check_for_channel_info_request(&pkt)?;
                let info = self
                    .channels
                    .get(usize::from(request.sw_ch_id))
                    .copied()
                    .unwrap_or_else(ChannelInfo::not_valid);
                device::make_channel_info(&info)
            }
            DeviceCommand::Start => {
                self.running_buffer_size = device::check_for_start(&pkt);
                return None;
            }
            DeviceCommand::Stop => {
                self.running_buffer_size = None;
                return None;
            }
            DeviceCommand::ChangeInputGain => {
                let gain = device::check_for_input_gain(&pkt)?;
                *self.gain.get_mut(gain.jack_id as usize)? = gain.gain_val;
                return None;
            }
            _ => return None,
        };
        Some(device::encode(&reply))
    }
}

fn exchange(board: &mut Board, pkt: &DeviceCtrlPkt) -> Option<DeviceCtrlPkt> {
    let reply = board.handle(&device::encode(pkt))?;
    Some(device::decode(&reply).unwrap())
}

#[test]
fn host_discovers_board() {
    let mut board = Board::new();

    let pong = exchange(&mut board, &device::make_ping(77)).unwrap();
    assert_eq!(device::check_for_ping(&pong), Some(77));

    let version = exchange(&mut board, &device::make_version_query()).unwrap();
    assert!(device::check_if_fw_version_matches(&version, 0, 4));
    assert_eq!(device::get_board_version(&version), Some(3));

    let system = exchange(&mut board, &device::make_system_info_query()).unwrap();
    let info = device::check_for_system_info(&system).unwrap();
    assert_eq!(info.hat_name_str().unwrap(), "test-hat");
    assert_eq!(info.sampling_rate, 48_000);

    for sw_ch_id in 0..4u8 {
        let request = ChannelInfoRequest {
            buffer_size_in_frames: 64,
            sw_ch_id,
            direction: ChannelDirection::Input,
        };
        let reply = exchange(&mut board, &device::make_channel_info_request(request)).unwrap();
        let channel = device::check_for_channel_info(&reply).unwrap();
        assert!(channel.is_valid());
        assert_eq!(channel.channel_name_str().unwrap(), format!("ch {sw_ch_id}"));
        assert_eq!(channel.sample_format().unwrap(), SampleFormat::Int24Lj);
    }

    let request = ChannelInfoRequest {
        buffer_size_in_frames: 64,
        sw_ch_id: 9,
        direction: ChannelDirection::Output,
    };
    let reply = exchange(&mut board, &device::make_channel_info_request(request)).unwrap();
    let channel = device::check_for_channel_info(&reply).unwrap();
    assert!(!channel.is_valid());
    assert_eq!(channel.sw_ch_id, AUDIO_CHANNEL_NOT_VALID);
}

#[test]
fn host_starts_and_stops_audio() {
    let mut board = Board::new();

    assert!(exchange(&mut board, &device::make_start(256)).is_none());
    assert_eq!(board.running_buffer_size, Some(256));

    assert!(exchange(&mut board, &device::make_input_gain(12, 1)).is_none());
    assert_eq!(board.gain, vec![0, 12]);

    assert!(exchange(&mut board, &device::make_stop()).is_none());
    assert_eq!(board.running_buffer_size, None);
}

#[test]
fn board_ignores_corrupted_packets() {
    let mut board = Board::new();

    let mut bytes = device::encode(&device::make_start(128));
    bytes[1] = b'd';
    assert!(board.handle(&bytes).is_none());
    assert_eq!(board.running_buffer_size, None);
}

#[test]
fn audio_stream_with_caller_owned_sequence() {
    let mut seq = SequenceCounter::new();
    let mut sent: Vec<AudioCtrlPkt> = Vec::new();

    sent.push(audio::make_unmute(seq.next()));
    let blobs = [GpioBlob([0x01; 32]), GpioBlob([0x02; 32]), GpioBlob([0x03; 32])];
    sent.push(audio::make_gpio(&blobs, seq.next()).unwrap());
    sent.push(audio::make_midi(&[0xF8], seq.next()).unwrap());
    sent.push(audio::make_mute(seq.next()));

    let wire: Vec<u8> = sent.iter().flat_map(audio::encode).collect();
    let received: Vec<AudioCtrlPkt> = wire
        .chunks_exact(audio::AUDIO_CTRL_PKT_SIZE)
        .map(|chunk| {
            assert_eq!(PacketFamily::detect(chunk), Some(PacketFamily::Audio));
            audio::decode(chunk).unwrap()
        })
        .collect();

    assert_eq!(received, sent);
    let seqs: Vec<u32> = received.iter().map(AudioCtrlPkt::seq).collect();
    assert_eq!(seqs, vec![1, 2, 3, 4]);

    let gpio = &received[1];
    assert_eq!(audio::command_of(gpio), AudioCommand::GpioData);
    assert_eq!(audio::check_for_gpio_data(gpio), Some(3));
    assert_eq!(audio::get_gpio_blobs(gpio), Some(&blobs[..]));
    assert_eq!(audio::check_for_midi_data(gpio), None);
}
