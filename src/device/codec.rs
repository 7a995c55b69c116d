//! Device packet builders and inspectors

use tracing::{debug, trace};

use super::{
    ChannelInfo, ChannelInfoData, ChannelInfoRequest, DEVICE_CMD_OFFSET, DEVICE_CTRL_PKT_SIZE,
    DeviceCommand, DeviceCtrlPkt, DevicePayload, InputGain, PhantomPower, RawData, RgbLed,
    RgbLedValue, SystemInfo, VersionData,
};
use crate::{PacketFamily, Result, wire};

/// Packet with sentinels set, `Null` command and everything else zeroed
#[must_use]
pub fn make_default() -> DeviceCtrlPkt {
    DeviceCtrlPkt::default()
}

/// Ping carrying an opaque code, echoed by the device
#[must_use]
pub fn make_ping(ping_code: u32) -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::Ping(ping_code))
}

/// Firmware version query
#[must_use]
pub fn make_version_query() -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::Version(VersionData::default()))
}

/// Firmware version reply
#[must_use]
pub fn make_version_reply(major: u8, minor: u8, board: u8) -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::Version(VersionData {
        major,
        minor,
        board,
    }))
}

/// System info query
#[must_use]
pub fn make_system_info_query() -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::SystemInfo(SystemInfo::default()))
}

/// System info reply
#[must_use]
pub fn make_system_info(info: &SystemInfo) -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::SystemInfo(*info))
}

/// Audio channel info request
#[must_use]
pub fn make_channel_info_request(request: ChannelInfoRequest) -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::ChannelInfo(ChannelInfoData::from_request(&request)))
}

/// Audio channel info reply
#[must_use]
pub fn make_channel_info(info: &ChannelInfo) -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::ChannelInfo(ChannelInfoData::from_info(info)))
}

/// Start command with the audio buffer size
#[must_use]
pub fn make_start(buffer_size: u32) -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::Start(buffer_size))
}

/// Stop command
#[must_use]
pub fn make_stop() -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::Stop)
}

/// Input gain change for `jack_id`
#[must_use]
pub fn make_input_gain(gain_val: u32, jack_id: u32) -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::InputGain(InputGain { gain_val, jack_id }))
}

/// Headphone volume change
#[must_use]
pub fn make_hp_volume(vol_val: u32) -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::HpVolume(vol_val))
}

/// RGB LED update
#[must_use]
pub fn make_rgb_led(led_id: u32, value: RgbLedValue) -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::RgbLed(RgbLed { led_id, value }))
}

/// Phantom power switch for `jack_id`
#[must_use]
pub fn make_phantom_power(jack_id: u32, enabled: bool) -> DeviceCtrlPkt {
    DeviceCtrlPkt::new(DevicePayload::PhantomPower(PhantomPower { jack_id, enabled }))
}

/// Raw data packet, `data` zero padded to the full payload
///
/// Fails with [`crate::Error::PayloadOverflow`] if `data` does not fit the
/// payload.
pub fn make_raw_data(data: &[u8]) -> Result<DeviceCtrlPkt> {
    Ok(DeviceCtrlPkt::new(DevicePayload::RawData(RawData::new(data)?)))
}

/// Encode a packet to its wire image
#[must_use]
pub fn encode(pkt: &DeviceCtrlPkt) -> [u8; DEVICE_CTRL_PKT_SIZE] {
    trace!(cmd = %pkt.command(), "encoding device packet");
    pkt.to_bytes()
}

/// Decode a packet from a received buffer
///
/// # Errors
///
/// Returns an error if:
/// - Buffer length is not [`DEVICE_CTRL_PKT_SIZE`]
/// - Sentinels are wrong or reserved bytes are set
/// - Command is not registered
/// - The payload does not form a valid view for the command
pub fn decode(bytes: &[u8]) -> Result<DeviceCtrlPkt> {
    let pkt = DeviceCtrlPkt::from_bytes(bytes)?;
    trace!(cmd = %pkt.command(), "decoded device packet");
    Ok(pkt)
}

/// Whether `bytes` is a correctly framed device packet
#[must_use]
pub fn validate_framing(bytes: &[u8]) -> bool {
    wire::check_framing(PacketFamily::Device, bytes).is_ok()
}

/// Raw command byte of a framed buffer, without decoding the payload
pub fn peek_command(bytes: &[u8]) -> Result<u8> {
    wire::check_framing(PacketFamily::Device, bytes)?;
    Ok(bytes[DEVICE_CMD_OFFSET])
}

/// Command carried by the packet
#[must_use]
pub const fn command_of(pkt: &DeviceCtrlPkt) -> DeviceCommand {
    pkt.command()
}

/// Whether the packet carries no command
#[must_use]
pub fn check_for_null(pkt: &DeviceCtrlPkt) -> bool {
    pkt.command() == DeviceCommand::Null
}

/// Ping code, if the packet is a ping
#[must_use]
pub fn check_for_ping(pkt: &DeviceCtrlPkt) -> Option<u32> {
    match pkt.payload() {
        DevicePayload::Ping(code) => Some(*code),
        _ => None,
    }
}

/// Version data, if the packet is a version check
///
/// A query carries an all-zero version.
#[must_use]
pub fn check_for_version_check(pkt: &DeviceCtrlPkt) -> Option<VersionData> {
    match pkt.payload() {
        DevicePayload::Version(version) => Some(*version),
        _ => None,
    }
}

/// Whether the packet is a version check carrying the expected firmware version
#[must_use]
pub fn check_if_fw_version_matches(pkt: &DeviceCtrlPkt, major: u8, minor: u8) -> bool {
    check_for_version_check(pkt).is_some_and(|v| v.major == major && v.minor == minor)
}

/// Board revision, if the packet is a version check
#[must_use]
pub fn get_board_version(pkt: &DeviceCtrlPkt) -> Option<u8> {
    check_for_version_check(pkt).map(|v| v.board)
}

/// Buffer size, if the packet is a start command
#[must_use]
pub fn check_for_start(pkt: &DeviceCtrlPkt) -> Option<u32> {
    match pkt.payload() {
        DevicePayload::Start(buffer_size) => Some(*buffer_size),
        _ => None,
    }
}

/// Whether the packet is a stop command
#[must_use]
pub fn check_for_stop(pkt: &DeviceCtrlPkt) -> bool {
    pkt.command() == DeviceCommand::Stop
}

/// Gain data, if the packet is an input gain change
#[must_use]
pub fn check_for_input_gain(pkt: &DeviceCtrlPkt) -> Option<InputGain> {
    match pkt.payload() {
        DevicePayload::InputGain(gain) => Some(*gain),
        _ => None,
    }
}

/// Volume value, if the packet is a headphone volume change
#[must_use]
pub fn check_for_hp_volume(pkt: &DeviceCtrlPkt) -> Option<u32> {
    match pkt.payload() {
        DevicePayload::HpVolume(vol) => Some(*vol),
        _ => None,
    }
}

/// LED data, if the packet is an RGB LED update
#[must_use]
pub fn check_for_rgb_led(pkt: &DeviceCtrlPkt) -> Option<RgbLed> {
    match pkt.payload() {
        DevicePayload::RgbLed(led) => Some(*led),
        _ => None,
    }
}

/// Phantom power data, if the packet is a phantom power switch
#[must_use]
pub fn check_for_phantom_power(pkt: &DeviceCtrlPkt) -> Option<PhantomPower> {
    match pkt.payload() {
        DevicePayload::PhantomPower(power) => Some(*power),
        _ => None,
    }
}

/// System info, if the packet is a system info query or reply
#[must_use]
pub fn check_for_system_info(pkt: &DeviceCtrlPkt) -> Option<&SystemInfo> {
    match pkt.payload() {
        DevicePayload::SystemInfo(info) => Some(info),
        _ => None,
    }
}

/// Channel info payload read as a host request
///
/// Requests and replies share the command; the device side reads packets
/// with this. `None` if the packet is not a channel info packet or its
/// direction byte is not a valid direction.
#[must_use]
pub fn check_for_channel_info_request(pkt: &DeviceCtrlPkt) -> Option<ChannelInfoRequest> {
    match pkt.payload() {
        DevicePayload::ChannelInfo(data) => data
            .request()
            .inspect_err(|e| debug!(error = %e, "channel info payload is not a request"))
            .ok(),
        _ => None,
    }
}

/// Channel info payload read as a device reply
///
/// The host side reads packets with this.
#[must_use]
pub fn check_for_channel_info(pkt: &DeviceCtrlPkt) -> Option<ChannelInfo> {
    match pkt.payload() {
        DevicePayload::ChannelInfo(data) => data.info().ok(),
        _ => None,
    }
}

/// The whole payload region, if the packet carries raw data
#[must_use]
pub fn check_for_raw_data(pkt: &DeviceCtrlPkt) -> Option<&[u8]> {
    match pkt.payload() {
        DevicePayload::RawData(data) => Some(&data.as_bytes()[..]),
        _ => None,
    }
}
