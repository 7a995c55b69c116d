//! Device control packet layout

use bytes::BufMut;

use super::{
    DEVICE_CMD_OFFSET, DEVICE_CTRL_PKT_PAYLOAD_SIZE, DEVICE_CTRL_PKT_SIZE, DeviceCommand,
    DevicePayload, MAGIC_START, MAGIC_STOP, PAYLOAD_RANGE, RESERVED_RANGE,
};
use crate::{Error, PacketFamily, Result, wire};

/// Device control packet (128 bytes on the wire)
///
/// Immutable once built: the command and payload are fixed by the builder
/// that created it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCtrlPkt {
    payload: DevicePayload,
}

impl DeviceCtrlPkt {
    /// Create a packet carrying `payload`
    #[must_use]
    pub const fn new(payload: DevicePayload) -> Self {
        Self { payload }
    }

    /// Command tag (`device_cmd`)
    #[must_use]
    pub const fn command(&self) -> DeviceCommand {
        self.payload.command()
    }

    /// Payload view
    #[must_use]
    pub const fn payload(&self) -> &DevicePayload {
        &self.payload
    }

    /// Convert to bytes (little-endian)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; DEVICE_CTRL_PKT_SIZE] {
        let mut bytes = [0u8; DEVICE_CTRL_PKT_SIZE];
        let mut buf = &mut bytes[..];

        buf.put_slice(&MAGIC_START);
        buf.put_u8(self.command().as_u8());
        // device_subcmd is padding
        buf.put_u8(0);
        buf.put_slice(&self.payload.to_payload_bytes());
        buf.put_bytes(0, RESERVED_RANGE.len());
        buf.put_u8(MAGIC_STOP);
        debug_assert!(buf.is_empty());

        bytes
    }

    /// Parse from bytes
    ///
    /// Framing is checked before any other field is read. Reserved bytes must
    /// be zero; `device_subcmd` is not interpreted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        wire::check_framing(PacketFamily::Device, bytes)?;

        if let Some(&value) = bytes[RESERVED_RANGE].iter().find(|&&b| b != 0) {
            return Err(Error::InvalidField {
                field: "reserved",
                value: u32::from(value),
            });
        }

        let command = DeviceCommand::try_from(bytes[DEVICE_CMD_OFFSET]).inspect_err(|_| {
            tracing::debug!(cmd = bytes[DEVICE_CMD_OFFSET], "rejecting unknown device command");
        })?;
        let mut payload = [0u8; DEVICE_CTRL_PKT_PAYLOAD_SIZE];
        payload.copy_from_slice(&bytes[PAYLOAD_RANGE]);
        let payload = DevicePayload::view_as(command, &payload)?;

        Ok(Self { payload })
    }
}

impl From<DevicePayload> for DeviceCtrlPkt {
    fn from(payload: DevicePayload) -> Self {
        Self::new(payload)
    }
}
