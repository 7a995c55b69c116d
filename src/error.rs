//! Control packet error types

use thiserror::Error;

use crate::PacketFamily;

/// Errors raised while building or parsing control packets.
///
/// Every variant is local to a single packet; callers are expected to drop
/// the offending packet and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Sentinel bytes do not match the packet family
    #[error("invalid {family} magic: start {start:02x?}, stop {stop:#04x}")]
    InvalidMagic {
        /// Family the buffer was parsed as
        family: PacketFamily,
        /// Found start sentinel
        start: [u8; 2],
        /// Found stop sentinel
        stop: u8,
    },

    /// Buffer length differs from the fixed packet size
    #[error("invalid {family} packet length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Family the buffer was parsed as
        family: PacketFamily,
        /// Fixed packet size
        expected: usize,
        /// Actual buffer length
        got: usize,
    },

    /// Command byte is not in the family's registry
    #[error("unknown {family} command: {cmd}")]
    UnknownCommand {
        /// Family the buffer was parsed as
        family: PacketFamily,
        /// Unregistered command byte
        cmd: u8,
    },

    /// Requested count exceeds the slot capacity of a payload view
    #[error("{field} overflow: {requested} requested (max {max})")]
    PayloadOverflow {
        /// Payload view field being filled
        field: &'static str,
        /// Requested count
        requested: usize,
        /// Capacity of the slot
        max: usize,
    },

    /// A payload field holds a value outside its domain
    #[error("invalid value for {field}: {value}")]
    InvalidField {
        /// Offending field
        field: &'static str,
        /// Raw value found
        value: u32,
    },

    /// Index past the end of a gate mask or channel status table
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of valid entries
        len: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
