//! Helpers shared by both packet families' layouts

use tracing::debug;

use crate::{Error, PacketFamily, Result};

/// Check length and sentinels of a raw packet buffer
///
/// This is the mandatory first gate: nothing else in the buffer may be read
/// before it passes.
pub(crate) fn check_framing(family: PacketFamily, bytes: &[u8]) -> Result<()> {
    let expected = family.packet_size();
    if bytes.len() != expected {
        debug!(%family, expected, got = bytes.len(), "rejecting packet with bad length");
        return Err(Error::InvalidLength {
            family,
            expected,
            got: bytes.len(),
        });
    }

    let start = [bytes[0], bytes[1]];
    let stop = bytes[stop_offset(family)];
    if start != family.magic_start() || stop != family.magic_stop() {
        debug!(%family, ?start, stop, "rejecting packet with bad magic");
        return Err(Error::InvalidMagic {
            family,
            start,
            stop,
        });
    }

    Ok(())
}

const fn stop_offset(family: PacketFamily) -> usize {
    match family {
        PacketFamily::Audio => crate::audio::MAGIC_STOP_OFFSET,
        PacketFamily::Device => crate::device::MAGIC_STOP_OFFSET,
    }
}

/// Copy `src` into the front of `dst`, refusing to write anything when it
/// does not fit
pub(crate) fn copy_bounded(dst: &mut [u8], src: &[u8], field: &'static str) -> Result<()> {
    if src.len() > dst.len() {
        debug!(field, requested = src.len(), max = dst.len(), "rejecting oversized copy");
        return Err(Error::PayloadOverflow {
            field,
            requested: src.len(),
            max: dst.len(),
        });
    }
    dst[..src.len()].copy_from_slice(src);
    Ok(())
}

/// Encode `name` as a null-terminated string in a fixed slot
///
/// Names containing NUL are rejected since they would not decode back whole.
pub(crate) fn encode_name<const N: usize>(name: &str, field: &'static str) -> Result<[u8; N]> {
    if let Some(pos) = name.bytes().position(|b| b == 0) {
        debug!(field, pos, "rejecting name with interior NUL");
        return Err(Error::InvalidField {
            field,
            value: u32::try_from(pos).unwrap_or(u32::MAX),
        });
    }
    // one byte is always kept for the terminator
    if name.len() >= N {
        return Err(Error::PayloadOverflow {
            field,
            requested: name.len() + 1,
            max: N,
        });
    }
    let mut slot = [0u8; N];
    slot[..name.len()].copy_from_slice(name.as_bytes());
    Ok(slot)
}

/// Decode a null-terminated string from a fixed slot
pub(crate) fn decode_name<'a>(slot: &'a [u8], field: &'static str) -> Result<&'a str> {
    let len = slot
        .iter()
        .position(|&b| b == 0)
        .ok_or(Error::InvalidField {
            field,
            value: 0,
        })?;
    std::str::from_utf8(&slot[..len]).map_err(|e| Error::InvalidField {
        field,
        value: u32::try_from(e.valid_up_to()).unwrap_or(u32::MAX),
    })
}
