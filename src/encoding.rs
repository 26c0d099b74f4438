//! Little-endian field access and the radar's sign-magnitude integer format.
//!
//! All readers return `None` when the field does not fit in the buffer, so
//! callers can treat truncated acknowledgements as failures without panicking.

use crate::error::Error;

const SIGN_BIT: u16 = 0x8000;
const MAGNITUDE_MASK: u16 = 0x7FFF;

/// Decodes a 16-bit sign-magnitude value: the top bit is the sign, the
/// remaining 15 bits are the magnitude. This is not two's complement.
///
/// ```
/// use ld2450_nostd_rs::decode_sign_magnitude16;
///
/// assert_eq!(decode_sign_magnitude16(0x0010), 16);
/// assert_eq!(decode_sign_magnitude16(0x8010), -16);
/// ```
pub const fn decode_sign_magnitude16(raw: u16) -> i16 {
    let magnitude = (raw & MAGNITUDE_MASK) as i16;
    if raw & SIGN_BIT != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Encodes a value in the sign-magnitude format. Magnitudes above `0x7FFF`
/// (only `i16::MIN`) are clamped.
pub const fn encode_sign_magnitude16(value: i16) -> u16 {
    let magnitude = value.unsigned_abs();
    let magnitude = if magnitude > MAGNITUDE_MASK {
        MAGNITUDE_MASK
    } else {
        magnitude
    };
    if value < 0 {
        SIGN_BIT | magnitude
    } else {
        magnitude
    }
}

pub fn read_u16_le(buf: &[u8], offset: usize) -> Option<u16> {
    let bytes = buf.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

pub fn read_i16_le(buf: &[u8], offset: usize) -> Option<i16> {
    read_u16_le(buf, offset).map(|raw| raw as i16)
}

pub fn read_i32_le(buf: &[u8], offset: usize) -> Option<i32> {
    let bytes = buf.get(offset..offset.checked_add(4)?)?;
    Some(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

// Reads a sign-magnitude field stored little-endian.
pub fn read_sign_magnitude16_le(buf: &[u8], offset: usize) -> Option<i16> {
    read_u16_le(buf, offset).map(decode_sign_magnitude16)
}

/// Intra-frame length field for a command value of `value_len` bytes:
/// the 2-byte command word plus the value, little-endian.
///
/// Fails with `Error::FrameTooLarge` when the count does not fit the 16-bit field.
pub fn intra_frame_length(value_len: usize) -> Result<[u8; 2], Error> {
    let len = value_len
        .checked_add(2)
        .and_then(|len| u16::try_from(len).ok())
        .ok_or(Error::FrameTooLarge)?;
    Ok(len.to_le_bytes())
}
