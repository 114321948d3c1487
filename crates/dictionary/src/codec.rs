//! Fixed-width key/value codecs.
//!
//! Typed keys and values cross the handler boundary as byte buffers; these
//! helpers do the serialization. Integers encode **big-endian** so that the
//! byte-wise comparators in [`crate::key`] agree with numeric order (signed
//! integers additionally rely on the sign-bit-first compare). Strings are
//! NUL-padded into a caller-chosen width.

use byteorder::{BigEndian, ByteOrder};

use crate::error::DictError;

pub fn encode_i32(value: i32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    BigEndian::write_i32(&mut buf, value);
    buf
}

pub fn decode_i32(buf: &[u8]) -> i32 {
    BigEndian::read_i32(buf)
}

pub fn encode_u32(value: u32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    BigEndian::write_u32(&mut buf, value);
    buf
}

pub fn decode_u32(buf: &[u8]) -> u32 {
    BigEndian::read_u32(buf)
}

pub fn encode_u64(value: u64) -> [u8; 8] {
    let mut buf = [0u8; 8];
    BigEndian::write_u64(&mut buf, value);
    buf
}

pub fn decode_u64(buf: &[u8]) -> u64 {
    BigEndian::read_u64(buf)
}

/// NUL-pads `text` into a buffer of exactly `width` bytes.
///
/// Fails with [`DictError::OutOfBounds`] when the text does not fit. A text
/// of exactly `width` bytes is allowed; such a key simply carries no
/// terminator, which the string comparator tolerates.
pub fn encode_str(text: &str, width: usize) -> Result<Vec<u8>, DictError> {
    if text.len() > width {
        return Err(DictError::OutOfBounds);
    }
    let mut buf = vec![0u8; width];
    buf[..text.len()].copy_from_slice(text.as_bytes());
    Ok(buf)
}

/// Decodes a NUL-padded buffer back into text, lossily for non-UTF-8 bytes.
pub fn decode_str(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}
