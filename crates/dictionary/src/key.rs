//! Key encodings and their comparators.
//!
//! A dictionary binds exactly one comparator at creation time, selected from
//! its [`KeyType`] tag, and keeps it for life. All comparators are total
//! orders over fixed-width byte buffers; the buffers themselves stay opaque
//! to the rest of the engine.

use std::cmp::Ordering;

/// How a dictionary's keys are encoded, which in turn fixes their ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Big-endian two's-complement integers.
    SignedInt,
    /// Big-endian unsigned integers.
    UnsignedInt,
    /// Raw byte arrays compared as signed bytes.
    ByteArray,
    /// NUL-terminated text inside a fixed-width buffer.
    NullTerminatedString,
}

impl KeyType {
    /// Stable on-disk tag for this key type.
    pub fn tag(self) -> u8 {
        match self {
            KeyType::SignedInt => 0,
            KeyType::UnsignedInt => 1,
            KeyType::ByteArray => 2,
            KeyType::NullTerminatedString => 3,
        }
    }

    /// Inverse of [`tag`](KeyType::tag); `None` for unknown tags.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(KeyType::SignedInt),
            1 => Some(KeyType::UnsignedInt),
            2 => Some(KeyType::ByteArray),
            3 => Some(KeyType::NullTerminatedString),
            _ => None,
        }
    }
}

/// A key comparator. Both slices always have the dictionary's key size.
pub type Comparator = fn(&[u8], &[u8]) -> Ordering;

/// Selects the comparator bound to a key type at dictionary creation.
pub fn comparator_for(key_type: KeyType) -> Comparator {
    match key_type {
        KeyType::SignedInt => compare_signed,
        KeyType::UnsignedInt => compare_unsigned,
        KeyType::ByteArray => compare_byte_array,
        KeyType::NullTerminatedString => compare_null_terminated,
    }
}

/// Big-endian two's-complement compare: sign bits first (a clear sign bit is
/// "more positive"), then unsigned magnitude MSB to LSB.
fn compare_signed(a: &[u8], b: &[u8]) -> Ordering {
    match (b[0] >> 7).cmp(&(a[0] >> 7)) {
        Ordering::Equal => a.cmp(b),
        order => order,
    }
}

fn compare_unsigned(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// Lexicographic compare of the bytes as signed `i8`; the first differing
/// byte decides.
fn compare_byte_array(a: &[u8], b: &[u8]) -> Ordering {
    for (&x, &y) in a.iter().zip(b.iter()) {
        match (x as i8).cmp(&(y as i8)) {
            Ordering::Equal => continue,
            order => return order,
        }
    }
    Ordering::Equal
}

/// Text compare: both keys are truncated at their first NUL byte, then
/// compared bytewise (code-point order for UTF-8 content).
fn compare_null_terminated(a: &[u8], b: &[u8]) -> Ordering {
    trim_nul(a).cmp(trim_nul(b))
}

fn trim_nul(key: &[u8]) -> &[u8] {
    match key.iter().position(|&b| b == 0) {
        Some(end) => &key[..end],
        None => key,
    }
}
