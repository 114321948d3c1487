/// The fixed key/value layout of one dictionary instance.
///
/// Set at creation and invariant for the dictionary's lifetime; every key
/// and value buffer crossing the store boundary must have exactly these
/// lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordInfo {
    pub key_size: usize,
    pub value_size: usize,
}

impl RecordInfo {
    pub fn new(key_size: usize, value_size: usize) -> Self {
        Self {
            key_size,
            value_size,
        }
    }
}

/// Caller-owned output buffers that cursors copy records into.
///
/// The core only ever reads/writes these byte-for-byte up to the
/// dictionary's configured sizes; allocate via [`Record::for_info`] so the
/// lengths match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl Record {
    /// Allocates zeroed buffers sized for the given layout.
    pub fn for_info(info: &RecordInfo) -> Self {
        Self {
            key: vec![0u8; info.key_size],
            value: vec![0u8; info.value_size],
        }
    }
}
