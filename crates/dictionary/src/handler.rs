use crate::cursor::Cursor;
use crate::error::{DictError, Status};
use crate::key::KeyType;
use crate::predicate::Predicate;
use crate::record::RecordInfo;

/// Tag identifying which backing structure a dictionary instance uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureType {
    /// The probabilistic ordered skip list (in-memory only).
    SkipList,
    /// The unordered flat file (natively persistent; fallback surrogate).
    FlatFile,
}

/// Everything needed to create or open a dictionary instance.
///
/// `size` is structure-specific: the skip list reads it as its maximum
/// height, the flat file as an initial record capacity. The `id` comes from
/// an external master table and is stored verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryConfig {
    pub id: u32,
    pub key_type: KeyType,
    pub key_size: usize,
    pub value_size: usize,
    pub size: usize,
}

/// Per-instance capabilities of a backing structure.
///
/// All key/value slices must match the instance's [`RecordInfo`]; mismatches
/// are reported as [`DictError::OutOfBounds`].
pub trait Store {
    fn record_info(&self) -> RecordInfo;

    fn key_type(&self) -> KeyType;

    /// Inserts one record. Duplicate keys are permitted.
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Status;

    /// Copies the value of the first record matching `key` into `value_out`.
    fn get(&self, key: &[u8], value_out: &mut [u8]) -> Status;

    /// Overwrites the value of every record matching `key`, inserting the
    /// record when the key is absent. The count reports how many records
    /// now carry the value.
    fn update(&mut self, key: &[u8], value: &[u8]) -> Status;

    /// Removes every record matching `key`, reporting how many went away.
    fn remove(&mut self, key: &[u8]) -> Status;

    /// Builds a cursor positioned by `predicate`. The predicate is owned by
    /// the cursor from here on.
    fn find<'a>(&'a self, predicate: Predicate) -> Result<Box<dyn Cursor + 'a>, DictError>;

    /// Natively persists the structure's contents. Only meaningful when the
    /// structure's handler reports persistence support.
    fn close(&mut self) -> Result<(), DictError> {
        Err(DictError::NotImplemented)
    }

    /// Releases every record, including any persisted form. The structure
    /// is unusable afterwards; later operations report
    /// [`DictError::Uninitialized`].
    fn destroy(&mut self) -> Result<(), DictError>;
}

/// Per-structure-type capability table: builds stores and answers the
/// persistence capability query.
///
/// The capability query is resolved at handler-construction time; the
/// lifecycle layer consults it instead of probing for a
/// [`DictError::NotImplemented`] at runtime. The default `open` /
/// `destroy_by_id` still answer `NotImplemented` so non-persistent handlers
/// keep the contract surface honest.
pub trait Handler {
    fn structure(&self) -> StructureType;

    /// Whether this handler can natively persist and restore instances.
    fn supports_persistence(&self) -> bool {
        false
    }

    /// Creates a fresh store, binding the comparator selected from
    /// `config.key_type`.
    fn create(&self, config: &DictionaryConfig) -> Result<Box<dyn Store>, DictError>;

    /// Restores a previously closed store.
    fn open(&self, _config: &DictionaryConfig) -> Result<Box<dyn Store>, DictError> {
        Err(DictError::NotImplemented)
    }

    /// Deletes the persisted form of the instance with the given id without
    /// opening it.
    fn destroy_by_id(&self, _id: u32) -> Result<(), DictError> {
        Err(DictError::NotImplemented)
    }
}
