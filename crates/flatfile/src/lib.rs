//! # Flatfile
//!
//! The persistent, unordered backing structure of the TidepoolKV storage
//! engine.
//!
//! Records live in an in-memory vector in insertion order; every lookup is a
//! linear scan. What the flat file trades in speed it returns in lifecycle
//! support: it is the only structure whose handler reports native
//! persistence, so the engine layer leans on it as the surrogate when
//! opening or closing structures that cannot persist themselves.
//!
//! ## File format (v1)
//!
//! All integers little-endian:
//!
//! ```text
//! [HEADER]  magic(u32 = "TFF1") | key_type(u8) | key_size(u32) | value_size(u32) | count(u64)
//! [RECORDS] count times: key | value        (fixed widths from the header)
//! [CRC]     crc32(u32) over the record section
//! ```
//!
//! Writes go to a temporary file first, are synced, then atomically renamed
//! into place.
//!
//! ## Example
//! ```rust
//! use dictionary::{codec, DictionaryConfig, Handler, KeyType, Store};
//! use flatfile::FlatFileHandler;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let handler = FlatFileHandler::new(dir.path());
//! let config = DictionaryConfig {
//!     id: 7,
//!     key_type: KeyType::UnsignedInt,
//!     key_size: 4,
//!     value_size: 4,
//!     size: 16,
//! };
//!
//! let mut store = handler.create(&config).unwrap();
//! store.insert(&codec::encode_u32(1), &codec::encode_u32(10)).unwrap();
//! store.close().unwrap();
//!
//! let opened = handler.open(&config).unwrap();
//! let mut value = [0u8; 4];
//! opened.get(&codec::encode_u32(1), &mut value).unwrap();
//! assert_eq!(codec::decode_u32(&value), 10);
//! ```

use std::cmp::Ordering;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crc32fast::Hasher as Crc32;

use dictionary::{
    comparator_for, Comparator, Cursor, CursorStatus, DictError, DictionaryConfig, Handler,
    KeyType, Predicate, Record, RecordInfo, Status, Store, StructureType,
};

/// Magic number identifying flat-file v1 dictionaries (ASCII "TFF1").
pub const FLAT_FILE_MAGIC: u32 = 0x5446_4631;

struct FlatRecord {
    key: Box<[u8]>,
    value: Box<[u8]>,
}

/// An unordered flat-file dictionary.
///
/// The backing file is only touched by `close`, `destroy`, and the handler's
/// open path; record operations work purely on the in-memory vector. `size`
/// from the creating config is a capacity hint.
pub struct FlatFile {
    info: RecordInfo,
    key_type: KeyType,
    compare: Comparator,
    records: Vec<FlatRecord>,
    path: PathBuf,
    destroyed: bool,
}

fn validate(config: &DictionaryConfig) -> Result<(), DictError> {
    if config.size < 1 || config.key_size == 0 || config.value_size == 0 {
        return Err(DictError::InvalidInitialSize);
    }
    Ok(())
}

fn read_err(e: io::Error) -> DictError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        DictError::UnexpectedEof
    } else {
        DictError::FileRead
    }
}

impl FlatFile {
    /// Creates an empty flat file bound to `path`. The path must not already
    /// hold a persisted dictionary.
    pub fn create(config: &DictionaryConfig, path: PathBuf) -> Result<Self, DictError> {
        validate(config)?;
        if path.exists() {
            return Err(DictError::DuplicateDictionary);
        }
        Ok(Self {
            info: RecordInfo::new(config.key_size, config.value_size),
            key_type: config.key_type,
            compare: comparator_for(config.key_type),
            records: Vec::with_capacity(config.size),
            path,
            destroyed: false,
        })
    }

    /// Reads a persisted dictionary back from `path`, checking the magic,
    /// the stored layout against `config`, and the record checksum.
    pub fn open(config: &DictionaryConfig, path: PathBuf) -> Result<Self, DictError> {
        validate(config)?;
        let mut file = File::open(&path).map_err(|_| DictError::FileOpen)?;

        let magic = file.read_u32::<LittleEndian>().map_err(read_err)?;
        if magic != FLAT_FILE_MAGIC {
            return Err(DictError::UnableToConvert);
        }
        let tag = file.read_u8().map_err(read_err)?;
        let key_type = KeyType::from_tag(tag).ok_or(DictError::UnableToConvert)?;
        let key_size = file.read_u32::<LittleEndian>().map_err(read_err)? as usize;
        let value_size = file.read_u32::<LittleEndian>().map_err(read_err)? as usize;
        if key_type != config.key_type
            || key_size != config.key_size
            || value_size != config.value_size
        {
            return Err(DictError::UnableToConvert);
        }
        let count = file.read_u64::<LittleEndian>().map_err(read_err)?;

        let mut hasher = Crc32::new();
        let mut records = Vec::new();
        for _ in 0..count {
            let mut key = vec![0u8; key_size];
            file.read_exact(&mut key).map_err(read_err)?;
            let mut value = vec![0u8; value_size];
            file.read_exact(&mut value).map_err(read_err)?;
            hasher.update(&key);
            hasher.update(&value);
            records.push(FlatRecord {
                key: key.into_boxed_slice(),
                value: value.into_boxed_slice(),
            });
        }
        let crc = file.read_u32::<LittleEndian>().map_err(read_err)?;
        if hasher.finalize() != crc {
            return Err(DictError::FileRead);
        }

        Ok(Self {
            info: RecordInfo::new(key_size, value_size),
            key_type,
            compare: comparator_for(key_type),
            records,
            path,
            destroyed: false,
        })
    }

    /// Number of records, duplicates included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn check_live(&self) -> Result<(), DictError> {
        if self.destroyed {
            return Err(DictError::Uninitialized);
        }
        Ok(())
    }

    fn check_key(&self, key: &[u8]) -> Result<(), DictError> {
        if key.len() != self.info.key_size {
            return Err(DictError::OutOfBounds);
        }
        Ok(())
    }

    fn check_value(&self, value: &[u8]) -> Result<(), DictError> {
        if value.len() != self.info.value_size {
            return Err(DictError::OutOfBounds);
        }
        Ok(())
    }

    /// Index of the first record at or after `from` matching the predicate.
    fn locate(&self, predicate: &Predicate, from: usize) -> Option<usize> {
        self.records[from..]
            .iter()
            .position(|r| predicate.matches(&r.key, self.compare))
            .map(|offset| from + offset)
    }

    fn write_to(&self, file: &mut File) -> io::Result<()> {
        file.write_u32::<LittleEndian>(FLAT_FILE_MAGIC)?;
        file.write_u8(self.key_type.tag())?;
        file.write_u32::<LittleEndian>(self.info.key_size as u32)?;
        file.write_u32::<LittleEndian>(self.info.value_size as u32)?;
        file.write_u64::<LittleEndian>(self.records.len() as u64)?;

        let mut hasher = Crc32::new();
        for record in &self.records {
            file.write_all(&record.key)?;
            file.write_all(&record.value)?;
            hasher.update(&record.key);
            hasher.update(&record.value);
        }
        file.write_u32::<LittleEndian>(hasher.finalize())?;
        file.flush()
    }
}

impl Store for FlatFile {
    fn record_info(&self) -> RecordInfo {
        self.info
    }

    fn key_type(&self) -> KeyType {
        self.key_type
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Status {
        self.check_live()?;
        self.check_key(key)?;
        self.check_value(value)?;
        self.records.push(FlatRecord {
            key: key.to_vec().into_boxed_slice(),
            value: value.to_vec().into_boxed_slice(),
        });
        Ok(1)
    }

    fn get(&self, key: &[u8], value_out: &mut [u8]) -> Status {
        self.check_live()?;
        self.check_key(key)?;
        self.check_value(value_out)?;
        for record in &self.records {
            if (self.compare)(&record.key, key) == Ordering::Equal {
                value_out.copy_from_slice(&record.value);
                return Ok(1);
            }
        }
        Err(DictError::ItemNotFound)
    }

    fn update(&mut self, key: &[u8], value: &[u8]) -> Status {
        self.check_live()?;
        self.check_key(key)?;
        self.check_value(value)?;
        let mut count = 0;
        for record in &mut self.records {
            if (self.compare)(&record.key, key) == Ordering::Equal {
                record.value.copy_from_slice(value);
                count += 1;
            }
        }
        if count == 0 {
            // Upsert: absent keys are inserted instead.
            return self.insert(key, value);
        }
        Ok(count)
    }

    fn remove(&mut self, key: &[u8]) -> Status {
        self.check_live()?;
        self.check_key(key)?;
        let before = self.records.len();
        let compare = self.compare;
        self.records
            .retain(|r| compare(&r.key, key) != Ordering::Equal);
        let count = before - self.records.len();
        if count == 0 {
            return Err(DictError::ItemNotFound);
        }
        Ok(count)
    }

    fn find<'a>(&'a self, predicate: Predicate) -> Result<Box<dyn Cursor + 'a>, DictError> {
        self.check_live()?;
        if !predicate.fits_key_size(self.info.key_size) {
            return Err(DictError::InvalidPredicate);
        }
        let (status, pos) = match self.locate(&predicate, 0) {
            Some(i) => (CursorStatus::Initialized, i),
            None => (CursorStatus::EndOfResults, self.records.len()),
        };
        Ok(Box::new(FlatFileCursor {
            file: self,
            predicate,
            status,
            pos,
        }))
    }

    fn close(&mut self) -> Result<(), DictError> {
        self.check_live()?;
        let tmp = self.path.with_extension("ffd.tmp");
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp)
            .map_err(|_| DictError::FileOpen)?;
        self.write_to(&mut file).map_err(|_| DictError::FileWrite)?;
        file.sync_all().map_err(|_| DictError::FileClose)?;
        fs::rename(&tmp, &self.path).map_err(|_| DictError::FileWrite)?;
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), DictError> {
        self.records.clear();
        self.destroyed = true;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(_) => Err(DictError::FileDelete),
        }
    }
}

/// Sequential-scan cursor. The file is unordered, so the cursor pre-locates
/// the next matching record on every advance instead of stopping at the
/// first miss.
struct FlatFileCursor<'a> {
    file: &'a FlatFile,
    predicate: Predicate,
    status: CursorStatus,
    pos: usize,
}

impl Cursor for FlatFileCursor<'_> {
    fn status(&self) -> CursorStatus {
        self.status
    }

    fn next(&mut self, record: &mut Record) -> CursorStatus {
        match self.status {
            CursorStatus::Invalid | CursorStatus::Uninitialized | CursorStatus::EndOfResults => {
                return self.status;
            }
            CursorStatus::Initialized => self.status = CursorStatus::Active,
            CursorStatus::Active => {}
        }
        if self.pos >= self.file.records.len() {
            self.status = CursorStatus::EndOfResults;
            return self.status;
        }
        let current = &self.file.records[self.pos];
        record.key.copy_from_slice(&current.key);
        record.value.copy_from_slice(&current.value);
        self.pos = self
            .file
            .locate(&self.predicate, self.pos + 1)
            .unwrap_or(self.file.records.len());
        self.status
    }
}

/// Handler for the flat-file structure, rooted at a data directory. The only
/// handler in the engine that reports persistence support.
pub struct FlatFileHandler {
    dir: PathBuf,
}

impl FlatFileHandler {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The backing file for a given dictionary id.
    pub fn path_for(&self, id: u32) -> PathBuf {
        self.dir.join(format!("dict_{id}.ffd"))
    }
}

impl Handler for FlatFileHandler {
    fn structure(&self) -> StructureType {
        StructureType::FlatFile
    }

    fn supports_persistence(&self) -> bool {
        true
    }

    fn create(&self, config: &DictionaryConfig) -> Result<Box<dyn Store>, DictError> {
        Ok(Box::new(FlatFile::create(config, self.path_for(config.id))?))
    }

    fn open(&self, config: &DictionaryConfig) -> Result<Box<dyn Store>, DictError> {
        Ok(Box::new(FlatFile::open(config, self.path_for(config.id))?))
    }

    fn destroy_by_id(&self, id: u32) -> Result<(), DictError> {
        fs::remove_file(self.path_for(id)).map_err(|_| DictError::FileDelete)
    }
}

/// Header length in bytes; the record section starts at this offset.
pub const HEADER_BYTES: u64 = 4 + 1 + 4 + 4 + 8;

#[cfg(test)]
mod tests {
    use super::*;
    use dictionary::codec;
    use tempfile::tempdir;

    fn config(id: u32) -> DictionaryConfig {
        DictionaryConfig {
            id,
            key_type: KeyType::UnsignedInt,
            key_size: 4,
            value_size: 8,
            size: 4,
        }
    }

    fn get_u64(store: &dyn Store, key: u32) -> Result<u64, DictError> {
        let mut value = [0u8; 8];
        store.get(&codec::encode_u32(key), &mut value)?;
        Ok(codec::decode_u64(&value))
    }

    fn drain(store: &dyn Store, predicate: Predicate) -> Vec<(u32, u64)> {
        let mut cursor = store.find(predicate).unwrap();
        let mut record = Record::for_info(&store.record_info());
        let mut out = Vec::new();
        while cursor.next(&mut record) == CursorStatus::Active {
            out.push((
                codec::decode_u32(&record.key),
                codec::decode_u64(&record.value),
            ));
        }
        out
    }

    // -------------------- record operations --------------------

    #[test]
    fn insert_get_update_remove() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(1)).unwrap();

        store
            .insert(&codec::encode_u32(1), &codec::encode_u64(10))
            .unwrap();
        assert_eq!(get_u64(store.as_ref(), 1), Ok(10));

        assert_eq!(
            store.update(&codec::encode_u32(1), &codec::encode_u64(11)),
            Ok(1)
        );
        assert_eq!(get_u64(store.as_ref(), 1), Ok(11));

        assert_eq!(store.remove(&codec::encode_u32(1)), Ok(1));
        assert_eq!(get_u64(store.as_ref(), 1), Err(DictError::ItemNotFound));
        assert_eq!(
            store.remove(&codec::encode_u32(1)),
            Err(DictError::ItemNotFound)
        );
    }

    #[test]
    fn duplicates_count_in_update_and_remove() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(1)).unwrap();

        for v in 1..=3u64 {
            store
                .insert(&codec::encode_u32(5), &codec::encode_u64(v))
                .unwrap();
        }
        store
            .insert(&codec::encode_u32(6), &codec::encode_u64(60))
            .unwrap();

        assert_eq!(
            store.update(&codec::encode_u32(5), &codec::encode_u64(9)),
            Ok(3)
        );
        assert_eq!(store.remove(&codec::encode_u32(5)), Ok(3));
        assert_eq!(get_u64(store.as_ref(), 6), Ok(60));
    }

    #[test]
    fn update_absent_key_inserts() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(1)).unwrap();
        assert_eq!(
            store.update(&codec::encode_u32(2), &codec::encode_u64(20)),
            Ok(1)
        );
        assert_eq!(get_u64(store.as_ref(), 2), Ok(20));
    }

    #[test]
    fn wrong_sizes_are_out_of_bounds() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(1)).unwrap();
        assert_eq!(
            store.insert(&[0u8; 3], &codec::encode_u64(1)),
            Err(DictError::OutOfBounds)
        );
        assert_eq!(
            store.insert(&codec::encode_u32(1), &[0u8; 3]),
            Err(DictError::OutOfBounds)
        );
    }

    // -------------------- cursors --------------------

    #[test]
    fn all_records_walks_insertion_order() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(1)).unwrap();
        for (k, v) in [(9, 90u64), (1, 10), (5, 50)] {
            store
                .insert(&codec::encode_u32(k), &codec::encode_u64(v))
                .unwrap();
        }
        // Unordered structure: cursor order is insertion order, not key order.
        assert_eq!(
            drain(store.as_ref(), Predicate::all_records()),
            vec![(9, 90), (1, 10), (5, 50)]
        );
    }

    #[test]
    fn range_filters_scattered_matches() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(1)).unwrap();
        for (k, v) in [(9, 90u64), (2, 20), (7, 70), (1, 10), (4, 40)] {
            store
                .insert(&codec::encode_u32(k), &codec::encode_u64(v))
                .unwrap();
        }
        let hits = drain(
            store.as_ref(),
            Predicate::range(&codec::encode_u32(2), &codec::encode_u32(7)),
        );
        assert_eq!(hits, vec![(2, 20), (7, 70), (4, 40)]);
    }

    #[test]
    fn equality_finds_every_duplicate() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(1)).unwrap();
        for (k, v) in [(3, 1u64), (8, 80), (3, 2), (9, 90), (3, 3)] {
            store
                .insert(&codec::encode_u32(k), &codec::encode_u64(v))
                .unwrap();
        }
        let hits = drain(
            store.as_ref(),
            Predicate::equality(&codec::encode_u32(3)),
        );
        assert_eq!(hits, vec![(3, 1), (3, 2), (3, 3)]);
    }

    #[test]
    fn empty_match_starts_exhausted() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let store = handler.create(&config(1)).unwrap();
        let cursor = store.find(Predicate::all_records()).unwrap();
        assert_eq!(cursor.status(), CursorStatus::EndOfResults);
    }

    #[test]
    fn mismatched_predicate_key_size_is_invalid() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let store = handler.create(&config(1)).unwrap();
        assert!(matches!(
            store.find(Predicate::equality(&[0u8; 2])),
            Err(DictError::InvalidPredicate)
        ));
    }

    // -------------------- persistence --------------------

    #[test]
    fn close_open_round_trip() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(4)).unwrap();
        for (k, v) in [(1, 10u64), (2, 20), (1, 11)] {
            store
                .insert(&codec::encode_u32(k), &codec::encode_u64(v))
                .unwrap();
        }
        store.close().unwrap();
        assert!(handler.path_for(4).exists());

        let reopened = handler.open(&config(4)).unwrap();
        assert_eq!(
            drain(reopened.as_ref(), Predicate::all_records()),
            vec![(1, 10), (2, 20), (1, 11)]
        );
    }

    #[test]
    fn create_over_existing_file_is_duplicate_dictionary() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(2)).unwrap();
        store.close().unwrap();
        assert!(matches!(
            handler.create(&config(2)),
            Err(DictError::DuplicateDictionary)
        ));
    }

    #[test]
    fn open_missing_file_is_file_open() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        assert!(matches!(
            handler.open(&config(42)),
            Err(DictError::FileOpen)
        ));
    }

    #[test]
    fn open_with_mismatched_layout_is_unable_to_convert() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(3)).unwrap();
        store.close().unwrap();

        let mut other = config(3);
        other.value_size = 16;
        assert!(matches!(
            handler.open(&other),
            Err(DictError::UnableToConvert)
        ));
    }

    #[test]
    fn corrupt_magic_is_unable_to_convert() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(5)).unwrap();
        store
            .insert(&codec::encode_u32(1), &codec::encode_u64(1))
            .unwrap();
        store.close().unwrap();

        let path = handler.path_for(5);
        let mut bytes = fs::read(&path).unwrap();
        bytes[0] ^= 0xFF;
        fs::write(&path, bytes).unwrap();
        assert!(matches!(
            handler.open(&config(5)),
            Err(DictError::UnableToConvert)
        ));
    }

    #[test]
    fn corrupt_checksum_is_file_read() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(6)).unwrap();
        store
            .insert(&codec::encode_u32(1), &codec::encode_u64(1))
            .unwrap();
        store.close().unwrap();

        let path = handler.path_for(6);
        let mut bytes = fs::read(&path).unwrap();
        // Flip a bit inside the record section; the trailing crc no longer
        // matches.
        let record_start = HEADER_BYTES as usize;
        bytes[record_start] ^= 0x01;
        fs::write(&path, bytes).unwrap();
        assert!(matches!(handler.open(&config(6)), Err(DictError::FileRead)));
    }

    #[test]
    fn truncated_file_is_unexpected_eof() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(7)).unwrap();
        store
            .insert(&codec::encode_u32(1), &codec::encode_u64(1))
            .unwrap();
        store.close().unwrap();

        let path = handler.path_for(7);
        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - 6]).unwrap();
        assert!(matches!(
            handler.open(&config(7)),
            Err(DictError::UnexpectedEof)
        ));
    }

    #[test]
    fn destroy_removes_file() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(8)).unwrap();
        store
            .insert(&codec::encode_u32(1), &codec::encode_u64(1))
            .unwrap();
        store.close().unwrap();
        assert!(handler.path_for(8).exists());

        store.destroy().unwrap();
        assert!(!handler.path_for(8).exists());
    }

    #[test]
    fn destroyed_store_rejects_operations() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(12)).unwrap();
        store
            .insert(&codec::encode_u32(1), &codec::encode_u64(1))
            .unwrap();
        store.destroy().unwrap();

        assert_eq!(
            store.insert(&codec::encode_u32(1), &codec::encode_u64(1)),
            Err(DictError::Uninitialized)
        );
        assert_eq!(get_u64(store.as_ref(), 1), Err(DictError::Uninitialized));
        assert_eq!(
            store.update(&codec::encode_u32(1), &codec::encode_u64(2)),
            Err(DictError::Uninitialized)
        );
        assert_eq!(
            store.remove(&codec::encode_u32(1)),
            Err(DictError::Uninitialized)
        );
        assert!(matches!(
            store.find(Predicate::all_records()),
            Err(DictError::Uninitialized)
        ));
        assert_eq!(store.close(), Err(DictError::Uninitialized));
    }

    #[test]
    fn destroy_without_file_is_ok() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(9)).unwrap();
        store.destroy().unwrap();
    }

    #[test]
    fn destroy_by_id_removes_file() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut store = handler.create(&config(10)).unwrap();
        store.close().unwrap();

        handler.destroy_by_id(10).unwrap();
        assert!(!handler.path_for(10).exists());
        assert!(matches!(
            handler.destroy_by_id(10),
            Err(DictError::FileDelete)
        ));
    }

    // -------------------- handler / config --------------------

    #[test]
    fn handler_reports_persistence() {
        let handler = FlatFileHandler::new("/tmp");
        assert_eq!(handler.structure(), StructureType::FlatFile);
        assert!(handler.supports_persistence());
    }

    #[test]
    fn zero_size_is_invalid() {
        let dir = tempdir().unwrap();
        let handler = FlatFileHandler::new(dir.path());
        let mut cfg = config(11);
        cfg.size = 0;
        assert!(matches!(
            handler.create(&cfg),
            Err(DictError::InvalidInitialSize)
        ));
    }
}
