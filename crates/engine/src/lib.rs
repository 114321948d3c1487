//! # Engine
//!
//! Lifecycle orchestration for the TidepoolKV storage engine.
//!
//! The engine maps each [`StructureType`] to its handler and drives the
//! dictionary lifecycle across them: `create`, `open`, `close`, `destroy`.
//! Structures whose handler reports native persistence (the flat file) open
//! and close themselves; for the rest (the skip list) the engine emulates
//! both operations with a copy-through fallback over a size-1 flat-file
//! surrogate holding the same id and record layout.
//!
//! # Open path (fallback)
//!
//! 1. Open the surrogate flat file for the id, or create it empty when no
//!    file exists yet.
//! 2. Create a fresh target dictionary of the requested structure.
//! 3. Scan the surrogate with an all-records cursor and re-insert every
//!    record into the target.
//! 4. Destroy the surrogate, removing its file.
//!
//! # Close path (fallback)
//!
//! The mirror image: scan the live structure into a freshly created
//! surrogate, close the surrogate natively (persisting the file), destroy
//! the original structure, and mark the handle closed.
//!
//! ## Example
//! ```rust
//! use dictionary::{codec, DictionaryConfig, KeyType, StructureType};
//! use engine::Engine;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let engine = Engine::new(dir.path()).unwrap();
//! let config = DictionaryConfig {
//!     id: 1,
//!     key_type: KeyType::SignedInt,
//!     key_size: 4,
//!     value_size: 4,
//!     size: 7,
//! };
//!
//! let mut dict = engine.create(StructureType::SkipList, &config).unwrap();
//! dict.insert(&codec::encode_i32(3), &codec::encode_u32(30)).unwrap();
//! engine.close(&mut dict).unwrap();
//!
//! let dict = engine.open(StructureType::SkipList, &config).unwrap();
//! let mut value = [0u8; 4];
//! dict.get(&codec::encode_i32(3), &mut value).unwrap();
//! assert_eq!(codec::decode_u32(&value), 30);
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;

use dictionary::{
    CursorStatus, DictError, Dictionary, DictionaryConfig, DictionaryStatus, Handler, Predicate,
    Record, StructureType,
};
use flatfile::FlatFileHandler;
use skiplist::SkipListHandler;

/// Copies every record of `source` into `target` through an all-records
/// cursor, returning the cursor's terminal status. Which terminal states
/// count as a completed scan differs between the open and close paths, so
/// callers judge the status themselves.
fn copy_records(
    source: &Dictionary,
    target: &mut Dictionary,
) -> Result<CursorStatus, DictError> {
    let mut record = Record::for_info(&source.record_info());
    let mut cursor = source.find(Predicate::all_records())?;
    loop {
        match cursor.next(&mut record) {
            CursorStatus::Active => {
                target.insert(&record.key, &record.value)?;
            }
            status => return Ok(status),
        }
    }
}

/// The lifecycle layer above the handlers, rooted at one data directory.
///
/// The engine itself is stateless beyond that directory; every dictionary
/// handle it produces owns its handler and store outright.
pub struct Engine {
    data_dir: PathBuf,
}

impl Engine {
    /// Creates an engine rooted at `data_dir`, creating the directory when
    /// it does not exist.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn handler_for(&self, structure: StructureType) -> Box<dyn Handler> {
        match structure {
            StructureType::SkipList => Box::new(SkipListHandler),
            StructureType::FlatFile => Box::new(FlatFileHandler::new(&self.data_dir)),
        }
    }

    /// Creates a fresh dictionary of the requested structure. On error no
    /// handle materializes.
    pub fn create(
        &self,
        structure: StructureType,
        config: &DictionaryConfig,
    ) -> Result<Dictionary, DictError> {
        Dictionary::create(self.handler_for(structure), config)
    }

    /// Restores a previously closed dictionary.
    ///
    /// Handlers with native persistence open directly. For the rest the
    /// surrogate fallback runs; an id that was never closed before opens as
    /// an empty dictionary. Any insert failure while copying destroys the
    /// partially filled target and surfaces the error, leaving the persisted
    /// surrogate file in place.
    pub fn open(
        &self,
        structure: StructureType,
        config: &DictionaryConfig,
    ) -> Result<Dictionary, DictError> {
        let handler = self.handler_for(structure);
        if handler.supports_persistence() {
            let store = handler.open(config)?;
            return Ok(Dictionary::from_open(handler, store, config.id));
        }

        let surrogate_handler = FlatFileHandler::new(&self.data_dir);
        let surrogate_config = DictionaryConfig {
            size: 1,
            ..*config
        };
        let store = match surrogate_handler.open(&surrogate_config) {
            Ok(store) => store,
            Err(DictError::FileOpen) => surrogate_handler.create(&surrogate_config)?,
            Err(e) => return Err(e),
        };
        let mut source =
            Dictionary::from_open(Box::new(surrogate_handler), store, surrogate_config.id);

        let mut target = Dictionary::create(handler, config)?;
        match copy_records(&source, &mut target) {
            Ok(CursorStatus::EndOfResults) => {}
            Ok(_) => {
                let _ = target.destroy();
                return Err(DictError::Uninitialized);
            }
            Err(e) => {
                let _ = target.destroy();
                return Err(e);
            }
        }
        source.destroy()?;
        Ok(target)
    }

    /// Closes a dictionary, persisting its contents.
    ///
    /// Closing an already closed handle succeeds as a no-op. Handlers with
    /// native persistence close directly; otherwise the contents are copied
    /// into a freshly created surrogate, the surrogate is closed, and the
    /// original structure is destroyed.
    pub fn close(&self, dict: &mut Dictionary) -> Result<(), DictError> {
        if dict.status() == DictionaryStatus::Closed {
            return Ok(());
        }
        if dict.handler().supports_persistence() {
            return dict.close_native();
        }

        let info = dict.record_info();
        let surrogate_config = DictionaryConfig {
            id: dict.id(),
            key_type: dict.key_type(),
            key_size: info.key_size,
            value_size: info.value_size,
            size: 1,
        };
        let mut surrogate = Dictionary::create(
            Box::new(FlatFileHandler::new(&self.data_dir)),
            &surrogate_config,
        )?;
        // A cursor still at rest is acceptable here: a structure with
        // nothing to scan closes as empty.
        match copy_records(dict, &mut surrogate) {
            Ok(CursorStatus::EndOfResults) | Ok(CursorStatus::Uninitialized) => {}
            Ok(_) => {
                let _ = surrogate.destroy();
                return Err(DictError::Uninitialized);
            }
            Err(e) => {
                let _ = surrogate.destroy();
                return Err(e);
            }
        }
        surrogate.close_native()?;
        dict.destroy()?;
        Ok(())
    }

    /// Deletes the persisted form of a dictionary by id without opening it.
    /// Propagates `NotImplemented` for handlers that persist nothing.
    pub fn destroy(&self, structure: StructureType, id: u32) -> Result<(), DictError> {
        self.handler_for(structure).destroy_by_id(id)
    }
}
