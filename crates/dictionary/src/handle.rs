use crate::cursor::Cursor;
use crate::error::{DictError, Status};
use crate::handler::{DictionaryConfig, Handler, Store};
use crate::key::KeyType;
use crate::predicate::Predicate;
use crate::record::RecordInfo;

/// Whether a dictionary handle is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryStatus {
    Ok,
    Closed,
    Error,
}

/// The unit callers operate on: a status paired with the owned backing
/// store and the handler that built it.
///
/// Every record operation is a pure forwarding call into the store; the
/// handle itself carries no structure-specific logic. Lifecycle operations
/// beyond native close (open/close fallbacks, persistent destroy) live in
/// the engine layer, which drives the handle through the methods below.
pub struct Dictionary {
    status: DictionaryStatus,
    id: u32,
    store: Box<dyn Store>,
    handler: Box<dyn Handler>,
}

impl Dictionary {
    /// Creates a dictionary instance through `handler`, binding the
    /// comparator selected from the config's key type.
    pub fn create(handler: Box<dyn Handler>, config: &DictionaryConfig) -> Result<Self, DictError> {
        let store = handler.create(config)?;
        Ok(Self {
            status: DictionaryStatus::Ok,
            id: config.id,
            store,
            handler,
        })
    }

    /// Wraps a store produced by a native `Handler::open`.
    pub fn from_open(handler: Box<dyn Handler>, store: Box<dyn Store>, id: u32) -> Self {
        Self {
            status: DictionaryStatus::Ok,
            id,
            store,
            handler,
        }
    }

    pub fn status(&self) -> DictionaryStatus {
        self.status
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }

    pub fn record_info(&self) -> RecordInfo {
        self.store.record_info()
    }

    pub fn key_type(&self) -> KeyType {
        self.store.key_type()
    }

    fn ensure_open(&self) -> Result<(), DictError> {
        match self.status {
            DictionaryStatus::Ok => Ok(()),
            _ => Err(DictError::Uninitialized),
        }
    }

    pub fn insert(&mut self, key: &[u8], value: &[u8]) -> Status {
        self.ensure_open()?;
        self.store.insert(key, value)
    }

    pub fn get(&self, key: &[u8], value_out: &mut [u8]) -> Status {
        self.ensure_open()?;
        self.store.get(key, value_out)
    }

    pub fn update(&mut self, key: &[u8], value: &[u8]) -> Status {
        self.ensure_open()?;
        self.store.update(key, value)
    }

    pub fn remove(&mut self, key: &[u8]) -> Status {
        self.ensure_open()?;
        self.store.remove(key)
    }

    pub fn find(&self, predicate: Predicate) -> Result<Box<dyn Cursor + '_>, DictError> {
        self.ensure_open()?;
        self.store.find(predicate)
    }

    /// Natively closes the store and marks the handle `Closed`. Callers go
    /// through the engine layer, which falls back to copy-through when the
    /// handler lacks persistence support.
    pub fn close_native(&mut self) -> Result<(), DictError> {
        self.ensure_open()?;
        self.store.close()?;
        self.status = DictionaryStatus::Closed;
        Ok(())
    }

    /// Tears down the backing structure, releasing every record and any
    /// persisted form. The handle is `Closed` afterwards and all record
    /// operations report [`DictError::Uninitialized`].
    pub fn destroy(&mut self) -> Result<(), DictError> {
        self.store.destroy()?;
        self.status = DictionaryStatus::Closed;
        Ok(())
    }
}
