use thiserror::Error;

/// Result of a record operation: the number of affected records, or the
/// error kind that stopped it.
///
/// Duplicate keys matter for the count — an update or remove that touches a
/// whole duplicate run reports the run length, not 1.
pub type Status = Result<usize, DictError>;

/// The error taxonomy shared by every dictionary component.
///
/// The "ok" member of the taxonomy is represented by the `Ok` arm of
/// [`Status`]; everything here is a failure kind. File-oriented kinds are
/// produced only by persistence-capable backing structures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DictError {
    #[error("item not found")]
    ItemNotFound,
    #[error("duplicate key")]
    DuplicateKey,
    #[error("maximum capacity reached")]
    MaxCapacity,
    #[error("dictionary destruction failed")]
    DestructionError,
    #[error("invalid predicate")]
    InvalidPredicate,
    #[error("out of memory")]
    OutOfMemory,
    #[error("file write failed")]
    FileWrite,
    #[error("file read failed")]
    FileRead,
    #[error("file open failed")]
    FileOpen,
    #[error("file close failed")]
    FileClose,
    #[error("file delete failed")]
    FileDelete,
    #[error("bad seek")]
    BadSeek,
    #[error("unexpected end of file")]
    UnexpectedEof,
    #[error("unable to convert stored data")]
    UnableToConvert,
    #[error("unable to insert record")]
    UnableToInsert,
    #[error("operation not implemented by this handler")]
    NotImplemented,
    #[error("invalid initial size")]
    InvalidInitialSize,
    #[error("dictionary already exists")]
    DuplicateDictionary,
    #[error("uninitialized")]
    Uninitialized,
    #[error("out of bounds")]
    OutOfBounds,
    #[error("sorted order violation")]
    SortedOrderViolation,
}
