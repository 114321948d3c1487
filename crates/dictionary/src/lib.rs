//! # Dictionary
//!
//! The core key/value contract of the TidepoolKV storage engine.
//!
//! A *dictionary* is a uniform map abstraction over interchangeable backing
//! structures. Callers never touch a concrete structure directly; they hold a
//! [`Dictionary`] handle whose record operations (insert / get / update /
//! remove / find) forward to a [`Store`] trait object, and whose construction
//! goes through a [`Handler`] — the per-structure capability table that picks
//! the comparator, validates the configuration, and builds the store.
//!
//! ## Key properties
//! - **Opaque fixed-width records**: keys and values are byte buffers whose
//!   lengths are fixed per dictionary instance at creation time.
//! - **Pluggable ordering**: a [`KeyType`] tag selects one of four byte-level
//!   comparators at creation; the comparator never changes afterwards.
//! - **Predicate-driven iteration**: equality, closed-range, and full-scan
//!   queries position a [`Cursor`] that streams records into caller-owned
//!   buffers.
//! - **Capability-aware lifecycle**: handlers report whether they support
//!   native persistence; structures that do not are opened/closed by the
//!   engine layer through a copy-through fallback.
//!
//! ## Example
//! ```rust
//! use dictionary::{codec, DictError, Predicate};
//!
//! // Keys encode big-endian so the byte-wise comparators agree with
//! // numeric order.
//! let k = codec::encode_i32(-7);
//! assert_eq!(codec::decode_i32(&k), -7);
//!
//! let p = Predicate::range(&codec::encode_i32(0), &codec::encode_i32(9));
//! assert_eq!(DictError::ItemNotFound.to_string(), "item not found");
//! # let _ = p;
//! ```

pub mod codec;
mod cursor;
mod error;
mod handle;
mod handler;
mod key;
mod predicate;
mod record;

pub use cursor::{Cursor, CursorStatus};
pub use error::{DictError, Status};
pub use handle::{Dictionary, DictionaryStatus};
pub use handler::{DictionaryConfig, Handler, Store, StructureType};
pub use key::{comparator_for, Comparator, KeyType};
pub use predicate::Predicate;
pub use record::{Record, RecordInfo};
