use crate::record::Record;

/// The cursor state machine.
///
/// ```text
/// Uninitialized ──find──► Initialized ──next──► Active ──next*──► EndOfResults
///        │                                                            ▲
///        └──────────────── find with no matches ──────────────────────┘
/// ```
///
/// `Invalid` is the terminal error state for malformed predicates;
/// `Uninitialized` at rest and `EndOfResults` are also terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStatus {
    Invalid,
    Uninitialized,
    Initialized,
    Active,
    EndOfResults,
}

impl CursorStatus {
    /// A cursor in a terminal state never emits another record.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            CursorStatus::Invalid | CursorStatus::Uninitialized | CursorStatus::EndOfResults
        )
    }
}

/// A stateful iterator over one dictionary's records, bound to one
/// predicate and holding a position inside the backing structure.
///
/// Dropping the cursor releases the predicate's owned key copies. A cursor
/// borrows its store, so the structure cannot be mutated (or closed) while
/// the cursor is alive.
pub trait Cursor {
    fn status(&self) -> CursorStatus;

    /// Advances the cursor, copying the current record into `record`.
    ///
    /// Terminal states return unchanged without touching `record`. The first
    /// successful call transitions `Initialized` to `Active`; subsequent
    /// calls re-test the predicate against the *current* position and flip
    /// to `EndOfResults` without emitting once it fails.
    ///
    /// `record` must have been allocated for this dictionary's layout
    /// (see [`Record::for_info`]); passing mismatched buffers is a
    /// caller-contract violation.
    fn next(&mut self, record: &mut Record) -> CursorStatus;
}
