use std::cmp::Ordering;

use crate::key::Comparator;

/// The query shape a cursor is bound to.
///
/// Constructors deep-copy every key slice they are given, so a predicate is
/// independent of caller-supplied memory from the moment it exists; callers
/// may reuse or drop their key buffers immediately after `find` returns.
/// The copies are released when the owning cursor is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Every record whose key equals the target.
    Equality { key: Vec<u8> },
    /// Every record whose key lies in the closed interval `[lower, upper]`.
    Range { lower: Vec<u8>, upper: Vec<u8> },
    /// Every record in the structure.
    AllRecords,
}

impl Predicate {
    pub fn equality(key: &[u8]) -> Self {
        Predicate::Equality { key: key.to_vec() }
    }

    pub fn range(lower: &[u8], upper: &[u8]) -> Self {
        Predicate::Range {
            lower: lower.to_vec(),
            upper: upper.to_vec(),
        }
    }

    pub fn all_records() -> Self {
        Predicate::AllRecords
    }

    /// Tests a key against the predicate under the dictionary's comparator.
    pub fn matches(&self, key: &[u8], compare: Comparator) -> bool {
        match self {
            Predicate::Equality { key: target } => compare(key, target) == Ordering::Equal,
            Predicate::Range { lower, upper } => {
                compare(key, lower) != Ordering::Less && compare(key, upper) != Ordering::Greater
            }
            Predicate::AllRecords => true,
        }
    }

    /// Checks that every key buffer inside the predicate has the
    /// dictionary's key size. A mismatched predicate is malformed and must
    /// be rejected by `find`.
    pub fn fits_key_size(&self, key_size: usize) -> bool {
        match self {
            Predicate::Equality { key } => key.len() == key_size,
            Predicate::Range { lower, upper } => {
                lower.len() == key_size && upper.len() == key_size
            }
            Predicate::AllRecords => true,
        }
    }
}
