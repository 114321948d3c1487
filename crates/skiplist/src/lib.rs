//! # Skiplist
//!
//! The in-memory ordered backing structure of the TidepoolKV storage engine.
//!
//! A probabilistic skip list keyed by the dictionary's comparator. Nodes live
//! in an index arena: links are `u32` slots into a node table rather than
//! owned pointers, so the multi-level forward links never fight the borrow
//! checker and removed slots are recycled through a free list.
//!
//! ## Key properties
//! - **Ordered by the bound comparator**: level-0 traversal visits records in
//!   ascending key order, whatever the key type.
//! - **Duplicate runs**: equal keys form a contiguous run at level 0; only the
//!   run head climbs into the upper levels.
//! - **Geometric level generation**: a node's height is drawn with
//!   probability 1/4 per extra level, capped by the configured maximum.
//! - **Memory only**: the handler reports no persistence support, so the
//!   engine layer opens and closes these dictionaries through its
//!   copy-through fallback.
//!
//! ## Example
//! ```rust
//! use dictionary::{codec, DictionaryConfig, KeyType, Store};
//! use skiplist::SkipList;
//!
//! let config = DictionaryConfig {
//!     id: 1,
//!     key_type: KeyType::SignedInt,
//!     key_size: 4,
//!     value_size: 4,
//!     size: 7,
//! };
//! let mut list = SkipList::with_seed(&config, 42).unwrap();
//! list.insert(&codec::encode_i32(3), &codec::encode_u32(30)).unwrap();
//!
//! let mut value = [0u8; 4];
//! list.get(&codec::encode_i32(3), &mut value).unwrap();
//! assert_eq!(codec::decode_u32(&value), 30);
//! ```

use std::cmp::Ordering;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use dictionary::{
    comparator_for, Comparator, Cursor, CursorStatus, DictError, DictionaryConfig, Handler,
    KeyType, Predicate, Record, RecordInfo, Status, Store, StructureType,
};

/// Sentinel arena index meaning "no node".
const NIL: u32 = u32::MAX;
/// Arena index of the head sentinel. The head carries no record; it only
/// anchors the forward links at every level.
const HEAD: u32 = 0;

/// One arena slot. `forward.len()` is the node's height plus one; entry 0 is
/// the ordered level-0 chain.
struct Node {
    key: Box<[u8]>,
    value: Box<[u8]>,
    forward: Vec<u32>,
}

/// A skip list over fixed-width byte records.
///
/// `size` from the creating config is read as the maximum tower height. The
/// head sentinel always stands at that full height; every other node draws
/// its height at insert time and never changes it.
pub struct SkipList {
    info: RecordInfo,
    key_type: KeyType,
    compare: Comparator,
    max_height: usize,
    p_num: u32,
    p_den: u32,
    nodes: Vec<Option<Node>>,
    free: Vec<u32>,
    len: usize,
    destroyed: bool,
    rng: SmallRng,
}

impl SkipList {
    /// Builds an empty skip list for the given config, seeding the level
    /// generator from the OS.
    pub fn new(config: &DictionaryConfig) -> Result<Self, DictError> {
        Self::build(config, SmallRng::from_entropy())
    }

    /// Like [`new`](SkipList::new) but with a fixed level-generator seed, so
    /// tower shapes are reproducible across runs.
    pub fn with_seed(config: &DictionaryConfig, seed: u64) -> Result<Self, DictError> {
        Self::build(config, SmallRng::seed_from_u64(seed))
    }

    fn build(config: &DictionaryConfig, rng: SmallRng) -> Result<Self, DictError> {
        if config.size < 1 {
            return Err(DictError::InvalidInitialSize);
        }
        if config.key_size == 0 || config.value_size == 0 {
            return Err(DictError::InvalidInitialSize);
        }
        let head = Node {
            key: Box::default(),
            value: Box::default(),
            forward: vec![NIL; config.size],
        };
        Ok(Self {
            info: RecordInfo::new(config.key_size, config.value_size),
            key_type: config.key_type,
            compare: comparator_for(config.key_type),
            max_height: config.size,
            p_num: 1,
            p_den: 4,
            nodes: vec![Some(head)],
            free: Vec::new(),
            len: 0,
            destroyed: false,
            rng,
        })
    }

    /// Number of records, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Tower height of every record along the level-0 chain, head excluded.
    #[cfg(test)]
    fn level_zero_heights(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cursor = self.forward(HEAD, 0);
        while cursor != NIL {
            out.push(self.node(cursor).forward.len() - 1);
            cursor = self.forward(cursor, 0);
        }
        out
    }

    // -------------------- arena access --------------------

    fn node(&self, idx: u32) -> &Node {
        self.nodes[idx as usize].as_ref().expect("live node index")
    }

    fn node_mut(&mut self, idx: u32) -> &mut Node {
        self.nodes[idx as usize].as_mut().expect("live node index")
    }

    fn forward(&self, idx: u32, level: usize) -> u32 {
        self.node(idx).forward[level]
    }

    fn key_at(&self, idx: u32) -> &[u8] {
        &self.node(idx).key
    }

    fn head_height(&self) -> usize {
        self.max_height - 1
    }

    fn alloc_node(&mut self, key: &[u8], value: &[u8], height: usize) -> Result<u32, DictError> {
        let node = Node {
            key: key.to_vec().into_boxed_slice(),
            value: value.to_vec().into_boxed_slice(),
            forward: vec![NIL; height + 1],
        };
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx as usize] = Some(node);
                Ok(idx)
            }
            None => {
                if self.nodes.len() >= NIL as usize {
                    return Err(DictError::OutOfMemory);
                }
                self.nodes.push(Some(node));
                Ok((self.nodes.len() - 1) as u32)
            }
        }
    }

    fn free_node(&mut self, idx: u32) {
        self.nodes[idx as usize] = None;
        self.free.push(idx);
    }

    // -------------------- core algorithms --------------------

    /// Draws a tower height: geometric with success probability
    /// `p_num / p_den` per extra level, capped at the maximum.
    fn gen_level(&mut self) -> usize {
        let mut level = 1usize;
        while self.rng.gen_ratio(self.p_num, self.p_den) && level < self.max_height {
            level += 1;
        }
        level - 1
    }

    /// Walks the tower toward `key`, returning the first node with an equal
    /// key, or the strict predecessor (possibly [`HEAD`]) when no key
    /// matches. For a duplicate run this is always the run head, since only
    /// the run head appears above level 0.
    fn find_node(&self, key: &[u8]) -> u32 {
        let mut cursor = HEAD;
        for h in (0..=self.head_height()).rev() {
            loop {
                let next = self.forward(cursor, h);
                if next == NIL {
                    break;
                }
                match (self.compare)(self.key_at(next), key) {
                    Ordering::Equal => return next,
                    Ordering::Less => cursor = next,
                    Ordering::Greater => break,
                }
            }
        }
        cursor
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
}

impl Store for SkipList {
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

        let dup = self.find_node(key);
        if dup != HEAD && (self.compare)(self.key_at(dup), key) == Ordering::Equal {
            // Splice a height-0 node at the end of the duplicate run so
            // insertion order is preserved within the run.
            let node = self.alloc_node(key, value, 0)?;
            let mut tail = dup;
            loop {
                let next = self.forward(tail, 0);
                if next == NIL || (self.compare)(self.key_at(next), key) != Ordering::Equal {
                    break;
                }
                tail = next;
            }
            let after = self.forward(tail, 0);
            self.node_mut(node).forward[0] = after;
            self.node_mut(tail).forward[0] = node;
        } else {
            let height = self.gen_level();
            let node = self.alloc_node(key, value, height)?;
            let mut cursor = HEAD;
            for h in (0..=self.head_height()).rev() {
                loop {
                    let next = self.forward(cursor, h);
                    if next == NIL || (self.compare)(key, self.key_at(next)) == Ordering::Less {
                        break;
                    }
                    cursor = next;
                }
                if h <= height {
                    let next = self.forward(cursor, h);
                    self.node_mut(node).forward[h] = next;
                    self.node_mut(cursor).forward[h] = node;
                }
            }
        }
        self.len += 1;
        Ok(1)
    }

    fn get(&self, key: &[u8], value_out: &mut [u8]) -> Status {
        self.check_live()?;
        self.check_key(key)?;
        self.check_value(value_out)?;

        let node = self.find_node(key);
        if node == HEAD || (self.compare)(self.key_at(node), key) != Ordering::Equal {
            return Err(DictError::ItemNotFound);
        }
        value_out.copy_from_slice(&self.node(node).value);
        Ok(1)
    }

    fn update(&mut self, key: &[u8], value: &[u8]) -> Status {
        self.check_live()?;
        self.check_key(key)?;
        self.check_value(value)?;

        let node = self.find_node(key);
        if node == HEAD || (self.compare)(self.key_at(node), key) != Ordering::Equal {
            // Upsert: absent keys are inserted instead.
            return self.insert(key, value);
        }
        let mut cursor = node;
        let mut count = 0;
        while cursor != NIL && (self.compare)(self.key_at(cursor), key) == Ordering::Equal {
            self.node_mut(cursor).value.copy_from_slice(value);
            cursor = self.forward(cursor, 0);
            count += 1;
        }
        Ok(count)
    }

    fn remove(&mut self, key: &[u8]) -> Status {
        self.check_live()?;
        self.check_key(key)?;

        let mut found = false;
        let mut count = 0usize;
        let mut cursor = HEAD;
        for h in (0..=self.head_height()).rev() {
            loop {
                let next = self.forward(cursor, h);
                if next == NIL || (self.compare)(self.key_at(next), key) != Ordering::Less {
                    break;
                }
                cursor = next;
            }
            let next = self.forward(cursor, h);
            if next != NIL && (self.compare)(self.key_at(next), key) == Ordering::Equal {
                // The run head is the only member tall enough to show up
                // here; the rest of the run falls at level 0. Each victim is
                // unlinked from every level it occupies, then the walk
                // restarts from the anchor predecessor.
                let anchor = cursor;
                loop {
                    let victim = self.forward(cursor, h);
                    if victim == NIL || (self.compare)(self.key_at(victim), key) != Ordering::Equal
                    {
                        break;
                    }
                    let links = self.node(victim).forward.clone();
                    for link_h in (0..links.len()).rev() {
                        while self.forward(cursor, link_h) != victim {
                            cursor = self.forward(cursor, link_h);
                        }
                        self.node_mut(cursor).forward[link_h] = links[link_h];
                    }
                    self.free_node(victim);
                    cursor = anchor;
                    count += 1;
                }
                found = true;
            }
        }
        if !found {
            return Err(DictError::ItemNotFound);
        }
        self.len -= count;
        Ok(count)
    }

    fn find<'a>(&'a self, predicate: Predicate) -> Result<Box<dyn Cursor + 'a>, DictError> {
        self.check_live()?;
        if !predicate.fits_key_size(self.info.key_size) {
            return Err(DictError::InvalidPredicate);
        }
        let (status, current) = match &predicate {
            Predicate::Equality { key } => {
                let loc = self.find_node(key);
                if loc == HEAD || (self.compare)(self.key_at(loc), key) != Ordering::Equal {
                    (CursorStatus::EndOfResults, NIL)
                } else {
                    (CursorStatus::Initialized, loc)
                }
            }
            Predicate::Range { lower, upper } => {
                // Cheap emptiness probe first: the best candidate at or below
                // the upper bound must not fall below the lower bound.
                let probe = self.find_node(upper);
                if probe == HEAD || (self.compare)(self.key_at(probe), lower) == Ordering::Less {
                    (CursorStatus::EndOfResults, NIL)
                } else {
                    let mut loc = self.find_node(lower);
                    if loc == HEAD {
                        loc = self.forward(HEAD, 0);
                    }
                    while loc != NIL
                        && (self.compare)(self.key_at(loc), lower) == Ordering::Less
                    {
                        loc = self.forward(loc, 0);
                    }
                    if loc == NIL {
                        (CursorStatus::EndOfResults, NIL)
                    } else {
                        (CursorStatus::Initialized, loc)
                    }
                }
            }
            Predicate::AllRecords => {
                let first = self.forward(HEAD, 0);
                if first == NIL {
                    (CursorStatus::EndOfResults, NIL)
                } else {
                    (CursorStatus::Initialized, first)
                }
            }
        };
        Ok(Box::new(SkipListCursor {
            list: self,
            predicate,
            status,
            current,
        }))
    }

    fn destroy(&mut self) -> Result<(), DictError> {
        self.nodes.clear();
        self.free.clear();
        self.len = 0;
        self.destroyed = true;
        Ok(())
    }
}

/// Cursor over one skip list, walking the level-0 chain from the position
/// the predicate selected.
struct SkipListCursor<'a> {
    list: &'a SkipList,
    predicate: Predicate,
    status: CursorStatus,
    current: u32,
}

impl Cursor for SkipListCursor<'_> {
    fn status(&self) -> CursorStatus {
        self.status
    }

    fn next(&mut self, record: &mut Record) -> CursorStatus {
        match self.status {
            CursorStatus::Invalid | CursorStatus::Uninitialized | CursorStatus::EndOfResults => {
                return self.status;
            }
            CursorStatus::Active => {
                if self.current == NIL
                    || !self
                        .predicate
                        .matches(self.list.key_at(self.current), self.list.compare)
                {
                    self.status = CursorStatus::EndOfResults;
                    return self.status;
                }
            }
            CursorStatus::Initialized => self.status = CursorStatus::Active,
        }

        let node = self.list.node(self.current);
        record.key.copy_from_slice(&node.key);
        record.value.copy_from_slice(&node.value);
        self.current = node.forward[0];
        self.status
    }
}

/// Handler for the skip list structure. Purely in-memory, so it keeps the
/// default `NotImplemented` answers for open and destroy-by-id and reports
/// no persistence support.
pub struct SkipListHandler;

impl Handler for SkipListHandler {
    fn structure(&self) -> StructureType {
        StructureType::SkipList
    }

    fn create(&self, config: &DictionaryConfig) -> Result<Box<dyn Store>, DictError> {
        Ok(Box::new(SkipList::new(config)?))
    }
}
