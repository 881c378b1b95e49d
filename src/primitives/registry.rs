//! Fixed-capacity identifier registry.
//!
//! Every live id occupies one slot of a preallocated pool and is threaded onto a
//! single doubly linked list bounded by two sentinels. The list is ordered by
//! bucket index (`id % buckets`) and ids sharing a bucket are contiguous. A skip
//! table holds, for every bucket, the first list element whose bucket is greater
//! than or equal to it, so a lookup only ever scans the members of one bucket.
//!
//! Links are `u32` slot indices rather than pointers; unused slots form an
//! intrusive free list through their `next` field.

use std::fmt;

use crate::types::{GraphError, NodeId, Result};

/// Default number of ids a registry can hold.
pub const DEFAULT_CAPACITY: usize = 4096;
/// Default bucket count. Prime, so sequential ids spread across buckets.
pub const DEFAULT_BUCKETS: usize = 97;

const HEAD: u32 = 0;
const TAIL: u32 = 1;
const FIRST_SLOT: u32 = 2;
const NIL: u32 = u32::MAX;
const FREE_BUCKET: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
struct Slot {
    key: NodeId,
    bucket: u32,
    prev: u32,
    next: u32,
}

impl Slot {
    fn free(next: u32) -> Self {
        Self {
            key: NodeId(0),
            bucket: FREE_BUCKET,
            prev: NIL,
            next,
        }
    }

    fn is_live(&self) -> bool {
        self.bucket != FREE_BUCKET
    }
}

/// Result of [`IdRegistry::insert`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InsertOutcome {
    /// The id was added.
    Inserted,
    /// The id was already present; the registry is unchanged.
    Duplicate,
    /// No free slot remained; the registry is unchanged.
    Full,
}

impl InsertOutcome {
    /// Returns `true` when the id was actually added.
    pub fn is_inserted(self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

/// Position inside the registry's list.
///
/// Cursors are plain slot indices and are only meaningful until the next
/// mutation that does not hand back a fresh cursor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cursor(u32);

impl Cursor {
    /// Returns `true` when the cursor sits on the tail sentinel.
    pub fn is_end(self) -> bool {
        self.0 == TAIL
    }
}

/// Capacity-bounded set of unique node ids.
#[derive(Clone)]
pub struct IdRegistry {
    slots: Vec<Slot>,
    skip: Vec<u32>,
    free_head: u32,
    len: usize,
    capacity: usize,
}

impl IdRegistry {
    /// Creates an empty registry with a fixed slot pool and bucket table.
    pub fn new(capacity: usize, buckets: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(GraphError::Invalid("registry capacity must be non-zero"));
        }
        if buckets == 0 {
            return Err(GraphError::Invalid(
                "registry bucket count must be non-zero",
            ));
        }
        // Slot indices and the tail bucket both have to fit below the u32 markers.
        if capacity > (NIL - FIRST_SLOT) as usize || buckets >= FREE_BUCKET as usize {
            return Err(GraphError::Invalid(
                "registry dimensions exceed u32 slot space",
            ));
        }

        let mut slots = Vec::with_capacity(capacity + FIRST_SLOT as usize);
        slots.push(Slot {
            key: NodeId(0),
            bucket: 0,
            prev: NIL,
            next: TAIL,
        });
        slots.push(Slot {
            key: NodeId(0),
            bucket: buckets as u32,
            prev: HEAD,
            next: NIL,
        });
        let last = FIRST_SLOT + capacity as u32 - 1;
        for idx in FIRST_SLOT..=last {
            slots.push(Slot::free(if idx == last { NIL } else { idx + 1 }));
        }

        Ok(Self {
            slots,
            skip: vec![TAIL; buckets],
            free_head: FIRST_SLOT,
            len: 0,
            capacity,
        })
    }

    /// Registry with the default capacity and bucket count.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_BUCKETS)
            .unwrap_or_else(|_| unreachable!("default registry dimensions are valid"))
    }

    /// Number of live ids.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no id is registered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fixed slot capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fixed bucket count.
    pub fn bucket_count(&self) -> usize {
        self.skip.len()
    }

    /// Returns `true` when every slot is in use.
    pub fn is_full(&self) -> bool {
        self.free_head == NIL
    }

    /// Adds `key` unless it is already present or the pool is exhausted.
    pub fn insert(&mut self, key: NodeId) -> InsertOutcome {
        let bucket = self.bucket_of(key);
        let stop = match self.locate(key) {
            Ok(_) => return InsertOutcome::Duplicate,
            Err(stop) => stop,
        };
        if self.free_head == NIL {
            return InsertOutcome::Full;
        }

        let slot = self.free_head;
        self.free_head = self.slots[slot as usize].next;
        let prev = self.slots[stop as usize].prev;
        self.slots[slot as usize] = Slot {
            key,
            bucket,
            prev,
            next: stop,
        };
        self.slots[prev as usize].next = slot;
        self.slots[stop as usize].prev = slot;
        if self.skip[bucket as usize] == stop {
            self.redirect_skips(bucket, stop, slot);
        }
        self.len += 1;
        InsertOutcome::Inserted
    }

    /// Removes `key`, returning `true` if it was present.
    pub fn remove(&mut self, key: NodeId) -> bool {
        match self.locate(key) {
            Ok(slot) => {
                self.unlink(slot);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns `true` if `key` is registered.
    pub fn contains(&self, key: NodeId) -> bool {
        self.locate(key).is_ok()
    }

    /// Cursor positioned on `key`, if present.
    pub fn find(&self, key: NodeId) -> Option<Cursor> {
        self.locate(key).ok().map(Cursor)
    }

    /// Cursor on the first element in list order (the end cursor when empty).
    pub fn first(&self) -> Cursor {
        Cursor(self.slots[HEAD as usize].next)
    }

    /// Id stored at `cursor`, or `None` for the end cursor or a vacated slot.
    pub fn get(&self, cursor: Cursor) -> Option<NodeId> {
        let slot = self.live_slot(cursor)?;
        Some(slot.key)
    }

    /// Cursor following `cursor`; the end cursor stays at the end.
    pub fn advance(&self, cursor: Cursor) -> Cursor {
        match self.live_slot(cursor) {
            Some(slot) => Cursor(slot.next),
            None => Cursor(TAIL),
        }
    }

    /// Removes the element under `cursor` and returns it with a cursor to its
    /// successor, so removal can continue mid-traversal.
    pub fn remove_at(&mut self, cursor: Cursor) -> Option<(NodeId, Cursor)> {
        let key = self.live_slot(cursor)?.key;
        let next = self.unlink(cursor.0);
        Some((key, Cursor(next)))
    }

    /// Keeps only the ids for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(NodeId) -> bool,
    {
        let mut cursor = self.first();
        while let Some(key) = self.get(cursor) {
            cursor = if keep(key) {
                self.advance(cursor)
            } else {
                match self.remove_at(cursor) {
                    Some((_, next)) => next,
                    None => break,
                }
            };
        }
    }

    /// Removes every id and rebuilds the free list.
    pub fn clear(&mut self) {
        let mut cursor = self.first();
        while let Some((_, next)) = self.remove_at(cursor) {
            cursor = next;
        }
    }

    /// Iterates ids in list order (ascending bucket, then insertion order).
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            registry: self,
            cursor: self.slots[HEAD as usize].next,
            remaining: self.len,
        }
    }

    /// Walks the list, the skip table, and the free list and reports the first
    /// broken invariant.
    pub fn verify(&self) -> Result<()> {
        let buckets = self.skip.len();
        let mut expected_skip = vec![TAIL; buckets];
        let mut seen = std::collections::HashSet::with_capacity(self.len);
        let mut count = 0usize;
        let mut prev = HEAD;
        let mut cur = self.slots[HEAD as usize].next;
        let mut last_bucket = 0u32;
        while cur != TAIL {
            if cur == NIL || count > self.capacity {
                return Err(GraphError::Corruption("registry list is not terminated"));
            }
            let slot = &self.slots[cur as usize];
            if !slot.is_live() {
                return Err(GraphError::Corruption(
                    "free slot linked into registry list",
                ));
            }
            if slot.prev != prev {
                return Err(GraphError::Corruption("registry back link mismatch"));
            }
            if slot.bucket != self.bucket_of(slot.key) {
                return Err(GraphError::Corruption("registry slot carries wrong bucket"));
            }
            if slot.bucket < last_bucket {
                return Err(GraphError::Corruption("registry list out of bucket order"));
            }
            if !seen.insert(slot.key) {
                return Err(GraphError::Corruption("duplicate id in registry"));
            }
            // Every bucket in (last_bucket, slot.bucket] starts here.
            let lo = if count == 0 { 0 } else { last_bucket as usize + 1 };
            for entry in expected_skip
                .iter_mut()
                .take(slot.bucket as usize + 1)
                .skip(lo)
            {
                *entry = cur;
            }
            last_bucket = slot.bucket;
            count += 1;
            prev = cur;
            cur = slot.next;
        }
        if self.slots[TAIL as usize].prev != prev {
            return Err(GraphError::Corruption("tail sentinel back link mismatch"));
        }
        if count != self.len {
            return Err(GraphError::Corruption("registry length mismatch"));
        }
        if expected_skip != self.skip {
            return Err(GraphError::Corruption("bucket skip table out of date"));
        }

        let mut free = 0usize;
        let mut cur = self.free_head;
        while cur != NIL {
            if free > self.capacity || self.slots[cur as usize].is_live() {
                return Err(GraphError::Corruption("registry free list damaged"));
            }
            free += 1;
            cur = self.slots[cur as usize].next;
        }
        if free + self.len != self.capacity {
            return Err(GraphError::Corruption("registry slots leaked"));
        }
        Ok(())
    }

    fn bucket_of(&self, key: NodeId) -> u32 {
        (key.0 % self.skip.len() as u64) as u32
    }

    /// `Ok(slot)` when found, otherwise `Err(stop)`: the first element past the
    /// key's bucket, which is where a new member of that bucket is spliced in.
    fn locate(&self, key: NodeId) -> std::result::Result<u32, u32> {
        let bucket = self.bucket_of(key);
        let mut cur = self.skip[bucket as usize];
        loop {
            let slot = &self.slots[cur as usize];
            if slot.bucket != bucket {
                return Err(cur);
            }
            if slot.key == key {
                return Ok(cur);
            }
            cur = slot.next;
        }
    }

    fn live_slot(&self, cursor: Cursor) -> Option<&Slot> {
        if cursor.0 < FIRST_SLOT {
            return None;
        }
        self.slots.get(cursor.0 as usize).filter(|slot| slot.is_live())
    }

    fn unlink(&mut self, slot: u32) -> u32 {
        let Slot {
            bucket, prev, next, ..
        } = self.slots[slot as usize];
        self.slots[prev as usize].next = next;
        self.slots[next as usize].prev = prev;
        if self.skip[bucket as usize] == slot {
            self.redirect_skips(bucket, slot, next);
        }
        self.slots[slot as usize] = Slot::free(self.free_head);
        self.free_head = slot;
        self.len -= 1;
        next
    }

    /// Rewrites `bucket` and the run of empty buckets before it that all point
    /// at `old`.
    fn redirect_skips(&mut self, bucket: u32, old: u32, new: u32) {
        let mut idx = bucket as usize;
        loop {
            if self.skip[idx] != old {
                break;
            }
            self.skip[idx] = new;
            if idx == 0 {
                break;
            }
            idx -= 1;
        }
    }
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for IdRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdRegistry")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("buckets", &self.skip.len())
            .finish()
    }
}

/// Iterator over registered ids in list order.
pub struct Iter<'a> {
    registry: &'a IdRegistry,
    cursor: u32,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.cursor == TAIL {
            return None;
        }
        let slot = &self.registry.slots[self.cursor as usize];
        self.cursor = slot.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(slot.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a IdRegistry {
    type Item = NodeId;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
