//! Recency Index Module
//!
//! Tracks access order for LRU eviction with O(1) updates.

use std::collections::HashMap;

// == Slot ==
/// One arena slot: a key plus its neighbours in recency order.
#[derive(Debug)]
struct Slot {
    key: String,
    /// Towards the front (more recently used)
    prev: Option<usize>,
    /// Towards the back (less recently used)
    next: Option<usize>,
}

// == Recency Index ==
/// Orders keys from most recently used (front) to least recently used (back).
///
/// Nodes live in an arena addressed by index, linked both ways, with a
/// key → slot map on the side. Promote, push, remove and pop are all O(1).
/// Freed slots are recycled through a free list.
#[derive(Debug, Default)]
pub struct RecencyIndex {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    positions: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl RecencyIndex {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index with room for `capacity` keys before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            positions: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    // == Touch ==
    /// Marks a key as most recently used, inserting it if new.
    pub fn touch(&mut self, key: &str) {
        if !self.promote(key) {
            self.push_front(key.to_string());
        }
    }

    // == Promote ==
    /// Moves an existing key to the front. Returns false if it is not indexed.
    pub fn promote(&mut self, key: &str) -> bool {
        let Some(&idx) = self.positions.get(key) else {
            return false;
        };
        if self.head != Some(idx) {
            self.unlink(idx);
            self.link_front(idx);
        }
        true
    }

    // == Remove ==
    /// Removes a key. Returns false if it was not indexed.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.positions.remove(key) {
            Some(idx) => {
                self.unlink(idx);
                self.slots[idx] = None;
                self.free.push(idx);
                true
            }
            None => false,
        }
    }

    // == Pop Back ==
    /// Removes and returns the least recently used key.
    pub fn pop_back(&mut self) -> Option<String> {
        let idx = self.tail?;
        self.unlink(idx);
        let slot = self.slots[idx].take()?;
        self.free.push(idx);
        self.positions.remove(&slot.key);
        Some(slot.key)
    }

    /// Returns the most recently used key.
    pub fn front(&self) -> Option<&str> {
        self.head.and_then(|idx| self.key_at(idx))
    }

    /// Returns the least recently used key without removing it.
    pub fn back(&self) -> Option<&str> {
        self.tail.and_then(|idx| self.key_at(idx))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            index: self,
            cursor: self.head,
        }
    }

    // == Internals ==
    fn key_at(&self, idx: usize) -> Option<&str> {
        self.slots[idx].as_ref().map(|slot| slot.key.as_str())
    }

    fn push_front(&mut self, key: String) {
        let slot = Slot {
            key: key.clone(),
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(slot);
                idx
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };
        self.positions.insert(key, idx);
        self.link_front(idx);
    }

    /// Links a detached slot in at the head.
    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(slot) = self.slots[idx].as_mut() {
            slot.prev = None;
            slot.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(head) = self.slots[h].as_mut() {
                    head.prev = Some(idx);
                }
            }
            // List was empty, this is also the tail
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Detaches a slot from its neighbours, fixing head and tail.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slots[idx].as_ref() {
            Some(slot) => (slot.prev, slot.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(slot) = self.slots[p].as_mut() {
                    slot.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(slot) = self.slots[n].as_mut() {
                    slot.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(slot) = self.slots[idx].as_mut() {
            slot.prev = None;
            slot.next = None;
        }
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyIndex`].
pub struct Iter<'a> {
    index: &'a RecencyIndex,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let slot = self.index.slots[idx].as_ref()?;
        self.cursor = slot.next;
        Some(slot.key.as_str())
    }
}
