//! LRU List Module
//!
//! Recency-ordered entry storage: a hash map from key to node plus a doubly
//! linked list threaded through a generational arena. Lookup, touch, insert,
//! removal and eviction of the least recently used entry are all O(1).

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use generational_arena::{Arena, Index};

use crate::cache::CacheEntry;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    entry: CacheEntry<V>,
    prev: Option<Index>,
    next: Option<Index>,
}

// == LRU List ==
/// Entries ordered by recency of access.
///
/// - Head = most recently used
/// - Tail = least recently used
///
/// New keys enter at the head, so among entries that were never touched
/// after insertion the earliest inserted is always nearest the tail.
#[derive(Debug)]
pub struct LruList<K, V> {
    nodes: Arena<Node<K, V>>,
    lookup: HashMap<K, Index>,
    head: Option<Index>,
    tail: Option<Index>,
}

impl<K, V> LruList<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            lookup: HashMap::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates a list with room for `capacity` entries before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            lookup: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    fn unlink(&mut self, index: Index) {
        let (prev, next) = {
            let node = &self.nodes[index];
            (node.prev, node.next)
        };

        match prev {
            Some(prev_idx) => self.nodes[prev_idx].next = next,
            None => self.head = next,
        }
        match next {
            Some(next_idx) => self.nodes[next_idx].prev = prev,
            None => self.tail = prev,
        }
    }

    fn link_front(&mut self, index: Index) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[index];
            node.prev = None;
            node.next = old_head;
        }
        if let Some(old_head) = old_head {
            self.nodes[old_head].prev = Some(index);
        }
        self.head = Some(index);
        if self.tail.is_none() {
            self.tail = Some(index);
        }
    }

    fn remove_index(&mut self, index: Index) -> Option<(K, CacheEntry<V>)> {
        self.unlink(index);
        let node = self.nodes.remove(index)?;
        self.lookup.remove(&node.key);
        Some((node.key, node.entry))
    }

    // == Get ==
    /// Returns the entry for `key` without changing its recency.
    pub fn peek(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.lookup.get(key).map(|&index| &self.nodes[index].entry)
    }

    // == Touch ==
    /// Marks `key` as most recently used. Returns false if it is absent.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.lookup.get(key).copied() {
            Some(index) => {
                if self.head != Some(index) {
                    self.unlink(index);
                    self.link_front(index);
                }
                true
            }
            None => false,
        }
    }

    // == Insert ==
    /// Inserts or replaces the entry for `key` and makes it most recently used.
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(&mut self, key: K, entry: CacheEntry<V>) -> Option<CacheEntry<V>> {
        if let Some(&index) = self.lookup.get(&key) {
            let old = std::mem::replace(&mut self.nodes[index].entry, entry);
            self.touch(&key);
            return Some(old);
        }

        let index = self.nodes.insert(Node {
            key: key.clone(),
            entry,
            prev: None,
            next: None,
        });
        self.lookup.insert(key, index);
        self.link_front(index);
        None
    }

    // == Remove ==
    /// Removes `key`, returning its entry if it was present.
    pub fn remove(&mut self, key: &K) -> Option<CacheEntry<V>> {
        let index = self.lookup.get(key).copied()?;
        self.remove_index(index).map(|(_, entry)| entry)
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, CacheEntry<V>)> {
        let tail = self.tail?;
        self.remove_index(tail)
    }

    // == Remove Expired ==
    /// Removes every entry expired at `now` and returns how many were removed.
    pub fn remove_expired(&mut self, now: Instant) -> usize {
        let expired: Vec<Index> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.entry.is_expired_at(now))
            .map(|(index, _)| index)
            .collect();

        for &index in &expired {
            self.remove_index(index);
        }
        expired.len()
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len());
        let mut current = self.head;
        while let Some(index) = current {
            let node = &self.nodes[index];
            keys.push(node.key.clone());
            current = node.next;
        }
        keys
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lookup.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lookup.clear();
        self.head = None;
        self.tail = None;
    }
}

impl<K, V> Default for LruList<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
