//! ChainedTable: separately chained, string-keyed hash table.
//!
//! Entries live in a `SlotMap` arena. Each bucket holds the handle of its
//! chain head, and each entry holds the handle of the next entry in the same
//! chain, so chains are singly linked lists of arena handles.

use crate::config::TableConfig;
use crate::cursor::Cursor;
use crate::error::ConfigError;
use crate::hash::Djb2State;
use crate::iter::{Iter, IterMut, Keys, Values};
use core::fmt;
use core::hash::{BuildHasher, Hasher};
use core::ops::Index;
use core::sync::atomic::{AtomicU64, Ordering};
use log::{debug, trace, warn};
use slotmap::{DefaultKey, SlotMap};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

fn next_table_id() -> u64 {
    NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    pub(crate) key: Box<str>,
    pub(crate) value: V,
    pub(crate) hash: u64,
    pub(crate) next: Option<DefaultKey>,
}

/// String-keyed hash table with separate chaining.
///
/// New keys are prepended to their bucket's chain. Before every `insert`
/// the load factor is checked, and if it exceeds
/// [`TableConfig::load_factor_threshold`] the bucket array doubles.
pub struct ChainedTable<V, S = Djb2State> {
    hasher: S,
    config: TableConfig,
    buckets: Vec<Option<DefaultKey>>,
    slots: SlotMap<DefaultKey, Entry<V>>,
    // Process-unique; a clone gets a fresh one.
    id: u64,
    // Bumped on every structural change; checked by `Cursor`.
    stamp: u64,
}

impl<V: Clone, S: Clone> Clone for ChainedTable<V, S> {
    fn clone(&self) -> Self {
        Self {
            hasher: self.hasher.clone(),
            config: self.config,
            buckets: self.buckets.clone(),
            slots: self.slots.clone(),
            id: next_table_id(),
            stamp: self.stamp,
        }
    }
}

impl<V> ChainedTable<V> {
    /// Empty table with 128 buckets, threshold 5.0 and the djb2 hasher.
    pub fn new() -> Self {
        Self::from_parts(TableConfig::default(), Djb2State)
    }

    /// Empty table sized by `config`, using the djb2 hasher.
    ///
    /// Fails if `config` does not pass [`TableConfig::validate`].
    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, Djb2State)
    }
}

impl<V> Default for ChainedTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// First non-empty bucket at or after `from`, with its chain head.
pub(crate) fn first_occupied(
    buckets: &[Option<DefaultKey>],
    from: usize,
) -> Option<(usize, DefaultKey)> {
    buckets
        .iter()
        .enumerate()
        .skip(from)
        .find_map(|(i, head)| head.map(|k| (i, k)))
}

#[inline]
fn slot_for(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

impl<V, S> ChainedTable<V, S>
where
    S: BuildHasher,
{
    /// Empty table with the default config, hashing keys with `hasher`.
    /// The hasher only ever sees the key's UTF-8 bytes.
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_parts(TableConfig::default(), hasher)
    }

    /// Combination of [`ChainedTable::with_config`] and
    /// [`ChainedTable::with_hasher`].
    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, hasher))
    }

    fn from_parts(config: TableConfig, hasher: S) -> Self {
        trace!(
            "creating table with {} buckets, load factor threshold {}",
            config.initial_capacity,
            config.load_factor_threshold
        );
        Self {
            hasher,
            config,
            buckets: vec![None; config.initial_capacity],
            slots: SlotMap::with_key(),
            id: next_table_id(),
            stamp: 0,
        }
    }

    fn make_hash(&self, key: &str) -> u64 {
        let mut h = self.hasher.build_hasher();
        h.write(key.as_bytes());
        h.finish()
    }

    /// Bucket that `key` maps to under the current capacity.
    pub fn bucket_index(&self, key: &str) -> usize {
        slot_for(self.make_hash(key), self.capacity())
    }

    fn find(&self, key: &str) -> Option<DefaultKey> {
        let hash = self.make_hash(key);
        let mut cur = self.buckets[slot_for(hash, self.capacity())];
        while let Some(k) = cur {
            let e = &self.slots[k];
            if e.hash == hash && &*e.key == key {
                return Some(k);
            }
            cur = e.next;
        }
        None
    }

    /// Inserts `key` or overwrites its value, returning the previous value.
    ///
    /// The key is copied into the table. On overwrite the stored key is kept
    /// and the element count is unchanged.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        if self.load_factor() > self.config.load_factor_threshold {
            self.grow();
        }

        let hash = self.make_hash(key);
        let idx = slot_for(hash, self.capacity());

        let mut cur = self.buckets[idx];
        while let Some(k) = cur {
            let e = &mut self.slots[k];
            if e.hash == hash && &*e.key == key {
                return Some(core::mem::replace(&mut e.value, value));
            }
            cur = e.next;
        }

        let entry = Entry {
            key: key.into(),
            value,
            hash,
            next: self.buckets[idx],
        };
        self.buckets[idx] = Some(self.slots.insert(entry));
        self.bump();
        None
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let hash = self.make_hash(key);
        let idx = slot_for(hash, self.capacity());

        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[idx];
        while let Some(k) = cur {
            let e = &self.slots[k];
            if e.hash == hash && &*e.key == key {
                break;
            }
            prev = cur;
            cur = e.next;
        }

        let entry = self.slots.remove(cur?)?;
        match prev {
            Some(p) => self.slots[p].next = entry.next,
            None => self.buckets[idx] = entry.next,
        }
        self.bump();
        Some(entry.value)
    }

    /// Value stored under `key`, or `None` if the key is absent.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(|k| &self.slots[k].value)
    }

    /// Mutable access to the value under `key`. Writing through it is not a
    /// structural change and does not invalidate cursors.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.find(key)?;
        Some(&mut self.slots[k].value)
    }

    /// Like `get`, also returning the table's own copy of the key.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &V)> {
        self.find(key).map(|k| {
            let e = &self.slots[k];
            (&*e.key, &e.value)
        })
    }

    /// Whether `key` is present. Never mutates.
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }
}

impl<V, S> ChainedTable<V, S> {
    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Drops every entry; the bucket count is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.buckets.fill(None);
        self.bump();
    }

    /// Borrowing iterator over `(key, value)` pairs: buckets in ascending
    /// order, each chain newest first.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.buckets, &self.slots)
    }

    /// Mutable iteration in the same order as [`ChainedTable::iter`].
    /// Collects the entry references up front, so it allocates once.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut::new(&self.buckets, &mut self.slots)
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.iter())
    }

    /// Detached cursor positioned at the first entry. See [`Cursor`].
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self)
    }

    pub(crate) fn buckets(&self) -> &[Option<DefaultKey>] {
        &self.buckets
    }

    pub(crate) fn entry(&self, k: DefaultKey) -> Option<&Entry<V>> {
        self.slots.get(k)
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn stamp(&self) -> u64 {
        self.stamp
    }

    fn bump(&mut self) {
        self.stamp = self.stamp.wrapping_add(1);
    }

    /// Doubles the bucket array and relinks every entry under the new
    /// capacity. Entries stay in the arena; only chain links change.
    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let Some(new_capacity) = old_capacity.checked_mul(2) else {
            warn!(
                "bucket array cannot grow past {} buckets; keeping current capacity",
                old_capacity
            );
            return;
        };
        debug!(
            "growing table from {} to {} buckets ({} entries)",
            old_capacity,
            new_capacity,
            self.len()
        );

        // Allocated up front: nothing below can fail, so the table is never
        // left half-moved.
        let mut buckets: Vec<Option<DefaultKey>> = vec![None; new_capacity];
        for &head in &self.buckets {
            let mut cur = head;
            while let Some(k) = cur {
                let e = &mut self.slots[k];
                cur = e.next;
                let idx = slot_for(e.hash, new_capacity);
                e.next = buckets[idx];
                buckets[idx] = Some(k);
            }
        }
        self.buckets = buckets;
        self.bump();
    }
}

impl<V: fmt::Debug, S> fmt::Debug for ChainedTable<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V, S> Index<&str> for ChainedTable<V, S>
where
    S: BuildHasher,
{
    type Output = V;

    /// Panics if `key` is absent.
    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("key {:?} not present in table", key),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedTable<V, S>
where
    K: AsRef<str>,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k.as_ref(), v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedTable<V>
where
    K: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, V, S> IntoIterator for &'a ChainedTable<V, S> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V, S> IntoIterator for &'a mut ChainedTable<V, S> {
    type Item = (&'a str, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
