//! SegmentedHashMap: chained hash table over segmented storage.
//!
//! Buckets and entries live in two segmented buffers of one shared prime
//! capacity. A bucket holds `1 + index` of its chain head (`0` = empty);
//! each live slot caches a folded 32-bit hash and links to the next slot
//! in its chain, while freed slots thread the same link position into a
//! free list that insertion drains before it ever appends. Keys are
//! hashed once on insert; resizing re-threads slots from their stored
//! hashes and never calls back into the comparer.

use crate::capacity;
use crate::comparer::{Comparer, HashComparer};
use crate::cursor::{Cursor, KeyCursor, ValueCursor};
use crate::segmented_buf::{self, SegmentedBuf};

use std::fmt;
use std::hash::BuildHasher;
use std::iter::{FusedIterator, Take};
use std::mem;
use std::ops;

/// "No slot" sentinel shared by chain links and the free-list head.
const NO_SLOT: i32 = -1;

/// One fixed-position record of the entry table: a chain member holding
/// a key/value, or a free-list member holding nothing.
#[derive(Clone)]
enum Slot<K, V> {
    Live { hash: u32, next: i32, key: K, value: V },
    Free { next_free: i32 },
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Free { next_free: NO_SLOT }
    }
}

/// Fail-fast for a chain that loops or runs into a free slot. Both are
/// only reachable when the map is mutated from several threads without
/// synchronization.
#[cold]
#[inline(never)]
pub(crate) fn chain_corrupted() -> ! {
    panic!("hash chain corrupted: the map was mutated concurrently without synchronization");
}

#[inline]
fn slot_index(link: i32) -> Option<usize> {
    if link < 0 {
        None
    } else {
        Some(link as usize)
    }
}

/// Error from [`SegmentedHashMap::try_insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    DuplicateKey,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::DuplicateKey => f.write_str("key already present in the map"),
        }
    }
}

impl std::error::Error for InsertError {}

/// Requested capacity is below the number of entries in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCapacity;

impl fmt::Display for InvalidCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("capacity is smaller than the number of entries in the map")
    }
}

impl std::error::Error for InvalidCapacity {}

/// Destination of a bulk copy is shorter than the number of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceTooSmall;

impl fmt::Display for SliceTooSmall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("destination slice is shorter than the number of entries in the map")
    }
}

impl std::error::Error for SliceTooSmall {}

/// A hash map whose backing storage is a set of fixed-size segments, so
/// growth never requires one allocation proportional to the whole map.
///
/// Keys are unique under the map's [`Comparer`]; values are mutable in
/// place. All structural mutation goes through `&mut self`, which is
/// what makes the structure single-writer.
///
/// ```
/// use segmented_hashmap::SegmentedHashMap;
///
/// let mut map = SegmentedHashMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
/// assert_eq!(map.get(&"a"), Some(&1));
/// assert_eq!(map.remove(&"b"), Some(2));
/// assert_eq!(map.len(), 1);
/// ```
#[derive(Clone)]
pub struct SegmentedHashMap<K, V, C = HashComparer> {
    buckets: SegmentedBuf<u32>,
    entries: SegmentedBuf<Slot<K, V>>,
    multiplier: u64,
    count: usize,
    free_head: i32,
    free_count: usize,
    version: u64,
    comparer: C,
}

#[derive(Clone, Copy)]
enum OnPresent {
    Overwrite,
    Keep,
}

enum Inserted<V> {
    Added,
    Replaced(V),
    Kept,
}

impl<K, V> SegmentedHashMap<K, V> {
    /// Creates an empty map with capacity 0; nothing is allocated until
    /// the first insert.
    pub fn new() -> Self {
        Self::with_comparer(HashComparer::default())
    }

    /// Creates a map pre-sized to hold `capacity` entries without growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparer(capacity, HashComparer::default())
    }
}

impl<K, V, S: BuildHasher> SegmentedHashMap<K, V, HashComparer<S>> {
    pub fn with_hasher(build_hasher: S) -> Self {
        Self::with_comparer(HashComparer::new(build_hasher))
    }

    pub fn with_capacity_and_hasher(capacity: usize, build_hasher: S) -> Self {
        Self::with_capacity_and_comparer(capacity, HashComparer::new(build_hasher))
    }
}

impl<K, V, C> SegmentedHashMap<K, V, C> {
    /// Creates an empty map that hashes and compares keys with `comparer`.
    /// The comparer is fixed for the lifetime of the map.
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            buckets: SegmentedBuf::new(),
            entries: SegmentedBuf::new(),
            multiplier: 0,
            count: 0,
            free_head: NO_SLOT,
            free_count: 0,
            version: 0,
            comparer,
        }
    }

    pub fn with_capacity_and_comparer(capacity: usize, comparer: C) -> Self {
        let mut map = Self::with_comparer(comparer);
        if capacity > 0 {
            map.initialize(capacity);
        }
        map
    }

    /// Number of entries in the map.
    pub fn len(&self) -> usize {
        self.count - self.free_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries the map can hold before growing.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Grows storage so at least `capacity` entries fit, returning the
    /// resulting capacity. Never shrinks.
    pub fn ensure_capacity(&mut self, capacity: usize) -> usize {
        let current = self.entries.len();
        if capacity <= current {
            return current;
        }
        if current == 0 {
            self.initialize(capacity);
            self.version = self.version.wrapping_add(1);
        } else {
            self.resize(capacity::next_prime_at_least(capacity));
        }
        self.entries.len()
    }

    /// Removes every entry, keeping the allocated storage.
    pub fn clear(&mut self) {
        if self.count == 0 {
            return;
        }
        let bucket_count = self.buckets.len();
        self.buckets.clear_range(0, bucket_count);
        self.entries.clear_range(0, self.count);
        self.count = 0;
        self.free_head = NO_SLOT;
        self.free_count = 0;
        self.version = self.version.wrapping_add(1);
    }

    /// Compacts storage down to the current number of entries.
    pub fn trim_excess(&mut self) {
        self.trim_to(self.len());
    }

    /// Compacts storage down to `capacity` entries. Fails without
    /// touching the map when `capacity` is below [`len`](Self::len).
    pub fn trim_excess_to(&mut self, capacity: usize) -> Result<(), InvalidCapacity> {
        if capacity < self.len() {
            return Err(InvalidCapacity);
        }
        self.trim_to(capacity);
        Ok(())
    }

    /// Clones every entry into the front of `out`, in iteration order.
    pub fn copy_to_slice(&self, out: &mut [(K, V)]) -> Result<(), SliceTooSmall>
    where
        K: Clone,
        V: Clone,
    {
        if out.len() < self.len() {
            return Err(SliceTooSmall);
        }
        for ((key, value), dst) in self.iter().zip(out.iter_mut()) {
            *dst = (key.clone(), value.clone());
        }
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.entries.iter().take(self.count),
            remaining: self.len(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let remaining = self.len();
        IterMut {
            slots: self.entries.iter_mut().take(self.count),
            remaining,
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// A detached cursor over the map's entries. Unlike [`iter`](Self::iter),
    /// a cursor does not borrow the map between steps, so structural
    /// mutation can happen mid-iteration; every step checks the map's
    /// version and reports it instead of yielding torn results.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.version)
    }

    /// Key-only projection of [`cursor`](Self::cursor).
    pub fn key_cursor(&self) -> KeyCursor {
        KeyCursor::new(self.cursor())
    }

    /// Value-only projection of [`cursor`](Self::cursor).
    pub fn value_cursor(&self) -> ValueCursor {
        ValueCursor::new(self.cursor())
    }

    pub(crate) fn version_stamp(&self) -> u64 {
        self.version
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.count
    }

    pub(crate) fn slot_pair(&self, index: usize) -> Option<(&K, &V)> {
        match self.entries.get(index) {
            Slot::Live { key, value, .. } => Some((key, value)),
            Slot::Free { .. } => None,
        }
    }

    fn initialize(&mut self, capacity: usize) {
        let size = capacity::next_prime_at_least(capacity);
        self.entries.resize_reusing_segments(size);
        self.buckets.resize_reusing_segments(size);
        self.multiplier = capacity::fast_mod_multiplier(size as u32);
    }

    /// Rebuilds the bucket table at `new_capacity` (a prime), extending
    /// the entry table in place and re-threading every live slot under
    /// the new modulus from its stored hash. The free list is untouched;
    /// growth only happens once it is empty.
    fn resize(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.count);
        self.entries.resize_reusing_segments(new_capacity);
        self.buckets = SegmentedBuf::with_len(new_capacity);
        self.multiplier = capacity::fast_mod_multiplier(new_capacity as u32);
        for index in 0..self.count {
            let hash = match self.entries.get(index) {
                Slot::Live { hash, .. } => *hash,
                Slot::Free { .. } => continue,
            };
            let bucket = self.bucket_of(hash);
            let head = *self.buckets.get(bucket) as i32 - 1;
            if let Slot::Live { next, .. } = self.entries.get_mut(index) {
                *next = head;
            }
            *self.buckets.get_mut(bucket) = index as u32 + 1;
        }
        self.version = self.version.wrapping_add(1);
    }

    /// Rebuilds both tables, packing live slots contiguously. After a
    /// trim the free list is always empty.
    fn trim_to(&mut self, capacity: usize) {
        let current = self.entries.len();
        if current == 0 {
            return;
        }
        let target = capacity::next_prime_at_least(capacity.max(self.len()));
        let new_capacity = if target < current {
            target
        } else if self.free_count > 0 {
            current
        } else {
            return;
        };
        let old_count = self.count;
        let old_entries = mem::replace(&mut self.entries, SegmentedBuf::with_len(new_capacity));
        self.buckets = SegmentedBuf::with_len(new_capacity);
        self.multiplier = capacity::fast_mod_multiplier(new_capacity as u32);
        self.count = 0;
        self.free_head = NO_SLOT;
        self.free_count = 0;
        for slot in old_entries.into_iter().take(old_count) {
            if let Slot::Live {
                hash, key, value, ..
            } = slot
            {
                let index = self.count;
                let bucket = self.bucket_of(hash);
                let head = *self.buckets.get(bucket) as i32 - 1;
                *self.entries.get_mut(index) = Slot::Live {
                    hash,
                    next: head,
                    key,
                    value,
                };
                *self.buckets.get_mut(bucket) = index as u32 + 1;
                self.count += 1;
            }
        }
        self.version = self.version.wrapping_add(1);
    }

    #[inline]
    fn bucket_of(&self, hash: u32) -> usize {
        capacity::fast_mod(hash, self.buckets.len() as u32, self.multiplier) as usize
    }

    #[inline]
    fn chain_head(&self, bucket: usize) -> Option<usize> {
        let head = *self.buckets.get(bucket);
        if head == 0 {
            None
        } else {
            Some((head - 1) as usize)
        }
    }
}

impl<K, V, C: Comparer<K>> SegmentedHashMap<K, V, C> {
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.find_index(key)?;
        match self.entries.get(index) {
            Slot::Live { value, .. } => Some(value),
            Slot::Free { .. } => chain_corrupted(),
        }
    }

    /// Looks the key up once and hands back a mutable borrow of the
    /// value, for in-place updates without a second hash/compare pass.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find_index(key)?;
        match self.entries.get_mut(index) {
            Slot::Live { value, .. } => Some(value),
            Slot::Free { .. } => chain_corrupted(),
        }
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let index = self.find_index(key)?;
        self.slot_pair(index)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    /// Inserts the pair, replacing and returning the previous value when
    /// the key is already present. Replacing a value is not a structural
    /// change: in-flight cursors stay valid.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.insert_with_policy(key, value, OnPresent::Overwrite) {
            Inserted::Replaced(previous) => Some(previous),
            Inserted::Added | Inserted::Kept => None,
        }
    }

    /// Inserts the pair only if the key is absent; a present key is an
    /// error and the map is left untouched.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), InsertError> {
        match self.insert_with_policy(key, value, OnPresent::Keep) {
            Inserted::Kept => Err(InsertError::DuplicateKey),
            Inserted::Added | Inserted::Replaced(_) => Ok(()),
        }
    }

    /// Inserts the pair only if the key is absent. Returns false (and
    /// drops the pair) when the key is already present.
    pub fn insert_if_absent(&mut self, key: K, value: V) -> bool {
        matches!(
            self.insert_with_policy(key, value, OnPresent::Keep),
            Inserted::Added
        )
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Unlinks the entry from its chain and pushes the slot onto the
    /// free list; the removed key and value are handed back to the
    /// caller rather than lingering in storage.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = self.hash_key(key);
        let bucket = self.bucket_of(hash);
        let mut previous: Option<usize> = None;
        let mut index = self.chain_head(bucket);
        let mut walked = 0usize;
        while let Some(i) = index {
            let (matched, next) = match self.entries.get(i) {
                Slot::Live {
                    hash: slot_hash,
                    next,
                    key: slot_key,
                    ..
                } => (
                    *slot_hash == hash && self.comparer.equals(slot_key, key),
                    *next,
                ),
                Slot::Free { .. } => chain_corrupted(),
            };
            if matched {
                match previous {
                    None => *self.buckets.get_mut(bucket) = (next + 1) as u32,
                    Some(p) => {
                        if let Slot::Live { next: prev_next, .. } = self.entries.get_mut(p) {
                            *prev_next = next;
                        }
                    }
                }
                let freed = mem::replace(
                    self.entries.get_mut(i),
                    Slot::Free {
                        next_free: self.free_head,
                    },
                );
                self.free_head = i as i32;
                self.free_count += 1;
                self.version = self.version.wrapping_add(1);
                return match freed {
                    Slot::Live { key, value, .. } => Some((key, value)),
                    Slot::Free { .. } => chain_corrupted(),
                };
            }
            previous = Some(i);
            index = slot_index(next);
            walked += 1;
            if walked > self.entries.len() {
                chain_corrupted();
            }
        }
        None
    }

    #[inline]
    fn hash_key(&self, key: &K) -> u32 {
        let wide = self.comparer.hash(key);
        (wide ^ (wide >> 32)) as u32
    }

    /// Chain walk shared by the lookup operations: stored hash first,
    /// comparer equality second. Walks are bounded by the table length;
    /// exceeding the bound means the chain has formed a cycle.
    fn find_index(&self, key: &K) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = self.hash_key(key);
        let mut index = self.chain_head(self.bucket_of(hash));
        let mut walked = 0usize;
        while let Some(i) = index {
            match self.entries.get(i) {
                Slot::Live {
                    hash: slot_hash,
                    next,
                    key: slot_key,
                    ..
                } => {
                    if *slot_hash == hash && self.comparer.equals(slot_key, key) {
                        return Some(i);
                    }
                    index = slot_index(*next);
                }
                Slot::Free { .. } => chain_corrupted(),
            }
            walked += 1;
            if walked > self.entries.len() {
                chain_corrupted();
            }
        }
        None
    }

    fn insert_with_policy(&mut self, key: K, value: V, on_present: OnPresent) -> Inserted<V> {
        if self.buckets.is_empty() {
            self.initialize(0);
        }
        let hash = self.hash_key(&key);
        let mut index = self.chain_head(self.bucket_of(hash));
        let mut walked = 0usize;
        while let Some(i) = index {
            match self.entries.get_mut(i) {
                Slot::Live {
                    hash: slot_hash,
                    next,
                    key: slot_key,
                    value: slot_value,
                } => {
                    if *slot_hash == hash && self.comparer.equals(slot_key, &key) {
                        return match on_present {
                            OnPresent::Overwrite => {
                                Inserted::Replaced(mem::replace(slot_value, value))
                            }
                            OnPresent::Keep => Inserted::Kept,
                        };
                    }
                    index = slot_index(*next);
                }
                Slot::Free { .. } => chain_corrupted(),
            }
            walked += 1;
            if walked > self.entries.len() {
                chain_corrupted();
            }
        }

        // Absent: take a freed slot if there is one, append otherwise.
        let index = if self.free_count > 0 {
            let head = match slot_index(self.free_head) {
                Some(head) => head,
                None => chain_corrupted(),
            };
            match self.entries.get(head) {
                Slot::Free { next_free } => self.free_head = *next_free,
                Slot::Live { .. } => chain_corrupted(),
            }
            self.free_count -= 1;
            head
        } else {
            if self.count == self.entries.len() {
                self.resize(capacity::expand_prime(self.count));
            }
            let fresh = self.count;
            self.count += 1;
            fresh
        };

        // Recomputed: growth above may have changed the modulus.
        let bucket = self.bucket_of(hash);
        let head = *self.buckets.get(bucket) as i32 - 1;
        *self.entries.get_mut(index) = Slot::Live {
            hash,
            next: head,
            key,
            value,
        };
        *self.buckets.get_mut(bucket) = index as u32 + 1;
        self.version = self.version.wrapping_add(1);
        Inserted::Added
    }
}

impl<K, V, C: Default> Default for SegmentedHashMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparer(C::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for SegmentedHashMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V: PartialEq, C: Comparer<K>> PartialEq for SegmentedHashMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|found| *found == *value))
    }
}

impl<K, V: Eq, C: Comparer<K>> Eq for SegmentedHashMap<K, V, C> {}

impl<K, V, C: Comparer<K>> ops::Index<&K> for SegmentedHashMap<K, V, C> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, C: Comparer<K> + Default> FromIterator<(K, V)> for SegmentedHashMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_comparer(C::default());
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparer<K>> Extend<(K, V)> for SegmentedHashMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > 0 {
            self.ensure_capacity(self.len() + lower);
        }
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

pub struct Iter<'a, K, V> {
    slots: Take<segmented_buf::Iter<'a, Slot<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in &mut self.slots {
            if let Slot::Live { key, value, .. } = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

pub struct IterMut<'a, K, V> {
    slots: Take<segmented_buf::IterMut<'a, Slot<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in &mut self.slots {
            if let Slot::Live { key, value, .. } = slot {
                self.remaining -= 1;
                return Some((&*key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

pub struct IntoIter<K, V> {
    slots: Take<segmented_buf::IntoIter<Slot<K, V>>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        for slot in &mut self.slots {
            if let Slot::Live { key, value, .. } = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, C> IntoIterator for SegmentedHashMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            remaining: self.len(),
            slots: self.entries.into_iter().take(self.count),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a SegmentedHashMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut SegmentedHashMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
