//! Versioned enumeration that does not borrow the map between steps.
//!
//! A [`Cursor`] snapshots the map's version stamp at creation and
//! revalidates it on every step, so structural mutation mid-iteration is
//! reported as [`CursorError::ConcurrentModification`] instead of
//! yielding torn or skipped entries. Replacing the value of an existing
//! key is not structural and leaves cursors valid. The key-only and
//! value-only projections wrap the same cursor and inherit its checks.

use crate::segmented_hash_map::{chain_corrupted, SegmentedHashMap};
use std::fmt;

/// Error from cursor operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The map was structurally mutated after this cursor was created.
    ConcurrentModification,
    /// The cursor is before the first entry or past the last one.
    NotPositioned,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorError::ConcurrentModification => {
                f.write_str("map was structurally mutated during cursor iteration")
            }
            CursorError::NotPositioned => f.write_str("cursor is not positioned on an entry"),
        }
    }
}

impl std::error::Error for CursorError {}

/// Detached iteration state over one map. Created by
/// [`SegmentedHashMap::cursor`]; pass the same map back to every call.
#[derive(Debug, Clone)]
pub struct Cursor {
    version: u64,
    next_index: usize,
    current: Option<usize>,
}

impl Cursor {
    pub(crate) fn new(version: u64) -> Self {
        Self {
            version,
            next_index: 0,
            current: None,
        }
    }

    /// Advances to the next entry: `Ok(true)` when positioned on one,
    /// `Ok(false)` once exhausted (and on every call after that).
    pub fn move_next<K, V, C>(
        &mut self,
        map: &SegmentedHashMap<K, V, C>,
    ) -> Result<bool, CursorError> {
        if self.version != map.version_stamp() {
            return Err(CursorError::ConcurrentModification);
        }
        let count = map.slot_count();
        while self.next_index < count {
            let index = self.next_index;
            self.next_index += 1;
            if map.slot_pair(index).is_some() {
                self.current = Some(index);
                return Ok(true);
            }
        }
        self.next_index = count + 1;
        self.current = None;
        Ok(false)
    }

    /// The entry the cursor is positioned on.
    pub fn current<'a, K, V, C>(
        &self,
        map: &'a SegmentedHashMap<K, V, C>,
    ) -> Result<(&'a K, &'a V), CursorError> {
        if self.version != map.version_stamp() {
            return Err(CursorError::ConcurrentModification);
        }
        match self.current {
            None => Err(CursorError::NotPositioned),
            Some(index) => match map.slot_pair(index) {
                Some(pair) => Ok(pair),
                // Unreachable while the version matches.
                None => chain_corrupted(),
            },
        }
    }
}

/// Key-only projection of a [`Cursor`].
#[derive(Debug, Clone)]
pub struct KeyCursor {
    inner: Cursor,
}

impl KeyCursor {
    pub(crate) fn new(inner: Cursor) -> Self {
        Self { inner }
    }

    pub fn move_next<K, V, C>(
        &mut self,
        map: &SegmentedHashMap<K, V, C>,
    ) -> Result<bool, CursorError> {
        self.inner.move_next(map)
    }

    pub fn current<'a, K, V, C>(
        &self,
        map: &'a SegmentedHashMap<K, V, C>,
    ) -> Result<&'a K, CursorError> {
        self.inner.current(map).map(|(key, _)| key)
    }
}

/// Value-only projection of a [`Cursor`].
#[derive(Debug, Clone)]
pub struct ValueCursor {
    inner: Cursor,
}

impl ValueCursor {
    pub(crate) fn new(inner: Cursor) -> Self {
        Self { inner }
    }

    pub fn move_next<K, V, C>(
        &mut self,
        map: &SegmentedHashMap<K, V, C>,
    ) -> Result<bool, CursorError> {
        self.inner.move_next(map)
    }

    pub fn current<'a, K, V, C>(
        &self,
        map: &'a SegmentedHashMap<K, V, C>,
    ) -> Result<&'a V, CursorError> {
        self.inner.current(map).map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample() -> SegmentedHashMap<u32, u32> {
        let mut map = SegmentedHashMap::new();
        for key in 0..8u32 {
            map.insert(key, key * 10);
        }
        map
    }

    /// Invariant: a full cursor walk visits every entry exactly once.
    #[test]
    fn drains_all_entries() {
        let map = sample();
        let mut cursor = map.cursor();
        let mut seen = BTreeMap::new();
        while cursor.move_next(&map).unwrap() {
            let (key, value) = cursor.current(&map).unwrap();
            assert!(seen.insert(*key, *value).is_none());
        }
        let expected: BTreeMap<u32, u32> = (0..8).map(|k| (k, k * 10)).collect();
        assert_eq!(seen, expected);
        // Exhausted cursors stay exhausted.
        assert_eq!(cursor.move_next(&map), Ok(false));
        assert_eq!(cursor.current(&map), Err(CursorError::NotPositioned));
    }

    /// Invariant: current before the first step is an error, not a
    /// default entry.
    #[test]
    fn current_before_first_step() {
        let map = sample();
        let cursor = map.cursor();
        assert_eq!(cursor.current(&map), Err(CursorError::NotPositioned));
    }

    /// Invariant: any structural mutation between steps invalidates the
    /// cursor deterministically.
    #[test]
    fn structural_mutation_invalidates() {
        let mut map = sample();
        let mut cursor = map.cursor();
        assert!(cursor.move_next(&map).unwrap());
        map.remove(&7);
        assert_eq!(
            cursor.move_next(&map),
            Err(CursorError::ConcurrentModification)
        );
        assert_eq!(
            cursor.current(&map),
            Err(CursorError::ConcurrentModification)
        );

        let mut cursor = map.cursor();
        assert!(cursor.move_next(&map).unwrap());
        map.clear();
        assert_eq!(
            cursor.move_next(&map),
            Err(CursorError::ConcurrentModification)
        );
    }

    /// Invariant: value-only overwrite of an existing key is not
    /// structural; in-flight cursors continue and see the new value.
    #[test]
    fn overwrite_does_not_invalidate() {
        let mut map = sample();
        let mut cursor = map.cursor();
        assert!(cursor.move_next(&map).unwrap());
        map.insert(0, 999);
        let mut count = 1;
        while cursor.move_next(&map).unwrap() {
            count += 1;
        }
        assert_eq!(count, 8);
        assert_eq!(map.get(&0), Some(&999));
    }

    /// Invariant: key and value cursors walk the same entries as the
    /// pair cursor.
    #[test]
    fn projections_share_cursor_logic() {
        let mut map = sample();
        map.remove(&3);

        let mut keys = map.key_cursor();
        let mut collected_keys = Vec::new();
        while keys.move_next(&map).unwrap() {
            collected_keys.push(*keys.current(&map).unwrap());
        }
        collected_keys.sort_unstable();
        assert_eq!(collected_keys, vec![0, 1, 2, 4, 5, 6, 7]);

        let mut values = map.value_cursor();
        let mut total = 0u32;
        while values.move_next(&map).unwrap() {
            total += *values.current(&map).unwrap();
        }
        assert_eq!(total, [0u32, 1, 2, 4, 5, 6, 7].iter().map(|k| k * 10).sum::<u32>());

        // The projections also report structural invalidation.
        let mut keys = map.key_cursor();
        map.insert(100, 0);
        assert_eq!(
            keys.move_next(&map),
            Err(CursorError::ConcurrentModification)
        );
    }
}
