//! segmented-hashmap: an associative map on chunked backing storage, so
//! very large maps never require one oversized allocation.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the classic buckets-plus-entries hash table, but back
//!   both tables with fixed-size segments so growth allocates new
//!   segments instead of reallocating and copying one huge array. This
//!   sidesteps allocator fragmentation and the cost of promoting large
//!   blocks into long-lived heap regions.
//! - Layers:
//!   - SegmentedBuf<T>: logical array over power-of-two segments; growth
//!     reuses every segment below the old boundary and never moves an
//!     element.
//!   - capacity: prime capacity selection and a Barrett-style
//!     multiply-and-shift that replaces `hash % capacity` on the hot
//!     path.
//!   - SegmentedHashMap<K, V, C>: chained table with an embedded free
//!     list; removal threads freed slots into a list that insertion
//!     drains before the table ever grows.
//!   - Cursor / KeyCursor / ValueCursor: detached, version-checked
//!     iteration that reports structural mutation instead of yielding
//!     torn results.
//!
//! Constraints
//! - Single-threaded: one logical writer; every structural mutation goes
//!   through `&mut self`. No atomics, no locks.
//! - Buckets and entries always share one capacity, and it is prime.
//! - Each live slot caches a folded 32-bit hash; the comparer is never
//!   asked to re-hash a stored key. Resizing re-threads chains from the
//!   stored hashes alone.
//! - The comparer is fixed at construction for the map's lifetime and
//!   supplies both hashing and equality, so every operation sees one
//!   consistent notion of "same key". `C` is a type parameter: comparer
//!   dispatch is static, whether the default or a custom one.
//!
//! Versioning and iteration
//! - A version stamp is bumped by every structural mutation: an insert
//!   that claims a slot, a remove, a resize, a clear of a non-empty map,
//!   a trim that compacts. Overwriting the value of an existing key is
//!   not structural.
//! - Borrowing iterators (`iter`, `keys`, `values`, ...) hold `&self`,
//!   so the borrow checker already rules out mutation mid-walk. The
//!   cursor API exists for the detached case: it takes the map by
//!   reference at each step and validates the version stamp every time.
//!
//! Failure taxonomy
//! - Contract errors are small, inspectable types: `InsertError` for
//!   strict adds, `InvalidCapacity` for trims below the entry count,
//!   `SliceTooSmall` for bulk copy-out, `CursorError` for iteration.
//! - A chain walk is bounded by the table length. Exceeding the bound,
//!   or a live chain running into a free slot, means the map was mutated
//!   concurrently without synchronization; that fails fast with a panic
//!   rather than hanging in a cycle.
//!
//! Notes and non-goals
//! - No internal synchronization: mutation requires exclusive access
//!   (`&mut self`); wrap the map externally if cross-thread writers are
//!   needed.
//! - No persistence; no ordering guarantees beyond "slot order, stable
//!   while the version is unchanged".
//! - Lookups take `&K`: equality belongs to the map's comparer, so the
//!   `Borrow`-style polymorphic lookups of std are deliberately absent.

mod capacity;
pub mod comparer;
pub mod cursor;
mod segmented_buf;
pub mod segmented_hash_map;
mod segmented_hash_map_proptest;
#[cfg(feature = "serde")]
mod serde_impls;

// Public surface
pub use comparer::{Comparer, HashComparer};
pub use cursor::{Cursor, CursorError, KeyCursor, ValueCursor};
pub use segmented_hash_map::{
    InsertError, IntoIter, InvalidCapacity, Iter, IterMut, Keys, SegmentedHashMap, SliceTooSmall,
    Values, ValuesMut,
};
