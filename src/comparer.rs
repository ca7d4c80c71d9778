//! Key comparison contract.
//!
//! A map owns one comparer for its whole lifetime: the comparer decides
//! both the hash and the equality of keys, so every operation sees one
//! consistent notion of "same key". [`HashComparer`] is the default and
//! delegates to the key's own `Hash`/`Eq`; a custom comparer replaces
//! both sides at once (case folding, structural identity, and so on).

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

/// Hashing and equality for the keys of one map.
///
/// Keys that are equal under [`equals`](Comparer::equals) must produce
/// the same [`hash`](Comparer::hash).
pub trait Comparer<K: ?Sized> {
    fn hash(&self, key: &K) -> u64;
    fn equals(&self, a: &K, b: &K) -> bool;
}

/// The default comparer: the key's intrinsic `Hash` and `Eq`, run
/// through a `BuildHasher` fixed at map construction.
#[derive(Clone, Debug, Default)]
pub struct HashComparer<S = RandomState> {
    build_hasher: S,
}

impl<S> HashComparer<S> {
    pub fn new(build_hasher: S) -> Self {
        Self { build_hasher }
    }
}

impl<K, S> Comparer<K> for HashComparer<S>
where
    K: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.build_hasher.hash_one(key)
    }

    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: one comparer instance hashes equal keys equally.
    #[test]
    fn equal_keys_hash_equal() {
        let comparer: HashComparer = HashComparer::default();
        let a = String::from("key");
        let b = String::from("key");
        assert!(Comparer::equals(&comparer, &a, &b));
        assert_eq!(Comparer::hash(&comparer, &a), Comparer::hash(&comparer, &b));
    }

    /// Invariant: a custom comparer can widen equality beyond `Eq`.
    #[test]
    fn custom_comparer_widens_equality() {
        struct AsciiCaseFold;
        impl Comparer<String> for AsciiCaseFold {
            fn hash(&self, key: &String) -> u64 {
                use std::collections::hash_map::DefaultHasher;
                use std::hash::Hasher;
                let mut hasher = DefaultHasher::new();
                key.to_ascii_lowercase().hash(&mut hasher);
                hasher.finish()
            }
            fn equals(&self, a: &String, b: &String) -> bool {
                a.eq_ignore_ascii_case(b)
            }
        }

        let comparer = AsciiCaseFold;
        let upper = String::from("KEY");
        let lower = String::from("key");
        assert!(comparer.equals(&upper, &lower));
        assert_eq!(comparer.hash(&upper), comparer.hash(&lower));
    }
}
