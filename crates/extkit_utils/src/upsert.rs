//! Insert-or-overwrite on maps, with an empty collection meaning "remove".

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};

// -----------------------------------------------------------------------------
// CollectionValue

/// Values that are collections, for [`Upsert::upsert_collection`].
pub trait CollectionValue {
    /// Returns `true` if the collection holds no element.
    fn is_empty_collection(&self) -> bool;
}

impl<T> CollectionValue for Vec<T> {
    #[inline]
    fn is_empty_collection(&self) -> bool {
        self.is_empty()
    }
}

impl<T> CollectionValue for VecDeque<T> {
    #[inline]
    fn is_empty_collection(&self) -> bool {
        self.is_empty()
    }
}

impl<T> CollectionValue for Box<[T]> {
    #[inline]
    fn is_empty_collection(&self) -> bool {
        self.is_empty()
    }
}

impl<T> CollectionValue for &[T] {
    #[inline]
    fn is_empty_collection(&self) -> bool {
        self.is_empty()
    }
}

impl<T, const N: usize> CollectionValue for [T; N] {
    #[inline]
    fn is_empty_collection(&self) -> bool {
        N == 0
    }
}

// -----------------------------------------------------------------------------
// Upsert

/// Set-or-clear operations on key/value maps.
///
/// Both methods mutate the map in place and return it for chaining.
///
/// Whether a value is a collection is decided by the method picked at the
/// call site, not by inspecting the value: [`upsert`](Upsert::upsert) always
/// stores, [`upsert_collection`](Upsert::upsert_collection) treats an empty
/// collection as a request to delete the key.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use extkit_utils::Upsert;
///
/// let mut names = HashMap::from([(1, "hello world")]);
/// names.upsert(1, "Hello World").upsert(2, "new");
/// assert_eq!(names[&1], "Hello World");
/// assert_eq!(names[&2], "new");
///
/// let mut tags = HashMap::from([(1, vec!["a"])]);
/// tags.upsert_collection(1, vec![]);
/// assert!(!tags.contains_key(&1));
/// ```
pub trait Upsert<K, V> {
    /// Stores `value` under `key`, overwriting any previous value.
    fn insert_value(&mut self, key: K, value: V);

    /// Removes `key` if present.
    fn remove_key(&mut self, key: &K);

    /// Inserts `key -> value`, or overwrites the value if `key` exists.
    #[inline]
    fn upsert(&mut self, key: K, value: V) -> &mut Self {
        self.insert_value(key, value);
        self
    }

    /// Like [`upsert`](Upsert::upsert), except that an empty collection
    /// removes `key` instead (a no-op if absent).
    ///
    /// A non-empty collection is stored like any other value.
    #[inline]
    fn upsert_collection(&mut self, key: K, value: V) -> &mut Self
    where
        V: CollectionValue,
    {
        if value.is_empty_collection() {
            self.remove_key(&key);
        } else {
            self.insert_value(key, value);
        }
        self
    }
}

impl<K: Ord, V> Upsert<K, V> for BTreeMap<K, V> {
    #[inline]
    fn insert_value(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    #[inline]
    fn remove_key(&mut self, key: &K) {
        self.remove(key);
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Upsert<K, V> for hashbrown::HashMap<K, V, S> {
    #[inline]
    fn insert_value(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    #[inline]
    fn remove_key(&mut self, key: &K) {
        self.remove(key);
    }
}

#[cfg(feature = "std")]
impl<K: Eq + Hash, V, S: BuildHasher> Upsert<K, V> for std::collections::HashMap<K, V, S> {
    #[inline]
    fn insert_value(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    #[inline]
    fn remove_key(&mut self, key: &K) {
        self.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::Upsert;
    use crate::hash::HashMap;

    #[test]
    fn overwrites_existing_key() {
        let mut map = BTreeMap::from([(1, "hello world")]);
        map.upsert(1, "Hello World");
        assert_eq!(map[&1], "Hello World");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn inserts_missing_key() {
        let mut map: HashMap<&str, i32> = HashMap::default();
        map.upsert("a", 1).upsert("b", 2);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
    }

    #[test]
    fn empty_collection_removes_key() {
        let mut map: HashMap<i32, Vec<&str>> = HashMap::default();
        map.upsert_collection(1, vec!["a"]);
        assert_eq!(map[&1], ["a"]);

        map.upsert_collection(1, Vec::new());
        assert!(!map.contains_key(&1));

        // absent key stays absent
        map.upsert_collection(2, Vec::new());
        assert!(map.is_empty());
    }

    #[test]
    fn empty_collection_is_stored_by_plain_upsert() {
        let mut map: BTreeMap<i32, Vec<u8>> = BTreeMap::new();
        map.upsert(1, Vec::new());
        assert_eq!(map.get(&1), Some(&Vec::new()));
    }

    #[test]
    fn arrays_and_slices() {
        let mut map: BTreeMap<&str, [u8; 0]> = BTreeMap::new();
        map.insert("k", []);
        map.upsert_collection("k", []);
        assert!(map.is_empty());

        let data = [1_u8, 2];
        let mut slices: BTreeMap<&str, &[u8]> = BTreeMap::new();
        slices.upsert_collection("k", &data[..]).upsert_collection("j", &data[..0]);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices["k"], [1, 2]);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_hash_map() {
        let mut map = std::collections::HashMap::from([(1, vec![1])]);
        map.upsert_collection(1, vec![2]).upsert(3, vec![]);
        assert_eq!(map[&1], [2]);
        assert_eq!(map[&3], Vec::<i32>::new());
    }
}
