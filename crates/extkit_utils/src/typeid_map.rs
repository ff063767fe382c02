use core::any::TypeId;
use core::fmt::Debug;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::hash::NoOpHashState;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map whose keys are [`TypeId`]s.
///
/// `TypeId` already carries a well-mixed 64-bit hash, so lookups skip the
/// hasher entirely through [`NoOpHashState`]. The underlying `HashMap` is not
/// exposed, callers only see the `TypeId` oriented API.
///
/// # Examples
///
/// ```
/// use extkit_utils::TypeIdMap;
///
/// let mut names = TypeIdMap::new();
/// names.insert_type::<u32>("unsignedInt");
///
/// assert_eq!(names.get_type::<u32>(), Some(&"unsignedInt"));
/// assert!(names.get_type::<i32>().is_none());
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty map. Usable in `const` and `static` context.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Creates an empty map able to hold `capacity` entries without reallocating.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity_and_hasher(capacity, NoOpHashState))
    }

    /// Inserts the value produced by `f` only if `type_id` is absent.
    ///
    /// Returns `true` when the value was inserted. `f` is not called otherwise.
    #[inline]
    pub fn try_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> bool {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => {
                entry.insert(f());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Returns the value stored for `type_id`, inserting the result of `f`
    /// first if there is none.
    ///
    /// An existing value is never replaced, and `f` only runs for a vacant key.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Returns a reference to the value stored for `type_id`.
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Returns a reference to the value stored for `T`.
    #[inline(always)]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    /// Returns a mutable reference to the value stored for `type_id`.
    pub fn get_mut(&mut self, type_id: &TypeId) -> Option<&mut V> {
        self.0.get_mut(type_id)
    }

    /// Stores `v` for `type_id`, returning the previous value.
    pub fn insert(&mut self, type_id: TypeId, v: V) -> Option<V> {
        self.0.insert(type_id, v)
    }

    /// Stores `v` for `T`, returning the previous value.
    #[inline(always)]
    pub fn insert_type<T: ?Sized + 'static>(&mut self, v: V) -> Option<V> {
        self.insert(TypeId::of::<T>(), v)
    }

    /// Removes and returns the value stored for `type_id`.
    pub fn remove(&mut self, type_id: &TypeId) -> Option<V> {
        self.0.remove(type_id)
    }

    /// Removes every entry, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns `true` if a value is stored for `type_id`.
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    /// Returns `true` if a value is stored for `T`.
    #[inline(always)]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all entries in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&TypeId, &V)> {
        self.0.iter()
    }

    /// Iterates over all values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }

    /// Iterates over all keys in arbitrary order.
    #[inline]
    pub fn types(&self) -> impl ExactSizeIterator<Item = &TypeId> {
        self.0.keys()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for TypeIdMap<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V: Debug> Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeIdMap;

    #[test]
    fn get_or_insert_keeps_first_value() {
        let mut map = TypeIdMap::new();
        assert_eq!(*map.get_or_insert(TypeId::of::<u8>(), || 1), 1);
        assert_eq!(*map.get_or_insert(TypeId::of::<u8>(), || 2), 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn try_insert_skips_closure_for_present_key() {
        let mut map = TypeIdMap::new();
        assert!(map.try_insert(TypeId::of::<str>(), || "first"));
        assert!(!map.try_insert(TypeId::of::<str>(), || unreachable!()));
        assert_eq!(map.get_type::<str>(), Some(&"first"));
    }

    #[test]
    fn distinct_types_do_not_collide() {
        let mut map = TypeIdMap::with_capacity(4);
        map.insert_type::<u32>(32);
        map.insert_type::<i32>(-32);
        map.insert_type::<[u8]>(8);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get_type::<u32>(), Some(&32));
        assert_eq!(map.get_type::<i32>(), Some(&-32));
        assert!(map.contains_type::<[u8]>());

        assert_eq!(map.remove(&TypeId::of::<u32>()), Some(32));
        assert!(!map.contains_type::<u32>());

        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn is_sync_send() {
        use core::panic::{RefUnwindSafe, UnwindSafe};

        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}
        fn is_unwindsafe<T: UnwindSafe>() {}
        fn is_refunwindsafe<T: RefUnwindSafe>() {}

        is_send::<TypeIdMap<i32>>();
        is_sync::<TypeIdMap<i32>>();
        is_unwindsafe::<TypeIdMap<i32>>();
        is_refunwindsafe::<TypeIdMap<i32>>();
    }
}
