//! Process-lifetime cache of XML serializers, one per type.

use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock};

use extkit_utils::TypeIdMap;

use crate::xml::XmlSerializer;

// -----------------------------------------------------------------------------
// SerializerCache

/// Maps a [`TypeId`] to the [`XmlSerializer`] built for that type.
///
/// Entries are created lazily on first request and never evicted, so the
/// cache holds at most one entry per distinct type ever requested.
///
/// Lookups take a read lock. On a miss the entry is built *outside* any lock
/// and then installed under a write lock unless another thread got there
/// first, in which case the freshly built entry is dropped and the installed
/// one returned. Construction may thus run more than once for a type, but
/// every caller observes the same [`Arc`].
///
/// The cache is a plain value: share one through [`Codec`](crate::Codec) or
/// an `Arc`, or create separate ones for isolation.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use extkit_codec::SerializerCache;
///
/// let cache = SerializerCache::new();
/// let a = cache.get_or_create::<String>();
/// let b = cache.get_or_create::<String>();
///
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(a.root(), "string");
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SerializerCache(RwLock<TypeIdMap<Arc<XmlSerializer>>>);

impl SerializerCache {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the serializer for `T`, building and installing it on first use.
    #[inline(always)]
    pub fn get_or_create<T: ?Sized + 'static>(&self) -> Arc<XmlSerializer> {
        match self.get_by_type_id(TypeId::of::<T>()) {
            Some(serializer) => serializer,
            None => self.install(Arc::new(XmlSerializer::new::<T>())),
        }
    }

    /// Returns the serializer for `T` if one was already created.
    #[inline(always)]
    pub fn get<T: ?Sized + 'static>(&self) -> Option<Arc<XmlSerializer>> {
        self.get_by_type_id(TypeId::of::<T>())
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_type::<T>()
    }

    /// Number of cached serializers.
    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<Arc<XmlSerializer>> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    #[inline(never)]
    fn install(&self, created: Arc<XmlSerializer>) -> Arc<XmlSerializer> {
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        let installed = map.get_or_insert(created.type_id(), || Arc::clone(&created));

        if Arc::ptr_eq(installed, &created) {
            log::debug!(
                "created XML serializer for `{}` (root `{}`)",
                created.type_name(),
                created.root(),
            );
        } else {
            log::trace!(
                "dropping duplicate XML serializer for `{}`, another caller installed it first",
                created.type_name(),
            );
        }

        Arc::clone(installed)
    }
}
