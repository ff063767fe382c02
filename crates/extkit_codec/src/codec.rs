use alloc::sync::Arc;
use std::io::Read;
use std::sync::OnceLock;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::SerializerCache;
use crate::error::Result;
use crate::json;
use crate::xml::XmlNamespaces;

// -----------------------------------------------------------------------------
// Codec

/// Entry point for all conversions, owning the XML [`SerializerCache`].
///
/// Cloning a `Codec` shares its cache. [`Codec::global`] is the instance
/// used by the extension traits; build your own with [`Codec::new`] or
/// [`Codec::with_cache`] to keep caches apart.
///
/// # Examples
///
/// ```
/// use extkit_codec::Codec;
///
/// let codec = Codec::new();
///
/// let xml = codec.to_markup_with("hi", |ns| {
///     ns.add("ex", "urn:example");
/// })?;
/// assert!(xml.contains(r#"<string xmlns:ex="urn:example">hi</string>"#));
/// assert_eq!(codec.cache().len(), 1);
/// # Ok::<(), extkit_codec::CodecError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Codec {
    cache: Arc<SerializerCache>,
}

impl Codec {
    /// Creates a codec with a fresh, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec sharing `cache`.
    pub fn with_cache(cache: Arc<SerializerCache>) -> Self {
        Self { cache }
    }

    /// The process-wide codec, created on first use.
    pub fn global() -> &'static Codec {
        static GLOBAL: OnceLock<Codec> = OnceLock::new();
        GLOBAL.get_or_init(Codec::new)
    }

    #[inline]
    pub fn cache(&self) -> &Arc<SerializerCache> {
        &self.cache
    }

    /// See [`json::to_text`].
    #[inline]
    pub fn to_text<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        json::to_text(value)
    }

    /// Serializes `value` as an XML document without namespace declarations.
    #[inline]
    pub fn to_markup<T: Serialize + ?Sized + 'static>(&self, value: &T) -> Result<String> {
        self.to_markup_with(value, |_| {})
    }

    /// Serializes `value` as an XML document, letting `configure` register
    /// namespace prefixes for the root element first.
    pub fn to_markup_with<T, F>(&self, value: &T, configure: F) -> Result<String>
    where
        T: Serialize + ?Sized + 'static,
        F: FnOnce(&mut XmlNamespaces),
    {
        let mut namespaces = XmlNamespaces::new();
        configure(&mut namespaces);
        self.cache.get_or_create::<T>().serialize(value, &namespaces)
    }

    /// See [`json::parse_text`].
    #[inline]
    pub fn parse_text<T: DeserializeOwned + Default>(&self, text: Option<&str>) -> Result<T> {
        json::parse_text(text)
    }

    /// See [`json::parse_reader`].
    #[inline]
    pub fn parse_reader<T, R>(&self, reader: Option<R>) -> Result<T>
    where
        T: DeserializeOwned + Default,
        R: Read,
    {
        json::parse_reader(reader)
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use serde::Serialize;

    use super::Codec;
    use crate::SerializerCache;

    #[derive(Serialize)]
    struct Order {
        id: u32,
    }

    #[test]
    fn markup_reuses_cached_serializer() {
        let codec = Codec::new();
        codec.to_markup(&Order { id: 1 }).unwrap();
        let first = codec.cache().get::<Order>().unwrap();

        let xml = codec.to_markup(&Order { id: 2 }).unwrap();
        assert!(xml.contains("<Order><id>2</id></Order>"));
        assert!(Arc::ptr_eq(&first, &codec.cache().get::<Order>().unwrap()));
        assert_eq!(codec.cache().len(), 1);
    }

    #[test]
    fn injected_cache_is_shared() {
        let cache = Arc::new(SerializerCache::new());
        let a = Codec::with_cache(Arc::clone(&cache));
        let b = a.clone();

        a.to_markup("x").unwrap();
        assert!(b.cache().contains::<str>());
        assert!(cache.contains::<str>());
    }

    #[test]
    fn separate_codecs_are_isolated() {
        let a = Codec::new();
        let b = Codec::new();
        a.to_markup(&1_u8).unwrap();
        assert!(b.cache().is_empty());
    }

    #[test]
    fn global_is_a_single_instance() {
        assert!(core::ptr::eq(Codec::global(), Codec::global()));
    }

    #[test]
    fn text_delegates_to_json() {
        let codec = Codec::new();
        assert_eq!(codec.to_text(&Order { id: 3 }).unwrap(), r#"{"id":3}"#);
        let value: serde_json::Value = codec.parse_text(Some(r#"{"id":3}"#)).unwrap();
        assert_eq!(value["id"], 3);
        assert!(codec.cache().is_empty());
    }
}
