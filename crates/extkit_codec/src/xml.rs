//! XML output through per-type serializers.
//!
//! An [`XmlSerializer`] is bound to one Rust type and knows the root element
//! name for it. Serializers are immutable and shared, normally obtained from
//! a [`SerializerCache`](crate::SerializerCache).
//!
//! Every document starts with an XML declaration stating `encoding="utf-8"`,
//! although the output is assembled in memory as a `String`.
//!
//! ## Root element names
//!
//! | Type                     | Root           |
//! |--------------------------|----------------|
//! | `str`, `String`          | `string`       |
//! | `bool`                   | `boolean`      |
//! | `i32`, `u32`             | `int`, `unsignedInt` |
//! | `f64`                    | `double`       |
//! | `my_app::Person<T>`      | `Person`       |
//! | `Vec<u32>`, `[u32]`      | `ArrayOfUnsignedInt` |
//! | `Option<T>`, `Box<T>`    | same as `T`    |
//! | tuples, unit             | `value`        |
//!
//! Primitives use their XML Schema names, other types the last path segment
//! of their type name without generic arguments. Sequence types are named
//! `ArrayOf` followed by their item's name.
//!
//! ## Document shape
//!
//! Every document has exactly one root element:
//!
//! - sequences get one child element per item, named after the item type,
//! - enum variants become a single child named after the variant,
//! - `None` and empty sequences give an empty root (`<root/>`),
//! - everything else is written as the root itself.

use alloc::borrow::Cow;
use core::any::TypeId;

use quick_xml::SeError;
use serde::Serialize;
use serde::ser::{self, SerializeMap, Serializer};

use crate::error::Result;

// -----------------------------------------------------------------------------
// Constants

/// Prepended to every document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Root element used when a type name is not a usable XML name.
const FALLBACK_ROOT: &str = "value";

/// Map key quick-xml writes as bare content, without an element of its own.
const CONTENT_KEY: &str = "$value";

/// Generic types whose elements are named after their items.
const SEQUENCE_TYPES: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "BinaryHeap",
    "BTreeSet",
    "HashSet",
];

/// Generic wrappers named after the type they wrap.
const TRANSPARENT_TYPES: &[&str] = &["Option", "Box", "Rc", "Arc", "Cow"];

// -----------------------------------------------------------------------------
// XmlNamespaces

/// Namespace prefixes to declare on the root element.
///
/// Registration order is kept. Adding a prefix twice replaces its URI.
/// The empty prefix declares the default namespace (`xmlns="..."`).
///
/// # Examples
///
/// ```
/// use extkit_codec::XmlNamespaces;
///
/// let mut ns = XmlNamespaces::new();
/// ns.add("a", "urn:first").add("b", "urn:second").add("a", "urn:third");
///
/// let pairs: Vec<_> = ns.iter().collect();
/// assert_eq!(pairs, [("a", "urn:third"), ("b", "urn:second")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNamespaces {
    entries: Vec<(String, String)>,
}

impl XmlNamespaces {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers `prefix` for `uri`.
    pub fn add(&mut self, prefix: impl Into<String>, uri: impl Into<String>) -> &mut Self {
        let prefix = prefix.into();
        let uri = uri.into();
        match self.entries.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = uri,
            None => self.entries.push((prefix, uri)),
        }
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(prefix, uri)` pairs in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    fn write_declarations(&self, out: &mut String) {
        for (prefix, uri) in self.iter() {
            out.push_str(" xmlns");
            if !prefix.is_empty() {
                out.push(':');
                out.push_str(prefix);
            }
            out.push_str("=\"");
            out.push_str(&quick_xml::escape::escape(uri));
            out.push('"');
        }
    }
}

// -----------------------------------------------------------------------------
// XmlSerializer

/// Serializer bound to a single type.
///
/// Stateless once built: it only records which type it belongs to and the
/// element names derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlSerializer {
    type_id: TypeId,
    type_name: &'static str,
    root: String,
    item: String,
}

impl XmlSerializer {
    /// Builds the serializer for `T`.
    pub fn new<T: ?Sized + 'static>() -> Self {
        let type_name = core::any::type_name::<T>();
        Self {
            type_id: TypeId::of::<T>(),
            type_name,
            root: root_name(type_name).into_owned(),
            item: item_name(type_name).into_owned(),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The full Rust type name, for diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The root element name.
    #[inline]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The element name of each item when the value is a sequence.
    #[inline]
    pub fn item(&self) -> &str {
        &self.item
    }

    /// Serializes `value` into a complete XML document.
    ///
    /// `value` must be of the type this serializer was built for.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Xml`](crate::CodecError::Xml) for shapes XML
    /// cannot express, e.g. maps with non-string keys.
    pub fn serialize<T>(&self, value: &T, namespaces: &XmlNamespaces) -> Result<String>
    where
        T: Serialize + ?Sized + 'static,
    {
        debug_assert_eq!(
            TypeId::of::<T>(),
            self.type_id,
            "serializer for `{}` used with `{}`",
            self.type_name,
            core::any::type_name::<T>(),
        );

        let root = self.root.as_str();
        let body = match Shape::of(value)? {
            Shape::Plain => quick_xml::se::to_string_with_root(root, value)?,
            Shape::Absent => format!("<{root}/>"),
            Shape::Sequence => quick_xml::se::to_string_with_root(root, &Nested {
                key: &self.item,
                value,
            })?,
            Shape::Variant => quick_xml::se::to_string_with_root(root, &Nested {
                key: CONTENT_KEY,
                value,
            })?,
        };

        let mut out = String::with_capacity(XML_DECLARATION.len() + body.len() + 1);
        out.push_str(XML_DECLARATION);
        out.push('\n');

        // the body always opens with `<{root}`, declarations go right after it
        match body
            .strip_prefix('<')
            .and_then(|rest| rest.strip_prefix(self.root.as_str()))
        {
            Some(rest) if !namespaces.is_empty() => {
                out.push('<');
                out.push_str(&self.root);
                namespaces.write_declarations(&mut out);
                out.push_str(rest);
            }
            _ => out.push_str(&body),
        }

        Ok(out)
    }
}

// -----------------------------------------------------------------------------
// Root names

fn root_name(type_name: &str) -> Cow<'static, str> {
    let base = strip_refs(type_name);

    if let Some(inner) = transparent_inner(base) {
        return root_name(inner);
    }
    if let Some(item) = sequence_item(base) {
        return Cow::Owned(format!("ArrayOf{}", capitalized(&root_name(item))));
    }

    let path = base.split('<').next().unwrap_or(base);
    if path.contains(is_type_punctuation) {
        return Cow::Borrowed(FALLBACK_ROOT);
    }
    let base = path.rsplit("::").next().unwrap_or(path);

    if let Some(name) = schema_name(base) {
        return Cow::Borrowed(name);
    }

    if is_xml_name(base) {
        Cow::Owned(base.to_owned())
    } else {
        Cow::Borrowed(FALLBACK_ROOT)
    }
}

fn item_name(type_name: &str) -> Cow<'static, str> {
    let base = strip_refs(type_name);

    if let Some(inner) = transparent_inner(base) {
        return item_name(inner);
    }
    match sequence_item(base) {
        Some(item) => root_name(item),
        None => Cow::Borrowed(FALLBACK_ROOT),
    }
}

fn strip_refs(type_name: &str) -> &str {
    let mut base = type_name.trim();
    while let Some(rest) = base.strip_prefix('&') {
        base = rest.trim_start_matches("mut ").trim_start();
    }
    base
}

/// The item type of `[T]`, `[T; N]` and the [`SEQUENCE_TYPES`].
fn sequence_item(base: &str) -> Option<&str> {
    if let Some(inner) = base.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
        let end = find_top_level(inner, ';').unwrap_or(inner.len());
        return Some(inner[..end].trim());
    }
    match generic_parts(base)? {
        (name, item) if SEQUENCE_TYPES.contains(&name) => Some(item),
        _ => None,
    }
}

fn transparent_inner(base: &str) -> Option<&str> {
    match generic_parts(base)? {
        (name, inner) if TRANSPARENT_TYPES.contains(&name) => Some(inner),
        _ => None,
    }
}

/// Splits `path::Name<A, B>` into `Name` and `A`.
fn generic_parts(base: &str) -> Option<(&str, &str)> {
    let open = base.find('<')?;
    let path = &base[..open];
    if path.contains(is_type_punctuation) {
        return None;
    }
    let args = base[open + 1..].strip_suffix('>')?;
    let end = find_top_level(args, ',').unwrap_or(args.len());
    let name = path.rsplit("::").next().unwrap_or(path);
    Some((name, args[..end].trim()))
}

/// Tuples, arrays and the like, as opposed to a plain type path.
fn is_type_punctuation(c: char) -> bool {
    matches!(c, '(' | '[' | ',' | ' ')
}

/// Byte offset of the first `sep` outside any brackets.
fn find_top_level(s: &str, sep: char) -> Option<usize> {
    let mut depth = 0_usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '[' | '(' => depth += 1,
            '>' | ']' | ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn schema_name(primitive: &str) -> Option<&'static str> {
    Some(match primitive {
        "str" | "String" => "string",
        "char" => "char",
        "bool" => "boolean",
        "i8" => "byte",
        "u8" => "unsignedByte",
        "i16" => "short",
        "u16" => "unsignedShort",
        "i32" => "int",
        "u32" => "unsignedInt",
        "i64" | "isize" => "long",
        "u64" | "usize" => "unsignedLong",
        "i128" | "u128" => "integer",
        "f32" => "float",
        "f64" => "double",
        _ => return None,
    })
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

// -----------------------------------------------------------------------------
// Document shape

/// How a value presents itself at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `None`, written as an empty root.
    Absent,
    /// Sequences and tuples, one child element per item.
    Sequence,
    /// Enum variants, nested under the root as a single child.
    Variant,
    Plain,
}

impl Shape {
    fn of<T: Serialize + ?Sized>(value: &T) -> Result<Self, SeError> {
        value.serialize(ShapeSerializer)
    }
}

/// Reports the [`Shape`] of a value without looking into its contents.
struct ShapeSerializer;

/// Discards the contents of a compound value.
struct Skip(Shape);

macro_rules! plain {
    ($($method:ident($ty:ty)),* $(,)?) => {$(
        #[inline]
        fn $method(self, _: $ty) -> Result<Shape, SeError> {
            Ok(Shape::Plain)
        }
    )*};
}

impl Serializer for ShapeSerializer {
    type Ok = Shape;
    type Error = SeError;

    type SerializeSeq = Skip;
    type SerializeTuple = Skip;
    type SerializeTupleStruct = Skip;
    type SerializeTupleVariant = Skip;
    type SerializeMap = Skip;
    type SerializeStruct = Skip;
    type SerializeStructVariant = Skip;

    plain!(
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_i128(i128),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_u128(u128),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
    );

    fn serialize_none(self) -> Result<Shape, SeError> {
        Ok(Shape::Absent)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Shape, SeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Shape, SeError> {
        Ok(Shape::Plain)
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<Shape, SeError> {
        Ok(Shape::Plain)
    }

    fn serialize_unit_variant(self, _: &'static str, _: u32, _: &'static str) -> Result<Shape, SeError> {
        Ok(Shape::Variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<Shape, SeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<Shape, SeError> {
        Ok(Shape::Variant)
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Skip, SeError> {
        Ok(Skip(Shape::Sequence))
    }

    fn serialize_tuple(self, _: usize) -> Result<Skip, SeError> {
        Ok(Skip(Shape::Sequence))
    }

    fn serialize_tuple_struct(self, _: &'static str, _: usize) -> Result<Skip, SeError> {
        Ok(Skip(Shape::Sequence))
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Skip, SeError> {
        Ok(Skip(Shape::Variant))
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Skip, SeError> {
        Ok(Skip(Shape::Plain))
    }

    fn serialize_struct(self, _: &'static str, _: usize) -> Result<Skip, SeError> {
        Ok(Skip(Shape::Plain))
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Skip, SeError> {
        Ok(Skip(Shape::Variant))
    }
}

macro_rules! skip_values {
    ($($trait:ident::$method:ident),* $(,)?) => {$(
        impl ser::$trait for Skip {
            type Ok = Shape;
            type Error = SeError;

            #[inline]
            fn $method<T: ?Sized + Serialize>(&mut self, _: &T) -> Result<(), SeError> {
                Ok(())
            }

            #[inline]
            fn end(self) -> Result<Shape, SeError> {
                Ok(self.0)
            }
        }
    )*};
}

skip_values!(
    SerializeSeq::serialize_element,
    SerializeTuple::serialize_element,
    SerializeTupleStruct::serialize_field,
    SerializeTupleVariant::serialize_field,
);

impl SerializeMap for Skip {
    type Ok = Shape;
    type Error = SeError;

    #[inline]
    fn serialize_key<T: ?Sized + Serialize>(&mut self, _: &T) -> Result<(), SeError> {
        Ok(())
    }

    #[inline]
    fn serialize_value<T: ?Sized + Serialize>(&mut self, _: &T) -> Result<(), SeError> {
        Ok(())
    }

    #[inline]
    fn end(self) -> Result<Shape, SeError> {
        Ok(self.0)
    }
}

macro_rules! skip_fields {
    ($($trait:ident),* $(,)?) => {$(
        impl ser::$trait for Skip {
            type Ok = Shape;
            type Error = SeError;

            #[inline]
            fn serialize_field<T: ?Sized + Serialize>(
                &mut self,
                _: &'static str,
                _: &T,
            ) -> Result<(), SeError> {
                Ok(())
            }

            #[inline]
            fn end(self) -> Result<Shape, SeError> {
                Ok(self.0)
            }
        }
    )*};
}

skip_fields!(SerializeStruct, SerializeStructVariant);

/// Writes `value` under `key`, as the only entry of the root element.
struct Nested<'a, T: ?Sized> {
    key: &'a str,
    value: &'a T,
}

impl<T: Serialize + ?Sized> Serialize for Nested<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, self.value)?;
        map.end()
    }
}
