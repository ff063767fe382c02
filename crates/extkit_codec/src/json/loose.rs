//! A `Deserializer` over `serde_json::Value` that tolerates key spelling.
//!
//! When a struct is requested, object keys that do not name a field exactly
//! are matched against the field names ignoring ASCII case and the `_`/`-`
//! separators, so `firstName`, `FirstName` and `first-name` all fill a field
//! called `first_name`. An exact key always wins over a loose one.
//!
//! Everything else is delegated to `Value`'s own `Deserializer`, with arrays,
//! objects and options re-wrapped so nested structs get the same treatment.
//! Enum payloads are delegated as a whole and keep exact matching.

use extkit_utils::hash::{FixedHashState, HashMap};
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Error, Map, Value};

// -----------------------------------------------------------------------------
// Loose

pub(crate) struct Loose(pub Value);

macro_rules! delegate {
    ($($method:ident)*) => {$(
        #[inline]
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
            self.0.$method(visitor)
        }
    )*};
}

impl<'de> Deserializer<'de> for Loose {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.0 {
            Value::Array(items) => visit_array(items, visitor),
            Value::Object(map) => visitor.visit_map(LooseMap::new(map)),
            other => other.deserialize_any(visitor),
        }
    }

    delegate! {
        deserialize_bool
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64 deserialize_i128
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64 deserialize_u128
        deserialize_f32 deserialize_f64
        deserialize_char deserialize_str deserialize_string
        deserialize_bytes deserialize_byte_buf
        deserialize_unit deserialize_identifier
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.0 {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(Loose(other)),
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        self.0.deserialize_unit_struct(name, visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.0 {
            Value::Array(items) => visit_array(items, visitor),
            other => other.deserialize_seq(visitor),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.0 {
            Value::Object(map) => visitor.visit_map(LooseMap::new(map)),
            other => other.deserialize_map(visitor),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        match self.0 {
            Value::Object(map) => visitor.visit_map(LooseMap::new(match_fields(map, fields))),
            Value::Array(items) => visit_array(items, visitor),
            other => other.deserialize_struct(name, fields, visitor),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        self.0.deserialize_enum(name, variants, visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_unit()
    }
}

fn visit_array<'de, V: Visitor<'de>>(items: Vec<Value>, visitor: V) -> Result<V::Value, Error> {
    let len = items.len();
    let mut seq = LooseSeq(items.into_iter());
    let value = visitor.visit_seq(&mut seq)?;
    if seq.0.len() == 0 {
        Ok(value)
    } else {
        Err(de::Error::invalid_length(len, &"fewer elements in array"))
    }
}

// -----------------------------------------------------------------------------
// Field matching

fn match_fields(map: Map<String, Value>, fields: &'static [&'static str]) -> Map<String, Value> {
    if map.keys().all(|key| fields.contains(&key.as_str())) {
        return map;
    }

    // folded name -> field, the first declared field wins a clash
    let mut index: HashMap<String, &'static str> =
        HashMap::with_capacity_and_hasher(fields.len(), FixedHashState);
    for field in fields {
        index.entry(folded(field)).or_insert(*field);
    }

    let mut matched = Map::with_capacity(map.len());
    for (key, value) in map {
        if fields.contains(&key.as_str()) {
            matched.insert(key, value);
            continue;
        }
        match index.get(&folded(&key)) {
            Some(field) => {
                matched.entry(*field).or_insert(value);
            }
            None => {
                matched.insert(key, value);
            }
        }
    }
    matched
}

/// `name` without `_`/`-`, ASCII-lowercased.
fn folded(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// -----------------------------------------------------------------------------
// Access

struct LooseSeq(alloc::vec::IntoIter<Value>);

impl<'de> SeqAccess<'de> for LooseSeq {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, Error> {
        self.0
            .next()
            .map(|value| seed.deserialize(Loose(value)))
            .transpose()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.0.len())
    }
}

struct LooseMap {
    iter: serde_json::map::IntoIter,
    value: Option<Value>,
}

impl LooseMap {
    fn new(map: Map<String, Value>) -> Self {
        Self {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> MapAccess<'de> for LooseMap {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>, Error> {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(MapKey(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, Error> {
        match self.value.take() {
            Some(value) => seed.deserialize(Loose(value)),
            None => Err(de::Error::custom("value is missing")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

// -----------------------------------------------------------------------------
// MapKey

/// JSON keys are always strings, numeric and boolean map keys are parsed
/// out of them.
struct MapKey(String);

macro_rules! parse_key {
    ($($method:ident => $visit:ident,)*) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
            match self.0.parse() {
                Ok(parsed) => visitor.$visit(parsed),
                Err(_) => Err(de::Error::invalid_value(de::Unexpected::Str(&self.0), &visitor)),
            }
        }
    )*};
}

impl<'de> Deserializer<'de> for MapKey {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_string(self.0)
    }

    parse_key! {
        deserialize_bool => visit_bool,
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_i128 => visit_i128,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
        deserialize_u128 => visit_u128,
        deserialize_f32 => visit_f32,
        deserialize_f64 => visit_f64,
        deserialize_char => visit_char,
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        Value::String(self.0).deserialize_enum(name, variants, visitor)
    }

    serde::forward_to_deserialize_any! {
        str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;
    use serde_json::json;

    use super::Loose;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Contact {
        first_name: String,
        #[serde(default)]
        tags: Vec<String>,
        address: Option<Address>,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Address {
        postal_code: String,
    }

    #[test]
    fn matches_keys_loosely_at_every_depth() {
        let value = json!({
            "FirstName": "Ada",
            "tags": ["a"],
            "Address": { "postal-code": "NW1" },
        });
        let contact = Contact::deserialize(Loose(value)).unwrap();
        assert_eq!(
            contact,
            Contact {
                first_name: "Ada".into(),
                tags: vec!["a".into()],
                address: Some(Address {
                    postal_code: "NW1".into()
                }),
            }
        );
    }

    #[test]
    fn exact_key_wins() {
        let value = json!({ "firstName": "loose", "first_name": "exact", "address": null });
        let contact = Contact::deserialize(Loose(value)).unwrap();
        assert_eq!(contact.first_name, "exact");
        assert_eq!(contact.address, None);
    }

    #[test]
    fn numeric_map_keys() {
        let value = json!({ "1": "one", "20": "twenty" });
        let map = BTreeMap::<u32, String>::deserialize(Loose(value)).unwrap();
        assert_eq!(map[&20], "twenty");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn bad_map_key_is_an_error() {
        let value = json!({ "one": "x" });
        assert!(BTreeMap::<u32, String>::deserialize(Loose(value)).is_err());
    }

    #[test]
    fn first_declared_field_wins_a_folded_clash() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Clash {
            #[serde(default)]
            ab: u8,
            #[serde(default)]
            a_b: u8,
        }

        let clash = Clash::deserialize(Loose(json!({ "AB": 1 }))).unwrap();
        assert_eq!(clash, Clash { ab: 1, a_b: 0 });

        let clash = Clash::deserialize(Loose(json!({ "A-B": 2, "a_b": 3 }))).unwrap();
        assert_eq!(clash, Clash { ab: 2, a_b: 3 });
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let value = json!({ "first_name": 7 });
        assert!(Contact::deserialize(Loose(value)).is_err());
    }

    #[test]
    fn tuples_and_values() {
        let pair = <(u8, String)>::deserialize(Loose(json!([1, "a"]))).unwrap();
        assert_eq!(pair, (1, "a".to_owned()));

        assert!(<(u8,)>::deserialize(Loose(json!([1, 2]))).is_err());

        let raw = serde_json::Value::deserialize(Loose(json!({ "Key": [1, null] }))).unwrap();
        assert_eq!(raw, json!({ "Key": [1, null] }));
    }
}
