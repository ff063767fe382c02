//! JSON text with a fixed naming convention.
//!
//! Output object keys are always lower camel case, whatever the Rust field
//! names or `serde` renames say. That covers nested objects and map keys.
//! Input is not held to that convention, see [`parse_text`].
//!
//! Missing input is not an error: `None`, an empty string, or a reader with
//! nothing left to read all produce `T::default()`.

mod case;
mod loose;

use std::io::Read;

use extkit_utils::default;
use serde::Serialize;
use serde::de::{Deserialize, DeserializeOwned};
use serde_json::Value;

use crate::error::Result;

// -----------------------------------------------------------------------------
// Serialize

/// Serializes `value` as compact JSON with lower-camel-case keys.
///
/// Keys that camel-case to the same name, such as `a_b` and `aB`, collapse
/// into one entry: the later value is kept at the earlier key's position.
///
/// # Errors
///
/// Returns [`CodecError::Json`](crate::CodecError::Json) if the value cannot
/// be represented in JSON, e.g. a map whose keys are not strings or numbers.
///
/// # Examples
///
/// ```
/// use extkit_codec::json::to_text;
///
/// #[derive(serde::Serialize)]
/// struct Profile {
///     display_name: &'static str,
///     #[serde(rename = "Hello")]
///     hello: &'static str,
/// }
///
/// let text = to_text(&Profile { display_name: "Ada", hello: "World" })?;
/// assert_eq!(text, r#"{"displayName":"Ada","hello":"World"}"#);
/// # Ok::<(), extkit_codec::CodecError>(())
/// ```
pub fn to_text<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    Ok(serde_json::to_string(&case::camelize_keys(value))?)
}

// -----------------------------------------------------------------------------
// Deserialize

/// Parses `text` into `T`, or returns `T::default()` for `None` or `""`.
///
/// Object keys are matched to struct fields exactly first, then ignoring
/// ASCII case and `_`/`-`, so the output of [`to_text`] parses back into
/// the type it came from.
///
/// # Errors
///
/// Returns [`CodecError::Json`](crate::CodecError::Json) if `text` is not
/// empty and is not valid JSON for `T`.
///
/// # Examples
///
/// ```
/// use extkit_codec::json::parse_text;
///
/// #[derive(serde::Deserialize, Default, Debug, PartialEq)]
/// struct Profile {
///     display_name: String,
/// }
///
/// let parsed: Profile = parse_text(Some(r#"{"displayName":"Ada"}"#))?;
/// assert_eq!(parsed.display_name, "Ada");
///
/// assert_eq!(parse_text::<Profile>(None)?, Profile::default());
/// assert_eq!(parse_text::<Profile>(Some(""))?, Profile::default());
/// assert!(parse_text::<Profile>(Some("{")).is_err());
/// # Ok::<(), extkit_codec::CodecError>(())
/// ```
pub fn parse_text<T: DeserializeOwned + Default>(text: Option<&str>) -> Result<T> {
    match text {
        Some(text) if !text.is_empty() => from_value(serde_json::from_str(text)?),
        _ => {
            log::trace!("no JSON text, using the default value");
            Ok(default())
        }
    }
}

/// Reads `reader` to its end and parses the content into `T`.
///
/// Reading starts at the reader's current position, nothing is rewound.
/// `None` or a reader with no bytes left produce `T::default()`.
///
/// # Errors
///
/// [`CodecError::Io`](crate::CodecError::Io) if reading fails,
/// [`CodecError::Json`](crate::CodecError::Json) if the content is not valid
/// JSON for `T`.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use extkit_codec::json::parse_reader;
///
/// let value: serde_json::Value = parse_reader(Some(Cursor::new(r#"{"hello":"World"}"#)))?;
/// assert_eq!(value["hello"], "World");
/// # Ok::<(), extkit_codec::CodecError>(())
/// ```
pub fn parse_reader<T, R>(reader: Option<R>) -> Result<T>
where
    T: DeserializeOwned + Default,
    R: Read,
{
    let Some(mut reader) = reader else {
        log::trace!("no JSON reader, using the default value");
        return Ok(default());
    };

    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;

    if content.is_empty() {
        log::trace!("JSON reader is exhausted, using the default value");
        return Ok(default());
    }

    from_value(serde_json::from_slice(&content)?)
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(<T as Deserialize>::deserialize(loose::Loose(value))?)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};

    use super::{parse_reader, parse_text, to_text};
    use crate::CodecError;

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct Item {
        id: String,
        display_name: String,
        children: Option<Vec<Item>>,
    }

    fn sample() -> Item {
        Item {
            id: "1".into(),
            display_name: "root".into(),
            children: Some(vec![Item {
                id: "10".into(),
                display_name: "leaf".into(),
                children: None,
            }]),
        }
    }

    #[test]
    fn keys_are_lower_camel_case() {
        #[derive(Serialize)]
        struct Hello {
            #[serde(rename = "Hello")]
            hello: &'static str,
        }
        assert_eq!(to_text(&Hello { hello: "World" }).unwrap(), r#"{"hello":"World"}"#);
    }

    #[test]
    fn map_keys_are_converted_too() {
        let map = HashMap::from([("Some_Key", 1)]);
        assert_eq!(to_text(&map).unwrap(), r#"{"someKey":1}"#);
    }

    #[test]
    fn field_order_is_kept() {
        let text = to_text(&sample()).unwrap();
        assert!(text.starts_with(r#"{"id":"1","displayName":"root","children":[{"id":"10""#));
    }

    #[test]
    fn round_trip() {
        let text = to_text(&sample()).unwrap();
        assert_eq!(parse_text::<Item>(Some(&text)).unwrap(), sample());
    }

    #[test]
    fn input_keys_need_not_be_camel_case() {
        let parsed: Item = parse_text(Some(r#"{"ID":"7","Display_Name":"x"}"#)).unwrap();
        assert_eq!(parsed.id, "7");
        assert_eq!(parsed.display_name, "x");
    }

    #[test]
    fn parses_untyped_values() {
        let value: Value = parse_text(Some(r#"{"hello":"World"}"#)).unwrap();
        assert_eq!(value["hello"], "World");
    }

    #[test]
    fn absent_text_gives_default() {
        assert_eq!(parse_text::<Item>(None).unwrap(), Item::default());
        assert_eq!(parse_text::<Item>(Some("")).unwrap(), Item::default());
        assert_eq!(parse_text::<Value>(None).unwrap(), Value::Null);
    }

    #[test]
    fn malformed_text_is_an_error() {
        for text in ["{", "not json", r#"{"id":}"#, "  "] {
            let err = parse_text::<Item>(Some(text)).unwrap_err();
            assert!(matches!(err, CodecError::Json(_)), "{text:?}");
            assert!(err.is_parse());
        }
    }

    #[test]
    fn reader_from_current_position() {
        let mut stream = Cursor::new(Vec::new());
        stream.write_all(br#"{"hello":"World"}"#).unwrap();
        stream.seek(SeekFrom::Start(0)).unwrap();

        let value: Value = parse_reader(Some(&mut stream)).unwrap();
        assert_eq!(value, json!({ "hello": "World" }));

        // exhausted now, nothing is rewound
        let value: Value = parse_reader(Some(&mut stream)).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn absent_reader_gives_default() {
        assert_eq!(parse_reader::<Item, Cursor<&[u8]>>(None).unwrap(), Item::default());
        assert_eq!(parse_reader::<Item, _>(Some(io::empty())).unwrap(), Item::default());
    }

    #[test]
    fn malformed_reader_is_an_error() {
        let err = parse_reader::<Item, _>(Some(Cursor::new("{\"id\""))).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn read_failure_is_io_error() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("broken pipe"))
            }
        }

        let err = parse_reader::<Value, _>(Some(Broken)).unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
        assert!(!err.is_parse());
    }
}
