//! Method-call sugar over [`Codec::global`] and the base64 engine.

use base64::{Engine, engine::general_purpose};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::Codec;
use crate::error::Result;
use crate::json;
use crate::xml::XmlNamespaces;

// -----------------------------------------------------------------------------
// Serialize

/// `value.to_text()`, see [`json::to_text`].
pub trait ToText: Serialize {
    #[inline]
    fn to_text(&self) -> Result<String> {
        json::to_text(self)
    }
}

impl<T: Serialize + ?Sized> ToText for T {}

/// `value.to_markup()`, through the global serializer cache.
pub trait ToMarkup: Serialize + 'static {
    #[inline]
    fn to_markup(&self) -> Result<String> {
        Codec::global().to_markup(self)
    }

    #[inline]
    fn to_markup_with(&self, configure: impl FnOnce(&mut XmlNamespaces)) -> Result<String> {
        Codec::global().to_markup_with(self, configure)
    }
}

impl<T: Serialize + ?Sized + 'static> ToMarkup for T {}

// -----------------------------------------------------------------------------
// Deserialize

/// `text.parse_json::<T>()`, see [`json::parse_text`].
///
/// Implemented for `str` and for optional strings, so a missing value
/// parses to `T::default()`.
///
/// # Examples
///
/// ```
/// use extkit_codec::ParseText;
///
/// let value: serde_json::Value = r#"{"hello":"World"}"#.parse_json()?;
/// assert_eq!(value["hello"], "World");
///
/// let missing: Option<String> = None;
/// assert_eq!(missing.parse_json::<Vec<u8>>()?, Vec::<u8>::new());
/// # Ok::<(), extkit_codec::CodecError>(())
/// ```
pub trait ParseText {
    fn parse_json<T: DeserializeOwned + Default>(&self) -> Result<T>;
}

impl ParseText for str {
    #[inline]
    fn parse_json<T: DeserializeOwned + Default>(&self) -> Result<T> {
        json::parse_text(Some(self))
    }
}

impl<S: AsRef<str>> ParseText for Option<S> {
    #[inline]
    fn parse_json<T: DeserializeOwned + Default>(&self) -> Result<T> {
        json::parse_text(self.as_ref().map(AsRef::<str>::as_ref))
    }
}

// -----------------------------------------------------------------------------
// Base64

/// Standard-alphabet base64 with padding.
pub trait ToBase64 {
    fn to_base64(&self) -> String;
}

impl ToBase64 for str {
    /// Encodes the UTF-8 bytes of the string.
    #[inline]
    fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.as_bytes())
    }
}

impl ToBase64 for [u8] {
    #[inline]
    fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(self)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::{ParseText, ToBase64, ToMarkup, ToText};

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct Greeting {
        #[serde(rename = "Hello")]
        hello: String,
    }

    #[test]
    fn to_text() {
        let greeting = Greeting {
            hello: "World".into(),
        };
        assert_eq!(greeting.to_text().unwrap(), r#"{"hello":"World"}"#);
    }

    #[test]
    fn to_markup() {
        assert!("hello".to_markup().unwrap().contains("<string>hello</string>"));
        assert!(String::from("hello").to_markup().unwrap().contains("<string>hello</string>"));
    }

    #[test]
    fn to_markup_with_namespaces() {
        let xml = true
            .to_markup_with(|ns| {
                ns.add("x", "urn:x");
            })
            .unwrap();
        assert!(xml.contains(r#"<boolean xmlns:x="urn:x">true</boolean>"#));
    }

    #[test]
    fn parse_json() {
        let parsed: Greeting = r#"{"hello":"World"}"#.parse_json().unwrap();
        assert_eq!(parsed.hello, "World");

        let owned = String::from(r#"{"Hello":"Again"}"#);
        assert_eq!(owned.parse_json::<Greeting>().unwrap().hello, "Again");

        assert_eq!(None::<&str>.parse_json::<Greeting>().unwrap(), Greeting::default());
        assert_eq!(Some("").parse_json::<Greeting>().unwrap(), Greeting::default());
        assert!(Some("{").parse_json::<Greeting>().is_err());
    }

    #[test]
    fn base64() {
        assert_eq!("Hello World".to_base64(), "SGVsbG8gV29ybGQ=");
        assert_eq!("".to_base64(), "");
        assert_eq!(b"\xff\x00"[..].to_base64(), "/wA=");
    }
}
