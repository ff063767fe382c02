#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod codec;
mod error;
mod ext;

pub mod json;
pub mod xml;

// -----------------------------------------------------------------------------
// Top-level exports

pub use cache::SerializerCache;
pub use codec::Codec;
pub use error::{CodecError, Result};
pub use ext::{ParseText, ToBase64, ToMarkup, ToText};
pub use xml::{XmlNamespaces, XmlSerializer};
