#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod default;
mod fluent;
mod typeid_map;
mod upsert;

pub mod collections;
pub mod hash;
pub mod text;

// -----------------------------------------------------------------------------
// Top-level exports

pub use collections::{IterExt, InvalidChunkSize};
pub use default::default;
pub use fluent::Fluent;
pub use typeid_map::TypeIdMap;
pub use upsert::{CollectionValue, Upsert};
