#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use extkit_codec as codec;
pub use extkit_utils as utils;
