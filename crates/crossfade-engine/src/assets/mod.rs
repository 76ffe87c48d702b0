//! Packaged resources.
//!
//! The renderer only ever asks for resources by name; where the bytes come
//! from (a directory next to the binary, memory, ...) is the `AssetSource`'s
//! business.

mod decode;
mod error;
mod source;

pub use decode::decode_rgba;
pub use error::AssetError;
pub use source::{AssetSource, DirAssets, MemoryAssets};
