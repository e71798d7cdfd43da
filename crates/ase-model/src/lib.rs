// Aseprite document model: binary decoder, frames, layers, cels, tilesets, slices, tags

mod decode;
mod document;
mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod testkit;

pub use decode::AseDecoder;
pub use document::{AsepriteFile, Cel, CelContent, Frame, Layer, Slice, SliceKey, Tag, Tileset};
pub use error::DecodeError;
