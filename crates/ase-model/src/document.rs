use std::fmt;

/// Decoded Aseprite document.
///
/// Everything the importer consumes from a `.aseprite` file, with chunk
/// payloads already parsed. Pixel data is inflated at decode time; tileset
/// rasters stay zlib-compressed until an output image is actually produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AsepriteFile {
    /// Canvas width in pixels.
    pub width: u16,
    /// Canvas height in pixels.
    pub height: u16,
    /// Bits per pixel (32 = RGBA, 16 = grayscale, 8 = indexed).
    pub color_depth: u16,
    pub frames: Vec<Frame>,
}

/// One animation frame and the chunks stored on it.
///
/// The container format writes layer chunks only on the frame that
/// introduces them; the decoder copies the first frame's layer list onto
/// later frames so `cels[i].layer_index` resolves uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub duration_ms: u16,
    pub layers: Vec<Layer>,
    pub cels: Vec<Cel>,
    pub tilesets: Vec<Tileset>,
    pub slices: Vec<Slice>,
    pub tags: Vec<Tag>,
}

/// A layer entry. Group layers are kept (with no cels) so cel layer
/// indices stay aligned with the chunk order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layer {
    pub name: String,
    /// Present only on tilemap-type layers.
    pub tileset_index: Option<u32>,
}

/// A cel: one layer's content within one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cel {
    /// Index into the owning frame's layer list.
    pub layer_index: u16,
    pub x: i16,
    pub y: i16,
    pub content: CelContent,
}

#[derive(Clone, PartialEq, Eq)]
pub enum CelContent {
    /// Compressed-image cel, pixel data inflated. The buffer holds exactly
    /// `width * height * bytes-per-pixel` bytes at the document's color
    /// depth; RGBA for 32-bit documents.
    Image {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
    /// Compressed-tilemap cel, tile data inflated but not yet decoded into
    /// tile indices. Length validation happens where the indices are read.
    Tilemap {
        width_tiles: u32,
        height_tiles: u32,
        tiles: Vec<u8>,
    },
    /// Any other cel type (raw, linked, ...). The payload is skipped; the
    /// raw type is kept so consumers can say what they ignored.
    Other { raw_type: u16 },
}

impl fmt::Debug for CelContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CelContent::Image { width, height, pixels } => f
                .debug_struct("Image")
                .field("width", width)
                .field("height", height)
                .field("pixels", &format_args!("[{} bytes]", pixels.len()))
                .finish(),
            CelContent::Tilemap { width_tiles, height_tiles, tiles } => f
                .debug_struct("Tilemap")
                .field("width_tiles", width_tiles)
                .field("height_tiles", height_tiles)
                .field("tiles", &format_args!("[{} bytes]", tiles.len()))
                .finish(),
            CelContent::Other { raw_type } => {
                f.debug_struct("Other").field("raw_type", raw_type).finish()
            }
        }
    }
}

/// A tileset definition. `compressed_rgba` is the zlib stream of a
/// `tile_width x (tile_height * num_tiles)` RGBA strip; empty when the
/// tileset lives in an external file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tileset {
    pub id: u32,
    pub tile_width: u16,
    pub tile_height: u16,
    pub num_tiles: u32,
    pub name: String,
    pub compressed_rgba: Vec<u8>,
}

/// A named slice with its per-frame keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Slice {
    pub name: String,
    pub keys: Vec<SliceKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceKey {
    /// Frame index this key takes effect on.
    pub frame: u32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// An animation tag spanning an inclusive frame range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tag {
    pub name: String,
    pub from_frame: u16,
    pub to_frame: u16,
    /// 0 = infinite, 1 = play once, N = play N times.
    pub repeats: u16,
}
