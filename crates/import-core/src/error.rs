use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unsupported color depth {depth} (only 32-bit RGBA documents can be imported)")]
    UnsupportedColorDepth { depth: u16 },

    #[error("Tile buffer for layer '{layer}' is {actual} bytes, expected {expected}")]
    TileBufferSize {
        layer: String,
        expected: usize,
        actual: usize,
    },

    #[error("Animation '{clip}' has a frame duration of {duration_ms} ms, cannot derive a frame rate")]
    InvalidFrameRate { clip: String, duration_ms: u16 },

    #[error("Animation '{clip}' references frame {frame} but the document has {frames} frames")]
    TagRange {
        clip: String,
        frame: usize,
        frames: usize,
    },

    #[error("Tileset '{name}' raster is {actual} bytes, expected {expected}")]
    TilesetRaster {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to inflate tileset '{name}' raster")]
    TilesetInflate {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
