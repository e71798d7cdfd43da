use std::io::Read;

use flate2::read::ZlibDecoder;

use ase_model::{AsepriteFile, Cel, CelContent, Tileset};

use crate::error::ImportError;

/// A pending image emission: RGBA pixels plus the output-relative path
/// they will be written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Raster production reads 4 bytes per pixel; any other depth fails the
/// whole document.
pub fn check_color_depth(doc: &AsepriteFile) -> Result<(), ImportError> {
    if doc.color_depth != 32 {
        return Err(ImportError::UnsupportedColorDepth {
            depth: doc.color_depth,
        });
    }
    Ok(())
}

/// Flatten a frame's image cels into one buffer sized by the first image
/// cel, painting later cels over earlier ones. A frame with no image cels
/// yields a single transparent pixel.
pub fn flatten_image_cels(cels: &[Cel]) -> (u32, u32, Vec<u8>) {
    let mut size = (1u32, 1u32);
    for cel in cels {
        if let CelContent::Image { width, height, .. } = &cel.content {
            size = (*width, *height);
            break;
        }
    }
    let (width, height) = size;
    let mut rgba = vec![0u8; width as usize * height as usize * 4];
    // TODO: composite at cel offsets with alpha; the flat copy assumes
    // every cel in the frame shares the first cel's size.
    for cel in cels {
        let CelContent::Image { pixels, .. } = &cel.content else {
            continue;
        };
        let n = pixels.len().min(rgba.len());
        rgba[..n].copy_from_slice(&pixels[..n]);
    }
    (width, height, rgba)
}

/// Inflate a tileset's embedded raster into a vertical strip, one tile
/// per band.
pub fn tileset_raster(stem: &str, tileset: &Tileset) -> Result<Raster, ImportError> {
    let mut rgba = Vec::new();
    ZlibDecoder::new(tileset.compressed_rgba.as_slice())
        .read_to_end(&mut rgba)
        .map_err(|source| ImportError::TilesetInflate {
            name: tileset.name.clone(),
            source,
        })?;
    let width = tileset.tile_width as u32;
    let height = tileset.num_tiles * tileset.tile_height as u32;
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(ImportError::TilesetRaster {
            name: tileset.name.clone(),
            expected,
            actual: rgba.len(),
        });
    }
    Ok(Raster {
        name: format!("img/{stem}_tiles_{}.png", tileset.name),
        width,
        height,
        rgba,
    })
}
