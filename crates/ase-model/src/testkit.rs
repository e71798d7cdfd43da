// Test fixtures: build documents in memory and encode them back into the
// binary container so decoder and importer tests can run on real bytes.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;

use crate::document::{AsepriteFile, Cel, CelContent, Frame, Layer, Slice, Tag, Tileset};

pub fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

pub fn push_i16(out: &mut Vec<u8>, v: i16) {
    out.extend_from_slice(&v.to_le_bytes());
}

pub fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

pub fn push_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_le_bytes());
}

pub fn push_string(out: &mut Vec<u8>, s: &str) {
    push_u16(out, s.len() as u16);
    out.extend_from_slice(s.as_bytes());
}

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).expect("zlib write");
    enc.finish().expect("zlib finish")
}

/// RGBA buffer of cycling byte values, `width * height * 4` bytes.
pub fn pattern_rgba(width: u32, height: u32) -> Vec<u8> {
    (0..width as usize * height as usize * 4)
        .map(|i| (i % 251) as u8)
        .collect()
}

/// Solid-color RGBA buffer.
pub fn solid_rgba(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let mut out = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..width * height {
        out.extend_from_slice(&rgba);
    }
    out
}

/// Little-endian tile index bytes for a tilemap cel.
pub fn tile_bytes(tiles: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(tiles.len() * 4);
    for t in tiles {
        push_u32(&mut out, *t);
    }
    out
}

/// A plain image layer.
pub fn layer(name: &str) -> Layer {
    Layer {
        name: name.to_string(),
        tileset_index: None,
    }
}

/// A tilemap layer bound to a tileset index.
pub fn tilemap_layer(name: &str, tileset_index: u32) -> Layer {
    Layer {
        name: name.to_string(),
        tileset_index: Some(tileset_index),
    }
}

/// An image cel filled with the test pattern.
pub fn image_cel(layer_index: u16, x: i16, y: i16, width: u32, height: u32) -> Cel {
    Cel {
        layer_index,
        x,
        y,
        content: CelContent::Image {
            width,
            height,
            pixels: pattern_rgba(width, height),
        },
    }
}

/// A tilemap cel over the given tile indices (row-major).
pub fn tilemap_cel(
    layer_index: u16,
    x: i16,
    y: i16,
    width_tiles: u32,
    height_tiles: u32,
    tiles: &[u32],
) -> Cel {
    Cel {
        layer_index,
        x,
        y,
        content: CelContent::Tilemap {
            width_tiles,
            height_tiles,
            tiles: tile_bytes(tiles),
        },
    }
}

/// A tileset whose raster strip is the deflated test pattern.
pub fn tileset(id: u32, name: &str, tile_width: u16, tile_height: u16, num_tiles: u32) -> Tileset {
    let strip = pattern_rgba(tile_width as u32, tile_height as u32 * num_tiles);
    Tileset {
        id,
        tile_width,
        tile_height,
        num_tiles,
        name: name.to_string(),
        compressed_rgba: deflate(&strip),
    }
}

/// Encode a document into the binary container format.
pub fn encode(file: &AsepriteFile) -> Vec<u8> {
    encode_impl(file, None)
}

/// Encode with one extra raw chunk appended to the given frame, for
/// exercising unknown-chunk handling and hand-built chunk bodies.
pub fn encode_with_chunk(
    file: &AsepriteFile,
    frame_idx: usize,
    chunk_type: u16,
    body: &[u8],
) -> Vec<u8> {
    encode_impl(file, Some((frame_idx, chunk_type, body)))
}

fn encode_impl(file: &AsepriteFile, extra: Option<(usize, u16, &[u8])>) -> Vec<u8> {
    let mut frame_blocks = Vec::new();
    for (idx, frame) in file.frames.iter().enumerate() {
        let mut chunks: Vec<Vec<u8>> = Vec::new();
        for layer in &frame.layers {
            chunks.push(chunk(0x2004, &layer_body(layer)));
        }
        for ts in &frame.tilesets {
            chunks.push(chunk(0x2023, &tileset_body(ts)));
        }
        for cel in &frame.cels {
            chunks.push(chunk(0x2005, &cel_body(cel)));
        }
        if !frame.tags.is_empty() {
            chunks.push(chunk(0x2018, &tags_body(&frame.tags)));
        }
        for slice in &frame.slices {
            chunks.push(chunk(0x2022, &slice_body(slice)));
        }
        if let Some((extra_idx, chunk_type, body)) = extra
            && extra_idx == idx
        {
            chunks.push(chunk(chunk_type, body));
        }
        frame_blocks.push(frame_block(frame, &chunks));
    }

    let mut out = Vec::new();
    push_u32(&mut out, 0); // file size, patched below
    push_u16(&mut out, 0xA5E0);
    push_u16(&mut out, file.frames.len() as u16);
    push_u16(&mut out, file.width);
    push_u16(&mut out, file.height);
    push_u16(&mut out, file.color_depth);
    out.resize(128, 0);
    for block in &frame_blocks {
        out.extend_from_slice(block);
    }
    let size = out.len() as u32;
    out[0..4].copy_from_slice(&size.to_le_bytes());
    out
}

fn frame_block(frame: &Frame, chunks: &[Vec<u8>]) -> Vec<u8> {
    let body_len: usize = chunks.iter().map(|c| c.len()).sum();
    let mut out = Vec::with_capacity(16 + body_len);
    push_u32(&mut out, (16 + body_len) as u32);
    push_u16(&mut out, 0xF1FA);
    push_u16(&mut out, chunks.len().min(0xFFFF) as u16);
    push_u16(&mut out, frame.duration_ms);
    out.extend_from_slice(&[0; 2]);
    push_u32(&mut out, chunks.len() as u32);
    for c in chunks {
        out.extend_from_slice(c);
    }
    out
}

fn chunk(chunk_type: u16, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(6 + body.len());
    push_u32(&mut out, (6 + body.len()) as u32);
    push_u16(&mut out, chunk_type);
    out.extend_from_slice(body);
    out
}

fn layer_body(layer: &Layer) -> Vec<u8> {
    let mut out = Vec::new();
    push_u16(&mut out, 1); // flags: visible
    push_u16(&mut out, if layer.tileset_index.is_some() { 2 } else { 0 });
    push_u16(&mut out, 0); // child level
    push_u16(&mut out, 0); // default width
    push_u16(&mut out, 0); // default height
    push_u16(&mut out, 0); // blend mode
    out.push(255); // opacity
    out.extend_from_slice(&[0; 3]);
    push_string(&mut out, &layer.name);
    if let Some(index) = layer.tileset_index {
        push_u32(&mut out, index);
    }
    out
}

fn cel_body(cel: &Cel) -> Vec<u8> {
    let mut out = Vec::new();
    push_u16(&mut out, cel.layer_index);
    push_i16(&mut out, cel.x);
    push_i16(&mut out, cel.y);
    out.push(255); // opacity
    let cel_type = match &cel.content {
        CelContent::Image { .. } => 2,
        CelContent::Tilemap { .. } => 3,
        CelContent::Other { raw_type } => *raw_type,
    };
    push_u16(&mut out, cel_type);
    push_i16(&mut out, 0); // z-index
    out.extend_from_slice(&[0; 5]);
    match &cel.content {
        CelContent::Image {
            width,
            height,
            pixels,
        } => {
            push_u16(&mut out, *width as u16);
            push_u16(&mut out, *height as u16);
            out.extend_from_slice(&deflate(pixels));
        }
        CelContent::Tilemap {
            width_tiles,
            height_tiles,
            tiles,
        } => {
            push_u16(&mut out, *width_tiles as u16);
            push_u16(&mut out, *height_tiles as u16);
            push_u16(&mut out, 32); // bits per tile
            push_u32(&mut out, 0x1fff_ffff); // tile id mask
            push_u32(&mut out, 0x2000_0000); // x flip mask
            push_u32(&mut out, 0x4000_0000); // y flip mask
            push_u32(&mut out, 0x8000_0000); // diagonal flip mask
            out.extend_from_slice(&[0; 10]);
            out.extend_from_slice(&deflate(tiles));
        }
        CelContent::Other { .. } => {}
    }
    out
}

fn tags_body(tags: &[Tag]) -> Vec<u8> {
    let mut out = Vec::new();
    push_u16(&mut out, tags.len() as u16);
    out.extend_from_slice(&[0; 8]);
    for tag in tags {
        push_u16(&mut out, tag.from_frame);
        push_u16(&mut out, tag.to_frame);
        out.push(0); // loop direction
        push_u16(&mut out, tag.repeats);
        out.extend_from_slice(&[0; 6]);
        out.extend_from_slice(&[0; 3]); // tag color
        out.push(0); // extra byte
        push_string(&mut out, &tag.name);
    }
    out
}

fn slice_body(slice: &Slice) -> Vec<u8> {
    let mut out = Vec::new();
    push_u32(&mut out, slice.keys.len() as u32);
    push_u32(&mut out, 0); // flags
    push_u32(&mut out, 0); // reserved
    push_string(&mut out, &slice.name);
    for key in &slice.keys {
        push_u32(&mut out, key.frame);
        push_i32(&mut out, key.x);
        push_i32(&mut out, key.y);
        push_u32(&mut out, key.width);
        push_u32(&mut out, key.height);
    }
    out
}

fn tileset_body(ts: &Tileset) -> Vec<u8> {
    let mut out = Vec::new();
    push_u32(&mut out, ts.id);
    push_u32(&mut out, if ts.compressed_rgba.is_empty() { 0 } else { 2 }); // flags
    push_u32(&mut out, ts.num_tiles);
    push_u16(&mut out, ts.tile_width);
    push_u16(&mut out, ts.tile_height);
    push_i16(&mut out, 1); // base index
    out.extend_from_slice(&[0; 14]);
    push_string(&mut out, &ts.name);
    if !ts.compressed_rgba.is_empty() {
        push_u32(&mut out, ts.compressed_rgba.len() as u32);
        out.extend_from_slice(&ts.compressed_rgba);
    }
    out
}
