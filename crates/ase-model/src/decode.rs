// Aseprite binary container decoder.
//
// A 128-byte header, then one block per frame; each frame is a run of
// size-prefixed chunks. Only the chunk types the importer consumes are
// decoded in full, everything else is skipped by its declared size. All
// integers are little-endian.

use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::ZlibDecoder;
use log::debug;

use crate::document::{AsepriteFile, Cel, CelContent, Frame, Layer, Slice, SliceKey, Tag, Tileset};
use crate::error::DecodeError;

const FILE_MAGIC: u16 = 0xA5E0;
const FRAME_MAGIC: u16 = 0xF1FA;
const HEADER_SIZE: usize = 128;

const CHUNK_LAYER: u16 = 0x2004;
const CHUNK_CEL: u16 = 0x2005;
const CHUNK_TAGS: u16 = 0x2018;
const CHUNK_SLICE: u16 = 0x2022;
const CHUNK_TILESET: u16 = 0x2023;

const LAYER_TYPE_TILEMAP: u16 = 2;
const CEL_COMPRESSED_IMAGE: u16 = 2;
const CEL_COMPRESSED_TILEMAP: u16 = 3;

const SLICE_FLAG_NINE_PATCH: u32 = 1;
const SLICE_FLAG_PIVOT: u32 = 2;
const TILESET_FLAG_EXTERNAL_FILE: u32 = 1;
const TILESET_FLAG_EMBEDDED_IMAGE: u32 = 2;

/// Aseprite file decoder
pub struct AseDecoder;

impl AseDecoder {
    pub fn decode(path: &Path) -> Result<AsepriteFile, DecodeError> {
        let data = fs::read(path).map_err(|source| DecodeError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode_bytes(&data)
    }

    pub fn decode_bytes(data: &[u8]) -> Result<AsepriteFile, DecodeError> {
        let mut cur = Cursor::new(data);
        let _file_size = cur.u32()?;
        let magic = cur.u16()?;
        if magic != FILE_MAGIC {
            return Err(DecodeError::BadFileMagic { found: magic });
        }
        let frame_count = cur.u16()? as usize;
        let width = cur.u16()?;
        let height = cur.u16()?;
        let color_depth = cur.u16()?;
        cur.seek_to(HEADER_SIZE)?;

        let mut frames = Vec::with_capacity(frame_count);
        for frame_idx in 0..frame_count {
            frames.push(decode_frame(&mut cur, frame_idx, color_depth)?);
        }

        // Layer chunks are stored once, on the frame that introduces them;
        // cels on later frames still index the full list.
        if let Some((first, rest)) = frames.split_first_mut() {
            for frame in rest {
                if frame.layers.is_empty() {
                    frame.layers = first.layers.clone();
                }
            }
        }

        Ok(AsepriteFile {
            width,
            height,
            color_depth,
            frames,
        })
    }
}

fn decode_frame(
    cur: &mut Cursor,
    frame_idx: usize,
    color_depth: u16,
) -> Result<Frame, DecodeError> {
    let frame_start = cur.pos();
    let frame_bytes = cur.u32()? as usize;
    let magic = cur.u16()?;
    if magic != FRAME_MAGIC {
        return Err(DecodeError::BadFrameMagic {
            frame: frame_idx,
            found: magic,
        });
    }
    let old_chunk_count = cur.u16()? as usize;
    let duration_ms = cur.u16()?;
    cur.skip(2)?;
    let new_chunk_count = cur.u32()? as usize;
    let chunk_count = if new_chunk_count != 0 {
        new_chunk_count
    } else {
        old_chunk_count
    };

    let mut frame = Frame {
        duration_ms,
        ..Frame::default()
    };
    for _ in 0..chunk_count {
        decode_chunk(cur, frame_idx, color_depth, &mut frame)?;
    }

    // The declared frame size is authoritative; realign for the next frame.
    let frame_end = frame_start
        .checked_add(frame_bytes)
        .ok_or(DecodeError::UnexpectedEof { offset: frame_start })?;
    cur.seek_to(frame_end)?;
    Ok(frame)
}

fn decode_chunk(
    cur: &mut Cursor,
    frame_idx: usize,
    color_depth: u16,
    frame: &mut Frame,
) -> Result<(), DecodeError> {
    let chunk_start = cur.pos();
    let size = cur.u32()? as usize;
    let chunk_type = cur.u16()?;
    let chunk_end = chunk_start
        .checked_add(size)
        .ok_or(DecodeError::UnexpectedEof { offset: chunk_start })?;

    match chunk_type {
        CHUNK_LAYER => {
            let layer = decode_layer(cur)?;
            frame.layers.push(layer);
        }
        CHUNK_CEL => {
            let cel = decode_cel(cur, frame_idx, color_depth, chunk_end)?;
            frame.cels.push(cel);
        }
        CHUNK_TAGS => decode_tags(cur, frame)?,
        CHUNK_SLICE => {
            let slice = decode_slice(cur)?;
            frame.slices.push(slice);
        }
        CHUNK_TILESET => {
            let tileset = decode_tileset(cur)?;
            frame.tilesets.push(tileset);
        }
        other => debug!("skipping chunk type 0x{other:04X} in frame {frame_idx}"),
    }

    cur.seek_to(chunk_end)
}

fn decode_layer(cur: &mut Cursor) -> Result<Layer, DecodeError> {
    let _flags = cur.u16()?;
    let layer_type = cur.u16()?;
    let _child_level = cur.u16()?;
    cur.skip(4)?; // default width/height
    let _blend_mode = cur.u16()?;
    let _opacity = cur.u8()?;
    cur.skip(3)?;
    let name = cur.string()?;
    let tileset_index = if layer_type == LAYER_TYPE_TILEMAP {
        Some(cur.u32()?)
    } else {
        None
    };
    Ok(Layer { name, tileset_index })
}

fn decode_cel(
    cur: &mut Cursor,
    frame_idx: usize,
    color_depth: u16,
    chunk_end: usize,
) -> Result<Cel, DecodeError> {
    let layer_index = cur.u16()?;
    let x = cur.i16()?;
    let y = cur.i16()?;
    let _opacity = cur.u8()?;
    let cel_type = cur.u16()?;
    let _z_index = cur.i16()?;
    cur.skip(5)?;

    let content = match cel_type {
        CEL_COMPRESSED_IMAGE => {
            let width = cur.u16()? as u32;
            let height = cur.u16()? as u32;
            let pixels = inflate(cur.take_until(chunk_end)?, "cel pixels", frame_idx)?;
            let expected = width as usize * height as usize * (color_depth / 8) as usize;
            if pixels.len() != expected {
                return Err(DecodeError::CelDataSize {
                    width,
                    height,
                    expected,
                    actual: pixels.len(),
                });
            }
            CelContent::Image {
                width,
                height,
                pixels,
            }
        }
        CEL_COMPRESSED_TILEMAP => {
            let width_tiles = cur.u16()? as u32;
            let height_tiles = cur.u16()? as u32;
            let _bits_per_tile = cur.u16()?;
            cur.skip(16)?; // tile id / x flip / y flip / diagonal flip bitmasks
            cur.skip(10)?;
            let tiles = inflate(cur.take_until(chunk_end)?, "tile data", frame_idx)?;
            CelContent::Tilemap {
                width_tiles,
                height_tiles,
                tiles,
            }
        }
        other => CelContent::Other { raw_type: other },
    };

    Ok(Cel {
        layer_index,
        x,
        y,
        content,
    })
}

fn decode_tags(cur: &mut Cursor, frame: &mut Frame) -> Result<(), DecodeError> {
    let count = cur.u16()?;
    cur.skip(8)?;
    for _ in 0..count {
        let from_frame = cur.u16()?;
        let to_frame = cur.u16()?;
        let _loop_direction = cur.u8()?;
        let repeats = cur.u16()?;
        cur.skip(6)?;
        cur.skip(3)?; // tag color
        let _extra = cur.u8()?;
        let name = cur.string()?;
        frame.tags.push(Tag {
            name,
            from_frame,
            to_frame,
            repeats,
        });
    }
    Ok(())
}

fn decode_slice(cur: &mut Cursor) -> Result<Slice, DecodeError> {
    let key_count = cur.u32()?;
    let flags = cur.u32()?;
    cur.skip(4)?;
    let name = cur.string()?;
    let mut keys = Vec::new();
    for _ in 0..key_count {
        let frame = cur.u32()?;
        let x = cur.i32()?;
        let y = cur.i32()?;
        let width = cur.u32()?;
        let height = cur.u32()?;
        if flags & SLICE_FLAG_NINE_PATCH != 0 {
            cur.skip(16)?; // center rect
        }
        if flags & SLICE_FLAG_PIVOT != 0 {
            cur.skip(8)?; // pivot point
        }
        keys.push(SliceKey {
            frame,
            x,
            y,
            width,
            height,
        });
    }
    Ok(Slice { name, keys })
}

fn decode_tileset(cur: &mut Cursor) -> Result<Tileset, DecodeError> {
    let id = cur.u32()?;
    let flags = cur.u32()?;
    let num_tiles = cur.u32()?;
    let tile_width = cur.u16()?;
    let tile_height = cur.u16()?;
    let _base_index = cur.i16()?;
    cur.skip(14)?;
    let name = cur.string()?;
    if flags & TILESET_FLAG_EXTERNAL_FILE != 0 {
        cur.skip(8)?; // external file id + tileset id
    }
    let compressed_rgba = if flags & TILESET_FLAG_EMBEDDED_IMAGE != 0 {
        let len = cur.u32()? as usize;
        cur.take(len)?.to_vec()
    } else {
        Vec::new()
    };
    Ok(Tileset {
        id,
        tile_width,
        tile_height,
        num_tiles,
        name,
        compressed_rgba,
    })
}

fn inflate(compressed: &[u8], what: &'static str, frame: usize) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::new();
    ZlibDecoder::new(compressed)
        .read_to_end(&mut out)
        .map_err(|source| DecodeError::Inflate {
            what,
            frame,
            source,
        })?;
    Ok(out)
}

/// Bounds-checked little-endian reader over the raw file bytes.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(DecodeError::UnexpectedEof { offset: self.pos })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Everything from the current position up to `end` (a chunk boundary).
    fn take_until(&mut self, end: usize) -> Result<&'a [u8], DecodeError> {
        if end < self.pos || end > self.data.len() {
            return Err(DecodeError::UnexpectedEof { offset: self.pos });
        }
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn seek_to(&mut self, pos: usize) -> Result<(), DecodeError> {
        if pos > self.data.len() {
            return Err(DecodeError::UnexpectedEof { offset: pos });
        }
        self.pos = pos;
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.take(n).map(|_| ())
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn i16(&mut self) -> Result<i16, DecodeError> {
        Ok(self.u16()? as i16)
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i32(&mut self) -> Result<i32, DecodeError> {
        Ok(self.u32()? as i32)
    }

    /// Word-length-prefixed UTF-8 string.
    fn string(&mut self) -> Result<String, DecodeError> {
        let len = self.u16()? as usize;
        let offset = self.pos;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidString { offset })
    }
}
