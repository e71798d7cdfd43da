use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to read Aseprite file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not an Aseprite file (header magic 0x{found:04X})")]
    BadFileMagic { found: u16 },

    #[error("Bad frame magic 0x{found:04X} in frame {frame}")]
    BadFrameMagic { frame: usize, found: u16 },

    #[error("Unexpected end of data at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("Failed to inflate {what} in frame {frame}")]
    Inflate {
        what: &'static str,
        frame: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Cel pixel data is {actual} bytes, expected {expected} for {width}x{height}")]
    CelDataSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid UTF-8 in string field at offset {offset}")]
    InvalidString { offset: usize },
}
