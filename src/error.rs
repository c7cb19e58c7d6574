//! Error types for encode and decode operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A backward reference reached past the oldest byte the window retains.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("distance {distance} out of range for window of {len} bytes")]
pub struct OutOfRange {
    pub distance: usize,
    pub len: usize,
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("cannot read source {}: {source}", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write destination {}: {source}", path.display())]
    UnwritableDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("cannot read source {}: {source}", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write destination {}: {source}", path.display())]
    UnwritableDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A match referenced bytes the window does not hold.
    #[error("corrupt stream: match distance {distance} exceeds {available} decoded bytes")]
    CorruptStream { distance: usize, available: usize },

    #[error("corrupt stream: match length {length} below minimum")]
    InvalidLength { length: usize },

    /// Input ended inside a group's payload.
    #[error("unexpected end of input inside a token group")]
    UnexpectedEof,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<OutOfRange> for DecodeError {
    fn from(e: OutOfRange) -> Self {
        DecodeError::CorruptStream {
            distance: e.distance,
            available: e.len,
        }
    }
}

pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
