//! # lzss
//!
//! LZSS compression with a fixed 4095-byte window, matches of 3 to 15 bytes
//! and tokens packed in groups of eight behind a flag byte.
//!
//! A literal `0x00` marks the end of a stream, so input containing zero bytes
//! decodes only up to its first zero.
//!
//! ```rust
//! let packed = lzss::compress(b"abcabcabc");
//! assert_eq!(lzss::decompress(&packed).unwrap(), b"abcabcabc");
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod matcher;
pub mod token;
pub mod window;

#[cfg(feature = "python")]
mod python;

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

pub use decoder::{decode_stream, DecodeStats, Decoder, TokenReader};
pub use encoder::{encode_stream, EncodeStats, Encoder, GroupWriter};
pub use error::{DecodeError, EncodeError, OutOfRange};
pub use token::Token;

/// Encodes the file at `source` into `destination`.
///
/// The source is opened before the destination is created, so nothing is
/// written when the source can't be read.
pub fn encode<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
) -> Result<EncodeStats, EncodeError> {
    let (source, destination) = (source.as_ref(), destination.as_ref());
    let input = File::open(source).map_err(|e| EncodeError::UnreadableSource {
        path: source.to_path_buf(),
        source: e,
    })?;
    let output = File::create(destination).map_err(|e| EncodeError::UnwritableDestination {
        path: destination.to_path_buf(),
        source: e,
    })?;

    let stats = encode_stream(BufReader::new(input), BufWriter::new(output))?;
    log::debug!(
        "encoded {} -> {}: {} bytes -> {} bytes ({} literals, {} matches)",
        source.display(),
        destination.display(),
        stats.bytes_in,
        stats.bytes_out,
        stats.literals,
        stats.matches
    );
    Ok(stats)
}

/// Decodes the file at `source` into `destination`.
pub fn decode<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
) -> Result<DecodeStats, DecodeError> {
    let (source, destination) = (source.as_ref(), destination.as_ref());
    let input = File::open(source).map_err(|e| DecodeError::UnreadableSource {
        path: source.to_path_buf(),
        source: e,
    })?;
    let output = File::create(destination).map_err(|e| DecodeError::UnwritableDestination {
        path: destination.to_path_buf(),
        source: e,
    })?;

    let stats = decode_stream(BufReader::new(input), BufWriter::new(output))?;
    log::debug!(
        "decoded {} -> {}: {} bytes",
        source.display(),
        destination.display(),
        stats.bytes_out
    );
    Ok(stats)
}

/// Encodes a byte slice in memory.
pub fn compress(xs: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(xs.len() + xs.len() / 8 + 9);
    match encode_stream(Cursor::new(xs), &mut out) {
        Ok(_) => out,
        // neither side of an in-memory encode can fail
        Err(e) => unreachable!("in-memory encode failed: {}", e),
    }
}

/// Decodes a byte slice in memory.
pub fn decompress(xs: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(xs.len() * 2);
    decode_stream(Cursor::new(xs), &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_round_trip() {
        let data = b"the quick brown fox jumps over the quick brown dog";
        let packed = compress(data);
        assert!(packed.len() < data.len() + data.len() / 8 + 9);
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn test_zero_byte_truncates() {
        let packed = compress(b"abc\x00def");
        assert_eq!(decompress(&packed).unwrap(), b"abc");
    }
}
