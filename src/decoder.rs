use std::io::{self, ErrorKind, Read, Write};

use crate::error::{DecodeError, DecodeResult};
use crate::token::{Token, GROUP_SIZE, MIN_LENGTH};
use crate::window::Window;

/// Parses flag groups back into tokens.
///
/// Iteration ends at the end-of-stream literal, or when the input runs out
/// where the next flag byte would be. Running out inside a group's payload
/// is an error.
pub struct TokenReader<R> {
    read: R,
    flags: u8,
    remaining: usize,
    done: bool,
}

impl<R: Read> TokenReader<R> {
    pub fn new(read: R) -> Self {
        Self {
            read,
            flags: 0,
            remaining: 0,
            done: false,
        }
    }

    /// returns false on a clean end of input
    fn read_exact_or_eof(&mut self, buf: &mut [u8]) -> io::Result<bool> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(false),
                Ok(0) => return Err(ErrorKind::UnexpectedEof.into()),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }

    fn payload<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut buf = [0u8; N];
        match self.read_exact_or_eof(&mut buf) {
            Ok(true) => Ok(buf),
            Ok(false) => Err(DecodeError::UnexpectedEof),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(DecodeError::UnexpectedEof),
            Err(e) => Err(e.into()),
        }
    }

    fn next_token(&mut self) -> DecodeResult<Option<Token>> {
        if self.remaining == 0 {
            let mut flags = [0u8; 1];
            if !self.read_exact_or_eof(&mut flags)? {
                log::debug!("input ended at a group boundary without end marker");
                return Ok(None);
            }
            self.flags = flags[0];
            self.remaining = GROUP_SIZE;
        }

        let is_match = self.flags & 0x80 != 0;
        self.flags <<= 1;
        self.remaining -= 1;

        let token = if is_match {
            Token::match_from_payload(self.payload::<2>()?)
        } else {
            Token::Literal(self.payload::<1>()?[0])
        };
        if token.is_end() {
            return Ok(None);
        }
        Ok(Some(token))
    }
}

impl<R: Read> Iterator for TokenReader<R> {
    type Item = DecodeResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.done = true;
        }
        result
    }
}

/// Expands tokens into bytes, replaying matches from the window.
pub struct Decoder<I> {
    iter: I,
    window: Window,
    distance: usize,
    pending: usize,
    failed: bool,
}

impl<I> Decoder<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            window: Window::new(),
            distance: 0,
            pending: 0,
            failed: false,
        }
    }
}

impl<I: Iterator<Item = DecodeResult<Token>>> Decoder<I> {
    fn step(&mut self) -> DecodeResult<Option<u8>> {
        while self.pending == 0 {
            match self.iter.next().transpose()? {
                None => return Ok(None),
                Some(Token::Literal(x)) => {
                    self.window.push(x);
                    return Ok(Some(x));
                }
                Some(Token::Match { distance, length }) => {
                    let length = length as usize;
                    if length < MIN_LENGTH {
                        return Err(DecodeError::InvalidLength { length });
                    }
                    self.distance = distance as usize;
                    self.pending = length;
                }
            }
        }

        // distance is measured against the growing window, so a match may
        // copy bytes it produced itself
        let x = self.window.lookup(self.distance)?;
        self.window.push(x);
        self.pending -= 1;
        Ok(Some(x))
    }
}

impl<I: Iterator<Item = DecodeResult<Token>>> Iterator for Decoder<I> {
    type Item = DecodeResult<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.step().transpose();
        if matches!(result, Some(Err(_))) {
            self.failed = true;
        }
        result
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub bytes_out: u64,
}

/// Decodes `read` into `write`.
///
/// On failure the bytes decoded before the fault are still written and
/// flushed, then the error is returned.
pub fn decode_stream<R: Read, W: Write>(read: R, mut write: W) -> DecodeResult<DecodeStats> {
    let decoder = Decoder::new(TokenReader::new(read));
    let mut buf = Vec::with_capacity(1 << 13);
    let mut stats = DecodeStats::default();
    let mut failure = None;

    for x in decoder {
        match x {
            Ok(x) => buf.push(x),
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
        if buf.len() == buf.capacity() {
            write.write_all(&buf)?;
            stats.bytes_out += buf.len() as u64;
            buf.clear();
        }
    }

    write.write_all(&buf)?;
    stats.bytes_out += buf.len() as u64;
    write.flush()?;

    match failure {
        Some(e) => {
            log::debug!("decode failed after {} bytes: {}", stats.bytes_out, e);
            Err(e)
        }
        None => Ok(stats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode(xs: &[u8]) -> DecodeResult<Vec<u8>> {
        let mut out = Vec::new();
        decode_stream(Cursor::new(xs), &mut out).map(|_| out)
    }

    #[test]
    fn test_literal_group() {
        assert_eq!(decode(b"\x00ab\x00\x00\x00\x00\x00\x00").unwrap(), b"ab");
    }

    #[test]
    fn test_stops_mid_group_at_end_marker() {
        // the marker is the second token; the rest of the stream is ignored
        let stream = b"\x00a\x00garbage";
        assert_eq!(decode(stream).unwrap(), b"a");
    }

    #[test]
    fn test_self_overlapping_match() {
        // 'a', then copy 14 bytes from distance 1
        let stream = [0b0100_0000, b'a', 0x00, 0x1E, 0, 0, 0, 0, 0, 0];
        assert_eq!(decode(&stream).unwrap(), vec![b'a'; 15]);
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert_eq!(decode(b"").unwrap(), b"");
        assert_eq!(decode(&[0u8; 9]).unwrap(), b"");
    }

    #[test]
    fn test_eof_at_group_boundary_is_clean() {
        assert_eq!(decode(b"\x00abcdefgh").unwrap(), b"abcdefgh");
    }

    #[test]
    fn test_eof_inside_group() {
        assert!(matches!(decode(b"\x00abc"), Err(DecodeError::UnexpectedEof)));
        // half a match payload
        assert!(matches!(
            decode(b"\x10abc\x00"),
            Err(DecodeError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_distance_past_window_is_corrupt() {
        let stream = [0b0100_0000, b'a', 0x00, 0x23, 0, 0, 0, 0, 0, 0];
        let mut out = Vec::new();
        let err = decode_stream(Cursor::new(&stream[..]), &mut out).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::CorruptStream {
                distance: 2,
                available: 1
            }
        ));
        // output decoded before the fault is kept
        assert_eq!(out, b"a");
    }

    #[test]
    fn test_zero_distance_is_corrupt() {
        let stream = [0b0100_0000, b'a', 0x00, 0x03, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            decode(&stream),
            Err(DecodeError::CorruptStream { distance: 0, .. })
        ));
    }

    #[test]
    fn test_short_length_is_rejected() {
        let stream = [0b0100_0000, b'a', 0x00, 0x12, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            decode(&stream),
            Err(DecodeError::InvalidLength { length: 2 })
        ));
    }

    #[test]
    fn test_token_reader_yields_tokens() {
        let stream = [0b0001_0000, b'a', b'b', b'c', 0x00, 0x33, 0, 0, 0, 0];
        let tokens = TokenReader::new(Cursor::new(&stream[..]))
            .collect::<DecodeResult<Vec<_>>>()
            .unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal(b'a'),
                Token::Literal(b'b'),
                Token::Literal(b'c'),
                Token::Match {
                    distance: 3,
                    length: 3
                },
            ]
        );
    }
}
