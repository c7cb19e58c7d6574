use std::io::{self, ErrorKind, Read, Write};

use crate::error::EncodeResult;
use crate::matcher::find_match;
use crate::token::{Token, GROUP_SIZE, MAX_LENGTH};
use crate::window::Window;

/// Turns a byte source into a token stream.
///
/// The window and lookahead live only as long as the encoder, so every
/// invocation starts from an empty history.
pub struct Encoder<R> {
    read: R,
    window: Window,
    lookahead: Vec<u8>,
    eof: bool,
    consumed: u64,
}

impl<R: Read> Encoder<R> {
    pub fn new(read: R) -> Self {
        Self {
            read,
            window: Window::new(),
            lookahead: Vec::with_capacity(MAX_LENGTH),
            eof: false,
            consumed: 0,
        }
    }

    /// top the lookahead up to MAX_LENGTH bytes
    fn fill_lookahead(&mut self) -> io::Result<()> {
        let mut chunk = [0u8; MAX_LENGTH];
        while !self.eof && self.lookahead.len() < MAX_LENGTH {
            let want = MAX_LENGTH - self.lookahead.len();
            match self.read.read(&mut chunk[..want]) {
                Ok(0) => self.eof = true,
                Ok(n) => self.lookahead.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// move the first `n` lookahead bytes into the window
    fn commit(&mut self, n: usize) {
        self.window.extend(&self.lookahead[..n]);
        self.lookahead.drain(..n);
        self.consumed += n as u64;
    }

    /// bytes of input encoded so far
    pub fn len(&self) -> u64 {
        self.consumed
    }

    pub fn is_empty(&self) -> bool {
        self.consumed == 0
    }
}

impl<R: Read> Iterator for Encoder<R> {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Err(e) = self.fill_lookahead() {
            return Some(Err(e));
        }
        let &first = self.lookahead.first()?;

        let m = find_match(&self.window, &self.lookahead);
        let token = if m.is_usable() {
            self.commit(m.length);
            Token::Match {
                distance: m.distance as u16,
                length: m.length as u8,
            }
        } else {
            self.commit(1);
            Token::Literal(first)
        };
        log::trace!("pos {}: {:?}", self.consumed, token);
        Some(Ok(token))
    }
}

/// Packs tokens into flag groups: one flag byte, most significant bit first,
/// followed by the payloads of its eight tokens.
pub struct GroupWriter<W> {
    write: W,
    flags: u8,
    count: usize,
    payload: Vec<u8>,
    written: u64,
}

impl<W: Write> GroupWriter<W> {
    pub fn new(write: W) -> Self {
        Self {
            write,
            flags: 0,
            count: 0,
            payload: Vec::with_capacity(2 * GROUP_SIZE),
            written: 0,
        }
    }

    pub fn push(&mut self, token: Token) -> io::Result<()> {
        self.flags = (self.flags << 1) | token.flag();
        token.write_payload(&mut self.payload);
        self.count += 1;
        if self.count == GROUP_SIZE {
            self.flush_group()?;
        }
        Ok(())
    }

    fn flush_group(&mut self) -> io::Result<()> {
        self.write.write_all(&[self.flags])?;
        self.write.write_all(&self.payload)?;
        self.written += 1 + self.payload.len() as u64;
        self.flags = 0;
        self.count = 0;
        self.payload.clear();
        Ok(())
    }

    /// bytes handed to the underlying writer so far
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Pads the open group with end markers and writes it out.
    ///
    /// A full group of markers is written even when no group is open, so every
    /// stream ends with the end-of-stream literal.
    pub fn finish(mut self) -> io::Result<(W, u64)> {
        loop {
            let last = self.count == GROUP_SIZE - 1;
            self.push(Token::END)?;
            if last {
                break;
            }
        }
        self.write.flush()?;
        Ok((self.write, self.written))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub literals: u64,
    pub matches: u64,
}

/// Encodes everything `read` yields into `write`.
pub fn encode_stream<R: Read, W: Write>(read: R, write: W) -> EncodeResult<EncodeStats> {
    let mut encoder = Encoder::new(read);
    let mut writer = GroupWriter::new(write);
    let mut stats = EncodeStats::default();

    for token in &mut encoder {
        let token = token?;
        if token.is_match() {
            stats.matches += 1;
        } else {
            stats.literals += 1;
        }
        writer.push(token)?;
    }

    let (_, written) = writer.finish()?;
    stats.bytes_in = encoder.len();
    stats.bytes_out = written;
    Ok(stats)
}
