use std::collections::VecDeque;

use crate::error::OutOfRange;
use crate::token::WINDOW_SIZE;

/// Most recent bytes seen by the encoder or produced by the decoder.
///
/// Both sides feed it the same bytes in the same order, so a distance taken
/// from the encoder's window names the same byte in the decoder's.
pub struct Window {
    buf: VecDeque<u8>,
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl Window {
    pub fn new() -> Self {
        Self {
            buf: VecDeque::with_capacity(WINDOW_SIZE + 1),
        }
    }

    /// append one byte, dropping the oldest once over capacity
    pub fn push(&mut self, x: u8) {
        self.buf.push_back(x);
        if self.buf.len() > WINDOW_SIZE {
            self.buf.pop_front();
        }
    }

    pub fn extend(&mut self, xs: &[u8]) {
        for &x in xs {
            self.push(x);
        }
    }

    /// byte `distance` positions before the current end
    pub fn lookup(&self, distance: usize) -> Result<u8, OutOfRange> {
        let len = self.buf.len();
        if distance == 0 || distance > len {
            return Err(OutOfRange { distance, len });
        }
        Ok(self.buf[len - distance])
    }

    /// index 0 is the oldest retained byte
    pub fn get(&self, index: usize) -> Option<u8> {
        self.buf.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_from_tail() {
        let mut window = Window::new();
        window.extend(b"abc");
        assert_eq!(window.lookup(1), Ok(b'c'));
        assert_eq!(window.lookup(3), Ok(b'a'));
        assert_eq!(window.lookup(4), Err(OutOfRange { distance: 4, len: 3 }));
        assert!(window.lookup(0).is_err());
    }

    #[test]
    fn test_eviction_keeps_capacity() {
        let mut window = Window::new();
        for i in 0..WINDOW_SIZE + 10 {
            window.push((i % 251) as u8);
            assert!(window.len() <= WINDOW_SIZE);
        }
        assert_eq!(window.len(), WINDOW_SIZE);
        // oldest ten bytes were dropped
        assert_eq!(window.get(0), Some(10));
        assert_eq!(window.lookup(WINDOW_SIZE), Ok(10));
        assert_eq!(
            window.lookup(1),
            Ok(((WINDOW_SIZE + 9) % 251) as u8)
        );
    }
}
