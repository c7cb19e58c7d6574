/// Largest number of bytes the window retains; also the largest distance.
pub const WINDOW_SIZE: usize = 4095;
pub const MAX_LENGTH: usize = 15;
pub const MIN_LENGTH: usize = 3;
/// Tokens described by a single flag byte.
pub const GROUP_SIZE: usize = 8;
/// Literal payload that terminates a stream.
pub const END_OF_STREAM: u8 = 0x00;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Token {
    Literal(u8),
    Match {
        distance: u16, // 1~4095
        length: u8,    // 3~15
    },
}

impl Default for Token {
    fn default() -> Self {
        Self::END
    }
}

impl Token {
    /// Padding token, doubling as the end-of-stream marker.
    pub const END: Token = Token::Literal(END_OF_STREAM);

    pub fn is_match(&self) -> bool {
        matches!(self, Token::Match { .. })
    }

    pub fn is_end(&self) -> bool {
        *self == Self::END
    }

    /// bit value inside the group's flag byte
    pub fn flag(&self) -> u8 {
        self.is_match() as u8
    }

    pub fn payload_len(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { .. } => 2,
        }
    }

    /// Number of output bytes this token stands for.
    pub fn span(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { length, .. } => *length as usize,
        }
    }

    pub fn write_payload(&self, out: &mut Vec<u8>) {
        match *self {
            Token::Literal(x) => out.push(x),
            Token::Match { distance, length } => {
                debug_assert!((1..=WINDOW_SIZE).contains(&(distance as usize)));
                debug_assert!((MIN_LENGTH..=MAX_LENGTH).contains(&(length as usize)));
                let v = ((distance & 0x0FFF) << 4) | (length & 0x0F) as u16;
                out.extend_from_slice(&v.to_be_bytes());
            }
        }
    }

    /// Unpacks a 2-byte match payload. Range checks are left to the decoder.
    pub fn match_from_payload(payload: [u8; 2]) -> Self {
        let v = u16::from_be_bytes(payload);
        Token::Match {
            distance: (v >> 4) & 0x0FFF,
            length: (v & 0x0F) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_payload_layout() {
        let mut out = Vec::new();
        Token::Match {
            distance: 0xABC,
            length: 0xD,
        }
        .write_payload(&mut out);
        assert_eq!(out, vec![0xAB, 0xCD]);
        assert_eq!(
            Token::match_from_payload([0xAB, 0xCD]),
            Token::Match {
                distance: 0xABC,
                length: 0xD
            }
        );
    }

    #[test]
    fn test_extreme_match_fields() {
        let mut out = Vec::new();
        Token::Match {
            distance: WINDOW_SIZE as u16,
            length: MAX_LENGTH as u8,
        }
        .write_payload(&mut out);
        assert_eq!(out, vec![0xFF, 0xFF]);

        out.clear();
        Token::Match {
            distance: 1,
            length: MIN_LENGTH as u8,
        }
        .write_payload(&mut out);
        assert_eq!(out, vec![0x00, 0x13]);
    }

    #[test]
    fn test_literal_payload() {
        let mut out = Vec::new();
        Token::Literal(b'z').write_payload(&mut out);
        assert_eq!(out, b"z");
        assert_eq!(Token::Literal(b'z').flag(), 0);
        assert!(!Token::Literal(b'z').is_end());
        assert!(Token::default().is_end());
    }
}
