use crate::token::{MAX_LENGTH, MIN_LENGTH};
use crate::window::Window;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Match {
    pub length: usize,
    pub distance: usize,
}

impl Match {
    /// no usable match; the next byte goes out as a literal
    pub const NONE: Match = Match {
        length: 1,
        distance: 0,
    };

    pub fn is_usable(&self) -> bool {
        self.length >= MIN_LENGTH
    }
}

/// number of leading bytes of `lookahead` equal to the window starting at `begin`,
/// capped at `limit` and at the window's end
fn match_length(window: &Window, begin: usize, lookahead: &[u8], limit: usize) -> usize {
    let mut result = 0;
    for (ix, &x) in (begin..window.len()).zip(lookahead.iter().take(limit)) {
        if window.get(ix) != Some(x) {
            break;
        }
        result += 1;
    }
    result
}

/// Longest prefix of `lookahead` found in `window`.
///
/// Offsets are scanned oldest to newest and a candidate is recorded once it reaches
/// the best length so far (at least 3). Ties replace the earlier candidate, so the
/// nearest occurrence of the longest match wins. Matches never extend past the
/// window's tail.
pub fn find_match(window: &Window, lookahead: &[u8]) -> Match {
    let upper_bound = MAX_LENGTH.min(window.len()).min(lookahead.len());
    if upper_bound < MIN_LENGTH {
        return Match::NONE;
    }

    let mut best = Match::NONE;
    for offset in 0..=window.len() - MIN_LENGTH {
        let required = best.length.max(MIN_LENGTH);
        if offset + required > window.len() {
            break;
        }
        // cheap reject on the last byte a tie would need
        if window.get(offset + required - 1) != Some(lookahead[required - 1]) {
            continue;
        }

        let length = match_length(window, offset, lookahead, upper_bound);
        if length >= required {
            best = Match {
                length,
                distance: window.len() - offset,
            };
        }
    }

    log::trace!("find_match: length {} distance {}", best.length, best.distance);
    best
}
