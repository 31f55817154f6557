//! Digit values and the segment patterns they light up.

use crate::{
    foundation::error::{RuneError, RuneResult},
    glyph::segment::SEGMENT_COUNT,
};

/// A decimal digit, guaranteed to be in `0..=9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn new(d: u8) -> RuneResult<Self> {
        if d > 9 {
            return Err(RuneError::validation(format!(
                "digit {d} is outside 0..=9"
            )));
        }
        Ok(Self(d))
    }

    /// `n mod 10`; always a valid digit.
    pub(crate) fn last_of(n: u16) -> Self {
        Self((n % 10) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn pattern(self) -> DigitPattern {
        PATTERNS[usize::from(self.0)]
    }
}

impl TryFrom<u8> for Digit {
    type Error = RuneError;

    fn try_from(d: u8) -> RuneResult<Self> {
        Self::new(d)
    }
}

/// Which of the five segments are on for a digit, indexed A..E.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DigitPattern([bool; SEGMENT_COUNT]);

const fn p(bits: [bool; SEGMENT_COUNT]) -> DigitPattern {
    DigitPattern(bits)
}

const PATTERNS: [DigitPattern; 10] = [
    p([false, false, false, false, false]), // 0
    p([true, false, false, false, false]),  // 1: A
    p([false, true, false, false, false]),  // 2: B
    p([false, false, true, false, false]),  // 3: C
    p([false, false, false, true, false]),  // 4: D
    p([true, false, false, true, false]),   // 5: A D
    p([false, false, false, false, true]),  // 6: E
    p([true, false, false, false, true]),   // 7: A E
    p([false, true, false, false, true]),   // 8: B E
    p([true, true, false, false, true]),    // 9: A B E
];

impl DigitPattern {
    pub fn is_on(self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    pub fn bits(self) -> [bool; SEGMENT_COUNT] {
        self.0
    }

    pub fn on_count(self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }
}

/// Pattern lookup for a raw digit value; anything outside `0..=9` is rejected.
pub fn pattern(d: u8) -> RuneResult<DigitPattern> {
    Digit::new(d).map(Digit::pattern)
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/pattern.rs"]
mod tests;
