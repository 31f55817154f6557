use crate::foundation::{
    error::{RuneError, RuneResult},
    math::mul_div255,
};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Largest value a single rune can express (four decimal digits).
pub const MAX_RUNE_VALUE: u16 = 9999;

/// A number in `[0, 9999]`, the domain of a single composite rune.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u32", into = "u16")]
pub struct RuneNumber(u16);

impl RuneNumber {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(MAX_RUNE_VALUE);

    pub fn new(n: u32) -> RuneResult<Self> {
        if n > u32::from(MAX_RUNE_VALUE) {
            return Err(RuneError::validation(format!(
                "number {n} is outside the rune range [0, {MAX_RUNE_VALUE}]"
            )));
        }
        Ok(Self(n as u16))
    }

    /// `n` clamped to [`RuneNumber::MAX`].
    pub fn saturating(n: u64) -> Self {
        Self(n.min(u64::from(MAX_RUNE_VALUE)) as u16)
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u32> for RuneNumber {
    type Error = RuneError;

    fn try_from(n: u32) -> RuneResult<Self> {
        Self::new(n)
    }
}

impl From<RuneNumber> for u16 {
    fn from(n: RuneNumber) -> Self {
        n.0
    }
}

impl std::fmt::Display for RuneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Inclusive range of rune numbers rendered by a sequence. Always `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawNumberRange", into = "RawNumberRange")]
pub struct NumberRange {
    min: RuneNumber,
    max: RuneNumber,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct RawNumberRange {
    min: u32,
    max: u32,
}

impl TryFrom<RawNumberRange> for NumberRange {
    type Error = RuneError;

    fn try_from(raw: RawNumberRange) -> RuneResult<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl From<NumberRange> for RawNumberRange {
    fn from(r: NumberRange) -> Self {
        Self {
            min: u32::from(r.min.0),
            max: u32::from(r.max.0),
        }
    }
}

impl NumberRange {
    pub fn new(min: u32, max: u32) -> RuneResult<Self> {
        let lo = RuneNumber::new(min).map_err(|e| RuneError::config(format!("min_number: {e}")))?;
        let hi = RuneNumber::new(max).map_err(|e| RuneError::config(format!("max_number: {e}")))?;
        if lo > hi {
            return Err(RuneError::config(format!(
                "min_number ({min}) must be <= max_number ({max})"
            )));
        }
        Ok(Self { min: lo, max: hi })
    }

    pub fn full() -> Self {
        Self {
            min: RuneNumber::ZERO,
            max: RuneNumber::MAX,
        }
    }

    pub fn min(self) -> RuneNumber {
        self.min
    }

    /// Inclusive upper bound.
    pub fn max(self) -> RuneNumber {
        self.max
    }

    pub fn len(self) -> u64 {
        u64::from(self.max.0 - self.min.0) + 1
    }

    pub fn contains(self, n: RuneNumber) -> bool {
        self.min <= n && n <= self.max
    }

    /// A fresh iterator over the range; calling this again restarts from `min`.
    pub fn iter(self) -> NumberSequence {
        NumberSequence {
            next: self.min.0,
            last: self.max.0,
            done: false,
        }
    }
}

impl IntoIterator for NumberRange {
    type Item = RuneNumber;
    type IntoIter = NumberSequence;

    fn into_iter(self) -> NumberSequence {
        self.iter()
    }
}

/// Finite iterator over a [`NumberRange`] in increasing order.
#[derive(Clone, Debug)]
pub struct NumberSequence {
    next: u16,
    last: u16,
    done: bool,
}

impl Iterator for NumberSequence {
    type Item = RuneNumber;

    fn next(&mut self) -> Option<RuneNumber> {
        if self.done {
            return None;
        }
        let n = self.next;
        if n == self.last {
            self.done = true;
        } else {
            self.next += 1;
        }
        Some(RuneNumber(n))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.done {
            0
        } else {
            usize::from(self.last - self.next) + 1
        };
        (n, Some(n))
    }
}

impl DoubleEndedIterator for NumberSequence {
    fn next_back(&mut self) -> Option<RuneNumber> {
        if self.done {
            return None;
        }
        let n = self.last;
        if n == self.next {
            self.done = true;
        } else {
            self.last -= 1;
        }
        Some(RuneNumber(n))
    }
}

impl ExactSizeIterator for NumberSequence {}

impl std::iter::FusedIterator for NumberSequence {}

/// Logical drawing surface size in canvas units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 250,
            height: 250,
        }
    }
}

impl Canvas {
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Scale alpha by `opacity` in `[0, 1]`; 0.5 maps 255 to 128.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (f32::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    pub fn to_premul(self) -> [u8; 4] {
        let a = self.a;
        [
            mul_div255(self.r, a),
            mul_div255(self.g, a),
            mul_div255(self.b, a),
            a,
        ]
    }
}

/// Translation, rotation and axis scale, composed in that order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    pub translate: Vec2,
    pub rotation_rad: f64,
    pub scale: Vec2, // default (1,1); -1 on an axis mirrors it
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    pub fn translate(v: Vec2) -> Self {
        Self {
            translate: v,
            ..Self::default()
        }
    }

    pub fn to_affine(self) -> Affine {
        // T(translate) * R(rot) * S(scale)
        Affine::translate(self.translate)
            * Affine::rotate(self.rotation_rad)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
