//! One digit's rune, and the four mirrored slots a composite glyph places them in.

use crate::{
    foundation::core::{Affine, Transform2D, Vec2},
    glyph::{
        pattern::Digit,
        segment::{SEGMENTS, render_segment},
        style::GlyphStyle,
    },
    scene::DrawOp,
};

/// Position of a digit within the composite glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum QuadrantSlot {
    /// Upper right, drawn as-is.
    Ones,
    /// Upper left, mirrored horizontally.
    Tens,
    /// Lower right, mirrored vertically.
    Hundreds,
    /// Lower left, mirrored on both axes.
    Thousands,
}

impl QuadrantSlot {
    /// Draw order used by the composite renderer.
    pub const ALL: [Self; 4] = [Self::Ones, Self::Tens, Self::Hundreds, Self::Thousands];

    /// Sign of the quadrant offset from the glyph center (y grows downward).
    pub fn offset_sign(self) -> Vec2 {
        match self {
            Self::Ones => Vec2::new(1.0, -1.0),
            Self::Tens => Vec2::new(-1.0, -1.0),
            Self::Hundreds => Vec2::new(1.0, 1.0),
            Self::Thousands => Vec2::new(-1.0, 1.0),
        }
    }

    /// `(horizontal, vertical)` mirror flags.
    pub fn flips(self) -> (bool, bool) {
        match self {
            Self::Ones => (false, false),
            Self::Tens => (true, false),
            Self::Hundreds => (false, true),
            Self::Thousands => (true, true),
        }
    }

    /// Quadrant-local frame relative to the glyph center: translate to the slot, then mirror.
    pub fn frame(self, quad_offset: Vec2) -> Transform2D {
        let sign = self.offset_sign();
        let (fx, fy) = self.flips();
        Transform2D {
            translate: Vec2::new(sign.x * quad_offset.x, sign.y * quad_offset.y),
            scale: Vec2::new(
                if fx { -1.0 } else { 1.0 },
                if fy { -1.0 } else { 1.0 },
            ),
            ..Transform2D::default()
        }
    }
}

/// Emit every segment of `digit` inside the frame `local_origin`.
///
/// Off segments are all drawn before any on segment, so opaque strokes always sit on top of
/// translucent ones where the diagonals cross.
pub fn render_quadrant(digit: Digit, local_origin: Affine, style: &GlyphStyle) -> Vec<DrawOp> {
    let pattern = digit.pattern();
    let mut out = Vec::with_capacity(SEGMENTS.len() + 2);
    for on in [false, true] {
        for (index, seg) in SEGMENTS.iter().enumerate() {
            if pattern.is_on(index) != on {
                continue;
            }
            let local = local_origin * seg.placement().to_affine();
            render_segment(index, seg, on, local, style, &mut out);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/quadrant.rs"]
mod tests;
