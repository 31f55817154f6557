//! Composite glyph: four digit quadrants around a shared center, joined by a vertical spine.

use crate::{
    foundation::core::{Affine, Canvas, Point, Rect, RuneNumber, Vec2},
    foundation::error::RuneResult,
    glyph::{
        pattern::Digit,
        quadrant::{QuadrantSlot, render_quadrant},
        style::GlyphStyle,
    },
    scene::{DrawOp, OpSource, Scene},
};

/// A rune number split into its four decimal places.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Digits {
    pub thousands: Digit,
    pub hundreds: Digit,
    pub tens: Digit,
    pub ones: Digit,
}

impl Digits {
    pub fn of(n: RuneNumber) -> Self {
        let n = n.get();
        Self {
            thousands: Digit::last_of(n / 1000),
            hundreds: Digit::last_of(n / 100),
            tens: Digit::last_of(n / 10),
            ones: Digit::last_of(n),
        }
    }

    pub fn for_slot(self, slot: QuadrantSlot) -> Digit {
        match slot {
            QuadrantSlot::Ones => self.ones,
            QuadrantSlot::Tens => self.tens,
            QuadrantSlot::Hundreds => self.hundreds,
            QuadrantSlot::Thousands => self.thousands,
        }
    }

    pub fn value(self) -> u16 {
        u16::from(self.thousands.get()) * 1000
            + u16::from(self.hundreds.get()) * 100
            + u16::from(self.tens.get()) * 10
            + u16::from(self.ones.get())
    }
}

/// Fixed placement constants of the composite glyph, in canvas units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphLayout {
    /// Magnitude of each quadrant's offset from the glyph center.
    pub quad_offset: Vec2,
    pub spine_width: f64,
    /// How far the spine extends past the quadrant centers, above and below.
    pub spine_overhang: f64,
}

impl Default for GlyphLayout {
    fn default() -> Self {
        Self {
            quad_offset: Vec2::new(35.0, 60.0),
            spine_width: 8.0,
            spine_overhang: 40.0,
        }
    }
}

impl GlyphLayout {
    /// Spine rectangle centered on the glyph center.
    pub fn spine_rect(&self) -> Rect {
        let half = self.quad_offset.y + self.spine_overhang;
        Rect::new(
            -self.spine_width / 2.0,
            -half,
            self.spine_width / 2.0,
            half,
        )
    }
}

/// Turns rune numbers into [`Scene`]s. Holds no per-render state.
#[derive(Clone, Debug, Default)]
pub struct GlyphRenderer {
    pub canvas: Canvas,
    pub layout: GlyphLayout,
    pub style: GlyphStyle,
}

impl GlyphRenderer {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            ..Self::default()
        }
    }

    /// Validate `number` against `[0, 9999]` and render it.
    #[tracing::instrument(skip(self))]
    pub fn render_number(&self, number: u32) -> RuneResult<Scene> {
        Ok(self.render(RuneNumber::new(number)?))
    }

    pub fn render(&self, number: RuneNumber) -> Scene {
        let digits = Digits::of(number);
        let root = Affine::translate(self.canvas.center().to_vec2());

        let mut ops = Vec::with_capacity(4 * 7 + 1);
        for slot in QuadrantSlot::ALL {
            let frame = root * slot.frame(self.layout.quad_offset).to_affine();
            let quadrant = render_quadrant(digits.for_slot(slot), frame, &self.style);
            ops.extend(quadrant.into_iter().map(|op| tag_quadrant(op, slot)));
        }

        ops.push(DrawOp {
            rect: self.layout.spine_rect(),
            transform: root,
            fill: self.style.spine_fill,
            stroke: None,
            source: OpSource::Spine,
        });

        Scene {
            canvas: self.canvas,
            background: self.style.background,
            ops,
        }
    }

    /// Canvas-space center of a quadrant.
    pub fn quadrant_origin(&self, slot: QuadrantSlot) -> Point {
        let sign = slot.offset_sign();
        let q = self.layout.quad_offset;
        self.canvas.center() + Vec2::new(sign.x * q.x, sign.y * q.y)
    }
}

fn tag_quadrant(mut op: DrawOp, slot: QuadrantSlot) -> DrawOp {
    if let OpSource::Segment { quadrant, .. } = &mut op.source {
        *quadrant = Some(slot);
    }
    op
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/compose.rs"]
mod tests;
