use std::hash::Hasher as _;

use crate::{
    foundation::core::{Affine, Canvas, Point, Rect, Rgba8},
    foundation::math::Fnv64,
    glyph::quadrant::QuadrantSlot,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Backend-agnostic description of one rendered rune.
///
/// A scene is the ordered list of rectangles a backend paints, after clearing the surface to
/// `background`. Every op carries its fully composed transform, so each one can be inspected (or
/// rasterized) without replaying any transform stack.
pub struct Scene {
    pub canvas: Canvas,
    pub background: Rgba8,
    /// Painter's order: later ops draw on top.
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Outline applied around a filled shape.
pub struct StrokeStyle {
    pub color: Rgba8,
    /// Width in canvas units.
    pub width: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Which piece of a segment an op draws.
pub enum SegmentPart {
    /// The full rectangle of a non-split segment.
    Whole,
    /// The half of a split segment on the negative local x side.
    Near,
    /// The half of a split segment on the positive local x side.
    Far,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// What produced a draw op.
pub enum OpSource {
    Segment {
        /// `None` when a quadrant is rendered on its own, outside a composite glyph.
        quadrant: Option<QuadrantSlot>,
        index: usize,
        part: SegmentPart,
        on: bool,
    },
    /// The central vertical bar joining the quadrant pairs.
    Spine,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A filled (and optionally stroked) rectangle placed by an explicit transform.
pub struct DrawOp {
    /// Rectangle in op-local units.
    pub rect: Rect,
    /// Op-local to canvas transform.
    pub transform: Affine,
    pub fill: Rgba8,
    pub stroke: Option<StrokeStyle>,
    pub source: OpSource,
}

impl DrawOp {
    /// Center of the rectangle in canvas coordinates.
    pub fn canvas_center(&self) -> Point {
        self.transform * self.rect.center()
    }

    pub fn is_on_segment(&self) -> bool {
        matches!(self.source, OpSource::Segment { on: true, .. })
    }

    pub fn is_off_segment(&self) -> bool {
        matches!(self.source, OpSource::Segment { on: false, .. })
    }

    pub fn quadrant(&self) -> Option<QuadrantSlot> {
        match self.source {
            OpSource::Segment { quadrant, .. } => quadrant,
            OpSource::Spine => None,
        }
    }
}

impl Scene {
    /// Ops produced by one quadrant, in draw order.
    pub fn quadrant_ops(&self, slot: QuadrantSlot) -> impl Iterator<Item = &DrawOp> + '_ {
        self.ops
            .iter()
            .filter(move |op| op.quadrant() == Some(slot))
    }

    /// Stable digest of every op's geometry, colors and source tag.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv64::default();
        h.write_u64(u64::from(self.canvas.width));
        h.write_u64(u64::from(self.canvas.height));
        write_color(&mut h, self.background);
        for op in &self.ops {
            for v in [op.rect.x0, op.rect.y0, op.rect.x1, op.rect.y1] {
                h.write_f64(v);
            }
            for v in op.transform.as_coeffs() {
                h.write_f64(v);
            }
            write_color(&mut h, op.fill);
            match op.stroke {
                Some(s) => {
                    h.write_u8(1);
                    write_color(&mut h, s.color);
                    h.write_f64(s.width);
                }
                None => h.write_u8(0),
            }
            match op.source {
                OpSource::Segment {
                    quadrant,
                    index,
                    part,
                    on,
                } => {
                    h.write_u8(1);
                    h.write_u8(quadrant.map_or(0xff, |q| q as u8));
                    h.write_u64(index as u64);
                    h.write_u8(part as u8);
                    h.write_u8(u8::from(on));
                }
                OpSource::Spine => h.write_u8(2),
            }
        }
        h.finish()
    }
}

fn write_color(h: &mut Fnv64, c: Rgba8) {
    h.write(&[c.r, c.g, c.b, c.a]);
}

#[cfg(test)]
#[path = "../tests/unit/scene.rs"]
mod tests;
