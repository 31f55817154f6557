//! The five stroke shapes every quadrant is built from, and how one of them is drawn.

use std::f64::consts::FRAC_PI_4;

use crate::{
    foundation::core::{Affine, Point, Rect, Transform2D, Vec2},
    glyph::style::GlyphStyle,
    scene::{DrawOp, OpSource, SegmentPart},
};

/// Segments per quadrant.
pub const SEGMENT_COUNT: usize = 5;

/// Gap left at the crossing point of the two diagonal segments.
pub const SPLIT_GAP: f64 = 4.0;

/// One segment shape, positioned relative to its quadrant's center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Extent along the segment's own x axis.
    pub length: f64,
    pub thickness: f64,
    pub rotation_rad: f64,
}

/// Segment table, indexed A..E. Lengths overshoot so endpoints meet.
pub const SEGMENTS: [Segment; SEGMENT_COUNT] = [
    // A: top bar
    Segment::new(0.0, -35.0, 80.0, 8.0, 0.0),
    // B: bottom bar
    Segment::new(0.0, 35.0, 80.0, 8.0, 0.0),
    // C: diagonal, upper left to lower right
    Segment::new(0.0, 0.0, 100.0, 8.0, FRAC_PI_4),
    // D: diagonal, lower left to upper right
    Segment::new(0.0, 0.0, 100.0, 8.0, -FRAC_PI_4),
    // E: right vertical
    Segment::new(35.0, 0.0, 8.0, 80.0, 0.0),
];

impl Segment {
    pub const fn new(
        offset_x: f64,
        offset_y: f64,
        length: f64,
        thickness: f64,
        rotation_rad: f64,
    ) -> Self {
        Self {
            offset_x,
            offset_y,
            length,
            thickness,
            rotation_rad,
        }
    }

    /// Placement of the segment's local frame inside its quadrant.
    pub fn placement(&self) -> Transform2D {
        Transform2D {
            translate: Vec2::new(self.offset_x, self.offset_y),
            rotation_rad: self.rotation_rad,
            ..Transform2D::default()
        }
    }
}

/// Whether `index` is one of the diagonal cross segments drawn in two halves.
pub fn is_split(index: usize) -> bool {
    index == 2 || index == 3
}

/// The two halves of a split segment in its local frame, near half first.
///
/// Each half is `length / 2 - gap / 2` long; together with the gap they span exactly `length`,
/// centered on the local origin.
pub fn split_rects(length: f64, thickness: f64, gap: f64) -> [(SegmentPart, Rect); 2] {
    let half = length / 2.0;
    let part = half - gap / 2.0;
    let center = (half + gap / 2.0) / 2.0;
    let size = (part, thickness);
    [
        (
            SegmentPart::Near,
            Rect::from_center_size(Point::new(-center, 0.0), size),
        ),
        (
            SegmentPart::Far,
            Rect::from_center_size(Point::new(center, 0.0), size),
        ),
    ]
}

/// Emit the draw ops for one segment.
///
/// `local` must already include the segment's own offset and rotation. On segments fill with
/// the opaque foreground, off segments with the translucent background; both are outlined.
pub fn render_segment(
    index: usize,
    seg: &Segment,
    on: bool,
    local: Affine,
    style: &GlyphStyle,
    out: &mut Vec<DrawOp>,
) {
    let fill = if on { style.on_fill } else { style.off_fill };
    let op = |part: SegmentPart, rect: Rect| DrawOp {
        rect,
        transform: local,
        fill,
        stroke: Some(style.stroke),
        source: OpSource::Segment {
            quadrant: None,
            index,
            part,
            on,
        },
    };

    if is_split(index) {
        for (part, rect) in split_rects(seg.length, seg.thickness, SPLIT_GAP) {
            out.push(op(part, rect));
        }
    } else {
        let rect = Rect::from_center_size(Point::ORIGIN, (seg.length, seg.thickness));
        out.push(op(SegmentPart::Whole, rect));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/segment.rs"]
mod tests;
