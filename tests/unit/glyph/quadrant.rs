use super::*;
use crate::foundation::core::Point;
use crate::scene::OpSource;

fn digit(d: u8) -> Digit {
    Digit::new(d).unwrap()
}

#[test]
fn off_segments_precede_on_segments_for_every_digit() {
    let style = GlyphStyle::default();
    for d in 0u8..=9 {
        let ops = render_quadrant(digit(d), Affine::IDENTITY, &style);
        let first_on = ops.iter().position(DrawOp::is_on_segment);
        let last_off = ops.iter().rposition(DrawOp::is_off_segment);
        if let (Some(on), Some(off)) = (first_on, last_off) {
            assert!(off < on, "digit {d}: off op at {off} drawn after on op at {on}");
        }
    }
}

#[test]
fn on_diagonal_is_drawn_after_higher_index_off_segments() {
    // Digit 3 lights segment C (index 2); D and E are off and must still come first.
    let ops = render_quadrant(digit(3), Affine::IDENTITY, &GlyphStyle::default());
    let indices: Vec<(usize, bool)> = ops
        .iter()
        .map(|op| match op.source {
            OpSource::Segment { index, on, .. } => (index, on),
            OpSource::Spine => unreachable!(),
        })
        .collect();
    assert_eq!(
        indices,
        vec![
            (0, false),
            (1, false),
            (3, false),
            (3, false),
            (4, false),
            (2, true),
            (2, true),
        ]
    );
}

#[test]
fn every_quadrant_draws_seven_rects() {
    for d in 0u8..=9 {
        let ops = render_quadrant(digit(d), Affine::IDENTITY, &GlyphStyle::default());
        assert_eq!(ops.len(), 7);
        assert!(ops.iter().all(|op| op.quadrant().is_none()));
    }
}

#[test]
fn local_origin_translates_every_op() {
    let style = GlyphStyle::default();
    let base = render_quadrant(digit(9), Affine::IDENTITY, &style);
    let moved = render_quadrant(
        digit(9),
        Affine::translate(Vec2::new(10.0, -5.0)),
        &style,
    );
    for (a, b) in base.iter().zip(&moved) {
        let want = a.canvas_center() + Vec2::new(10.0, -5.0);
        let got = b.canvas_center();
        assert!((got - want).hypot() < 1e-9, "{got:?} != {want:?}");
    }
}

#[test]
fn slot_frames_mirror_the_expected_axes() {
    let q = Vec2::new(35.0, 60.0);
    let p = Point::new(3.0, 4.0);

    let ones = QuadrantSlot::Ones.frame(q).to_affine();
    assert_eq!(ones * p, Point::new(38.0, -56.0));

    let tens = QuadrantSlot::Tens.frame(q).to_affine();
    assert_eq!(tens * p, Point::new(-38.0, -56.0));

    let hundreds = QuadrantSlot::Hundreds.frame(q).to_affine();
    assert_eq!(hundreds * p, Point::new(38.0, 56.0));

    let thousands = QuadrantSlot::Thousands.frame(q).to_affine();
    assert_eq!(thousands * p, Point::new(-38.0, 56.0));
}

#[test]
fn slot_flags_match_table() {
    assert_eq!(QuadrantSlot::Ones.flips(), (false, false));
    assert_eq!(QuadrantSlot::Tens.flips(), (true, false));
    assert_eq!(QuadrantSlot::Hundreds.flips(), (false, true));
    assert_eq!(QuadrantSlot::Thousands.flips(), (true, true));
    assert_eq!(QuadrantSlot::Tens.offset_sign(), Vec2::new(-1.0, -1.0));
}
