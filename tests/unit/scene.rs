use super::*;
use crate::glyph::compose::GlyphRenderer;

fn scene_for(n: u32) -> Scene {
    GlyphRenderer::new(Canvas::default())
        .render_number(n)
        .unwrap()
}

#[test]
fn fingerprint_tracks_geometry_and_color() {
    let base = scene_for(42);
    let fp = base.fingerprint();

    let mut moved = base.clone();
    moved.ops[0].transform = Affine::translate((1.0, 0.0)) * moved.ops[0].transform;
    assert_ne!(moved.fingerprint(), fp);

    let mut recolored = base.clone();
    recolored.ops[0].fill = Rgba8::opaque(1, 2, 3);
    assert_ne!(recolored.fingerprint(), fp);

    let mut unstroked = base;
    unstroked.ops[0].stroke = None;
    assert_ne!(unstroked.fingerprint(), fp);
}

#[test]
fn quadrant_ops_excludes_spine_and_other_quadrants() {
    let scene = scene_for(9000);
    let thousands: Vec<_> = scene.quadrant_ops(QuadrantSlot::Thousands).collect();
    assert_eq!(thousands.len(), 7);
    assert!(
        thousands
            .iter()
            .all(|op| op.quadrant() == Some(QuadrantSlot::Thousands))
    );
    assert_eq!(thousands.iter().filter(|op| op.is_on_segment()).count(), 3);
}

#[test]
fn scene_json_keeps_ops_and_tags() {
    let scene = scene_for(1234);
    let json = serde_json::to_string(&scene).unwrap();
    let back: Scene = serde_json::from_str(&json).unwrap();
    assert_eq!(back.ops.len(), scene.ops.len());
    assert_eq!(back.ops.last().map(|op| op.source), Some(OpSource::Spine));
    assert_eq!(back.canvas, scene.canvas);
    let on = |s: &Scene| s.ops.iter().filter(|op| op.is_on_segment()).count();
    assert_eq!(on(&back), on(&scene));
}
