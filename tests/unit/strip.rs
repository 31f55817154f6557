use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::render::{backend::RenderSettings, cpu::CpuBackend};
use crate::scene::Scene;

fn values(digits: &[RuneNumber]) -> Vec<u16> {
    digits.iter().map(|d| d.get()).collect()
}

fn solid(width: u32, height: u32, v: u8) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: vec![v; (width * height * 4) as usize],
        premultiplied: true,
    }
}

/// Counts rasterizations and returns a tiny solid frame per call.
struct CountingBackend {
    calls: usize,
}

impl RenderBackend for CountingBackend {
    fn render_scene(&mut self, _scene: &Scene) -> RuneResult<FrameRGBA> {
        self.calls += 1;
        Ok(solid(2, 2, 255))
    }
}

#[test]
fn positional_digits_are_base_10000() {
    assert_eq!(values(&strip_digits(0, StripMode::Positional)), vec![0]);
    assert_eq!(values(&strip_digits(9999, StripMode::Positional)), vec![9999]);
    assert_eq!(values(&strip_digits(10_000, StripMode::Positional)), vec![1, 0]);
    assert_eq!(
        values(&strip_digits(123_456_789, StripMode::Positional)),
        vec![1, 2345, 6789]
    );
}

#[test]
fn saturated_digits_fill_the_right_rune_first() {
    assert_eq!(values(&strip_digits(0, StripMode::Saturated)), vec![0]);
    assert_eq!(values(&strip_digits(9999, StripMode::Saturated)), vec![9999]);
    assert_eq!(values(&strip_digits(10_000, StripMode::Saturated)), vec![1, 9999]);
    assert_eq!(
        values(&strip_digits(19_998, StripMode::Saturated)),
        vec![9999, 9999]
    );
    assert_eq!(
        values(&strip_digits(19_999, StripMode::Saturated)),
        vec![1, 9999, 9999]
    );
    assert_eq!(
        values(&strip_digits(20_000, StripMode::Saturated)),
        vec![2, 9999, 9999]
    );
}

#[test]
fn strip_len_agrees_with_digits() {
    for v in [0, 1, 9998, 9999, 10_000, 19_998, 19_999, 20_000, 99_990_000, 123_456_789] {
        for mode in [StripMode::Positional, StripMode::Saturated] {
            assert_eq!(strip_len(v, mode), strip_digits(v, mode).len(), "{v} {mode:?}");
        }
    }
}

#[test]
fn strip_width_for_huge_totals_is_computed_not_built() {
    assert_eq!(
        fixed_strip_width(9999 * 50_000_000, StripMode::Saturated),
        50_000_000
    );
    assert_eq!(strip_len(u64::MAX, StripMode::Saturated), 1_844_858_893_260_282);
    assert_eq!(fixed_strip_width(u64::MAX, StripMode::Positional), 5);
}

#[test]
fn padding_keeps_width_fixed() {
    assert_eq!(fixed_strip_width(50, StripMode::Positional), 4);
    assert_eq!(fixed_strip_width(30_000, StripMode::Saturated), 4);
    assert_eq!(fixed_strip_width(60_000, StripMode::Saturated), 7);

    assert_eq!(
        values(&padded_strip_digits(10_000, 4, StripMode::Positional)),
        vec![0, 0, 1, 0]
    );
    assert_eq!(
        values(&padded_strip_digits(7, 4, StripMode::Saturated)),
        vec![0, 0, 0, 7]
    );
    // Already wider than requested: no truncation.
    assert_eq!(padded_strip_digits(19_999, 2, StripMode::Saturated).len(), 3);
}

#[test]
fn compose_strip_concatenates_rows() {
    let a = solid(1, 2, 10);
    let b = solid(2, 2, 20);
    let s = compose_strip(&[&a, &b]).unwrap();
    assert_eq!((s.width, s.height), (3, 2));
    assert_eq!(s.pixel(0, 1), Some([10; 4]));
    assert_eq!(s.pixel(1, 1), Some([20; 4]));
    assert_eq!(s.pixel(2, 0), Some([20; 4]));
}

#[test]
fn compose_strip_rejects_mismatched_frames() {
    assert!(matches!(compose_strip(&[]), Err(RuneError::Validation(_))));
    let a = solid(1, 2, 0);
    let b = solid(1, 3, 0);
    assert!(matches!(compose_strip(&[&a, &b]), Err(RuneError::Validation(_))));
}

#[test]
fn strip_renderer_rasterizes_each_rune_once() {
    let glyphs = GlyphRenderer::default();
    let mut backend = CountingBackend { calls: 0 };
    {
        let mut strips = StripRenderer::new(&glyphs, &mut backend);
        let frame = strips.render_strip(10_000, 4, StripMode::Positional).unwrap();
        assert_eq!((frame.width, frame.height), (8, 2));
        // Runes 0 and 1.
        assert_eq!(strips.cached_runes(), 2);
        strips.render_strip(1, 4, StripMode::Positional).unwrap();
        assert_eq!(strips.cached_runes(), 2);
    }
    assert_eq!(backend.calls, 2);
}

#[test]
fn strip_frames_match_single_rune_renders() {
    let glyphs = GlyphRenderer::new(Canvas::default());
    let mut backend = CpuBackend::new(RenderSettings { pixel_density: 1 });
    let one = backend.render_scene(&glyphs.render(RuneNumber::new(1).unwrap())).unwrap();

    let mut strips = StripRenderer::new(&glyphs, &mut backend);
    let strip = strips.render_strip(1, 4, StripMode::Positional).unwrap();
    assert_eq!((strip.width, strip.height), (1000, 250));
    for y in [0, 30, 125, 200] {
        for x in [0, 125, 160, 249] {
            assert_eq!(strip.pixel(750 + x, y), one.pixel(x, y));
        }
    }
}

#[test]
fn total_frames_floors_and_rejects_empty_videos() {
    let opts = |fps, duration_secs| StripVideoOpts {
        fps,
        duration_secs,
        mode: StripMode::Positional,
    };
    assert_eq!(opts(10, 2.55).total_frames().unwrap(), 25);
    assert!(matches!(opts(0, 1.0).total_frames(), Err(RuneError::Config(_))));
    assert!(matches!(opts(10, 0.05).total_frames(), Err(RuneError::Config(_))));
    assert!(opts(10, f64::NAN).total_frames().is_err());
}

#[test]
fn strip_video_pushes_one_through_total() {
    let glyphs = GlyphRenderer::default();
    let mut backend = CountingBackend { calls: 0 };
    let mut sink = InMemorySink::new();
    let stats = render_strip_video(
        &glyphs,
        &mut backend,
        &mut sink,
        StripVideoOpts {
            fps: 4,
            duration_secs: 1.0,
            mode: StripMode::Saturated,
        },
    )
    .unwrap();

    assert_eq!(stats.frames, 4);
    assert_eq!(stats.strip_width, 4);
    // Runes 0..=4.
    assert_eq!(stats.runes_rasterized, 5);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![1, 2, 3, 4]);
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.fps, cfg.frame_count), (8, 2, 4, 4));
    assert!(sink.ended());
}
