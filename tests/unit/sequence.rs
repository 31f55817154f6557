use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;

fn small_glyphs() -> GlyphRenderer {
    GlyphRenderer::new(Canvas::default())
}

fn cpu() -> CpuBackend {
    CpuBackend::new(RenderSettings { pixel_density: 1 })
}

#[test]
fn sequence_exports_inclusive_range_in_order() {
    let range = NumberRange::new(8, 12).unwrap();
    let mut sink = InMemorySink::new();
    let stats = render_sequence(
        &small_glyphs(),
        range,
        10,
        &mut cpu(),
        &mut sink,
        &SequenceThreading::default(),
    )
    .unwrap();

    assert_eq!(
        stats,
        SequenceStats {
            frames_total: 5,
            frames_exported: 5
        }
    );
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![8, 9, 10, 11, 12]);
    assert!(sink.ended());

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.fps, cfg.frame_count), (250, 250, 10, 5));
}

#[test]
fn inverted_range_from_json_never_reaches_the_sequencer() {
    let parsed = serde_json::from_str::<NumberRange>(r#"{"min":5,"max":2}"#);
    assert!(parsed.is_err());

    let range: NumberRange = serde_json::from_str(r#"{"min":2,"max":5}"#).unwrap();
    let mut sink = InMemorySink::new();
    let stats = render_sequence(
        &small_glyphs(),
        range,
        10,
        &mut cpu(),
        &mut sink,
        &SequenceThreading::default(),
    )
    .unwrap();
    assert_eq!(stats.frames_exported, 4);
}

#[test]
fn single_number_range_renders_once() {
    let mut sink = InMemorySink::new();
    render_sequence(
        &small_glyphs(),
        NumberRange::new(9999, 9999).unwrap(),
        10,
        &mut cpu(),
        &mut sink,
        &SequenceThreading::default(),
    )
    .unwrap();
    assert_eq!(sink.frames().len(), 1);
    assert_eq!(sink.frames()[0].0, 9999);
}

#[test]
fn parallel_matches_sequential() {
    let range = NumberRange::new(0, 6).unwrap();
    let glyphs = small_glyphs();

    let mut seq = InMemorySink::new();
    render_sequence(
        &glyphs,
        range,
        10,
        &mut cpu(),
        &mut seq,
        &SequenceThreading::default(),
    )
    .unwrap();

    let mut par = InMemorySink::new();
    render_sequence(
        &glyphs,
        range,
        10,
        &mut cpu(),
        &mut par,
        &SequenceThreading {
            parallel: true,
            chunk_size: 3,
            threads: Some(2),
        },
    )
    .unwrap();

    assert_eq!(seq.frames(), par.frames());
}

#[test]
fn zero_threads_is_rejected() {
    let mut sink = InMemorySink::new();
    let err = render_sequence(
        &small_glyphs(),
        NumberRange::new(0, 1).unwrap(),
        10,
        &mut cpu(),
        &mut sink,
        &SequenceThreading {
            parallel: true,
            chunk_size: 1,
            threads: Some(0),
        },
    )
    .unwrap_err();
    assert!(matches!(err, RuneError::Config(_)));
    assert!(sink.frames().is_empty());
}

struct FailingSink {
    fail_at: u64,
    seen: Vec<u64>,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> RuneResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, index: u64, _frame: &FrameRGBA) -> RuneResult<()> {
        if index == self.fail_at {
            return Err(RuneError::export("disk full"));
        }
        self.seen.push(index);
        Ok(())
    }

    fn end(&mut self) -> RuneResult<()> {
        panic!("end must not run after a failed frame");
    }
}

#[test]
fn export_failure_stops_the_sequence() {
    let mut sink = FailingSink {
        fail_at: 2,
        seen: Vec::new(),
    };
    let err = render_sequence(
        &small_glyphs(),
        NumberRange::new(0, 5).unwrap(),
        10,
        &mut cpu(),
        &mut sink,
        &SequenceThreading::default(),
    )
    .unwrap_err();
    assert!(matches!(err, RuneError::Export(_)));
    assert_eq!(sink.seen, vec![0, 1]);
}
