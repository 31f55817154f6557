//! Frame sequencing: render every number of a range, in order, into a sink.

use rayon::prelude::*;

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::{NumberRange, RuneNumber},
    foundation::error::{RuneError, RuneResult},
    glyph::compose::GlyphRenderer,
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    render::cpu::CpuBackend,
};

#[derive(Clone, Debug)]
pub struct SequenceThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for SequenceThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequenceStats {
    pub frames_total: u64,
    pub frames_exported: u64,
}

/// Render and export every number in `range`, in increasing order.
///
/// The sink's `begin` is called once the first frame's size is known, `push_frame` receives the
/// number itself as the frame index, and `end` runs after `range.max()`. The first error from
/// rendering or the sink stops the run.
#[tracing::instrument(skip_all, fields(min = %range.min(), max = %range.max()))]
pub fn render_sequence(
    glyphs: &GlyphRenderer,
    range: NumberRange,
    fps: u32,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
    threading: &SequenceThreading,
) -> RuneResult<SequenceStats> {
    let total = range.len();
    tracing::info!(frames = total, parallel = threading.parallel, "rendering rune sequence");

    let mut out = Exporter {
        sink,
        fps,
        total,
        begun: false,
        stats: SequenceStats {
            frames_total: total,
            frames_exported: 0,
        },
    };

    if threading.parallel {
        let settings = backend.worker_render_settings().ok_or_else(|| {
            RuneError::render("parallel sequence requires backend worker settings (CpuBackend)")
        })?;
        let pool = build_thread_pool(threading.threads)?;
        let numbers: Vec<RuneNumber> = range.iter().collect();
        for chunk in numbers.chunks(threading.chunk_size.max(1)) {
            let frames = render_chunk_parallel_cpu(glyphs, chunk, &settings, &pool)?;
            for (&n, frame) in chunk.iter().zip(&frames) {
                out.push(n, frame)?;
            }
        }
    } else {
        for n in range.iter() {
            let scene = glyphs.render(n);
            let frame = backend.render_scene(&scene)?;
            tracing::debug!(number = %n, fingerprint = scene.fingerprint(), "rendered rune");
            out.push(n, &frame)?;
        }
    }

    out.sink.end()?;
    tracing::info!(
        exported = out.stats.frames_exported,
        last = %range.max(),
        "rune sequence done"
    );
    Ok(out.stats)
}

struct Exporter<'a> {
    sink: &'a mut dyn FrameSink,
    fps: u32,
    total: u64,
    begun: bool,
    stats: SequenceStats,
}

impl Exporter<'_> {
    fn push(&mut self, n: RuneNumber, frame: &FrameRGBA) -> RuneResult<()> {
        if !self.begun {
            self.sink.begin(SinkConfig {
                width: frame.width,
                height: frame.height,
                fps: self.fps,
                frame_count: self.total,
            })?;
            self.begun = true;
        }
        self.sink.push_frame(u64::from(n.get()), frame)?;
        self.stats.frames_exported += 1;
        Ok(())
    }
}

fn render_chunk_parallel_cpu(
    glyphs: &GlyphRenderer,
    chunk: &[RuneNumber],
    settings: &RenderSettings,
    pool: &rayon::ThreadPool,
) -> RuneResult<Vec<FrameRGBA>> {
    let rendered = pool.install(|| {
        chunk
            .par_iter()
            .map_init(
                || CpuBackend::new(settings.clone()),
                |worker, &n| worker.render_scene(&glyphs.render(n)),
            )
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> RuneResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(RuneError::config(
            "sequence threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RuneError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/sequence.rs"]
mod tests;
