//! Rune strips: values above 9999 written as a left-to-right row of runes.

use std::collections::HashMap;

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::{MAX_RUNE_VALUE, RuneNumber},
    foundation::error::{RuneError, RuneResult},
    glyph::compose::GlyphRenderer,
    render::backend::{FrameRGBA, RenderBackend},
};

/// Minimum number of runes in a strip.
pub const MIN_STRIP_WIDTH: usize = 4;

/// How a value is split into runes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StripMode {
    /// Base-10000 positional notation: `10000 -> [1, 0]`.
    #[default]
    Positional,
    /// The rightmost rune fills up to 9999 before anything carries left: `10000 -> [1, 9999]`.
    Saturated,
}

const RUNE_MAX: u64 = MAX_RUNE_VALUE as u64;
const RUNE_BASE: u64 = RUNE_MAX + 1;

/// Runes for `value`, most significant first, without padding. Zero is `[0]`.
pub fn strip_digits(value: u64, mode: StripMode) -> Vec<RuneNumber> {
    match mode {
        StripMode::Positional => {
            let mut digits = Vec::with_capacity(strip_len(value, mode));
            let mut n = value;
            loop {
                digits.push(RuneNumber::saturating(n % RUNE_BASE));
                n /= RUNE_BASE;
                if n == 0 {
                    break;
                }
            }
            digits.reverse();
            digits
        }
        StripMode::Saturated => {
            let carries = saturated_carries(value);
            let head = RuneNumber::saturating(value - carries * RUNE_MAX);
            std::iter::once(head)
                .chain(std::iter::repeat_n(RuneNumber::MAX, to_len(carries)))
                .collect()
        }
    }
}

/// Length of [`strip_digits`] for `value`, computed without building the strip.
pub fn strip_len(value: u64, mode: StripMode) -> usize {
    match mode {
        StripMode::Positional => {
            let mut len = 1;
            let mut n = value / RUNE_BASE;
            while n > 0 {
                len += 1;
                n /= RUNE_BASE;
            }
            len
        }
        StripMode::Saturated => to_len(saturated_carries(value)).saturating_add(1),
    }
}

/// Full 9999 runes to the right of the leading rune in saturated mode.
fn saturated_carries(value: u64) -> u64 {
    value.saturating_sub(RUNE_MAX).div_ceil(RUNE_MAX)
}

fn to_len(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

/// Strip width that fits every value in `1..=total`.
pub fn fixed_strip_width(total: u64, mode: StripMode) -> usize {
    strip_len(total, mode).max(MIN_STRIP_WIDTH)
}

/// [`strip_digits`] left-padded with rune zero up to `width`.
pub fn padded_strip_digits(value: u64, width: usize, mode: StripMode) -> Vec<RuneNumber> {
    let pad = width.saturating_sub(strip_len(value, mode));
    let digits = strip_digits(value, mode);
    std::iter::repeat_n(RuneNumber::ZERO, pad)
        .chain(digits)
        .collect()
}

/// Concatenate equally tall frames left to right.
pub fn compose_strip(frames: &[&FrameRGBA]) -> RuneResult<FrameRGBA> {
    let Some(first) = frames.first() else {
        return Err(RuneError::validation("cannot compose an empty strip"));
    };
    let height = first.height;
    let premultiplied = first.premultiplied;
    if frames
        .iter()
        .any(|f| f.height != height || f.premultiplied != premultiplied)
    {
        return Err(RuneError::validation(
            "strip frames must share height and alpha mode",
        ));
    }
    if frames
        .iter()
        .any(|f| f.data.len() != (f.width as usize) * (f.height as usize) * 4)
    {
        return Err(RuneError::validation(
            "strip frame data does not match its dimensions",
        ));
    }

    let width: u32 = frames.iter().map(|f| f.width).sum();
    let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
    for y in 0..height as usize {
        for f in frames {
            let row = (f.width as usize) * 4;
            data.extend_from_slice(&f.data[y * row..(y + 1) * row]);
        }
    }

    Ok(FrameRGBA {
        width,
        height,
        data,
        premultiplied,
    })
}

/// Renders strips, rasterizing each distinct rune once.
pub struct StripRenderer<'a> {
    glyphs: &'a GlyphRenderer,
    backend: &'a mut dyn RenderBackend,
    cache: HashMap<RuneNumber, FrameRGBA>,
}

impl<'a> StripRenderer<'a> {
    pub fn new(glyphs: &'a GlyphRenderer, backend: &'a mut dyn RenderBackend) -> Self {
        Self {
            glyphs,
            backend,
            cache: HashMap::new(),
        }
    }

    /// Number of distinct runes rasterized so far.
    pub fn cached_runes(&self) -> usize {
        self.cache.len()
    }

    pub fn render_strip(
        &mut self,
        value: u64,
        width: usize,
        mode: StripMode,
    ) -> RuneResult<FrameRGBA> {
        let digits = padded_strip_digits(value, width, mode);
        for &d in &digits {
            if !self.cache.contains_key(&d) {
                let frame = self.backend.render_scene(&self.glyphs.render(d))?;
                self.cache.insert(d, frame);
            }
        }
        let frames = digits
            .iter()
            .map(|d| {
                self.cache
                    .get(d)
                    .ok_or_else(|| RuneError::render(format!("rune {d} missing from cache")))
            })
            .collect::<RuneResult<Vec<_>>>()?;
        compose_strip(&frames)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripVideoOpts {
    pub fps: u32,
    pub duration_secs: f64,
    pub mode: StripMode,
}

impl StripVideoOpts {
    /// `floor(fps * duration)`; frames are numbered `1..=total`.
    pub fn total_frames(&self) -> RuneResult<u64> {
        if self.fps == 0 {
            return Err(RuneError::config("video fps must be >= 1"));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(RuneError::config("video duration must be a positive number of seconds"));
        }
        let total = (f64::from(self.fps) * self.duration_secs).floor() as u64;
        if total == 0 {
            return Err(RuneError::config(
                "fps * duration must cover at least one frame",
            ));
        }
        Ok(total)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StripStats {
    pub frames: u64,
    pub strip_width: usize,
    pub runes_rasterized: usize,
}

/// Render strip frames for `1..=total` in order into `sink`.
#[tracing::instrument(skip(glyphs, backend, sink))]
pub fn render_strip_video(
    glyphs: &GlyphRenderer,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
    opts: StripVideoOpts,
) -> RuneResult<StripStats> {
    let total = opts.total_frames()?;
    let width = fixed_strip_width(total, opts.mode);
    tracing::info!(frames = total, strip_width = width, "rendering strip video");

    let mut strips = StripRenderer::new(glyphs, backend);
    for i in 1..=total {
        let frame = strips.render_strip(i, width, opts.mode)?;
        if i == 1 {
            sink.begin(SinkConfig {
                width: frame.width,
                height: frame.height,
                fps: opts.fps,
                frame_count: total,
            })?;
        }
        sink.push_frame(i, &frame)?;
        if i % 100 == 0 {
            tracing::info!(frame = i, total, "strip progress");
        }
    }
    sink.end()?;

    Ok(StripStats {
        frames: total,
        strip_width: width,
        runes_rasterized: strips.cached_runes(),
    })
}

#[cfg(test)]
#[path = "../tests/unit/strip.rs"]
mod tests;
