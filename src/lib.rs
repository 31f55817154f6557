//! Runeglyph renders the numbers 0 through 9999 as composite runic glyphs.
//!
//! Each decimal place of a number drives one quadrant of the glyph: five rectangular segments,
//! some filled ("on") and some drawn translucent ("off"), mirrored into place around a vertical
//! spine. Rendering is split into a pure description step and a raster step:
//!
//! 1. **Compose**: `RuneNumber -> Scene` via [`GlyphRenderer`] (ordered, fully transformed rects)
//! 2. **Render**: `Scene -> FrameRGBA` via a [`RenderBackend`] (CPU, `vello_cpu`)
//! 3. **Export**: frames go to a [`FrameSink`]: numbered PNGs, memory, or an ffmpeg MP4 pipe
//!
//! [`render_sequence`] drives steps 1-3 across a [`NumberRange`]; [`render_strip_video`] lays runes
//! side by side for values past 9999.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same number and settings always produce the same scene and pixels.
//! - **Premultiplied RGBA8** out of the backend; sinks un-premultiply where the format needs it.
#![forbid(unsafe_code)]

mod config;
mod encode;
mod foundation;
mod glyph;
mod render;
mod scene;
mod sequence;
mod strip;

pub use config::RuneConfig;
pub use encode::ffmpeg::{
    EncodeConfig, FfmpegEncoder, Mp4Sink, default_mp4_config, ensure_parent_dir,
    is_ffmpeg_on_path,
};
pub use encode::sink::{
    FrameSink, InMemorySink, PngSequenceSink, SinkConfig, frame_file_name, write_png,
};
pub use foundation::core::{
    Affine, Canvas, MAX_RUNE_VALUE, NumberRange, NumberSequence, Point, Rect, Rgba8, RuneNumber,
    Transform2D, Vec2,
};
pub use foundation::error::{RuneError, RuneResult};
pub use glyph::compose::{Digits, GlyphLayout, GlyphRenderer};
pub use glyph::pattern::{Digit, DigitPattern, pattern};
pub use glyph::quadrant::{QuadrantSlot, render_quadrant};
pub use glyph::segment::{
    SEGMENT_COUNT, SEGMENTS, SPLIT_GAP, Segment, is_split, render_segment, split_rects,
};
pub use glyph::style::GlyphStyle;
pub use render::backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
pub use render::cpu::{CpuBackend, device_size};
pub use scene::{DrawOp, OpSource, Scene, SegmentPart, StrokeStyle};
pub use sequence::{SequenceStats, SequenceThreading, render_sequence};
pub use strip::{
    MIN_STRIP_WIDTH, StripMode, StripRenderer, StripStats, StripVideoOpts, compose_strip,
    fixed_strip_width, padded_strip_digits, render_strip_video, strip_digits, strip_len,
};
