use std::path::{Path, PathBuf};

use crate::{
    foundation::core::RuneNumber,
    foundation::error::{RuneError, RuneResult},
    render::backend::FrameRGBA,
};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Playback rate for sinks that produce timed output.
    pub fps: u32,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
}

/// Consumer of rendered frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing `index` values between
/// one `begin` and the matching `end`. An error from any call aborts the run; frames are never
/// skipped.
pub trait FrameSink: Send {
    fn begin(&mut self, cfg: SinkConfig) -> RuneResult<()>;
    fn push_frame(&mut self, index: u64, frame: &FrameRGBA) -> RuneResult<()>;
    fn end(&mut self) -> RuneResult<()>;
}

/// `num_0042.png` for 42.
pub fn frame_file_name(number: RuneNumber) -> String {
    format!("num_{number}.png")
}

/// Writes each frame as a numbered PNG inside one folder.
#[derive(Debug, Clone)]
pub struct PngSequenceSink {
    folder: PathBuf,
    prefix: &'static str,
    pad: usize,
    written: u64,
}

impl PngSequenceSink {
    /// `<folder>/num_NNNN.png`, one file per rune number.
    pub fn runes(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            prefix: "num_",
            pad: 4,
            written: 0,
        }
    }

    /// `<folder>/composite_NNNNN.png`, one file per strip frame.
    pub fn strips(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            prefix: "composite_",
            pad: 5,
            written: 0,
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn path_for(&self, index: u64) -> PathBuf {
        self.folder
            .join(format!("{}{:0pad$}.png", self.prefix, index, pad = self.pad))
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> RuneResult<()> {
        std::fs::create_dir_all(&self.folder).map_err(|e| {
            RuneError::export(format!(
                "failed to create export folder '{}': {e}",
                self.folder.display()
            ))
        })?;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, index: u64, frame: &FrameRGBA) -> RuneResult<()> {
        let path = self.path_for(index);
        write_png(&path, frame)?;
        tracing::debug!(path = %path.display(), "wrote frame");
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> RuneResult<()> {
        Ok(())
    }
}

/// Encode `frame` as a PNG at `path`. The parent folder must exist.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> RuneResult<()> {
    let straight = frame.to_straight_rgba8();
    image::save_buffer_with_format(
        path,
        &straight,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| RuneError::export(format!("failed to write png '{}': {e}", path.display())))
}

/// In-memory sink for tests and tooling.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RuneResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, index: u64, frame: &FrameRGBA) -> RuneResult<()> {
        self.frames.push((index, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> RuneResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
