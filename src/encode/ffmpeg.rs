use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::error::{RuneError, RuneResult},
    foundation::math::mul_div255,
    render::backend::FrameRGBA,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> RuneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RuneError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(RuneError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // yuv420p output needs even dimensions.
            return Err(RuneError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

pub fn default_mp4_config(
    out_path: impl Into<PathBuf>,
    width: u32,
    height: u32,
    fps: u32,
) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        out_path: out_path.into(),
        overwrite: true,
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> RuneResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams raw RGBA frames into a system `ffmpeg` process producing H.264 MP4.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    bg_rgba: [u8; 4],
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig, bg_rgba: [u8; 4]) -> RuneResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(RuneError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        tracing::debug!(out = %cfg.out_path.display(), "spawning ffmpeg");
        let mut child = Command::new("ffmpeg")
            .args(ffmpeg_args(&cfg))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RuneError::encode(format!("failed to spawn ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| RuneError::encode("failed to open ffmpeg stdin"))?;

        Ok(Self {
            scratch: vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4],
            cfg,
            bg_rgba,
            child,
            stdin: Some(stdin),
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> RuneResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(RuneError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }

        flatten_over_background(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(RuneError::encode("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            RuneError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;

        Ok(())
    }

    pub fn finish(mut self) -> RuneResult<()> {
        drop(self.stdin.take());

        let mut stderr = Vec::new();
        if let Some(mut pipe) = self.child.stderr.take() {
            use std::io::Read as _;
            pipe.read_to_end(&mut stderr).map_err(|e| {
                RuneError::encode(format!("failed to read ffmpeg stderr: {e}"))
            })?;
        }
        let status = self.child.wait().map_err(|e| {
            RuneError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(RuneError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        Ok(())
    }

    /// Kill and reap an ffmpeg process that never got to [`FfmpegEncoder::finish`].
    fn abort(&mut self) {
        if self.stdin.take().is_none() {
            return;
        }
        tracing::warn!(out = %self.cfg.out_path.display(), "ffmpeg encoder dropped before finish");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        self.abort();
    }
}

/// [`FrameSink`] that encodes pushed frames into an MP4 file.
pub struct Mp4Sink {
    out_path: PathBuf,
    overwrite: bool,
    bg_rgba: [u8; 4],
    encoder: Option<FfmpegEncoder>,
}

impl Mp4Sink {
    pub fn new(out_path: impl Into<PathBuf>, bg_rgba: [u8; 4]) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba,
            encoder: None,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

impl FrameSink for Mp4Sink {
    fn begin(&mut self, cfg: SinkConfig) -> RuneResult<()> {
        let mut enc = default_mp4_config(self.out_path.clone(), cfg.width, cfg.height, cfg.fps);
        enc.overwrite = self.overwrite;
        self.encoder = Some(FfmpegEncoder::new(enc, self.bg_rgba)?);
        Ok(())
    }

    fn push_frame(&mut self, _index: u64, frame: &FrameRGBA) -> RuneResult<()> {
        self.encoder
            .as_mut()
            .ok_or_else(|| RuneError::encode("mp4 sink used before begin"))?
            .encode_frame(frame)
    }

    fn end(&mut self) -> RuneResult<()> {
        match self.encoder.take() {
            Some(enc) => enc.finish(),
            None => Err(RuneError::encode("mp4 sink ended before begin")),
        }
    }
}

/// Command line for a rawvideo RGBA pipe on stdin to an H.264 MP4.
fn ffmpeg_args(cfg: &EncodeConfig) -> Vec<OsString> {
    let overwrite = if cfg.overwrite { "-y" } else { "-n" };
    let mut args: Vec<OsString> = vec![overwrite.into()];
    args.extend(
        [
            "-loglevel".to_owned(),
            "error".to_owned(),
            "-f".to_owned(),
            "rawvideo".to_owned(),
            "-pix_fmt".to_owned(),
            "rgba".to_owned(),
            "-s".to_owned(),
            format!("{}x{}", cfg.width, cfg.height),
            "-r".to_owned(),
            cfg.fps.to_string(),
            "-i".to_owned(),
            "pipe:0".to_owned(),
            "-an".to_owned(),
            "-c:v".to_owned(),
            "libx264".to_owned(),
            "-pix_fmt".to_owned(),
            "yuv420p".to_owned(),
            "-movflags".to_owned(),
            "+faststart".to_owned(),
        ]
        .map(OsString::from),
    );
    args.push(cfg.out_path.clone().into_os_string());
    args
}

/// Composite `src` over an opaque `bg` into `dst`; the encoder has no alpha channel.
fn flatten_over_background(
    dst: &mut [u8],
    src: &[u8],
    premultiplied: bool,
    bg: [u8; 4],
) -> RuneResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RuneError::validation(
            "flatten expects two rgba8 buffers of equal length",
        ));
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3];
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if premultiplied { s[c] } else { mul_div255(s[c], a) };
            d[c] = fg.saturating_add(mul_div255(bg[c], inv));
        }
        d[3] = 255;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
