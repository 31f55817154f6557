use crate::{
    foundation::error::{RuneError, RuneResult},
    foundation::math::unpremultiply_in_place,
    scene::Scene,
};

/// A rendered raster frame.
///
/// `data` is tightly packed RGBA8, row-major, `width * height * 4` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// The RGBA8 value at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_in_place(&mut out);
        }
        out
    }
}

/// Backend settings shared by every frame a backend renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    /// Device pixels per canvas unit on each axis.
    pub pixel_density: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { pixel_density: 2 }
    }
}

/// Something that turns a [`Scene`] into pixels.
pub trait RenderBackend: Send {
    fn render_scene(&mut self, scene: &Scene) -> RuneResult<FrameRGBA>;

    /// Settings to build independent per-worker backends with, if the backend supports it.
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Cpu,
}

pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> RuneResult<Box<dyn RenderBackend>> {
    if settings.pixel_density == 0 {
        return Err(RuneError::config("pixel_density must be >= 1"));
    }
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
    }
}
