use std::path::{Path, PathBuf};

use crate::{
    foundation::core::{Canvas, MAX_RUNE_VALUE, NumberRange},
    foundation::error::{RuneError, RuneResult},
    render::{backend::RenderSettings, cpu::device_size},
};

/// Settings for a rune export run. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuneConfig {
    pub min_number: u32,
    /// Inclusive.
    pub max_number: u32,
    pub canvas: Canvas,
    /// Device pixels per canvas unit.
    pub pixel_density: u32,
    pub export_folder: PathBuf,
    pub fps: u32,
}

impl Default for RuneConfig {
    fn default() -> Self {
        Self {
            min_number: 0,
            max_number: u32::from(MAX_RUNE_VALUE),
            canvas: Canvas::default(),
            pixel_density: 2,
            export_folder: PathBuf::from("frames"),
            fps: 10,
        }
    }
}

impl RuneConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> RuneResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            RuneError::config(format!("failed to read config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            RuneError::config(format!("failed to parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> RuneResult<()> {
        self.range()?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(RuneError::config("canvas width and height must be > 0"));
        }
        if self.pixel_density == 0 {
            return Err(RuneError::config("pixel_density must be >= 1"));
        }
        if self.fps == 0 {
            return Err(RuneError::config("fps must be >= 1"));
        }
        if self.export_folder.as_os_str().is_empty() {
            return Err(RuneError::config("export_folder must not be empty"));
        }
        device_size(self.canvas, self.pixel_density)
            .map_err(|e| RuneError::config(e.to_string()))?;
        Ok(())
    }

    pub fn range(&self) -> RuneResult<NumberRange> {
        NumberRange::new(self.min_number, self.max_number)
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            pixel_density: self.pixel_density,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
