use crate::{
    foundation::core::{Affine, Canvas, Rect, Rgba8},
    foundation::error::{RuneError, RuneResult},
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    scene::{DrawOp, Scene},
};

/// Anti-aliased software rasterizer backed by `vello_cpu`.
pub struct CpuBackend {
    settings: RenderSettings,
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            surface: None,
        }
    }

    fn ensure_surface(&mut self, width: u16, height: u16) -> &mut CpuSurface {
        let stale = self
            .surface
            .as_ref()
            .is_none_or(|s| s.width != width || s.height != height);
        if stale {
            self.surface = None;
        }
        self.surface.get_or_insert_with(|| CpuSurface {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }
}

/// Device raster size for a canvas at the given density.
pub fn device_size(canvas: Canvas, pixel_density: u32) -> RuneResult<(u16, u16)> {
    let scaled = |v: u32, what: &str| -> RuneResult<u16> {
        v.checked_mul(pixel_density)
            .and_then(|px| u16::try_from(px).ok())
            .filter(|&px| px > 0)
            .ok_or_else(|| {
                RuneError::render(format!(
                    "canvas {what} {v} at density {pixel_density} does not fit a raster surface"
                ))
            })
    };
    Ok((
        scaled(canvas.width, "width")?,
        scaled(canvas.height, "height")?,
    ))
}

impl RenderBackend for CpuBackend {
    fn render_scene(&mut self, scene: &Scene) -> RuneResult<FrameRGBA> {
        let density = self.settings.pixel_density;
        if density == 0 {
            return Err(RuneError::render("pixel_density must be >= 1"));
        }
        let (width, height) = device_size(scene.canvas, density)?;
        let device = Affine::scale(f64::from(density));

        let surface = self.ensure_surface(width, height);
        clear_pixmap(&mut surface.pixmap, scene.background.to_premul());

        let mut ctx = vello_cpu::RenderContext::new(width, height);

        for op in &scene.ops {
            draw_op(&mut ctx, device, op);
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut surface.pixmap);

        Ok(FrameRGBA {
            width: u32::from(width),
            height: u32::from(height),
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, device: Affine, op: &DrawOp) {
    let rect = rect_to_cpu(op.rect);
    ctx.set_transform(affine_to_cpu(device * op.transform));

    ctx.set_paint(color_to_cpu(op.fill));
    ctx.fill_rect(&rect);

    if let Some(stroke) = op.stroke {
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke.width));
        ctx.set_paint(color_to_cpu(stroke.color));
        ctx.stroke_rect(&rect);
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
