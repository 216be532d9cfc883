use cairo::{Context, Format, ImageSurface};

use crate::core::Viewport;
use crate::error::{DashboardError, DashboardResult};
use crate::render::{Color, RenderFrame, apply_color, draw_frame, map_backend_error};

use super::{CaptureMethod, compose_tiles};

const CAPTURE_BACKGROUND: Color = Color::rgb(1.0, 1.0, 1.0);

/// Composites chart frames onto one Cairo image and encodes it as PNG.
#[derive(Debug, Clone)]
pub struct CairoCapture {
    name: String,
    scale: f64,
    gap_px: u32,
}

impl CairoCapture {
    #[must_use]
    pub fn new(scale: f64, gap_px: u32) -> Self {
        Self {
            name: format!("cairo@{scale}x"),
            scale,
            gap_px,
        }
    }
}

impl CaptureMethod for CairoCapture {
    fn name(&self) -> &str {
        &self.name
    }

    fn capture(&mut self, frames: &[&RenderFrame]) -> DashboardResult<Vec<u8>> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(DashboardError::Capture(format!(
                "capture scale must be finite and > 0, got {}",
                self.scale
            )));
        }

        let viewports: Vec<Viewport> = frames.iter().map(|frame| frame.viewport).collect();
        let layout = compose_tiles(&viewports, self.gap_px);
        let to_pixels = |logical: u32| -> DashboardResult<i32> {
            let scaled = (f64::from(logical) * self.scale).ceil();
            if scaled < 1.0 || scaled > f64::from(i32::MAX) {
                return Err(DashboardError::Capture(format!(
                    "capture size {scaled} out of range"
                )));
            }
            Ok(scaled as i32)
        };

        let surface = ImageSurface::create(
            Format::ARgb32,
            to_pixels(layout.width)?,
            to_pixels(layout.height)?,
        )
        .map_err(|err| map_backend_error("failed to create capture surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create capture context", err))?;
        context.scale(self.scale, self.scale);
        apply_color(&context, CAPTURE_BACKGROUND);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear capture surface", err))?;

        for (frame, tile) in frames.iter().zip(&layout.tiles) {
            frame.validate()?;
            context
                .save()
                .map_err(|err| map_backend_error("failed to save context", err))?;
            context.translate(tile.x, tile.y);
            context.rectangle(
                0.0,
                0.0,
                f64::from(tile.viewport.width),
                f64::from(tile.viewport.height),
            );
            context.clip();
            draw_frame(&context, frame)?;
            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore context", err))?;
        }
        drop(context);

        let mut png = Vec::new();
        surface
            .write_to_png(&mut png)
            .map_err(|err| DashboardError::Capture(format!("failed to encode png: {err}")))?;
        Ok(png)
    }
}
