use std::io::Write;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{DashboardError, DashboardResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

const CLEAR_COLOR: Color = Color::rgb(1.0, 1.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub arcs_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo off-screen renderer.
///
/// Each chart surface owns one image surface; the last rendered pixels stay
/// available for capture until the next draw.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> DashboardResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(DashboardError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the current surface pixels as PNG.
    pub fn write_png<W: Write>(&self, out: &mut W) -> DashboardResult<()> {
        self.surface
            .write_to_png(out)
            .map_err(|err| DashboardError::Capture(format!("failed to encode png: {err}")))
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> DashboardResult<()> {
        frame.validate()?;
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        apply_color(&context, CLEAR_COLOR);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        self.last_stats = draw_frame(&context, frame)?;
        Ok(())
    }
}

/// Paints `frame` on `context` in the frame's layer order.
///
/// The caller owns clearing, clipping and translation.
pub fn draw_frame(context: &Context, frame: &RenderFrame) -> DashboardResult<CairoRenderStats> {
    let mut stats = CairoRenderStats::default();

    for rect in &frame.rects {
        apply_color(context, rect.fill_color);
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        stats.rects_drawn += 1;
    }

    let fill_arc = |arc: &crate::render::ArcPrimitive| -> DashboardResult<()> {
        apply_color(context, arc.fill_color);
        context.new_path();
        if !arc.is_full_turn() {
            context.move_to(arc.center_x, arc.center_y);
        }
        context.arc(
            arc.center_x,
            arc.center_y,
            arc.radius,
            arc.start_angle,
            arc.end_angle,
        );
        context.close_path();
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill arc", err))
    };

    for arc in &frame.arcs {
        fill_arc(arc)?;
        stats.arcs_drawn += 1;
    }

    for line in &frame.lines {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }

    for arc in &frame.overlay_arcs {
        fill_arc(arc)?;
        stats.arcs_drawn += 1;
    }

    for text in &frame.texts {
        let layout = pangocairo::functions::create_layout(context);
        let weight = if text.bold { "Bold " } else { "" };
        let font_description =
            FontDescription::from_string(&format!("Sans {weight}{}", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };

        apply_color(context, text.color);
        context.move_to(x, text.y - f64::from(text_height) / 2.0);
        pangocairo::functions::show_layout(context, &layout);
        stats.texts_drawn += 1;
    }

    Ok(stats)
}

pub(crate) fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

pub(crate) fn map_backend_error(prefix: &str, err: cairo::Error) -> DashboardError {
    DashboardError::Capture(format!("{prefix}: {err}"))
}
