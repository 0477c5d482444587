use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, FillStyle, MarkerPrimitive, MarkerStyle, RectPrimitive, RenderFrame, Renderer,
    TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub markers_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Renders either offscreen into an owned image surface through
/// `Renderer::render`, or in place on an external Cairo context through
/// `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            draw_rect(context, *rect)?;
            stats.rects_drawn += 1;
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

        for marker in &frame.markers {
            draw_marker(context, *marker)?;
            stats.markers_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let offset = match text.h_align {
                TextHAlign::Left => 0.0,
                TextHAlign::Center => -f64::from(text_width) / 2.0,
                TextHAlign::Right => -f64::from(text_width),
            };

            apply_color(context, text.color);
            context
                .save()
                .map_err(|err| map_backend_error("failed to save context", err))?;
            context.translate(text.x, text.y);
            if text.vertical {
                context.rotate(-FRAC_PI_2);
            }
            context.move_to(offset, 0.0);
            pangocairo::functions::show_layout(context, &layout);
            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore context", err))?;
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    match rect.fill_style {
        FillStyle::Hollow => {}
        FillStyle::Solid => {
            apply_color(context, rect.fill_color);
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        }
        FillStyle::Pattern(_) => {
            let spacing = rect.fill_style.hatch_spacing_px().unwrap_or(6.0);
            context
                .save()
                .map_err(|err| map_backend_error("failed to save context", err))?;
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            context.clip();
            apply_color(context, rect.fill_color);
            context.set_line_width(1.0);
            let mut offset = -rect.height;
            while offset < rect.width {
                context.move_to(rect.x + offset, rect.y + rect.height);
                context.line_to(rect.x + offset + rect.height, rect.y);
                offset += spacing;
            }
            let stroked = context.stroke();
            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore context", err))?;
            stroked.map_err(|err| map_backend_error("failed to hatch rectangle", err))?;
        }
    }

    if rect.border_width > 0.0 {
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
    }
    Ok(())
}

fn draw_marker(context: &Context, marker: MarkerPrimitive) -> ChartResult<()> {
    let radius = marker.style.size_px() * 0.5;
    apply_color(context, marker.color);
    context.set_line_width(1.0);
    context.new_path();

    match marker.style {
        MarkerStyle::Plus | MarkerStyle::Star => {
            context.move_to(marker.x - radius, marker.y);
            context.line_to(marker.x + radius, marker.y);
            context.move_to(marker.x, marker.y - radius);
            context.line_to(marker.x, marker.y + radius);
        }
        MarkerStyle::Multiply => {
            context.move_to(marker.x - radius, marker.y - radius);
            context.line_to(marker.x + radius, marker.y + radius);
            context.move_to(marker.x - radius, marker.y + radius);
            context.line_to(marker.x + radius, marker.y - radius);
        }
        MarkerStyle::FullSquare | MarkerStyle::OpenSquare => {
            context.rectangle(
                marker.x - radius,
                marker.y - radius,
                2.0 * radius,
                2.0 * radius,
            );
        }
        MarkerStyle::FullTriangleUp => {
            context.move_to(marker.x, marker.y - radius);
            context.line_to(marker.x + radius, marker.y + radius);
            context.line_to(marker.x - radius, marker.y + radius);
            context.close_path();
        }
        _ => {
            context.arc(marker.x, marker.y, radius, 0.0, 2.0 * PI);
        }
    }

    let result = if marker.style.is_filled() {
        context.fill()
    } else {
        context.stroke()
    };
    result.map_err(|err| map_backend_error("failed to draw marker", err))
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
