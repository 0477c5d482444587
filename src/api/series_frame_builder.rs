use tracing::trace;

use crate::core::{ErrorGraph, ErrorPoint, Histogram1D, LinearScale, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasLayerKind, Color, FillStyle, LayeredRenderFrame, LinePrimitive, MarkerPrimitive,
    MarkerStyle, RectPrimitive, TextHAlign, TextPrimitive,
};

use super::{DrawOption, ErrorBarMode};

const MARGIN_LEFT_PX: f64 = 60.0;
const MARGIN_TOP_PX: f64 = 30.0;
const MARGIN_RIGHT_PX: f64 = 20.0;
const MARGIN_BOTTOM_PX: f64 = 50.0;
const STROKE_PX: f64 = 1.0;
const CAP_HALF_WIDTH_PX: f64 = 3.0;
const TITLE_FONT_PX: f64 = 14.0;
const AXIS_TITLE_FONT_PX: f64 = 12.0;
const TICK_FONT_PX: f64 = 10.0;
/// Headroom added above the data when no explicit y range is set.
const AUTO_RANGE_HEADROOM: f64 = 0.1;

/// Paint settings for a run of error bars.
#[derive(Debug, Clone, Copy)]
struct ErrorBarPaint {
    layer: CanvasLayerKind,
    line_color: Color,
    fill_color: Color,
    fill_style: FillStyle,
}

/// Projects a histogram and its error overlay into a layered frame.
///
/// Both objects share one coordinate space: the x domain is the histogram's
/// binning and the y domain is its display range.
#[derive(Debug, Clone, Copy)]
pub struct SeriesFrameBuilder<'a> {
    histogram: &'a Histogram1D,
    viewport: Viewport,
    area: PlotArea,
    x_scale: LinearScale,
    y_scale: LinearScale,
    y_domain: (f64, f64),
}

impl<'a> SeriesFrameBuilder<'a> {
    pub fn new(histogram: &'a Histogram1D, viewport: Viewport) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let area = PlotArea::inset(
            viewport,
            MARGIN_LEFT_PX,
            MARGIN_TOP_PX,
            MARGIN_RIGHT_PX,
            MARGIN_BOTTOM_PX,
        );
        let axis = histogram.axis();
        let x_scale = LinearScale::new(axis.low_edge(), axis.high_edge())?
            .with_pixel_span(area.left, area.right)?;
        let y_domain = display_y_range(histogram);
        let y_scale =
            LinearScale::new(y_domain.0, y_domain.1)?.with_pixel_span(area.bottom, area.top)?;

        Ok(Self {
            histogram,
            viewport,
            area,
            x_scale,
            y_scale,
            y_domain,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn area(&self) -> PlotArea {
        self.area
    }

    /// Y range actually used for projection.
    #[must_use]
    pub fn y_domain(&self) -> (f64, f64) {
        self.y_domain
    }

    /// Axis box, range labels and titles.
    pub fn push_axes(&self, frame: &mut LayeredRenderFrame) {
        let PlotArea {
            left,
            top,
            right,
            bottom,
        } = self.area;
        for (x1, y1, x2, y2) in [
            (left, bottom, right, bottom),
            (right, bottom, right, top),
            (right, top, left, top),
            (left, top, left, bottom),
        ] {
            frame.push_line(
                CanvasLayerKind::Axis,
                LinePrimitive::new(x1, y1, x2, y2, STROKE_PX, Color::BLACK),
            );
        }

        let axis = self.histogram.axis();
        let (y_low, y_high) = self.y_domain;
        for (value, x, y, align) in [
            (axis.low_edge(), left, bottom + 15.0, TextHAlign::Center),
            (axis.high_edge(), right, bottom + 15.0, TextHAlign::Center),
            (y_low, left - 5.0, bottom, TextHAlign::Right),
            (y_high, left - 5.0, top, TextHAlign::Right),
        ] {
            frame.push_text(
                CanvasLayerKind::Labels,
                TextPrimitive::new(format_tick(value), x, y, TICK_FONT_PX, Color::BLACK, align),
            );
        }

        if !self.histogram.title().is_empty() {
            frame.push_text(
                CanvasLayerKind::Labels,
                TextPrimitive::new(
                    self.histogram.title(),
                    0.5 * (left + right),
                    0.5 * top,
                    TITLE_FONT_PX,
                    Color::BLACK,
                    TextHAlign::Center,
                ),
            );
        }
        if !self.histogram.x_title().is_empty() {
            frame.push_text(
                CanvasLayerKind::Labels,
                TextPrimitive::new(
                    self.histogram.x_title(),
                    right,
                    bottom + 35.0,
                    AXIS_TITLE_FONT_PX,
                    Color::BLACK,
                    TextHAlign::Right,
                ),
            );
        }
        if !self.histogram.y_title().is_empty() {
            frame.push_text(
                CanvasLayerKind::Labels,
                TextPrimitive::new(
                    self.histogram.y_title(),
                    15.0,
                    top,
                    AXIS_TITLE_FONT_PX,
                    Color::BLACK,
                    TextHAlign::Right,
                )
                .rotated(),
            );
        }
    }

    /// Bin contents on the `Series` layer.
    pub fn push_histogram(
        &self,
        frame: &mut LayeredRenderFrame,
        option: DrawOption,
    ) -> ChartResult<()> {
        let histogram = self.histogram;
        let axis = histogram.axis();
        let contents = histogram.contents();
        let color = histogram.line_color();

        if option.draws_outline() {
            let baseline = self.y_px(0.0_f64.clamp(self.y_domain.0, self.y_domain.1))?;
            let mut previous_y = baseline;
            for (index, &content) in contents.iter().enumerate() {
                let x_left = self.x_px(axis.bin_low_edge(index))?;
                let x_right = self.x_px(axis.bin_low_edge(index + 1))?;
                let y = self.y_px(content)?;
                frame.push_line(
                    CanvasLayerKind::Series,
                    LinePrimitive::new(x_left, previous_y, x_left, y, STROKE_PX, color),
                );
                frame.push_line(
                    CanvasLayerKind::Series,
                    LinePrimitive::new(x_left, y, x_right, y, STROKE_PX, color),
                );
                previous_y = y;
            }
            let x_end = self.x_px(axis.high_edge())?;
            frame.push_line(
                CanvasLayerKind::Series,
                LinePrimitive::new(x_end, previous_y, x_end, baseline, STROKE_PX, color),
            );
        }

        let points = self.histogram_points()?;
        if option.line {
            self.push_polyline(frame, CanvasLayerKind::Series, &points, color)?;
        }
        if let Some(mode) = option.errors {
            let paint = ErrorBarPaint {
                layer: CanvasLayerKind::Series,
                line_color: color,
                fill_color: color,
                fill_style: FillStyle::Solid,
            };
            self.push_error_bars(frame, &points, mode, paint)?;
        }
        if option.markers {
            self.push_markers(frame, CanvasLayerKind::Series, &points)?;
        }

        trace!(
            name = histogram.name(),
            bins = contents.len(),
            "projected histogram"
        );
        Ok(())
    }

    /// Error overlay on the `Overlay` layer, above the histogram.
    pub fn push_error_graph(
        &self,
        frame: &mut LayeredRenderFrame,
        graph: &ErrorGraph,
        option: DrawOption,
    ) -> ChartResult<()> {
        let points = graph.points();
        if option.line {
            self.push_polyline(frame, CanvasLayerKind::Overlay, points, graph.line_color())?;
        }
        if let Some(mode) = option.overlay_error_mode() {
            let paint = ErrorBarPaint {
                layer: CanvasLayerKind::Overlay,
                line_color: graph.line_color(),
                fill_color: graph.fill_color(),
                fill_style: graph.fill_style(),
            };
            self.push_error_bars(frame, points, mode, paint)?;
        }
        if option.markers {
            self.push_markers(frame, CanvasLayerKind::Overlay, points)?;
        }

        trace!(points = points.len(), "projected error overlay");
        Ok(())
    }

    fn histogram_points(&self) -> ChartResult<Vec<ErrorPoint>> {
        let axis = self.histogram.axis();
        let half_width = 0.5 * axis.bin_width();
        let errors = self.histogram.bin_errors()?;
        Ok(self
            .histogram
            .contents()
            .iter()
            .zip(errors)
            .enumerate()
            .map(|(index, (&y, error))| ErrorPoint {
                x: axis.bin_center(index),
                y,
                ex_low: half_width,
                ex_high: half_width,
                ey_low: error.low,
                ey_high: error.high,
            })
            .collect())
    }

    fn push_error_bars(
        &self,
        frame: &mut LayeredRenderFrame,
        points: &[ErrorPoint],
        mode: ErrorBarMode,
        paint: ErrorBarPaint,
    ) -> ChartResult<()> {
        for point in points {
            if mode == ErrorBarMode::Bars && point.y == 0.0 {
                continue;
            }

            let x = self.x_px(point.x)?;
            let y = self.y_px(point.y)?;
            let x_low = self.x_px(point.x - point.ex_low)?;
            let x_high = self.x_px(point.x + point.ex_high)?;
            // Pixel y grows downwards.
            let y_low = self.y_px(point.y - point.ey_low)?;
            let y_high = self.y_px(point.y + point.ey_high)?;

            if mode == ErrorBarMode::Boxes {
                let width = x_high - x_low;
                let height = y_low - y_high;
                if width > 0.0 && height > 0.0 {
                    frame.push_rect(
                        paint.layer,
                        RectPrimitive::new(x_low, y_high, width, height, paint.fill_color)
                            .with_fill_style(paint.fill_style),
                    );
                }
                continue;
            }

            if point.ey_low + point.ey_high > 0.0 {
                frame.push_line(
                    paint.layer,
                    LinePrimitive::new(x, y_low, x, y_high, STROKE_PX, paint.line_color),
                );
                if mode == ErrorBarMode::BarsWithCaps {
                    for cap_y in [y_low, y_high] {
                        frame.push_line(
                            paint.layer,
                            LinePrimitive::new(
                                x - CAP_HALF_WIDTH_PX,
                                cap_y,
                                x + CAP_HALF_WIDTH_PX,
                                cap_y,
                                STROKE_PX,
                                paint.line_color,
                            ),
                        );
                    }
                }
            }
            if point.ex_low + point.ex_high > 0.0 {
                frame.push_line(
                    paint.layer,
                    LinePrimitive::new(x_low, y, x_high, y, STROKE_PX, paint.line_color),
                );
            }
        }
        Ok(())
    }

    fn push_polyline(
        &self,
        frame: &mut LayeredRenderFrame,
        layer: CanvasLayerKind,
        points: &[ErrorPoint],
        color: Color,
    ) -> ChartResult<()> {
        for pair in points.windows(2) {
            frame.push_line(
                layer,
                LinePrimitive::new(
                    self.x_px(pair[0].x)?,
                    self.y_px(pair[0].y)?,
                    self.x_px(pair[1].x)?,
                    self.y_px(pair[1].y)?,
                    STROKE_PX,
                    color,
                ),
            );
        }
        Ok(())
    }

    fn push_markers(
        &self,
        frame: &mut LayeredRenderFrame,
        layer: CanvasLayerKind,
        points: &[ErrorPoint],
    ) -> ChartResult<()> {
        let style: MarkerStyle = self.histogram.marker_style();
        let color = self.histogram.marker_color();
        let (y_min, y_max) = self.y_domain;
        for point in points.iter().filter(|p| (y_min..=y_max).contains(&p.y)) {
            frame.push_marker(
                layer,
                MarkerPrimitive::new(self.x_px(point.x)?, self.y_px(point.y)?, style, color),
            );
        }
        Ok(())
    }

    fn x_px(&self, value: f64) -> ChartResult<f64> {
        self.x_scale.domain_to_clamped_pixel(value)
    }

    fn y_px(&self, value: f64) -> ChartResult<f64> {
        self.y_scale.domain_to_clamped_pixel(value)
    }
}

/// Explicit histogram y range when usable, otherwise the data range with
/// headroom, always spanning zero.
fn display_y_range(histogram: &Histogram1D) -> (f64, f64) {
    if let Some((low, high)) = histogram.y_axis_range() {
        if high > low {
            return (low, high);
        }
    }

    let low = histogram.minimum().unwrap_or(0.0).min(0.0);
    let high = histogram.maximum().unwrap_or(0.0).max(0.0);
    if high > low {
        (low, high + AUTO_RANGE_HEADROOM * (high - low))
    } else {
        (low, low + 1.0)
    }
}

fn format_tick(value: f64) -> String {
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-" || text == "-0" {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{SeriesFrameBuilder, display_y_range, format_tick};
    use crate::api::DrawOption;
    use crate::core::{BinAxis, Histogram1D, Viewport};
    use crate::render::{CanvasLayerKind, LayeredRenderFrame};

    fn histogram(contents: &[f64]) -> Histogram1D {
        let axis = BinAxis::new(contents.len(), 0.0, contents.len() as f64).expect("axis");
        let mut h = Histogram1D::new("h", "", axis);
        for (index, &value) in contents.iter().enumerate() {
            h.set_bin_content(index, value).expect("set");
        }
        h
    }

    #[test]
    fn outline_emits_two_lines_per_bin_plus_closing_edge() {
        let h = histogram(&[1.0, 2.0, 3.0]);
        let builder = SeriesFrameBuilder::new(&h, Viewport::new(400, 300)).expect("builder");
        let mut frame = LayeredRenderFrame::new(builder.viewport());
        builder
            .push_histogram(&mut frame, DrawOption::parse("HIST").expect("option"))
            .expect("push");
        let series = frame.layer(CanvasLayerKind::Series).expect("layer");
        assert_eq!(series.lines.len(), 7);
    }

    #[test]
    fn auto_range_adds_headroom_and_spans_zero() {
        let h = histogram(&[2.0, 10.0]);
        let (low, high) = display_y_range(&h);
        assert_eq!(low, 0.0);
        assert!((high - 11.0).abs() <= 1e-9);
    }

    #[test]
    fn degenerate_explicit_range_falls_back_to_data() {
        let mut h = histogram(&[0.0, 0.0]);
        h.set_y_axis_range(0.0, 0.0).expect("range");
        assert_eq!(display_y_range(&h), (0.0, 1.0));
    }

    #[test]
    fn tick_labels_trim_trailing_zeros() {
        assert_eq!(format_tick(12.0), "12");
        assert_eq!(format_tick(0.25), "0.25");
        assert_eq!(format_tick(-0.0), "0");
    }

    #[test]
    fn rejects_invalid_viewport() {
        let h = histogram(&[1.0]);
        assert!(SeriesFrameBuilder::new(&h, Viewport::new(0, 100)).is_err());
    }
}
