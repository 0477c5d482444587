use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{ErrorGraph, ErrorGraphKind, Histogram1D, Viewport};
use crate::error::{ChartError, ChartResult, PrecedenceWarning};
use crate::render::{LayeredRenderFrame, RenderFrame, Renderer};

use super::error_source::{
    VerticalErrorSource, apply_vertical_errors, check_error_array, resolve_configured,
    resolve_values,
};
use super::series_config::validate_y_range;
use super::{ChartSeriesConfig, DrawOption, ErrorValues, SeriesFrameBuilder};

/// Auto y-range headroom over the largest bin content.
const AUTO_Y_HIGH_FACTOR: f64 = 1.2;

pub const DEFAULT_PRIMARY_DRAW_OPTION: &str = "HIST";
pub const DEFAULT_OVERLAY_DRAW_OPTION: &str = "SAME E0";

/// Lifecycle position of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesState {
    Constructed,
    Filled,
    Drawn,
}

#[derive(Debug, Clone, PartialEq)]
struct ErrorOverlay {
    graph: ErrorGraph,
    source: VerticalErrorSource,
    suppress_x_errors: bool,
}

/// A filled histogram plus an optional error-bar overlay sharing its bins.
///
/// The series owns both plot objects. All configuration is validated up front
/// in [`ChartSeries::new`]; later operations either apply completely or return
/// an error without touching state.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    histogram: Histogram1D,
    overlay: Option<ErrorOverlay>,
    scale: f64,
    y_low: f64,
    y_high: Option<f64>,
    has_data: bool,
    state: SeriesState,
    warnings: Vec<PrecedenceWarning>,
}

impl ChartSeries {
    pub fn new(config: ChartSeriesConfig) -> ChartResult<Self> {
        let axis = config.validate()?;
        let bin_count = axis.bin_count();

        // Resolve the overlay source before building anything so that a
        // rejected configuration leaves no partial state behind.
        let resolved = match &config.errors {
            Some(errors) => Some(resolve_configured(
                &errors.mode,
                config.bin_error_option,
                bin_count,
            )?),
            None => None,
        };

        let mut series = Self {
            histogram: Histogram1D::new(config.name, config.title, axis),
            overlay: None,
            scale: config.scale,
            y_low: config.y_low,
            y_high: config.y_high,
            has_data: false,
            state: SeriesState::Constructed,
            warnings: Vec::new(),
        };
        series.fill(&config.data)?;
        apply_y_range(
            &mut series.histogram,
            series.y_low,
            series.y_high,
            series.has_data,
        )?;

        let histogram = &mut series.histogram;
        if !config.x_title.is_empty() {
            histogram.set_x_title(config.x_title);
        }
        if !config.y_title.is_empty() {
            histogram.set_y_title(config.y_title);
        }
        if let Some(option) = config.bin_error_option {
            histogram.set_bin_error_option(option);
        }
        histogram.set_line_color(config.line_color)?;
        histogram.set_marker_style(config.marker_style);
        histogram.set_marker_color(config.marker_color)?;

        if let (Some(errors), Some(resolved)) = (config.errors, resolved) {
            let mut graph =
                ErrorGraph::from_histogram(&series.histogram, errors.mode.graph_kind())?;
            apply_vertical_errors(&mut graph, &resolved.source, &series.histogram)?;
            if errors.suppress_x_errors {
                graph.set_all_ex(0.0)?;
            } else {
                graph.set_all_ex(0.5 * axis.bin_width())?;
            }
            graph.set_line_color(errors.style.line_color)?;
            graph.set_fill_color(errors.style.fill_color)?;
            graph.set_fill_style(errors.style.fill_style)?;

            series.overlay = Some(ErrorOverlay {
                graph,
                source: resolved.source,
                suppress_x_errors: errors.suppress_x_errors,
            });
            if let Some(warning) = resolved.warning {
                series.emit_warning(warning);
            }
        }

        debug!(
            name = series.histogram.name(),
            bins = bin_count,
            overlay = series.overlay.is_some(),
            filled = series.has_data,
            "constructed chart series"
        );
        Ok(series)
    }

    /// Replaces bin contents with `scale * data[i]` and re-derives the y range
    /// and computed overlay errors. Empty input is a no-op.
    pub fn fill(&mut self, data: &[f64]) -> ChartResult<()> {
        if data.is_empty() {
            return Ok(());
        }

        let bin_count = self.histogram.bin_count();
        if data.len() != bin_count {
            return Err(ChartError::configuration(format!(
                "data has {} values but the series has {bin_count} bins",
                data.len()
            )));
        }
        let scaled: Vec<f64> = data.iter().map(|value| self.scale * value).collect();
        if scaled.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "scaled data values must be finite".to_owned(),
            ));
        }

        // Stage every change on copies; nothing is committed until all of
        // them succeed.
        let mut histogram = self.histogram.clone();
        for (index, &value) in scaled.iter().enumerate() {
            histogram.set_bin_content(index, value)?;
        }
        apply_y_range(&mut histogram, self.y_low, self.y_high, true)?;

        let graph = match &self.overlay {
            Some(overlay) => {
                let mut graph = overlay.graph.clone();
                graph.sync_y(histogram.contents())?;
                if overlay.source == VerticalErrorSource::Computed {
                    apply_vertical_errors(&mut graph, &overlay.source, &histogram)?;
                }
                Some(graph)
            }
            None => None,
        };

        self.histogram = histogram;
        if let (Some(overlay), Some(graph)) = (self.overlay.as_mut(), graph) {
            overlay.graph = graph;
        }
        self.has_data = true;
        self.state = SeriesState::Filled;
        debug!(
            name = self.histogram.name(),
            bins = bin_count,
            scale = self.scale,
            "filled chart series"
        );
        Ok(())
    }

    /// Sets the y display bounds. `None` for the upper bound re-enables
    /// auto-scaling from the bin contents.
    pub fn set_y_range(&mut self, y_low: f64, y_high: Option<f64>) -> ChartResult<()> {
        validate_y_range(y_low, y_high)?;
        apply_y_range(&mut self.histogram, y_low, y_high, self.has_data)?;
        self.y_low = y_low;
        self.y_high = y_high;
        Ok(())
    }

    /// Lower bound and effective upper bound (`None` while auto-scaling has
    /// no data to work from).
    #[must_use]
    pub fn y_range(&self) -> (f64, Option<f64>) {
        (
            self.y_low,
            self.histogram.y_axis_range().map(|(_, high)| high),
        )
    }

    /// Whether the upper y bound follows the data.
    #[must_use]
    pub fn is_y_auto(&self) -> bool {
        self.y_high.is_none()
    }

    /// Overwrites the overlay's vertical errors.
    ///
    /// The variant must match the configured overlay mode. When a bin error
    /// option is active the option keeps precedence: the arrays are ignored
    /// and a [`PrecedenceWarning`] is recorded.
    pub fn set_errors(&mut self, values: ErrorValues<'_>) -> ChartResult<()> {
        let bin_count = self.histogram.bin_count();
        let option = self.histogram.bin_error_option();
        let overlay = self.overlay.as_mut().ok_or_else(no_overlay_error)?;
        if overlay.graph.kind() != values.graph_kind() {
            return Err(ChartError::configuration(format!(
                "overlay is {:?} but {:?} errors were supplied",
                overlay.graph.kind(),
                values.graph_kind()
            )));
        }

        let resolved = resolve_values(values, option, bin_count)?;
        apply_vertical_errors(&mut overlay.graph, &resolved.source, &self.histogram)?;
        overlay.source = resolved.source;

        if let Some(warning) = resolved.warning {
            self.emit_warning(warning);
        }
        trace!(name = self.histogram.name(), "set overlay errors");
        Ok(())
    }

    /// Applies the horizontal error policy.
    ///
    /// - suppression on, no arrays: all horizontal errors are zeroed
    /// - suppression on, both arrays: suppression is switched off (with a
    ///   warning) and the arrays are applied
    /// - suppression off, both arrays: the arrays are applied
    /// - suppression off, no arrays: half a bin width on each side
    ///
    /// Supplying only one of the two arrays is rejected, as are differing
    /// high and low arrays on a symmetric overlay.
    pub fn set_horizontal_errors_asymmetric(
        &mut self,
        high: Option<&[f64]>,
        low: Option<&[f64]>,
    ) -> ChartResult<()> {
        let axis = self.histogram.axis();
        let bin_count = axis.bin_count();
        let overlay = self.overlay.as_mut().ok_or_else(no_overlay_error)?;

        let arrays = match (high, low) {
            (Some(high), Some(low)) => {
                check_error_array("horizontal high errors", high, bin_count)?;
                check_error_array("horizontal low errors", low, bin_count)?;
                if overlay.graph.kind() == ErrorGraphKind::Symmetric && high != low {
                    return Err(ChartError::configuration(
                        "symmetric overlay needs identical high and low horizontal errors",
                    ));
                }
                Some((high, low))
            }
            (None, None) => None,
            _ => {
                return Err(ChartError::configuration(
                    "horizontal errors require both high and low arrays, or neither",
                ));
            }
        };

        let mut warning = None;
        match arrays {
            None if overlay.suppress_x_errors => overlay.graph.set_all_ex(0.0)?,
            None => overlay.graph.set_all_ex(0.5 * axis.bin_width())?,
            Some((high, low)) => {
                if overlay.suppress_x_errors {
                    overlay.suppress_x_errors = false;
                    warning = Some(PrecedenceWarning::HorizontalErrorsOverrideSuppression);
                }
                for (index, (&high, &low)) in high.iter().zip(low).enumerate() {
                    overlay.graph.set_point_ex(index, low, high)?;
                }
            }
        }

        if let Some(warning) = warning {
            self.emit_warning(warning);
        }
        Ok(())
    }

    /// Whether horizontal error bars are currently forced to zero.
    pub fn x_errors_suppressed(&self) -> ChartResult<bool> {
        self.overlay
            .as_ref()
            .map(|overlay| overlay.suppress_x_errors)
            .ok_or_else(no_overlay_error)
    }

    #[must_use]
    pub fn primary(&self) -> &Histogram1D {
        &self.histogram
    }

    pub fn error_overlay(&self) -> ChartResult<&ErrorGraph> {
        self.overlay
            .as_ref()
            .map(|overlay| &overlay.graph)
            .ok_or_else(no_overlay_error)
    }

    #[must_use]
    pub fn has_error_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Whether overlay errors are derived from the bin error option rather
    /// than caller arrays.
    pub fn errors_are_computed(&self) -> ChartResult<bool> {
        self.overlay
            .as_ref()
            .map(|overlay| overlay.source == VerticalErrorSource::Computed)
            .ok_or_else(no_overlay_error)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.histogram.name()
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn state(&self) -> SeriesState {
        self.state
    }

    /// Every precedence warning emitted so far, oldest first.
    #[must_use]
    pub fn warnings(&self) -> &[PrecedenceWarning] {
        &self.warnings
    }

    /// Builds the layered scene for the primary and, if configured, the
    /// overlay above it.
    pub fn render_layers(
        &self,
        viewport: Viewport,
        primary_option: &str,
        overlay_option: &str,
    ) -> ChartResult<LayeredRenderFrame> {
        let primary_option = DrawOption::parse(primary_option)?;
        let builder = SeriesFrameBuilder::new(&self.histogram, viewport)?;
        let mut frame = LayeredRenderFrame::new(viewport);
        if !primary_option.same {
            builder.push_axes(&mut frame);
        }
        builder.push_histogram(&mut frame, primary_option)?;
        if let Some(overlay) = &self.overlay {
            let overlay_option = DrawOption::parse(overlay_option)?;
            builder.push_error_graph(&mut frame, &overlay.graph, overlay_option)?;
        }
        Ok(frame)
    }

    pub fn render_frame(
        &self,
        viewport: Viewport,
        primary_option: &str,
        overlay_option: &str,
    ) -> ChartResult<RenderFrame> {
        Ok(self
            .render_layers(viewport, primary_option, overlay_option)?
            .flatten())
    }

    /// Draws the primary, then the overlay on top in the same axes.
    pub fn draw<R: Renderer>(
        &mut self,
        renderer: &mut R,
        viewport: Viewport,
        primary_option: &str,
        overlay_option: &str,
    ) -> ChartResult<()> {
        let frame = self.render_frame(viewport, primary_option, overlay_option)?;
        self.present(renderer, &frame)
    }

    /// `draw` with `"HIST"` for the primary and `"SAME E0"` for the overlay.
    pub fn draw_default<R: Renderer>(
        &mut self,
        renderer: &mut R,
        viewport: Viewport,
    ) -> ChartResult<()> {
        self.draw(
            renderer,
            viewport,
            DEFAULT_PRIMARY_DRAW_OPTION,
            DEFAULT_OVERLAY_DRAW_OPTION,
        )
    }

    pub fn draw_primary<R: Renderer>(
        &mut self,
        renderer: &mut R,
        viewport: Viewport,
        option: &str,
    ) -> ChartResult<()> {
        let option = DrawOption::parse(option)?;
        let builder = SeriesFrameBuilder::new(&self.histogram, viewport)?;
        let mut frame = LayeredRenderFrame::new(viewport);
        if !option.same {
            builder.push_axes(&mut frame);
        }
        builder.push_histogram(&mut frame, option)?;
        self.present(renderer, &frame.flatten())
    }

    pub fn draw_overlay<R: Renderer>(
        &mut self,
        renderer: &mut R,
        viewport: Viewport,
        option: &str,
    ) -> ChartResult<()> {
        let graph = self.error_overlay()?;
        let option = DrawOption::parse(option)?;
        let builder = SeriesFrameBuilder::new(&self.histogram, viewport)?;
        let mut frame = LayeredRenderFrame::new(viewport);
        if !option.same {
            builder.push_axes(&mut frame);
        }
        builder.push_error_graph(&mut frame, graph, option)?;
        let frame = frame.flatten();
        self.present(renderer, &frame)
    }

    fn present<R: Renderer>(&mut self, renderer: &mut R, frame: &RenderFrame) -> ChartResult<()> {
        renderer.render(frame)?;
        self.state = SeriesState::Drawn;
        trace!(
            name = self.histogram.name(),
            lines = frame.lines.len(),
            rects = frame.rects.len(),
            markers = frame.markers.len(),
            "drew chart series"
        );
        Ok(())
    }

    fn emit_warning(&mut self, warning: PrecedenceWarning) {
        warn!(name = self.histogram.name(), %warning, "precedence warning");
        self.warnings.push(warning);
    }
}

/// Writes the display range: the explicit bounds, or `1.2 x max` once data
/// exists. Leaves `histogram` untouched on error.
fn apply_y_range(
    histogram: &mut Histogram1D,
    y_low: f64,
    y_high: Option<f64>,
    has_data: bool,
) -> ChartResult<()> {
    match y_high {
        Some(high) => histogram.set_y_axis_range(y_low, high),
        None if has_data => {
            let high = AUTO_Y_HIGH_FACTOR * histogram.maximum().unwrap_or(0.0);
            if !high.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "auto y range overflows: {AUTO_Y_HIGH_FACTOR} x maximum is not finite"
                )));
            }
            histogram.set_y_axis_range(y_low, high)
        }
        None => {
            histogram.clear_y_axis_range();
            Ok(())
        }
    }
}

fn no_overlay_error() -> ChartError {
    ChartError::configuration("series has no error overlay configured")
}

#[cfg(test)]
mod tests {
    use super::{ChartSeries, SeriesState};
    use crate::api::{ChartSeriesConfig, ErrorOverlayConfig};
    use crate::core::{BinErrorOption, Viewport};
    use crate::error::ChartError;
    use crate::render::NullRenderer;

    #[test]
    fn failed_fill_leaves_contents_untouched() {
        let mut series = ChartSeries::new(
            ChartSeriesConfig::new("h", "", 2, 0.0, 2.0).with_data(vec![1.0, 2.0]),
        )
        .expect("series");
        assert!(series.fill(&[5.0, f64::NAN]).is_err());
        assert_eq!(series.primary().contents(), &[1.0, 2.0]);
    }

    #[test]
    fn overflowing_auto_range_rejects_fill_without_partial_update() {
        let mut series = ChartSeries::new(
            ChartSeriesConfig::new("h", "", 2, 0.0, 2.0)
                .with_data(vec![4.0, 9.0])
                .with_bin_error_option(BinErrorOption::Normal)
                .with_errors(ErrorOverlayConfig::symmetric(None)),
        )
        .expect("series");
        let before = series.clone();

        let err = series.fill(&[1.0, 1.6e308]).expect_err("1.2 x max overflows");
        assert!(matches!(err, ChartError::InvalidData(_)));
        assert_eq!(series, before);
        assert_eq!(series.primary().contents(), &[4.0, 9.0]);
        let (_, high) = series.y_range();
        assert!((high.expect("auto high") - 10.8).abs() <= 1e-12);
        let point = series.error_overlay().expect("overlay").point(1).expect("point");
        assert_eq!(point.y, 9.0);
        assert_eq!(point.ey_high, 3.0);
    }

    #[test]
    fn explicit_range_allows_fill_that_would_overflow_auto_range() {
        let mut series = ChartSeries::new(
            ChartSeriesConfig::new("h", "", 2, 0.0, 2.0).with_y_range(0.0, Some(10.0)),
        )
        .expect("series");
        series.fill(&[1.0, 1.6e308]).expect("explicit range");
        assert!(series.set_y_range(0.0, None).is_err());
        assert_eq!(series.y_range(), (0.0, Some(10.0)));
        assert!(!series.is_y_auto());
    }

    #[test]
    fn large_poisson_counts_construct_and_draw() {
        let mut series = ChartSeries::new(
            ChartSeriesConfig::new("h", "", 2, 0.0, 2.0)
                .with_data(vec![1e6, 1e7])
                .with_bin_error_option(BinErrorOption::Poisson)
                .with_errors(ErrorOverlayConfig::asymmetric(None, None)),
        )
        .expect("series");
        let point = series.error_overlay().expect("overlay").point(0).expect("point");
        assert!((point.ey_low - 1000.0).abs() < 1e-2);

        let mut renderer = NullRenderer::default();
        series
            .draw(&mut renderer, Viewport::new(400, 300), "HIST E", "SAME E1")
            .expect("draw");
        assert_eq!(series.state(), SeriesState::Drawn);
    }

    #[test]
    fn empty_fill_keeps_state() {
        let mut series =
            ChartSeries::new(ChartSeriesConfig::new("h", "", 2, 0.0, 2.0)).expect("series");
        series.fill(&[]).expect("no-op");
        assert_eq!(series.state(), SeriesState::Constructed);
        assert_eq!(series.y_range(), (0.0, None));
    }

    #[test]
    fn construction_with_data_fills_overlay_points() {
        let series = ChartSeries::new(
            ChartSeriesConfig::new("h", "", 2, 0.0, 2.0)
                .with_data(vec![4.0, 9.0])
                .with_errors(ErrorOverlayConfig::symmetric(Some(vec![0.5, 0.5]))),
        )
        .expect("series");
        let overlay = series.error_overlay().expect("overlay");
        assert_eq!(overlay.point(1).expect("point").y, 9.0);
        assert_eq!(series.state(), SeriesState::Filled);
    }
}
