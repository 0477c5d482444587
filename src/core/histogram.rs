use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{BinAxis, BinError, BinErrorOption};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, MarkerStyle};

/// Fixed-binning 1D histogram: the primary plot object of a series.
///
/// Bins are addressed 0-based; there are no under/overflow cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram1D {
    name: String,
    title: String,
    axis: BinAxis,
    contents: Vec<f64>,
    x_title: String,
    y_title: String,
    y_axis_range: Option<(f64, f64)>,
    bin_error_option: Option<BinErrorOption>,
    line_color: Color,
    marker_style: MarkerStyle,
    marker_color: Color,
}

impl Histogram1D {
    #[must_use]
    pub fn new(name: impl Into<String>, title: impl Into<String>, axis: BinAxis) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            axis,
            contents: vec![0.0; axis.bin_count()],
            x_title: String::new(),
            y_title: String::new(),
            y_axis_range: None,
            bin_error_option: None,
            line_color: Color::BLACK,
            marker_style: MarkerStyle::default(),
            marker_color: Color::BLACK,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn axis(&self) -> BinAxis {
        self.axis
    }

    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.axis.bin_count()
    }

    #[must_use]
    pub fn contents(&self) -> &[f64] {
        &self.contents
    }

    #[must_use]
    pub fn bin_content(&self, index: usize) -> Option<f64> {
        self.contents.get(index).copied()
    }

    pub fn set_bin_content(&mut self, index: usize, value: f64) -> ChartResult<()> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(
                "bin content must be finite".to_owned(),
            ));
        }
        let bin_count = self.bin_count();
        let slot = self.contents.get_mut(index).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "bin index {index} out of range for {bin_count} bins"
            ))
        })?;
        *slot = value;
        Ok(())
    }

    /// Largest bin content.
    #[must_use]
    pub fn maximum(&self) -> Option<f64> {
        self.contents
            .iter()
            .copied()
            .map(OrderedFloat)
            .max()
            .map(|value| value.0)
    }

    #[must_use]
    pub fn minimum(&self) -> Option<f64> {
        self.contents
            .iter()
            .copied()
            .map(OrderedFloat)
            .min()
            .map(|value| value.0)
    }

    #[must_use]
    pub fn x_title(&self) -> &str {
        &self.x_title
    }

    pub fn set_x_title(&mut self, title: impl Into<String>) {
        self.x_title = title.into();
    }

    #[must_use]
    pub fn y_title(&self) -> &str {
        &self.y_title
    }

    pub fn set_y_title(&mut self, title: impl Into<String>) {
        self.y_title = title.into();
    }

    /// Explicit y display range, `None` when the renderer should pick one.
    #[must_use]
    pub fn y_axis_range(&self) -> Option<(f64, f64)> {
        self.y_axis_range
    }

    pub fn set_y_axis_range(&mut self, low: f64, high: f64) -> ChartResult<()> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ChartError::InvalidData(
                "y axis range must be finite".to_owned(),
            ));
        }
        self.y_axis_range = Some((low, high));
        Ok(())
    }

    pub fn clear_y_axis_range(&mut self) {
        self.y_axis_range = None;
    }

    #[must_use]
    pub fn bin_error_option(&self) -> Option<BinErrorOption> {
        self.bin_error_option
    }

    pub fn set_bin_error_option(&mut self, option: BinErrorOption) {
        self.bin_error_option = Some(option);
    }

    /// Statistical error of bin `index` under the configured option
    /// (`Normal` when none is set).
    pub fn bin_error(&self, index: usize) -> ChartResult<BinError> {
        let content = self.bin_content(index).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "bin index {index} out of range for {} bins",
                self.bin_count()
            ))
        })?;
        self.bin_error_option.unwrap_or_default().bin_error(content)
    }

    pub fn bin_errors(&self) -> ChartResult<Vec<BinError>> {
        self.bin_error_option
            .unwrap_or_default()
            .bin_errors(&self.contents)
    }

    #[must_use]
    pub fn line_color(&self) -> Color {
        self.line_color
    }

    pub fn set_line_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.line_color = color;
        Ok(())
    }

    #[must_use]
    pub fn marker_style(&self) -> MarkerStyle {
        self.marker_style
    }

    pub fn set_marker_style(&mut self, style: MarkerStyle) {
        self.marker_style = style;
    }

    #[must_use]
    pub fn marker_color(&self) -> Color {
        self.marker_color
    }

    pub fn set_marker_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.marker_color = color;
        Ok(())
    }
}
