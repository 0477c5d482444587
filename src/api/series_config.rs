use serde::{Deserialize, Serialize};

use crate::core::{BinAxis, BinErrorOption, ErrorGraphKind};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, FillStyle, MarkerStyle};

/// Complete construction-time configuration of a `ChartSeries`.
///
/// This type is serializable so host applications can persist/load series
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeriesConfig {
    pub name: String,
    pub title: String,
    pub bin_count: usize,
    pub low_edge: f64,
    pub high_edge: f64,
    /// Initial bin values; empty defers filling.
    #[serde(default)]
    pub data: Vec<f64>,
    /// Empty leaves the axis title untouched.
    #[serde(default)]
    pub x_title: String,
    #[serde(default = "default_y_title")]
    pub y_title: String,
    #[serde(default)]
    pub y_low: f64,
    /// `None` scales the axis to 1.2x the largest bin content.
    #[serde(default)]
    pub y_high: Option<f64>,
    #[serde(default)]
    pub line_color: Color,
    #[serde(default)]
    pub marker_style: MarkerStyle,
    #[serde(default)]
    pub marker_color: Color,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub bin_error_option: Option<BinErrorOption>,
    #[serde(default)]
    pub errors: Option<ErrorOverlayConfig>,
}

impl ChartSeriesConfig {
    /// Creates a config with default display attributes and no overlay.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        bin_count: usize,
        low_edge: f64,
        high_edge: f64,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            bin_count,
            low_edge,
            high_edge,
            data: Vec::new(),
            x_title: String::new(),
            y_title: default_y_title(),
            y_low: 0.0,
            y_high: None,
            line_color: Color::BLACK,
            marker_style: MarkerStyle::default(),
            marker_color: Color::BLACK,
            scale: default_scale(),
            bin_error_option: None,
            errors: None,
        }
    }

    /// Sets initial bin values.
    #[must_use]
    pub fn with_data(mut self, data: Vec<f64>) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn with_axis_titles(mut self, x_title: impl Into<String>, y_title: impl Into<String>) -> Self {
        self.x_title = x_title.into();
        self.y_title = y_title.into();
        self
    }

    #[must_use]
    pub fn with_y_range(mut self, y_low: f64, y_high: Option<f64>) -> Self {
        self.y_low = y_low;
        self.y_high = y_high;
        self
    }

    #[must_use]
    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    #[must_use]
    pub fn with_marker(mut self, style: MarkerStyle, color: Color) -> Self {
        self.marker_style = style;
        self.marker_color = color;
        self
    }

    /// Sets the multiplier applied to every value at fill time.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_bin_error_option(mut self, option: BinErrorOption) -> Self {
        self.bin_error_option = Some(option);
        self
    }

    #[must_use]
    pub fn with_errors(mut self, errors: ErrorOverlayConfig) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Checks binning, scale, y-range and colors; returns the validated axis.
    pub fn validate(&self) -> ChartResult<BinAxis> {
        let axis = BinAxis::new(self.bin_count, self.low_edge, self.high_edge)?;

        if !self.scale.is_finite() {
            return Err(ChartError::configuration("scale factor must be finite"));
        }
        validate_y_range(self.y_low, self.y_high)?;

        self.line_color.validate()?;
        self.marker_color.validate()?;
        if let Some(errors) = &self.errors {
            errors.style.validate()?;
        }
        Ok(axis)
    }
}

pub(crate) fn validate_y_range(y_low: f64, y_high: Option<f64>) -> ChartResult<()> {
    if !y_low.is_finite() {
        return Err(ChartError::configuration("y low bound must be finite"));
    }
    if let Some(high) = y_high {
        if !high.is_finite() {
            return Err(ChartError::configuration("y high bound must be finite"));
        }
        if high <= y_low {
            return Err(ChartError::configuration(format!(
                "y high bound ({high}) must be above y low bound ({y_low})"
            )));
        }
    }
    Ok(())
}

/// Requested error overlay: vertical error source plus horizontal policy and
/// styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorOverlayConfig {
    pub mode: ErrorMode,
    /// Forces horizontal error bars to zero width.
    #[serde(default = "default_suppress_x_errors")]
    pub suppress_x_errors: bool,
    #[serde(default)]
    pub style: ErrorOverlayStyle,
}

impl ErrorOverlayConfig {
    #[must_use]
    pub fn symmetric(values: Option<Vec<f64>>) -> Self {
        Self::from_mode(ErrorMode::Symmetric { values })
    }

    #[must_use]
    pub fn asymmetric(high: Option<Vec<f64>>, low: Option<Vec<f64>>) -> Self {
        Self::from_mode(ErrorMode::Asymmetric { high, low })
    }

    fn from_mode(mode: ErrorMode) -> Self {
        Self {
            mode,
            suppress_x_errors: default_suppress_x_errors(),
            style: ErrorOverlayStyle::default(),
        }
    }

    #[must_use]
    pub fn with_suppress_x_errors(mut self, suppress: bool) -> Self {
        self.suppress_x_errors = suppress;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ErrorOverlayStyle) -> Self {
        self.style = style;
        self
    }
}

/// Vertical error layout and the caller-supplied arrays for it.
///
/// Arrays may be omitted when the series carries a bin error option; when
/// both are present the option takes precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorMode {
    Symmetric {
        #[serde(default)]
        values: Option<Vec<f64>>,
    },
    Asymmetric {
        #[serde(default)]
        high: Option<Vec<f64>>,
        #[serde(default)]
        low: Option<Vec<f64>>,
    },
}

impl ErrorMode {
    #[must_use]
    pub fn graph_kind(&self) -> ErrorGraphKind {
        match self {
            Self::Symmetric { .. } => ErrorGraphKind::Symmetric,
            Self::Asymmetric { .. } => ErrorGraphKind::Asymmetric,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorOverlayStyle {
    #[serde(default)]
    pub line_color: Color,
    #[serde(default)]
    pub fill_color: Color,
    #[serde(default)]
    pub fill_style: FillStyle,
}

impl Default for ErrorOverlayStyle {
    fn default() -> Self {
        Self {
            line_color: Color::BLACK,
            fill_color: Color::BLACK,
            fill_style: FillStyle::default(),
        }
    }
}

impl ErrorOverlayStyle {
    pub fn validate(self) -> ChartResult<()> {
        self.line_color.validate()?;
        self.fill_color.validate()?;
        self.fill_style.validate()
    }
}

fn default_y_title() -> String {
    "Counts".to_owned()
}

fn default_scale() -> f64 {
    1.0
}

fn default_suppress_x_errors() -> bool {
    true
}
