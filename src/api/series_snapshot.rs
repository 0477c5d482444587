use serde::{Deserialize, Serialize};

use crate::core::{BinErrorOption, ErrorGraph};
use crate::error::PrecedenceWarning;

use super::{ChartSeries, SeriesState};

/// Serializable view of a series' observable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub name: String,
    pub title: String,
    pub bin_count: usize,
    pub low_edge: f64,
    pub high_edge: f64,
    pub scale: f64,
    pub contents: Vec<f64>,
    pub x_title: String,
    pub y_title: String,
    pub y_low: f64,
    pub y_high: Option<f64>,
    pub y_auto: bool,
    #[serde(default)]
    pub bin_error_option: Option<BinErrorOption>,
    #[serde(default)]
    pub overlay: Option<ErrorGraph>,
    #[serde(default)]
    pub x_errors_suppressed: Option<bool>,
    #[serde(default)]
    pub warnings: Vec<PrecedenceWarning>,
    pub state: SeriesState,
}

impl ChartSeries {
    #[must_use]
    pub fn snapshot(&self) -> SeriesSnapshot {
        let histogram = self.primary();
        let axis = histogram.axis();
        let (y_low, y_high) = self.y_range();
        SeriesSnapshot {
            name: histogram.name().to_owned(),
            title: histogram.title().to_owned(),
            bin_count: axis.bin_count(),
            low_edge: axis.low_edge(),
            high_edge: axis.high_edge(),
            scale: self.scale(),
            contents: histogram.contents().to_vec(),
            x_title: histogram.x_title().to_owned(),
            y_title: histogram.y_title().to_owned(),
            y_low,
            y_high,
            y_auto: self.is_y_auto(),
            bin_error_option: histogram.bin_error_option(),
            overlay: self.error_overlay().ok().cloned(),
            x_errors_suppressed: self.x_errors_suppressed().ok(),
            warnings: self.warnings().to_vec(),
            state: self.state(),
        }
    }
}
