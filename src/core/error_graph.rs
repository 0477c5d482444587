use serde::{Deserialize, Serialize};

use crate::core::Histogram1D;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, FillStyle};

/// Whether the overlay carries one vertical error per point or separate
/// downward/upward errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorGraphKind {
    Symmetric,
    Asymmetric,
}

/// One overlay point with its horizontal and vertical error extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorPoint {
    pub x: f64,
    pub y: f64,
    pub ex_low: f64,
    pub ex_high: f64,
    pub ey_low: f64,
    pub ey_high: f64,
}

/// Error-bar overlay keyed to the bins of a histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorGraph {
    kind: ErrorGraphKind,
    points: Vec<ErrorPoint>,
    line_color: Color,
    fill_color: Color,
    fill_style: FillStyle,
}

impl ErrorGraph {
    /// Builds one point per bin at the bin centre, with `y` equal to the bin
    /// content, horizontal half-width of half a bin, and vertical errors
    /// derived from the histogram's bin error option.
    pub fn from_histogram(histogram: &Histogram1D, kind: ErrorGraphKind) -> ChartResult<Self> {
        let axis = histogram.axis();
        let half_width = 0.5 * axis.bin_width();
        let errors = histogram.bin_errors()?;

        let points = histogram
            .contents()
            .iter()
            .zip(errors)
            .enumerate()
            .map(|(index, (&y, error))| {
                let (ey_low, ey_high) = match kind {
                    ErrorGraphKind::Symmetric => (error.mean(), error.mean()),
                    ErrorGraphKind::Asymmetric => (error.low, error.high),
                };
                ErrorPoint {
                    x: axis.bin_center(index),
                    y,
                    ex_low: half_width,
                    ex_high: half_width,
                    ey_low,
                    ey_high,
                }
            })
            .collect();

        Ok(Self {
            kind,
            points,
            line_color: Color::BLACK,
            fill_color: Color::BLACK,
            fill_style: FillStyle::default(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> ErrorGraphKind {
        self.kind
    }

    #[must_use]
    pub fn points(&self) -> &[ErrorPoint] {
        &self.points
    }

    #[must_use]
    pub fn point(&self, index: usize) -> Option<&ErrorPoint> {
        self.points.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Copies current bin contents into the point `y` values.
    pub fn sync_y(&mut self, contents: &[f64]) -> ChartResult<()> {
        self.check_len(contents.len())?;
        for (point, &y) in self.points.iter_mut().zip(contents) {
            point.y = y;
        }
        Ok(())
    }

    /// Sets vertical errors on one point; symmetric graphs require
    /// `low == high`.
    pub fn set_point_ey(&mut self, index: usize, low: f64, high: f64) -> ChartResult<()> {
        check_magnitude(low)?;
        check_magnitude(high)?;
        if self.kind == ErrorGraphKind::Symmetric && low != high {
            return Err(ChartError::InvalidData(
                "symmetric error graph requires equal low and high y errors".to_owned(),
            ));
        }
        let point = self.point_mut(index)?;
        point.ey_low = low;
        point.ey_high = high;
        Ok(())
    }

    /// Sets horizontal errors on one point; symmetric graphs require
    /// `low == high`.
    pub fn set_point_ex(&mut self, index: usize, low: f64, high: f64) -> ChartResult<()> {
        check_magnitude(low)?;
        check_magnitude(high)?;
        if self.kind == ErrorGraphKind::Symmetric && low != high {
            return Err(ChartError::InvalidData(
                "symmetric error graph requires equal low and high x errors".to_owned(),
            ));
        }
        let point = self.point_mut(index)?;
        point.ex_low = low;
        point.ex_high = high;
        Ok(())
    }

    /// Sets the same horizontal extent on both sides of every point.
    pub fn set_all_ex(&mut self, half_width: f64) -> ChartResult<()> {
        check_magnitude(half_width)?;
        for point in &mut self.points {
            point.ex_low = half_width;
            point.ex_high = half_width;
        }
        Ok(())
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
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.fill_color = color;
        Ok(())
    }

    #[must_use]
    pub fn fill_style(&self) -> FillStyle {
        self.fill_style
    }

    pub fn set_fill_style(&mut self, style: FillStyle) -> ChartResult<()> {
        style.validate()?;
        self.fill_style = style;
        Ok(())
    }

    fn point_mut(&mut self, index: usize) -> ChartResult<&mut ErrorPoint> {
        let len = self.points.len();
        self.points.get_mut(index).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "point index {index} out of range for {len} points"
            ))
        })
    }

    fn check_len(&self, len: usize) -> ChartResult<()> {
        if len != self.points.len() {
            return Err(ChartError::InvalidData(format!(
                "expected {} values, got {len}",
                self.points.len()
            )));
        }
        Ok(())
    }
}

fn check_magnitude(value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidData(
            "error magnitudes must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ErrorGraph, ErrorGraphKind};
    use crate::core::{BinAxis, BinErrorOption, Histogram1D};

    fn filled_histogram() -> Histogram1D {
        let mut h = Histogram1D::new("h", "", BinAxis::new(2, 0.0, 4.0).expect("axis"));
        h.set_bin_content(0, 9.0).expect("set");
        h.set_bin_content(1, 16.0).expect("set");
        h
    }

    #[test]
    fn points_sit_on_bin_centres_with_half_bin_x_errors() {
        let graph =
            ErrorGraph::from_histogram(&filled_histogram(), ErrorGraphKind::Symmetric).expect("graph");
        assert_eq!(graph.len(), 2);
        let p = graph.point(1).expect("point");
        assert_eq!(p.x, 3.0);
        assert_eq!(p.y, 16.0);
        assert_eq!(p.ex_low, 1.0);
        assert_eq!(p.ey_high, 4.0);
    }

    #[test]
    fn asymmetric_graph_keeps_poisson_low_and_high() {
        let mut h = filled_histogram();
        h.set_bin_error_option(BinErrorOption::Poisson);
        let graph = ErrorGraph::from_histogram(&h, ErrorGraphKind::Asymmetric).expect("graph");
        let p = graph.point(0).expect("point");
        assert!(p.ey_high > p.ey_low);
    }

    #[test]
    fn symmetric_graph_rejects_unequal_y_errors() {
        let mut graph =
            ErrorGraph::from_histogram(&filled_histogram(), ErrorGraphKind::Symmetric).expect("graph");
        assert!(graph.set_point_ey(0, 1.0, 2.0).is_err());
        graph.set_point_ey(0, 1.5, 1.5).expect("equal");
        assert!(graph.set_point_ex(5, 0.0, 0.0).is_err());
        assert!(graph.set_point_ex(0, 0.2, 0.4).is_err());
        graph.set_point_ex(0, 0.3, 0.3).expect("equal");
    }
}
