use crate::error::{ChartError, ChartResult};

/// Linear mapping from a data domain onto a pixel span.
///
/// The pixel span may run in either direction so the same type serves the
/// x axis (left to right) and the y axis (bottom to top).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start: 0.0,
            pixel_end: 1.0,
        })
    }

    /// Sets the pixel span the domain maps onto.
    pub fn with_pixel_span(mut self, pixel_start: f64, pixel_end: f64) -> ChartResult<Self> {
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
            return Err(ChartError::InvalidData(
                "scale pixel span must be finite and non-zero".to_owned(),
            ));
        }
        self.pixel_start = pixel_start;
        self.pixel_end = pixel_end;
        Ok(self)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.pixel_start + normalized * (self.pixel_end - self.pixel_start))
    }

    /// Same as `domain_to_pixel` but pins the result inside the pixel span.
    pub fn domain_to_clamped_pixel(self, value: f64) -> ChartResult<f64> {
        let pixel = self.domain_to_pixel(value)?;
        let (lo, hi) = if self.pixel_start <= self.pixel_end {
            (self.pixel_start, self.pixel_end)
        } else {
            (self.pixel_end, self.pixel_start)
        };
        Ok(pixel.clamp(lo, hi))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - self.pixel_start) / (self.pixel_end - self.pixel_start);
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}
