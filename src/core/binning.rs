use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Uniform binning of `[low_edge, high_edge)` into `bin_count` bins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinAxis {
    bin_count: usize,
    low_edge: f64,
    high_edge: f64,
}

impl BinAxis {
    pub fn new(bin_count: usize, low_edge: f64, high_edge: f64) -> ChartResult<Self> {
        if bin_count == 0 {
            return Err(ChartError::configuration("bin count must be > 0"));
        }
        if !low_edge.is_finite() || !high_edge.is_finite() {
            return Err(ChartError::configuration("bin edges must be finite"));
        }
        if low_edge >= high_edge {
            return Err(ChartError::configuration(format!(
                "low edge ({low_edge}) must be below high edge ({high_edge})"
            )));
        }

        Ok(Self {
            bin_count,
            low_edge,
            high_edge,
        })
    }

    #[must_use]
    pub fn bin_count(self) -> usize {
        self.bin_count
    }

    #[must_use]
    pub fn low_edge(self) -> f64 {
        self.low_edge
    }

    #[must_use]
    pub fn high_edge(self) -> f64 {
        self.high_edge
    }

    #[must_use]
    pub fn bin_width(self) -> f64 {
        (self.high_edge - self.low_edge) / self.bin_count as f64
    }

    /// Lower edge of bin `index` (0-based).
    #[must_use]
    pub fn bin_low_edge(self, index: usize) -> f64 {
        self.low_edge + index as f64 * self.bin_width()
    }

    #[must_use]
    pub fn bin_center(self, index: usize) -> f64 {
        self.low_edge + (index as f64 + 0.5) * self.bin_width()
    }

    /// Bin index containing `x`, or `None` outside `[low_edge, high_edge)`.
    #[must_use]
    pub fn find_bin(self, x: f64) -> Option<usize> {
        if !x.is_finite() || x < self.low_edge || x >= self.high_edge {
            return None;
        }
        let index = ((x - self.low_edge) / self.bin_width()) as usize;
        Some(index.min(self.bin_count - 1))
    }
}
