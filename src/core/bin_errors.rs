use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

use crate::error::{ChartError, ChartResult};

/// One standard deviation, two-sided.
const ONE_SIGMA_CL: f64 = 0.682_689_492_137_086;
const NINETY_FIVE_CL: f64 = 0.95;
/// Largest count whose interval comes from exact chi-squared quantiles.
const EXACT_QUANTILE_MAX_COUNT: f64 = 10_000.0;

/// Rule by which per-bin errors are derived from bin content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BinErrorOption {
    /// `sqrt(|content|)`, symmetric.
    #[default]
    Normal,
    /// Garwood central Poisson interval at 68.27% CL.
    Poisson,
    /// Garwood central Poisson interval at 95% CL.
    Poisson2,
}

/// Downward and upward error magnitudes of one bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinError {
    pub low: f64,
    pub high: f64,
}

impl BinError {
    #[must_use]
    pub const fn symmetric(value: f64) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    /// Single magnitude used where only symmetric errors can be shown.
    #[must_use]
    pub fn mean(self) -> f64 {
        0.5 * (self.low + self.high)
    }
}

impl BinErrorOption {
    #[must_use]
    pub fn confidence_level(self) -> Option<f64> {
        match self {
            Self::Normal => None,
            Self::Poisson => Some(ONE_SIGMA_CL),
            Self::Poisson2 => Some(NINETY_FIVE_CL),
        }
    }

    pub fn bin_error(self, content: f64) -> ChartResult<BinError> {
        if !content.is_finite() {
            return Err(ChartError::InvalidData(
                "bin content must be finite to derive errors".to_owned(),
            ));
        }

        let Some(cl) = self.confidence_level() else {
            return Ok(BinError::symmetric(content.abs().sqrt()));
        };

        match near_nonneg_integer(content) {
            Some(n) => garwood_interval(n, 1.0 - cl),
            // Weighted or scaled contents have no counting interpretation.
            None if content > 0.0 => Ok(BinError::symmetric(content.sqrt())),
            None => Ok(BinError::symmetric(0.0)),
        }
    }

    /// Derives errors for every bin content in order.
    pub fn bin_errors(self, contents: &[f64]) -> ChartResult<Vec<BinError>> {
        contents
            .iter()
            .map(|&content| self.bin_error(content))
            .collect()
    }
}

fn near_nonneg_integer(x: f64) -> Option<f64> {
    if !(x.is_finite() && x >= 0.0) {
        return None;
    }
    let r = x.round();
    ((x - r).abs() <= 1e-9).then_some(r)
}

/// Central interval for `count` observed events at `1 - alpha` CL.
///
/// Exact chi-squared quantiles lose precision once the degrees of freedom
/// reach the hundreds of thousands, so large counts use the Wilson-Hilferty
/// form instead.
fn garwood_interval(count: f64, alpha: f64) -> ChartResult<BinError> {
    if count > EXACT_QUANTILE_MAX_COUNT {
        return wilson_hilferty_interval(count, alpha);
    }

    // lo = n - 0.5 * chi2_{alpha/2, 2n}
    // hi = 0.5 * chi2_{1-alpha/2, 2(n+1)} - n
    let low = if count == 0.0 {
        0.0
    } else {
        count - 0.5 * chi_squared(2.0 * count)?.inverse_cdf(alpha / 2.0)
    };
    let high = 0.5 * chi_squared(2.0 * (count + 1.0))?.inverse_cdf(1.0 - alpha / 2.0) - count;

    if low.is_finite() && high.is_finite() && low >= 0.0 && high >= 0.0 {
        Ok(BinError { low, high })
    } else {
        wilson_hilferty_interval(count, alpha)
    }
}

/// Cube-root normal approximation of the Garwood limits, arranged so the
/// distance from `count` never comes from subtracting two large numbers.
fn wilson_hilferty_interval(count: f64, alpha: f64) -> ChartResult<BinError> {
    let z = standard_normal()?.inverse_cdf(1.0 - alpha / 2.0);

    // L = n (1 - d)^3 with d = 1/(9n) + z/(3 sqrt n), so n - L = n d (3 - 3d + d^2).
    let low = if count == 0.0 {
        0.0
    } else {
        let d = 1.0 / (9.0 * count) + z / (3.0 * count.sqrt());
        (count * d * (3.0 - 3.0 * d + d * d)).clamp(0.0, count)
    };
    // U = m (1 + e)^3 with m = n + 1 and e = z/(3 sqrt m) - 1/(9m).
    let m = count + 1.0;
    let e = z / (3.0 * m.sqrt()) - 1.0 / (9.0 * m);
    let high = (1.0 + m * e * (3.0 + 3.0 * e + e * e)).max(0.0);

    Ok(BinError { low, high })
}

fn chi_squared(freedom: f64) -> ChartResult<ChiSquared> {
    ChiSquared::new(freedom).map_err(|err| {
        ChartError::InvalidData(format!("chi-squared with {freedom} dof: {err}"))
    })
}

fn standard_normal() -> ChartResult<Normal> {
    Normal::new(0.0, 1.0)
        .map_err(|err| ChartError::InvalidData(format!("standard normal: {err}")))
}

#[cfg(test)]
mod tests {
    use super::{BinError, BinErrorOption};

    #[test]
    fn normal_errors_are_sqrt_of_magnitude() {
        let err = BinErrorOption::Normal.bin_error(-9.0).expect("normal");
        assert_eq!(err, BinError::symmetric(3.0));
    }

    #[test]
    fn poisson_zero_count_has_only_upper_error() {
        let err = BinErrorOption::Poisson.bin_error(0.0).expect("poisson");
        assert_eq!(err.low, 0.0);
        assert!((err.high - 1.841).abs() < 1e-3, "high = {}", err.high);
    }

    #[test]
    fn poisson_interval_is_asymmetric_for_small_counts() {
        let err = BinErrorOption::Poisson.bin_error(4.0).expect("poisson");
        assert!((err.low - 1.914).abs() < 1e-3, "low = {}", err.low);
        assert!((err.high - 3.162).abs() < 1e-3, "high = {}", err.high);
    }

    #[test]
    fn wider_confidence_gives_wider_interval() {
        let narrow = BinErrorOption::Poisson.bin_error(10.0).expect("68");
        let wide = BinErrorOption::Poisson2.bin_error(10.0).expect("95");
        assert!(wide.low > narrow.low);
        assert!(wide.high > narrow.high);
    }

    #[test]
    fn non_integer_content_falls_back_to_sqrt() {
        let err = BinErrorOption::Poisson.bin_error(2.25).expect("fallback");
        assert_eq!(err, BinError::symmetric(1.5));
    }

    #[test]
    fn poisson_interval_stays_finite_for_a_million_counts() {
        let err = BinErrorOption::Poisson.bin_error(1e6).expect("poisson");
        assert!((err.low - 1000.0).abs() < 1e-2, "low = {}", err.low);
        assert!((err.high - 1001.0).abs() < 1e-2, "high = {}", err.high);
    }

    #[test]
    fn poisson_interval_for_huge_counts_approaches_sqrt() {
        let err = BinErrorOption::Poisson.bin_error(1e12).expect("poisson");
        assert!((err.low - 1e6).abs() < 1e-2, "low = {}", err.low);
        assert!((err.high - (1e6 + 1.0)).abs() < 1e-2, "high = {}", err.high);

        let wide = BinErrorOption::Poisson2.bin_error(1e12).expect("poisson2");
        assert!((wide.low / 1e6 - 1.96).abs() < 1e-3, "low = {}", wide.low);
    }

    #[test]
    fn poisson_interval_handles_counts_beyond_u64() {
        let err = BinErrorOption::Poisson.bin_error(1e20).expect("poisson");
        assert!((err.low / 1e10 - 1.0).abs() < 1e-9, "low = {}", err.low);
        assert!((err.high / 1e10 - 1.0).abs() < 1e-9, "high = {}", err.high);
    }

    #[test]
    fn approximation_matches_exact_quantiles_at_the_switch_over() {
        let exact = BinErrorOption::Poisson.bin_error(10_000.0).expect("exact");
        let approx = BinErrorOption::Poisson.bin_error(10_001.0).expect("approx");
        assert!((exact.low - 100.0).abs() < 1e-2, "low = {}", exact.low);
        assert!((approx.low - exact.low).abs() < 1e-2);
        assert!((approx.high - exact.high).abs() < 1e-2);
    }
}
