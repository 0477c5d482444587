use crate::core::{BinErrorOption, ErrorGraph, ErrorGraphKind, Histogram1D};
use crate::error::{ChartError, ChartResult, PrecedenceWarning};

use super::ErrorMode;

/// Caller-supplied vertical errors for `ChartSeries::set_errors`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorValues<'a> {
    Symmetric(&'a [f64]),
    Asymmetric { high: &'a [f64], low: &'a [f64] },
}

impl ErrorValues<'_> {
    #[must_use]
    pub fn graph_kind(&self) -> ErrorGraphKind {
        match self {
            Self::Symmetric(_) => ErrorGraphKind::Symmetric,
            Self::Asymmetric { .. } => ErrorGraphKind::Asymmetric,
        }
    }
}

/// The single source of truth for overlay vertical errors.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum VerticalErrorSource {
    /// Derived from bin contents through the histogram's bin error option.
    Computed,
    Explicit { low: Vec<f64>, high: Vec<f64> },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedErrorSource {
    pub source: VerticalErrorSource,
    pub warning: Option<PrecedenceWarning>,
}

/// Arrays as supplied, before precedence is applied.
#[derive(Debug, Clone, Copy)]
enum SuppliedArrays<'a> {
    Symmetric(Option<&'a [f64]>),
    Asymmetric {
        high: Option<&'a [f64]>,
        low: Option<&'a [f64]>,
    },
}

impl SuppliedArrays<'_> {
    fn any_supplied(self) -> bool {
        match self {
            Self::Symmetric(values) => values.is_some(),
            Self::Asymmetric { high, low } => high.is_some() || low.is_some(),
        }
    }
}

pub(crate) fn resolve_configured(
    mode: &ErrorMode,
    option: Option<BinErrorOption>,
    bin_count: usize,
) -> ChartResult<ResolvedErrorSource> {
    let supplied = match mode {
        ErrorMode::Symmetric { values } => SuppliedArrays::Symmetric(values.as_deref()),
        ErrorMode::Asymmetric { high, low } => SuppliedArrays::Asymmetric {
            high: high.as_deref(),
            low: low.as_deref(),
        },
    };
    resolve(supplied, option, bin_count)
}

pub(crate) fn resolve_values(
    values: ErrorValues<'_>,
    option: Option<BinErrorOption>,
    bin_count: usize,
) -> ChartResult<ResolvedErrorSource> {
    let supplied = match values {
        ErrorValues::Symmetric(values) => SuppliedArrays::Symmetric(Some(values)),
        ErrorValues::Asymmetric { high, low } => SuppliedArrays::Asymmetric {
            high: Some(high),
            low: Some(low),
        },
    };
    resolve(supplied, option, bin_count)
}

fn resolve(
    supplied: SuppliedArrays<'_>,
    option: Option<BinErrorOption>,
    bin_count: usize,
) -> ChartResult<ResolvedErrorSource> {
    if option.is_some() {
        let warning = supplied
            .any_supplied()
            .then_some(PrecedenceWarning::ComputationOptionOverridesErrorArrays);
        return Ok(ResolvedErrorSource {
            source: VerticalErrorSource::Computed,
            warning,
        });
    }

    let source = match supplied {
        SuppliedArrays::Symmetric(Some(values)) => {
            check_error_array("error values", values, bin_count)?;
            VerticalErrorSource::Explicit {
                low: values.to_vec(),
                high: values.to_vec(),
            }
        }
        SuppliedArrays::Symmetric(None) => {
            return Err(ChartError::configuration(
                "symmetric errors require error values or a bin error option",
            ));
        }
        SuppliedArrays::Asymmetric {
            high: Some(high),
            low: Some(low),
        } => {
            check_error_array("high errors", high, bin_count)?;
            check_error_array("low errors", low, bin_count)?;
            VerticalErrorSource::Explicit {
                low: low.to_vec(),
                high: high.to_vec(),
            }
        }
        SuppliedArrays::Asymmetric { .. } => {
            return Err(ChartError::configuration(
                "asymmetric errors require both high and low errors or a bin error option",
            ));
        }
    };

    Ok(ResolvedErrorSource {
        source,
        warning: None,
    })
}

/// Length and magnitude checks shared by vertical and horizontal arrays.
pub(crate) fn check_error_array(label: &str, values: &[f64], bin_count: usize) -> ChartResult<()> {
    if values.len() != bin_count {
        return Err(ChartError::configuration(format!(
            "{label} must have {bin_count} entries, got {}",
            values.len()
        )));
    }
    if values.iter().any(|value| !value.is_finite() || *value < 0.0) {
        return Err(ChartError::InvalidData(format!(
            "{label} must be finite and >= 0"
        )));
    }
    Ok(())
}

/// Writes the vertical errors selected by `source` into `graph`.
pub(crate) fn apply_vertical_errors(
    graph: &mut ErrorGraph,
    source: &VerticalErrorSource,
    histogram: &Histogram1D,
) -> ChartResult<()> {
    match source {
        VerticalErrorSource::Computed => {
            let kind = graph.kind();
            for (index, error) in histogram.bin_errors()?.into_iter().enumerate() {
                match kind {
                    ErrorGraphKind::Symmetric => {
                        graph.set_point_ey(index, error.mean(), error.mean())?;
                    }
                    ErrorGraphKind::Asymmetric => {
                        graph.set_point_ey(index, error.low, error.high)?;
                    }
                }
            }
        }
        VerticalErrorSource::Explicit { low, high } => {
            for (index, (&low, &high)) in low.iter().zip(high).enumerate() {
                graph.set_point_ey(index, low, high)?;
            }
        }
    }
    Ok(())
}
