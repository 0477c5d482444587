use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Invariant violation in series configuration or usage.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ChartError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Advisory emitted when two error sources compete and one is discarded.
///
/// Warnings never abort an operation. They are logged through `tracing` and
/// recorded on the series so callers can inspect them afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PrecedenceWarning {
    #[error("bin error option is set; explicit error arrays are ignored")]
    ComputationOptionOverridesErrorArrays,

    #[error("explicit horizontal errors were supplied; x error suppression is disabled")]
    HorizontalErrorsOverrideSuppression,
}
