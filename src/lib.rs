//! binplot: histogram series with optional error-bar overlays.
//!
//! A [`ChartSeries`] binds a fixed-binning histogram to an error overlay built
//! from the same bins, driven by one validated [`ChartSeriesConfig`]. Drawing
//! goes through the backend-agnostic [`render::Renderer`] contract.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartSeries, ChartSeriesConfig, ErrorOverlayConfig};
pub use error::{ChartError, ChartResult, PrecedenceWarning};
