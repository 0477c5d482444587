pub mod bin_errors;
pub mod binning;
pub mod error_graph;
pub mod histogram;
pub mod scale;
pub mod types;

pub use bin_errors::{BinError, BinErrorOption};
pub use binning::BinAxis;
pub use error_graph::{ErrorGraph, ErrorGraphKind, ErrorPoint};
pub use histogram::Histogram1D;
pub use scale::LinearScale;
pub use types::{PlotArea, Viewport};
