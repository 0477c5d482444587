mod frame;
mod layer_stack;
mod layered_frame;
mod null_renderer;
mod primitives;
mod style;

pub use frame::RenderFrame;
pub use layer_stack::CanvasLayerKind;
pub use layered_frame::{LayerPrimitives, LayeredRenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, MarkerPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use style::{FillStyle, MarkerStyle};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from histogram and error-overlay logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
