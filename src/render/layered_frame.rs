use crate::core::Viewport;

use super::{
    CanvasLayerKind, LinePrimitive, MarkerPrimitive, RectPrimitive, RenderFrame, TextPrimitive,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub markers: Vec<MarkerPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    fn empty(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            rects: Vec::new(),
            markers: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.markers.is_empty()
            && self.texts.is_empty()
    }
}

/// Frame split into canonical paint layers so that overlays stack above the
/// series they decorate regardless of emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerPrimitives>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: CanvasLayerKind::ORDER
                .into_iter()
                .map(LayerPrimitives::empty)
                .collect(),
        }
    }

    pub fn push_line(&mut self, kind: CanvasLayerKind, line: LinePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.lines.push(line);
        }
    }

    pub fn push_rect(&mut self, kind: CanvasLayerKind, rect: RectPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.rects.push(rect);
        }
    }

    pub fn push_marker(&mut self, kind: CanvasLayerKind, marker: MarkerPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.markers.push(marker);
        }
    }

    pub fn push_text(&mut self, kind: CanvasLayerKind, text: TextPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.texts.push(text);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        self.flatten_layers(&CanvasLayerKind::ORDER)
    }

    #[must_use]
    pub fn flatten_layers(&self, include_layers: &[CanvasLayerKind]) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for layer in &self.layers {
            if !include_layers.contains(&layer.kind) {
                continue;
            }
            frame.lines.extend(layer.lines.iter().copied());
            frame.rects.extend(layer.rects.iter().copied());
            frame.markers.extend(layer.markers.iter().copied());
            frame.texts.extend(layer.texts.iter().cloned());
        }
        frame
    }

    fn layer_mut(&mut self, kind: CanvasLayerKind) -> Option<&mut LayerPrimitives> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::LayeredRenderFrame;
    use crate::core::Viewport;
    use crate::render::{CanvasLayerKind, Color, LinePrimitive};

    #[test]
    fn flatten_orders_overlay_after_series() {
        let mut frame = LayeredRenderFrame::new(Viewport::new(100, 100));
        let overlay = LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 1.0, Color::RED);
        let series = LinePrimitive::new(2.0, 2.0, 3.0, 3.0, 1.0, Color::BLACK);
        frame.push_line(CanvasLayerKind::Overlay, overlay);
        frame.push_line(CanvasLayerKind::Series, series);

        let flat = frame.flatten();
        assert_eq!(flat.lines, vec![series, overlay]);

        let only_overlay = frame.flatten_layers(&[CanvasLayerKind::Overlay]);
        assert_eq!(only_overlay.lines, vec![overlay]);
    }
}
