use serde::{Deserialize, Serialize};

/// Paint layers of one plot, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Axis,
    Series,
    Overlay,
    Labels,
}

impl CanvasLayerKind {
    /// Canonical back-to-front order.
    pub const ORDER: [Self; 5] = [
        Self::Background,
        Self::Axis,
        Self::Series,
        Self::Overlay,
        Self::Labels,
    ];
}

#[cfg(test)]
mod tests {
    use super::CanvasLayerKind;

    #[test]
    fn overlay_paints_above_series() {
        let series = CanvasLayerKind::ORDER
            .iter()
            .position(|kind| *kind == CanvasLayerKind::Series);
        let overlay = CanvasLayerKind::ORDER
            .iter()
            .position(|kind| *kind == CanvasLayerKind::Overlay);
        assert!(series < overlay);
    }
}
