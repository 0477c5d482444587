use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Pixel rectangle inside a viewport where series geometry is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    /// Insets the viewport by fixed pixel margins, collapsing to the full
    /// viewport when the margins do not fit.
    #[must_use]
    pub fn inset(viewport: Viewport, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        if left + right >= width || top + bottom >= height {
            return Self {
                left: 0.0,
                top: 0.0,
                right: width,
                bottom: height,
            };
        }
        Self {
            left,
            top,
            right: width - right,
            bottom: height - bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::{PlotArea, Viewport};

    #[test]
    fn inset_falls_back_to_full_viewport_when_margins_overflow() {
        let area = PlotArea::inset(Viewport::new(50, 40), 40.0, 10.0, 20.0, 10.0);
        assert_eq!(area.left, 0.0);
        assert_eq!(area.right, 50.0);
        assert_eq!(area.height(), 40.0);
    }
}
