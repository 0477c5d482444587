use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Marker shapes addressed by their conventional numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u16", into = "u16")]
pub enum MarkerStyle {
    Dot,
    Plus,
    Star,
    Circle,
    Multiply,
    FullDotSmall,
    FullDotMedium,
    #[default]
    FullDotLarge,
    FullCircle,
    FullSquare,
    FullTriangleUp,
    OpenCircle,
    OpenSquare,
}

impl MarkerStyle {
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Dot => 1,
            Self::Plus => 2,
            Self::Star => 3,
            Self::Circle => 4,
            Self::Multiply => 5,
            Self::FullDotSmall => 6,
            Self::FullDotMedium => 7,
            Self::FullDotLarge => 8,
            Self::FullCircle => 20,
            Self::FullSquare => 21,
            Self::FullTriangleUp => 22,
            Self::OpenCircle => 24,
            Self::OpenSquare => 25,
        }
    }

    pub fn from_code(code: u16) -> ChartResult<Self> {
        let style = match code {
            1 => Self::Dot,
            2 => Self::Plus,
            3 => Self::Star,
            4 => Self::Circle,
            5 => Self::Multiply,
            6 => Self::FullDotSmall,
            7 => Self::FullDotMedium,
            8 => Self::FullDotLarge,
            20 => Self::FullCircle,
            21 => Self::FullSquare,
            22 => Self::FullTriangleUp,
            24 => Self::OpenCircle,
            25 => Self::OpenSquare,
            other => {
                return Err(ChartError::InvalidData(format!(
                    "unsupported marker style code: {other}"
                )));
            }
        };
        Ok(style)
    }

    /// Nominal marker diameter in pixels.
    #[must_use]
    pub fn size_px(self) -> f64 {
        match self {
            Self::Dot => 1.0,
            Self::FullDotSmall => 2.0,
            Self::FullDotMedium => 3.0,
            Self::FullDotLarge => 4.0,
            _ => 8.0,
        }
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !matches!(
            self,
            Self::Plus | Self::Star | Self::Circle | Self::Multiply | Self::OpenCircle | Self::OpenSquare
        )
    }
}

impl TryFrom<u16> for MarkerStyle {
    type Error = ChartError;

    fn try_from(code: u16) -> ChartResult<Self> {
        Self::from_code(code)
    }
}

impl From<MarkerStyle> for u16 {
    fn from(style: MarkerStyle) -> Self {
        style.code()
    }
}

const SOLID_CODE: u16 = 1001;
const PATTERN_CODES: std::ops::RangeInclusive<u16> = 3000..=3025;

/// Area fill: hollow, solid, or one of the hatch patterns `3000..=3025`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum FillStyle {
    Hollow,
    Solid,
    Pattern(u16),
}

impl Default for FillStyle {
    fn default() -> Self {
        Self::Pattern(3003)
    }
}

impl FillStyle {
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Hollow => 0,
            Self::Solid => SOLID_CODE,
            Self::Pattern(code) => code,
        }
    }

    pub fn from_code(code: u16) -> ChartResult<Self> {
        match code {
            0 => Ok(Self::Hollow),
            SOLID_CODE => Ok(Self::Solid),
            code if PATTERN_CODES.contains(&code) => Ok(Self::Pattern(code)),
            other => Err(ChartError::InvalidData(format!(
                "unsupported fill style code: {other}"
            ))),
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        Self::from_code(self.code()).map(|_| ())
    }

    /// Spacing in pixels between hatch lines, `None` for non-pattern fills.
    #[must_use]
    pub fn hatch_spacing_px(self) -> Option<f64> {
        match self {
            Self::Pattern(code) => Some(4.0 + f64::from(code.saturating_sub(3000) % 4) * 2.0),
            Self::Hollow | Self::Solid => None,
        }
    }
}

impl TryFrom<u16> for FillStyle {
    type Error = ChartError;

    fn try_from(code: u16) -> ChartResult<Self> {
        Self::from_code(code)
    }
}

impl From<FillStyle> for u16 {
    fn from(style: FillStyle) -> Self {
        style.code()
    }
}

#[cfg(test)]
mod tests {
    use super::{FillStyle, MarkerStyle};

    #[test]
    fn marker_codes_are_stable() {
        assert_eq!(MarkerStyle::FullDotLarge.code(), 8);
        assert_eq!(MarkerStyle::from_code(20).expect("code"), MarkerStyle::FullCircle);
        assert!(MarkerStyle::from_code(99).is_err());
    }

    #[test]
    fn fill_style_codes_cover_hollow_solid_and_patterns() {
        assert_eq!(FillStyle::from_code(0).expect("hollow"), FillStyle::Hollow);
        assert_eq!(FillStyle::from_code(1001).expect("solid"), FillStyle::Solid);
        assert_eq!(
            FillStyle::from_code(3003).expect("pattern"),
            FillStyle::Pattern(3003)
        );
        assert!(FillStyle::from_code(3026).is_err());
        assert!(FillStyle::Pattern(42).validate().is_err());
    }

    #[test]
    fn fill_style_serializes_as_code() {
        let json = serde_json::to_string(&FillStyle::default()).expect("serialize");
        assert_eq!(json, "3003");
        let back: FillStyle = serde_json::from_str("1001").expect("deserialize");
        assert_eq!(back, FillStyle::Solid);
    }
}
