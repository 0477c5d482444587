use std::str::FromStr;

use crate::error::{ChartError, ChartResult};

/// How error bars are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorBarMode {
    /// `E`: bars, skipping empty bins.
    Bars,
    /// `E0`: bars, including empty bins.
    BarsWithEmpty,
    /// `E1`: bars with perpendicular end caps.
    BarsWithCaps,
    /// `E2`: filled boxes spanning the error extents.
    Boxes,
}

/// Parsed draw-option string such as `"HIST"` or `"SAME E0"`.
///
/// Tokens are case-insensitive and separated by whitespace or commas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawOption {
    /// Draw into the existing frame without a fresh axis box.
    pub same: bool,
    pub hist: bool,
    pub line: bool,
    pub markers: bool,
    pub errors: Option<ErrorBarMode>,
}

impl DrawOption {
    pub fn parse(input: &str) -> ChartResult<Self> {
        let mut option = Self::default();
        for token in input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
        {
            let token = token.to_ascii_uppercase();
            match token.as_str() {
                "SAME" => option.same = true,
                "HIST" => option.hist = true,
                "L" => option.line = true,
                "P" => option.markers = true,
                "E" => option.set_errors(ErrorBarMode::Bars)?,
                "E0" => option.set_errors(ErrorBarMode::BarsWithEmpty)?,
                "E1" => option.set_errors(ErrorBarMode::BarsWithCaps)?,
                "E2" => option.set_errors(ErrorBarMode::Boxes)?,
                other => {
                    return Err(ChartError::InvalidData(format!(
                        "unknown draw option token: `{other}`"
                    )));
                }
            }
        }
        Ok(option)
    }

    fn set_errors(&mut self, mode: ErrorBarMode) -> ChartResult<()> {
        match self.errors {
            Some(existing) if existing != mode => Err(ChartError::InvalidData(
                "conflicting error bar draw options".to_owned(),
            )),
            _ => {
                self.errors = Some(mode);
                Ok(())
            }
        }
    }

    /// Whether nothing but `SAME` was requested.
    #[must_use]
    pub fn is_bare(self) -> bool {
        !self.hist && !self.line && !self.markers && self.errors.is_none()
    }

    /// Histogram outline: explicit `HIST`, or the fallback when nothing else
    /// was asked for.
    #[must_use]
    pub fn draws_outline(self) -> bool {
        self.hist || self.is_bare()
    }

    /// Error bars for an overlay, defaulting to `E` when nothing was asked for.
    #[must_use]
    pub fn overlay_error_mode(self) -> Option<ErrorBarMode> {
        if self.is_bare() {
            return Some(ErrorBarMode::Bars);
        }
        self.errors
    }
}

impl FromStr for DrawOption {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        Self::parse(input)
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawOption, ErrorBarMode};

    #[test]
    fn parses_default_overlay_option() {
        let option: DrawOption = "SAME E0".parse().expect("parse");
        assert!(option.same);
        assert_eq!(option.errors, Some(ErrorBarMode::BarsWithEmpty));
        assert!(!option.draws_outline());
    }

    #[test]
    fn tokens_are_case_insensitive_and_comma_separated() {
        let option = DrawOption::parse("hist,p").expect("parse");
        assert!(option.hist);
        assert!(option.markers);
    }

    #[test]
    fn empty_option_falls_back_to_outline_and_bars() {
        let option = DrawOption::parse("").expect("parse");
        assert!(option.draws_outline());
        assert_eq!(option.overlay_error_mode(), Some(ErrorBarMode::Bars));
    }

    #[test]
    fn rejects_unknown_and_conflicting_tokens() {
        assert!(DrawOption::parse("HIST X").is_err());
        assert!(DrawOption::parse("E0 E2").is_err());
        assert!(DrawOption::parse("E1 E1").is_ok());
    }
}
