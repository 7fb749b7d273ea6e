//! Layout configuration and chapter scan options

use crate::error::{Result, TypesetError};
use serde::{Deserialize, Serialize};

/// Default lines per page
pub const DEFAULT_MAX_LINES_PER_PAGE: usize = 30;

/// Default characters per physical line
pub const DEFAULT_MAX_CHARS_PER_LINE: usize = 80;

/// Default title for chapters without a heading
pub const UNTITLED: &str = "Untitled";

/// Unit in which line length is measured when wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WrapUnit {
    /// Unicode scalar values
    #[default]
    CodePoint,
    /// Extended grapheme clusters (keeps combining marks with their base)
    Grapheme,
}

/// Page-size parameters for pagination.
///
/// Immutable once built; both limits are guaranteed positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLayoutConfig")]
pub struct LayoutConfig {
    max_lines_per_page: usize,
    max_chars_per_line: usize,
    wrap_unit: WrapUnit,
    keep_wrapped_lines_together: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_lines_per_page: DEFAULT_MAX_LINES_PER_PAGE,
            max_chars_per_line: DEFAULT_MAX_CHARS_PER_LINE,
            wrap_unit: WrapUnit::CodePoint,
            keep_wrapped_lines_together: false,
        }
    }
}

impl LayoutConfig {
    /// Create a configuration, rejecting zero limits
    pub fn new(max_lines_per_page: usize, max_chars_per_line: usize) -> Result<Self> {
        let (max_lines_per_page, max_chars_per_line) =
            validate_limits(saturating_i64(max_lines_per_page), saturating_i64(max_chars_per_line))
                .map_err(|reason| {
                    log::warn!("rejected layout configuration: {reason}");
                    TypesetError::InvalidConfiguration(reason)
                })?;

        Ok(Self {
            max_lines_per_page,
            max_chars_per_line,
            ..Self::default()
        })
    }

    /// Parse a JSON configuration such as `{"maxLinesPerPage": 30, "maxCharsPerLine": 40}`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            log::warn!("rejected layout configuration: {e}");
            TypesetError::InvalidConfiguration(e.to_string())
        })
    }

    pub fn with_wrap_unit(mut self, wrap_unit: WrapUnit) -> Self {
        self.wrap_unit = wrap_unit;
        self
    }

    pub fn with_keep_wrapped_lines_together(mut self, keep: bool) -> Self {
        self.keep_wrapped_lines_together = keep;
        self
    }

    pub fn max_lines_per_page(&self) -> usize {
        self.max_lines_per_page
    }

    pub fn max_chars_per_line(&self) -> usize {
        self.max_chars_per_line
    }

    pub fn wrap_unit(&self) -> WrapUnit {
        self.wrap_unit
    }

    /// Whether a wrapped logical line moves to a fresh page rather than straddle one
    pub fn keep_wrapped_lines_together(&self) -> bool {
        self.keep_wrapped_lines_together
    }
}

/// Unvalidated wire form; signed so negative input is reported rather than truncated
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLayoutConfig {
    #[serde(default = "default_max_lines")]
    max_lines_per_page: i64,
    #[serde(default = "default_max_chars")]
    max_chars_per_line: i64,
    #[serde(default)]
    wrap_unit: WrapUnit,
    #[serde(default)]
    keep_wrapped_lines_together: bool,
}

fn default_max_lines() -> i64 {
    DEFAULT_MAX_LINES_PER_PAGE as i64
}

fn default_max_chars() -> i64 {
    DEFAULT_MAX_CHARS_PER_LINE as i64
}

impl TryFrom<RawLayoutConfig> for LayoutConfig {
    type Error = String;

    fn try_from(raw: RawLayoutConfig) -> std::result::Result<Self, Self::Error> {
        let (max_lines_per_page, max_chars_per_line) =
            validate_limits(raw.max_lines_per_page, raw.max_chars_per_line)?;
        Ok(Self {
            max_lines_per_page,
            max_chars_per_line,
            wrap_unit: raw.wrap_unit,
            keep_wrapped_lines_together: raw.keep_wrapped_lines_together,
        })
    }
}

fn saturating_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn validate_limits(lines: i64, chars: i64) -> std::result::Result<(usize, usize), String> {
    if lines <= 0 {
        return Err(format!("maxLinesPerPage must be positive, got {lines}"));
    }
    if chars <= 0 {
        return Err(format!("maxCharsPerLine must be positive, got {chars}"));
    }
    Ok((lines as usize, chars as usize))
}

/// Options controlling which lines start a chapter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanOptions {
    /// Deepest `#` level that starts a chapter; deeper headings stay body text.
    /// Zero disables markdown headings.
    pub max_heading_level: u8,
    /// Recognise `第N章` style numbered headings
    pub numbered_headings: bool,
    /// Title given to chapters without a heading
    pub untitled_title: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 1,
            numbered_headings: false,
            untitled_title: UNTITLED.to_string(),
        }
    }
}

impl ScanOptions {
    pub fn with_max_heading_level(mut self, level: u8) -> Self {
        self.max_heading_level = level.min(6);
        self
    }

    pub fn with_numbered_headings(mut self, enabled: bool) -> Self {
        self.numbered_headings = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.max_lines_per_page(), 30);
        assert_eq!(config.max_chars_per_line(), 80);
        assert_eq!(config.wrap_unit(), WrapUnit::CodePoint);
        assert!(!config.keep_wrapped_lines_together());
    }

    #[test]
    fn test_rejects_zero_limits() {
        assert!(matches!(
            LayoutConfig::new(0, 80),
            Err(TypesetError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            LayoutConfig::new(10, 0),
            Err(TypesetError::InvalidConfiguration(_))
        ));
        assert!(LayoutConfig::new(1, 1).is_ok());
    }

    #[test]
    fn test_from_json() {
        let config =
            LayoutConfig::from_json(r#"{"maxLinesPerPage": 2, "maxCharsPerLine": 40, "wrapUnit": "grapheme"}"#)
                .unwrap();
        assert_eq!(config.max_lines_per_page(), 2);
        assert_eq!(config.max_chars_per_line(), 40);
        assert_eq!(config.wrap_unit(), WrapUnit::Grapheme);

        let config = LayoutConfig::from_json("{}").unwrap();
        assert_eq!(config, LayoutConfig::default());
    }

    #[test]
    fn test_from_json_rejects_negative() {
        let err = LayoutConfig::from_json(r#"{"maxLinesPerPage": -3}"#).unwrap_err();
        match err {
            TypesetError::InvalidConfiguration(msg) => {
                assert!(msg.contains("maxLinesPerPage must be positive, got -3"), "{msg}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_scan_options_json_defaults() {
        let opts: ScanOptions = serde_json::from_str(r#"{"maxHeadingLevel": 2}"#).unwrap();
        assert_eq!(opts.max_heading_level, 2);
        assert_eq!(opts.untitled_title, "Untitled");
        assert!(!opts.numbered_headings);
    }
}
