//! Configuration for one formatting request.
//!
//! Every knob lives in [`FormatOptions`]: the chosen preset plus one boolean
//! per tidy pass. The struct is immutable once built and lives exactly as
//! long as the request it configures. A builder keeps call sites readable —
//! most callers only flip one or two flags away from the defaults.

use crate::preset::StylePreset;
use serde::{Deserialize, Serialize};

/// Options controlling one formatting run.
///
/// # Example
/// ```rust
/// use docsmith::FormatOptions;
///
/// let options = FormatOptions::builder()
///     .preset_token("modern")
///     .auto_number_headings(true)
///     .build();
/// assert!(options.tidy_spacing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Visual preset applied during style synthesis. Default: classic.
    pub preset: StylePreset,

    /// Justify body paragraphs instead of left-aligning them. Default: true.
    pub justify: bool,

    /// Run the spacing-normalization pass. Default: true.
    pub tidy_spacing: bool,

    /// Title-case headings of levels 1–3. Default: true.
    pub title_case_headings: bool,

    /// Emit CSS counter rules that number headings (`2.3.1 `). The numbering
    /// lives entirely in the stylesheet; no text is rewritten. Default: false.
    pub auto_number_headings: bool,

    /// Replace straight quotes with directional curly quotes. Default: true.
    pub convert_quotes: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            preset: StylePreset::Classic,
            justify: true,
            tidy_spacing: true,
            title_case_headings: true,
            auto_number_headings: false,
            convert_quotes: true,
        }
    }
}

impl FormatOptions {
    pub fn builder() -> FormatOptionsBuilder {
        FormatOptionsBuilder {
            options: Self::default(),
        }
    }
}

/// Builder for [`FormatOptions`].
#[derive(Debug)]
pub struct FormatOptionsBuilder {
    options: FormatOptions,
}

impl FormatOptionsBuilder {
    pub fn preset(mut self, preset: StylePreset) -> Self {
        self.options.preset = preset;
        self
    }

    /// Resolve a preset from its wire token, with the silent classic
    /// fallback.
    pub fn preset_token(mut self, token: &str) -> Self {
        self.options.preset = StylePreset::from_token(token);
        self
    }

    pub fn justify(mut self, v: bool) -> Self {
        self.options.justify = v;
        self
    }

    pub fn tidy_spacing(mut self, v: bool) -> Self {
        self.options.tidy_spacing = v;
        self
    }

    pub fn title_case_headings(mut self, v: bool) -> Self {
        self.options.title_case_headings = v;
        self
    }

    pub fn auto_number_headings(mut self, v: bool) -> Self {
        self.options.auto_number_headings = v;
        self
    }

    pub fn convert_quotes(mut self, v: bool) -> Self {
        self.options.convert_quotes = v;
        self
    }

    pub fn build(self) -> FormatOptions {
        self.options
    }
}

/// Parse one boolean form field.
///
/// `"true"`/`"1"` enable, `"false"`/`"0"` disable; an absent or unrecognised
/// value falls back to the field's documented default. Matching is trimmed
/// and case-insensitive.
pub fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if v == "true" || v == "1" => true,
        Some(v) if v == "false" || v == "0" => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documentation() {
        let o = FormatOptions::default();
        assert_eq!(o.preset, StylePreset::Classic);
        assert!(o.justify);
        assert!(o.tidy_spacing);
        assert!(o.title_case_headings);
        assert!(!o.auto_number_headings);
        assert!(o.convert_quotes);
    }

    #[test]
    fn builder_overrides_single_field() {
        let o = FormatOptions::builder().auto_number_headings(true).build();
        assert!(o.auto_number_headings);
        assert!(o.tidy_spacing, "other fields keep their defaults");
    }

    #[test]
    fn parse_flag_true_tokens() {
        assert!(parse_flag(Some("true"), false));
        assert!(parse_flag(Some("1"), false));
        assert!(parse_flag(Some(" TRUE "), false));
    }

    #[test]
    fn parse_flag_false_tokens() {
        assert!(!parse_flag(Some("false"), true));
        assert!(!parse_flag(Some("0"), true));
    }

    #[test]
    fn parse_flag_falls_back_to_default() {
        assert!(parse_flag(None, true));
        assert!(!parse_flag(None, false));
        assert!(parse_flag(Some("banana"), true));
        assert!(!parse_flag(Some("yes please"), false));
    }
}
