//! Visual presets: named bundles of typographic and layout attributes.
//!
//! Presets are static configuration data. Each [`StylePreset`] maps to one
//! immutable [`PresetTheme`] record constructed at compile time; nothing in
//! the pipeline ever mutates a theme. The style synthesizer reads the theme
//! to emit CSS for the preview, and the encoder reads the same theme so the
//! output .docx matches what the preview showed.

use serde::{Deserialize, Serialize};

/// The fixed set of visual presets.
///
/// An unrecognised token resolves to [`StylePreset::Classic`] — a deliberate
/// silent fallback, not an error, so a stale form value never breaks a
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    /// Serif book typography on a warm page.
    #[default]
    Classic,
    /// Sans-serif, tighter rhythm, blue accent.
    Modern,
    /// Serif body with sans headings and a navy accent.
    Executive,
}

/// Typographic and layout attributes of one preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetTheme {
    /// Preset token as it appears on the wire.
    pub id: &'static str,
    /// Body font stack (CSS `font-family` value).
    pub font_family: &'static str,
    /// Heading font stack.
    pub heading_font: &'static str,
    /// Body size in points.
    pub body_size_pt: u32,
    /// Heading weight (CSS numeric weight; ≥ 600 maps to bold in the .docx).
    pub heading_weight: u16,
    /// Unitless body line height.
    pub line_height: f32,
    /// Space after a paragraph, in ems of the body size.
    pub paragraph_spacing_em: f32,
    /// Accent color for headings, numbering, and blockquote borders.
    pub accent_color: &'static str,
    /// Page padding around the content container (CSS shorthand).
    pub page_margin: &'static str,
    /// Page background behind the content container.
    pub background: &'static str,
}

const CLASSIC: PresetTheme = PresetTheme {
    id: "classic",
    font_family: "Georgia, 'Times New Roman', serif",
    heading_font: "Georgia, 'Times New Roman', serif",
    body_size_pt: 12,
    heading_weight: 700,
    line_height: 1.7,
    paragraph_spacing_em: 0.8,
    accent_color: "#7c2d12",
    page_margin: "48px 56px",
    background: "#faf6ef",
};

const MODERN: PresetTheme = PresetTheme {
    id: "modern",
    font_family: "'Segoe UI', 'Helvetica Neue', Arial, sans-serif",
    heading_font: "'Segoe UI', 'Helvetica Neue', Arial, sans-serif",
    body_size_pt: 11,
    heading_weight: 600,
    line_height: 1.6,
    paragraph_spacing_em: 0.7,
    accent_color: "#2563eb",
    page_margin: "40px 48px",
    background: "#f4f6f8",
};

const EXECUTIVE: PresetTheme = PresetTheme {
    id: "executive",
    font_family: "'Palatino Linotype', Palatino, 'Book Antiqua', serif",
    heading_font: "'Segoe UI', 'Helvetica Neue', Arial, sans-serif",
    body_size_pt: 12,
    heading_weight: 700,
    line_height: 1.65,
    paragraph_spacing_em: 0.9,
    accent_color: "#1f3a5f",
    page_margin: "56px 64px",
    background: "#f7f7f5",
};

impl StylePreset {
    /// Resolve a form token, falling back to `classic` for anything
    /// unrecognised.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "modern" => StylePreset::Modern,
            "executive" => StylePreset::Executive,
            _ => StylePreset::Classic,
        }
    }

    /// The wire token for this preset.
    pub fn token(&self) -> &'static str {
        self.theme().id
    }

    /// The immutable attribute record for this preset.
    pub fn theme(&self) -> &'static PresetTheme {
        match self {
            StylePreset::Classic => &CLASSIC,
            StylePreset::Modern => &MODERN,
            StylePreset::Executive => &EXECUTIVE,
        }
    }

    /// All presets, in wire-token order.
    pub fn all() -> [StylePreset; 3] {
        [
            StylePreset::Classic,
            StylePreset::Modern,
            StylePreset::Executive,
        ]
    }
}

impl PresetTheme {
    /// First family of a font stack, unquoted — the form Word wants in
    /// `w:rFonts`.
    pub fn primary_font(stack: &str) -> &str {
        stack
            .split(',')
            .next()
            .unwrap_or(stack)
            .trim()
            .trim_matches(|c| c == '\'' || c == '"')
    }

    /// Accent color without the leading `#`, the form `w:color` wants.
    pub fn accent_hex(&self) -> &str {
        self.accent_color.trim_start_matches('#')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_token_falls_back_to_classic() {
        assert_eq!(StylePreset::from_token("brutalist"), StylePreset::Classic);
        assert_eq!(StylePreset::from_token(""), StylePreset::Classic);
    }

    #[test]
    fn tokens_round_trip() {
        for preset in StylePreset::all() {
            assert_eq!(StylePreset::from_token(preset.token()), preset);
        }
    }

    #[test]
    fn token_matching_is_case_insensitive() {
        assert_eq!(StylePreset::from_token(" Modern "), StylePreset::Modern);
    }

    #[test]
    fn primary_font_strips_quotes() {
        assert_eq!(
            PresetTheme::primary_font("'Segoe UI', Arial, sans-serif"),
            "Segoe UI"
        );
        assert_eq!(PresetTheme::primary_font("Georgia, serif"), "Georgia");
    }

    #[test]
    fn accent_hex_drops_hash() {
        assert_eq!(StylePreset::Modern.theme().accent_hex(), "2563eb");
    }
}
