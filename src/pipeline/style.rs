//! Style synthesis: (preset theme, options) → stylesheet text.
//!
//! A pure function with no I/O and no state. The stylesheet is the only
//! place preset attributes become visible markup, and — when auto-numbering
//! is on — the only place heading numbers exist: they are CSS counters, not
//! text, so toggling the option never rewrites document content.

use crate::config::FormatOptions;
use crate::preset::PresetTheme;
use std::fmt::Write;

/// Maximum width of the content container in the screen preview.
const PAGE_MAX_WIDTH_PX: u32 = 760;

/// Synthesize the full stylesheet for one request.
pub fn synthesize(theme: &PresetTheme, options: &FormatOptions) -> String {
    let mut css = String::with_capacity(2048);
    let accent = theme.accent_color;
    let spacing = theme.paragraph_spacing_em;

    // Page + body
    let _ = write!(
        css,
        "body {{ margin: 0; padding: {margin}; background: {bg}; \
         font-family: {font}; font-size: {size}pt; line-height: {lh}; color: #1f2328; }}\n",
        margin = theme.page_margin,
        bg = theme.background,
        font = theme.font_family,
        size = theme.body_size_pt,
        lh = theme.line_height,
    );

    // Content container: fixed max width with shadow/rounding for the
    // on-screen preview.
    let _ = write!(
        css,
        ".page {{ max-width: {PAGE_MAX_WIDTH_PX}px; margin: 0 auto; background: #ffffff; \
         padding: 48px 56px; border-radius: 6px; box-shadow: 0 2px 12px rgba(0, 0, 0, 0.08); }}\n",
    );

    // Paragraphs
    let align = if options.justify { "justify" } else { "left" };
    let _ = write!(
        css,
        "p {{ margin: 0 0 {spacing}em; text-align: {align}; }}\n",
    );

    // Headings: 1–3 get accent color and fixed sizes, 4–6 share font and
    // weight only.
    let _ = write!(
        css,
        "h1, h2, h3 {{ font-family: {font}; font-weight: {weight}; color: {accent}; \
         margin: 1.4em 0 0.5em; }}\n\
         h1 {{ font-size: 2em; }}\n\
         h2 {{ font-size: 1.5em; }}\n\
         h3 {{ font-size: 1.17em; }}\n\
         h4, h5, h6 {{ font-family: {font}; font-weight: {weight}; margin: 1.2em 0 0.4em; }}\n",
        font = theme.heading_font,
        weight = theme.heading_weight,
    );

    // Lists, tables, blockquotes
    let _ = write!(
        css,
        "ul, ol {{ margin: 0 0 {spacing}em; padding-left: 2em; }}\n\
         table {{ border-collapse: collapse; margin: 0 0 {spacing}em; }}\n\
         th, td {{ border: 1px solid #d0d4d9; padding: 6px 10px; }}\n\
         blockquote {{ margin: 0 0 {spacing}em; padding: 2px 0 2px 14px; \
         border-left: 4px solid {accent}; }}\n",
    );

    if options.auto_number_headings {
        let _ = write!(
            css,
            "body {{ counter-reset: sec1; }}\n\
             h1 {{ counter-reset: sec2; }}\n\
             h2 {{ counter-reset: sec3; }}\n\
             h1::before {{ counter-increment: sec1; content: counter(sec1) \". \"; \
             color: {accent}; font-weight: {weight}; }}\n\
             h2::before {{ counter-increment: sec2; \
             content: counter(sec1) \".\" counter(sec2) \" \"; \
             color: {accent}; font-weight: {weight}; }}\n\
             h3::before {{ counter-increment: sec3; \
             content: counter(sec1) \".\" counter(sec2) \".\" counter(sec3) \" \"; \
             color: {accent}; font-weight: {weight}; }}\n",
            weight = theme.heading_weight,
        );
    }

    css
}
