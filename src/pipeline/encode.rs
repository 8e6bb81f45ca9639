//! Encode stage: markup tree + preset theme → .docx package bytes.
//!
//! The output package is assembled by hand: a minimal OOXML zip holding
//! `[Content_Types].xml`, the two relationship parts, `word/document.xml`
//! and `word/styles.xml`. `styles.xml` is generated from the preset theme so
//! the document opens in Word looking like the HTML preview — same fonts,
//! sizes, accent color, and justification.
//!
//! Heading auto-numbering is deliberately absent here: the numbers are CSS
//! counters in the preview stylesheet and are never written into text.

use crate::config::FormatOptions;
use crate::error::FormatError;
use crate::markup::{escape_html, Block, Inline, MarkupTree};
use crate::preset::PresetTheme;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Serialise the tree into .docx bytes.
///
/// # Errors
/// [`FormatError::Encode`] when the zip container cannot be written. Rare
/// for well-formed input and fatal for the request.
pub fn encode_docx(
    tree: &MarkupTree,
    theme: &PresetTheme,
    options: &FormatOptions,
) -> Result<Vec<u8>, FormatError> {
    let document = document_xml(tree);
    let styles = styles_xml(theme, options);
    let bytes = write_package(&document, &styles)
        .map_err(|e| FormatError::encode(format!("zip write failed: {e}")))?;
    debug!("encoded {} blocks → {} docx bytes", tree.blocks.len(), bytes.len());
    Ok(bytes)
}

fn write_package(document: &str, styles: &str) -> Result<Vec<u8>, zip::result::ZipError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", opt)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file("_rels/.rels", opt)?;
    zip.write_all(RELS_XML.as_bytes())?;

    zip.start_file("word/document.xml", opt)?;
    zip.write_all(document.as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", opt)?;
    zip.write_all(WORD_RELS_XML.as_bytes())?;

    zip.start_file("word/styles.xml", opt)?;
    zip.write_all(styles.as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

// ── word/document.xml ────────────────────────────────────────────────────

fn document_xml(tree: &MarkupTree) -> String {
    let mut body = String::new();
    for block in &tree.blocks {
        match block {
            Block::Paragraph { inlines } => push_paragraph(&mut body, None, inlines),
            Block::Heading { level, inlines } => {
                let level = (*level).clamp(1, 6);
                push_paragraph(&mut body, Some(&format!("Heading{level}")), inlines);
            }
            Block::ListItem { inlines } => {
                // Visible bullet marker; the style only carries indentation.
                body.push_str(r#"<w:p><w:pPr><w:pStyle w:val="ListParagraph"/></w:pPr>"#);
                body.push_str(r#"<w:r><w:t xml:space="preserve">&#8226; </w:t></w:r>"#);
                push_runs(&mut body, inlines);
                body.push_str("</w:p>");
            }
            Block::Blockquote { inlines } => push_paragraph(&mut body, Some("Quote"), inlines),
            Block::Table { rows } => push_table(&mut body, rows),
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
 xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<w:body>{body}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body>
</w:document>"#
    )
}

fn push_paragraph(body: &mut String, style: Option<&str>, inlines: &[Inline]) {
    body.push_str("<w:p>");
    if let Some(style) = style {
        body.push_str(&format!(r#"<w:pPr><w:pStyle w:val="{style}"/></w:pPr>"#));
    }
    push_runs(body, inlines);
    body.push_str("</w:p>");
}

fn push_runs(body: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Break => body.push_str("<w:r><w:br/></w:r>"),
            Inline::Text { text, bold, italic } => {
                if text.is_empty() {
                    continue;
                }
                body.push_str("<w:r>");
                if *bold || *italic {
                    body.push_str("<w:rPr>");
                    if *bold {
                        body.push_str("<w:b/>");
                    }
                    if *italic {
                        body.push_str("<w:i/>");
                    }
                    body.push_str("</w:rPr>");
                }
                body.push_str(r#"<w:t xml:space="preserve">"#);
                body.push_str(&escape_html(text));
                body.push_str("</w:t></w:r>");
            }
        }
    }
}

fn push_table(body: &mut String, rows: &[Vec<Vec<Inline>>]) {
    body.push_str(
        r#"<w:tbl><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:color="D0D4D9"/><w:left w:val="single" w:sz="4" w:color="D0D4D9"/><w:bottom w:val="single" w:sz="4" w:color="D0D4D9"/><w:right w:val="single" w:sz="4" w:color="D0D4D9"/><w:insideH w:val="single" w:sz="4" w:color="D0D4D9"/><w:insideV w:val="single" w:sz="4" w:color="D0D4D9"/></w:tblBorders></w:tblPr>"#,
    );
    for row in rows {
        body.push_str("<w:tr>");
        for cell in row {
            body.push_str(r#"<w:tc><w:tcPr><w:tcMar><w:left w:w="120" w:type="dxa"/><w:right w:w="120" w:type="dxa"/></w:tcMar></w:tcPr><w:p>"#);
            push_runs(body, cell);
            body.push_str("</w:p></w:tc>");
        }
        body.push_str("</w:tr>");
    }
    body.push_str("</w:tbl>");
}

// ── word/styles.xml ──────────────────────────────────────────────────────

fn styles_xml(theme: &PresetTheme, options: &FormatOptions) -> String {
    let body_font = PresetTheme::primary_font(theme.font_family);
    let heading_font = PresetTheme::primary_font(theme.heading_font);
    let accent = theme.accent_hex();
    let bold = theme.heading_weight >= 600;

    // Word measures font size in half-points, spacing in twips, and line
    // height in 240ths of a line.
    let body_sz = theme.body_size_pt * 2;
    let after = (theme.paragraph_spacing_em * theme.body_size_pt as f32 * 20.0).round() as u32;
    let line = (theme.line_height * 240.0).round() as u32;
    let jc = if options.justify { "both" } else { "left" };

    let mut styles = String::with_capacity(2048);
    styles.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    styles.push('\n');
    styles.push_str(
        r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    );

    styles.push_str(&format!(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="{after}" w:line="{line}" w:lineRule="auto"/><w:jc w:val="{jc}"/></w:pPr><w:rPr><w:rFonts w:ascii="{body_font}" w:hAnsi="{body_font}"/><w:sz w:val="{body_sz}"/></w:rPr></w:style>"#
    ));

    for level in 1u8..=6 {
        let sz = heading_sz(theme.body_size_pt, level);
        styles.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:keepLines/><w:spacing w:before="240" w:after="120"/><w:jc w:val="left"/></w:pPr><w:rPr><w:rFonts w:ascii="{heading_font}" w:hAnsi="{heading_font}"/>"#
        ));
        if bold {
            styles.push_str("<w:b/>");
        }
        // Levels 1–3 carry the accent color and a fixed size; 4–6 share
        // only the heading font and weight, matching the stylesheet.
        if level <= 3 {
            styles.push_str(&format!(r#"<w:color w:val="{accent}"/>"#));
            if let Some(sz) = sz {
                styles.push_str(&format!(r#"<w:sz w:val="{sz}"/>"#));
            }
        }
        styles.push_str("</w:rPr></w:style>");
    }

    styles.push_str(&format!(
        r#"<w:style w:type="paragraph" w:styleId="Quote"><w:name w:val="Quote"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:pBdr><w:left w:val="single" w:sz="24" w:space="8" w:color="{accent}"/></w:pBdr><w:ind w:left="360"/></w:pPr></w:style>"#
    ));
    styles.push_str(
        r#"<w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:ind w:left="720"/></w:pPr></w:style>"#,
    );

    styles.push_str("</w:styles>");
    styles
}

/// Heading size in half-points, mirroring the stylesheet's em scale
/// (2 / 1.5 / 1.17). Levels 4–6 inherit the body size.
fn heading_sz(body_pt: u32, level: u8) -> Option<u32> {
    match level {
        1 => Some(body_pt * 4),
        2 => Some(body_pt * 3),
        3 => Some((body_pt as f32 * 1.17 * 2.0).round() as u32),
        _ => None,
    }
}

// ── Static package parts ─────────────────────────────────────────────────

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const WORD_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::StylePreset;

    fn sample_tree() -> MarkupTree {
        MarkupTree {
            blocks: vec![
                Block::Heading {
                    level: 1,
                    inlines: vec![Inline::text("Title")],
                },
                Block::Paragraph {
                    inlines: vec![Inline::text("Body text")],
                },
            ],
        }
    }

    #[test]
    fn package_is_readable_docx() {
        let bytes = encode_docx(
            &sample_tree(),
            StylePreset::Classic.theme(),
            &FormatOptions::default(),
        )
        .expect("encode");
        // Round-trip through the reader used by the decode stage.
        let docx = docx_rs::read_docx(&bytes).expect("output must be a valid docx");
        assert!(!docx.document.children.is_empty());
    }

    #[test]
    fn document_xml_escapes_text() {
        let tree = MarkupTree {
            blocks: vec![Block::Paragraph {
                inlines: vec![Inline::text("a < b & c")],
            }],
        };
        let xml = document_xml(&tree);
        assert!(xml.contains("a &lt; b &amp; c"));
        assert!(!xml.contains("a < b"));
    }

    #[test]
    fn heading_blocks_reference_heading_styles() {
        let xml = document_xml(&sample_tree());
        assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
    }

    #[test]
    fn styles_carry_theme_font_and_accent() {
        let theme = StylePreset::Executive.theme();
        let xml = styles_xml(theme, &FormatOptions::default());
        assert!(xml.contains(r#"w:ascii="Palatino Linotype""#));
        assert!(xml.contains(r#"w:ascii="Segoe UI""#));
        assert!(xml.contains(&format!(r#"<w:color w:val="{}"/>"#, theme.accent_hex())));
    }

    #[test]
    fn justify_option_sets_normal_alignment() {
        let theme = StylePreset::Classic.theme();
        let justified = styles_xml(theme, &FormatOptions::default());
        assert!(justified.contains(r#"<w:jc w:val="both"/>"#));
        let ragged = styles_xml(theme, &FormatOptions::builder().justify(false).build());
        assert!(!ragged.contains(r#"<w:jc w:val="both"/>"#));
    }

    #[test]
    fn numbering_never_reaches_document_text() {
        let xml = document_xml(&sample_tree());
        assert!(!xml.contains("1. Title"), "numbering must stay CSS-only");
    }

    #[test]
    fn heading_sizes_follow_em_scale() {
        assert_eq!(heading_sz(12, 1), Some(48));
        assert_eq!(heading_sz(12, 2), Some(36));
        assert_eq!(heading_sz(12, 3), Some(28));
        assert_eq!(heading_sz(12, 4), None);
    }
}
