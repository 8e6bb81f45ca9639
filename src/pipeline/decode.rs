//! Decode stage: uploaded .docx bytes → [`MarkupTree`].
//!
//! Reads the WordprocessingML package with `docx-rs` and maps it onto the
//! small block model the rest of the pipeline understands. The mapping
//! policy is fixed: paragraph style ids decide the block kind, run
//! properties decide character formatting, and anything the formatter does
//! not style (drawings, fields, bookmarks) is dropped rather than guessed
//! at. Failure to read the package is the only error this stage produces —
//! there are no partial results.

use crate::error::FormatError;
use crate::markup::{Block, Inline, MarkupTree};
use docx_rs::{
    read_docx, Bold, DocumentChild, Italic, Paragraph, ParagraphChild, RunChild, TableCellContent,
    TableChild, TableRowChild,
};
use tracing::debug;

/// Decode raw upload bytes into a markup tree.
///
/// # Errors
/// [`FormatError::Decode`] when the bytes are not a readable .docx package
/// (corrupt archive, wrong file type).
pub fn decode_docx(bytes: &[u8]) -> Result<MarkupTree, FormatError> {
    let docx =
        read_docx(bytes).map_err(|e| FormatError::decode(format!("docx read failed: {e:?}")))?;

    let mut blocks = Vec::new();
    for child in docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => blocks.push(convert_paragraph(&paragraph)),
            DocumentChild::Table(table) => {
                let mut rows = Vec::new();
                for TableChild::TableRow(row) in table.rows {
                    let mut cells = Vec::new();
                    for TableRowChild::TableCell(cell) in row.cells {
                        let mut inlines = Vec::new();
                        for content in cell.children {
                            if let TableCellContent::Paragraph(p) = content {
                                if !inlines.is_empty() {
                                    inlines.push(Inline::Break);
                                }
                                collect_inlines(&p.children, &mut inlines);
                            }
                        }
                        cells.push(inlines);
                    }
                    rows.push(cells);
                }
                blocks.push(Block::Table { rows });
            }
            _ => {}
        }
    }

    debug!("decoded {} blocks from upload", blocks.len());
    Ok(MarkupTree { blocks })
}

/// Map one paragraph onto a block. A paragraph with no runs still becomes
/// an empty `Paragraph`: dropping redundant empties is the spacing pass's
/// business, not the decoder's.
fn convert_paragraph(paragraph: &Paragraph) -> Block {
    let mut inlines = Vec::new();
    collect_inlines(&paragraph.children, &mut inlines);

    let style_id = paragraph
        .property
        .style
        .as_ref()
        .map(|s| s.val.as_str())
        .unwrap_or("");

    if let Some(level) = heading_level(style_id) {
        return Block::Heading { level, inlines };
    }
    if matches!(style_id, "Quote" | "IntenseQuote" | "BlockQuote") {
        return Block::Blockquote { inlines };
    }
    if paragraph.property.numbering_property.is_some() {
        return Block::ListItem { inlines };
    }
    Block::Paragraph { inlines }
}

fn heading_level(style_id: &str) -> Option<u8> {
    let digits = style_id.strip_prefix("Heading")?;
    let level: u8 = digits.parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}

fn collect_inlines(children: &[ParagraphChild], out: &mut Vec<Inline>) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                let props = &run.run_property;
                // Bold/Italic can carry an explicit off toggle, so compare
                // against the enabled value instead of testing presence.
                let bold = props.bold.as_ref().is_some_and(|b| b == &Bold::new());
                let italic = props.italic.as_ref().is_some_and(|i| i == &Italic::new());

                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(text) => out.push(Inline::Text {
                            text: text.text.clone(),
                            bold,
                            italic,
                        }),
                        RunChild::Break(_) => out.push(Inline::Break),
                        RunChild::Tab(_) => out.push(Inline::Text {
                            text: " ".into(),
                            bold,
                            italic,
                        }),
                        _ => {}
                    }
                }
            }
            // Keep hyperlink text; the link target itself is not carried.
            ParagraphChild::Hyperlink(link) => collect_inlines(&link.children, out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph as DocxParagraph, Run};
    use std::io::Cursor;

    fn build_docx(docx: Docx) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).expect("pack test docx");
        buf.into_inner()
    }

    #[test]
    fn rejects_garbage_bytes() {
        let err = decode_docx(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, FormatError::Decode { .. }));
    }

    #[test]
    fn reads_paragraph_text() {
        let bytes = build_docx(
            Docx::new()
                .add_paragraph(DocxParagraph::new().add_run(Run::new().add_text("hello world"))),
        );
        let tree = decode_docx(&bytes).expect("decode");
        assert_eq!(tree.blocks.len(), 1);
        assert_eq!(tree.blocks[0].plain_text(), "hello world");
    }

    #[test]
    fn heading_style_maps_to_heading_block() {
        let bytes = build_docx(
            Docx::new().add_paragraph(
                DocxParagraph::new()
                    .style("Heading2")
                    .add_run(Run::new().add_text("section")),
            ),
        );
        let tree = decode_docx(&bytes).expect("decode");
        assert!(
            matches!(tree.blocks[0], Block::Heading { level: 2, .. }),
            "got: {:?}",
            tree.blocks[0]
        );
    }

    #[test]
    fn bold_run_property_is_carried() {
        let bytes = build_docx(
            Docx::new()
                .add_paragraph(DocxParagraph::new().add_run(Run::new().add_text("loud").bold())),
        );
        let tree = decode_docx(&bytes).expect("decode");
        let inlines = tree.blocks[0].inlines().unwrap();
        assert!(matches!(inlines[0], Inline::Text { bold: true, .. }));
    }

    #[test]
    fn heading_level_parsing() {
        assert_eq!(heading_level("Heading1"), Some(1));
        assert_eq!(heading_level("Heading6"), Some(6));
        assert_eq!(heading_level("Heading7"), None);
        assert_eq!(heading_level("Normal"), None);
        assert_eq!(heading_level(""), None);
    }
}
