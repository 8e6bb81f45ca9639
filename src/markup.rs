//! The in-memory markup tree and its sanitizing HTML renderer.
//!
//! The decoder produces a [`MarkupTree`]; the tidy passes mutate owned copies
//! of it; the assembler and encoder serialise it. The tree is deliberately
//! small: it models only the constructs the formatter styles (paragraphs,
//! headings, list items, blockquotes, tables) over plain text runs with
//! bold/italic flags and explicit line breaks.
//!
//! ## Sanitization
//!
//! Output safety falls out of the representation. The tree cannot hold raw
//! markup, attributes, or element names from the upload — only text — and
//! [`render_body`] escapes every text node on the way out. A document whose
//! text contains `<script>` or `onclick=` payloads therefore renders as
//! visible escaped text, never as markup.

use serde::Serialize;

/// Root of the decoded document body. One tree per request, owned by that
/// request for its whole lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupTree {
    pub blocks: Vec<Block>,
}

/// A block-level element of the document body.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph { inlines: Vec<Inline> },
    /// Heading level 1–6 as decoded; the tidy passes only touch levels 1–3.
    Heading { level: u8, inlines: Vec<Inline> },
    ListItem { inlines: Vec<Inline> },
    Blockquote { inlines: Vec<Inline> },
    /// Rows of cells; each cell is a flat run of inlines.
    Table { rows: Vec<Vec<Vec<Inline>>> },
}

/// An inline run inside a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text { text: String, bold: bool, italic: bool },
    Break,
}

impl Inline {
    /// Plain text run with no character formatting.
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }
}

impl Block {
    /// The inline runs of a non-table block.
    pub fn inlines(&self) -> Option<&[Inline]> {
        match self {
            Block::Paragraph { inlines }
            | Block::Heading { inlines, .. }
            | Block::ListItem { inlines }
            | Block::Blockquote { inlines } => Some(inlines),
            Block::Table { .. } => None,
        }
    }

    pub fn inlines_mut(&mut self) -> Option<&mut Vec<Inline>> {
        match self {
            Block::Paragraph { inlines }
            | Block::Heading { inlines, .. }
            | Block::ListItem { inlines }
            | Block::Blockquote { inlines } => Some(inlines),
            Block::Table { .. } => None,
        }
    }

    /// Visible text of the block with breaks rendered as single spaces.
    pub fn plain_text(&self) -> String {
        match self.inlines() {
            Some(inlines) => inlines_text(inlines),
            None => String::new(),
        }
    }
}

pub(crate) fn inlines_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text { text, .. } => out.push_str(text),
            Inline::Break => out.push(' '),
        }
    }
    out
}

/// Statistics the orchestrator reports about a tree.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TreeCounts {
    pub blocks: usize,
    pub headings: usize,
}

impl MarkupTree {
    pub fn counts(&self) -> TreeCounts {
        TreeCounts {
            blocks: self.blocks.len(),
            headings: self
                .blocks
                .iter()
                .filter(|b| matches!(b, Block::Heading { .. }))
                .count(),
        }
    }
}

// ── HTML rendering ───────────────────────────────────────────────────────

/// Escape a text node for HTML output.
///
/// Every character that could open markup or terminate an attribute is
/// replaced; this is the single choke point the sanitization invariant
/// rests on.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the tree as sanitized body markup (no outer document structure).
///
/// Consecutive list items are grouped under one `<ul>` so list styling
/// applies to a real list element rather than orphaned `<li>` tags.
pub fn render_body(tree: &MarkupTree) -> String {
    let mut out = String::new();
    let mut in_list = false;

    for block in &tree.blocks {
        let is_item = matches!(block, Block::ListItem { .. });
        if in_list && !is_item {
            out.push_str("</ul>\n");
            in_list = false;
        }
        match block {
            Block::Paragraph { inlines } => {
                out.push_str("<p>");
                render_inlines(&mut out, inlines);
                out.push_str("</p>\n");
            }
            Block::Heading { level, inlines } => {
                let level = (*level).clamp(1, 6);
                out.push_str(&format!("<h{level}>"));
                render_inlines(&mut out, inlines);
                out.push_str(&format!("</h{level}>\n"));
            }
            Block::ListItem { inlines } => {
                if !in_list {
                    out.push_str("<ul>\n");
                    in_list = true;
                }
                out.push_str("<li>");
                render_inlines(&mut out, inlines);
                out.push_str("</li>\n");
            }
            Block::Blockquote { inlines } => {
                out.push_str("<blockquote><p>");
                render_inlines(&mut out, inlines);
                out.push_str("</p></blockquote>\n");
            }
            Block::Table { rows } => {
                out.push_str("<table>\n");
                for row in rows {
                    out.push_str("<tr>");
                    for cell in row {
                        out.push_str("<td>");
                        render_inlines(&mut out, cell);
                        out.push_str("</td>");
                    }
                    out.push_str("</tr>\n");
                }
                out.push_str("</table>\n");
            }
        }
    }
    if in_list {
        out.push_str("</ul>\n");
    }
    out
}

fn render_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text { text, bold, italic } => {
                if *bold {
                    out.push_str("<strong>");
                }
                if *italic {
                    out.push_str("<em>");
                }
                out.push_str(&escape_html(text));
                if *italic {
                    out.push_str("</em>");
                }
                if *bold {
                    out.push_str("</strong>");
                }
            }
            Inline::Break => out.push_str("<br/>"),
        }
    }
}
