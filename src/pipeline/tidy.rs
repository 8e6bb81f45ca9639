//! Tidy passes: deterministic text cleanup on the markup tree.
//!
//! Word documents accumulate typing debris — doubled spaces, non-breaking
//! spaces pasted from the web, SHOUTED headings, straight quotes. Each pass
//! here fixes one class of debris. They are pure functions over an owned
//! tree, independently toggled by [`crate::config::FormatOptions`], and never
//! raise errors: a block with no text is simply a no-op for that block.
//!
//! ## Pass Order
//!
//! The passes must run in this specific order: spacing normalization first so
//! quote substitution sees already-trimmed text, and title-casing reads
//! heading text before the stylesheet's numbering markers exist (numbering is
//! CSS-only and never appears in the text at all).

use crate::markup::{inlines_text, Block, Inline, MarkupTree};
use once_cell::sync::Lazy;
use regex::Regex;

/// Words kept lowercase mid-heading by the title-case pass.
pub const CONNECTOR_WORDS: &[&str] = &[
    "and", "or", "the", "of", "for", "in", "on", "to", "a", "an", "with",
];

// ── Pass 1: spacing normalization ────────────────────────────────────────

static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\x{00A0}]+").unwrap());
static RE_SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,;:!?])").unwrap());

/// Collapse whitespace, strip space before punctuation, trim edges, and
/// remove redundant empty paragraphs.
///
/// Empty-paragraph policy: a paragraph left without text is *removed* when
/// the block before it is absent or is itself a text-empty paragraph;
/// otherwise its text runs are cleared but the element is retained so an
/// intentional spacer (one holding an explicit break) adjacent to content
/// survives. Paragraphs with no inline content at all are swept at the end
/// regardless. The pass is idempotent.
pub fn normalize_spacing(mut tree: MarkupTree) -> MarkupTree {
    for block in &mut tree.blocks {
        match block {
            Block::Table { rows } => {
                for row in rows {
                    for cell in row {
                        normalize_inlines(cell);
                    }
                }
            }
            _ => {
                if let Some(inlines) = block.inlines_mut() {
                    normalize_inlines(inlines);
                }
            }
        }
    }

    let mut kept: Vec<Block> = Vec::with_capacity(tree.blocks.len());
    for mut block in tree.blocks {
        if let Block::Paragraph { inlines } = &mut block {
            if inlines_text(inlines).trim().is_empty() {
                if !prev_is_content_paragraph(kept.last()) {
                    continue;
                }
                // Clear text but keep breaks: the spacer stays visible.
                inlines.retain(|i| !matches!(i, Inline::Text { .. }));
            }
        }
        kept.push(block);
    }

    kept.retain(|b| !matches!(b, Block::Paragraph { inlines } if inlines.is_empty()));
    MarkupTree { blocks: kept }
}

/// True when `prev` is a paragraph that still carries visible text.
fn prev_is_content_paragraph(prev: Option<&Block>) -> bool {
    match prev {
        Some(b @ Block::Paragraph { .. }) => !b.plain_text().trim().is_empty(),
        _ => false,
    }
}

/// Normalize one block's runs, carrying the space/boundary state across run
/// borders so collapsing works for text split over multiple runs.
fn normalize_inlines(inlines: &mut Vec<Inline>) {
    let mut at_boundary = true; // block start and every break count as a boundary
    for inline in inlines.iter_mut() {
        match inline {
            Inline::Break => at_boundary = true,
            Inline::Text { text, .. } => {
                let mut s = RE_WS.replace_all(text, " ").to_string();
                s = RE_SPACE_BEFORE_PUNCT.replace_all(&s, "$1").to_string();
                if at_boundary {
                    s = s.trim_start().to_string();
                }
                if !s.is_empty() {
                    at_boundary = s.ends_with(' ');
                }
                *text = s;
            }
        }
    }
    inlines.retain(|i| !matches!(i, Inline::Text { text, .. } if text.is_empty()));

    // Punctuation opening a run eats the previous run's trailing space.
    for i in 1..inlines.len() {
        let starts_with_punct = matches!(
            &inlines[i],
            Inline::Text { text, .. } if text.starts_with(['.', ',', ';', ':', '!', '?'])
        );
        if starts_with_punct {
            if let Inline::Text { text, .. } = &mut inlines[i - 1] {
                while text.ends_with(' ') {
                    text.pop();
                }
            }
        }
    }

    // Trim the trailing edge.
    if let Some(Inline::Text { text, .. }) = inlines.last_mut() {
        let trimmed = text.trim_end();
        if trimmed.len() != text.len() {
            *text = trimmed.to_string();
        }
    }
    inlines.retain(|i| !matches!(i, Inline::Text { text, .. } if text.is_empty()));
}

// ── Pass 2: heading title-casing ─────────────────────────────────────────

/// Rewrite level 1–3 heading text to title case.
///
/// The heading's combined text is lowercased and re-set as a single plain
/// run: every word gets its first letter capitalised except the connector
/// words, but the first and last words are always capitalised regardless.
/// Hyphenated words capitalise each segment independently.
pub fn title_case_headings(mut tree: MarkupTree) -> MarkupTree {
    for block in &mut tree.blocks {
        if let Block::Heading { level, inlines } = block {
            if *level <= 3 {
                let cased = title_case(inlines_text(inlines).trim());
                if !cased.is_empty() {
                    *inlines = vec![Inline::text(cased)];
                }
            }
        }
    }
    tree
}

fn title_case(text: &str) -> String {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let last = words.len().saturating_sub(1);
    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let edge = i == 0 || i == last;
            if !edge && CONNECTOR_WORDS.contains(word) {
                (*word).to_string()
            } else {
                word.split('-')
                    .map(capitalize_first)
                    .collect::<Vec<_>>()
                    .join("-")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── Pass 3: smart quotes ─────────────────────────────────────────────────

/// Replace straight quotes with directional curly quotes in every text node.
///
/// A quote opens when preceded by the start of its text node, whitespace, or
/// an opening bracket; otherwise it closes. Markup attributes are never
/// touched — the tree has none.
pub fn convert_quotes(mut tree: MarkupTree) -> MarkupTree {
    for block in &mut tree.blocks {
        match block {
            Block::Table { rows } => {
                for row in rows {
                    for cell in row {
                        smarten_runs(cell);
                    }
                }
            }
            _ => {
                if let Some(inlines) = block.inlines_mut() {
                    smarten_runs(inlines);
                }
            }
        }
    }
    tree
}

fn smarten_runs(inlines: &mut [Inline]) {
    for inline in inlines {
        if let Inline::Text { text, .. } = inline {
            *text = smart_quotes(text);
        }
    }
}

fn smart_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        let replaced = match ch {
            '"' => {
                if opens_quote(prev) {
                    '\u{201C}'
                } else {
                    '\u{201D}'
                }
            }
            '\'' => {
                if opens_quote(prev) {
                    '\u{2018}'
                } else {
                    '\u{2019}'
                }
            }
            other => other,
        };
        out.push(replaced);
        prev = Some(ch);
    }
    out
}

fn opens_quote(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '(' | '[' | '{'),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn para(text: &str) -> Block {
        Block::Paragraph {
            inlines: vec![Inline::text(text)],
        }
    }

    fn tree(blocks: Vec<Block>) -> MarkupTree {
        MarkupTree { blocks }
    }

    // ── spacing ──────────────────────────────────────────────────────────

    #[test]
    fn collapses_whitespace_and_nbsp() {
        let t = normalize_spacing(tree(vec![para("a\u{00A0}\u{00A0} b   c")]));
        assert_eq!(t.blocks[0].plain_text(), "a b c");
    }

    #[test]
    fn strips_space_before_punctuation() {
        let t = normalize_spacing(tree(vec![para("Hello , world . Fine ; yes !")]));
        assert_eq!(t.blocks[0].plain_text(), "Hello, world. Fine; yes!");
    }

    #[test]
    fn trims_edges() {
        let t = normalize_spacing(tree(vec![para("   padded out   ")]));
        assert_eq!(t.blocks[0].plain_text(), "padded out");
    }

    #[test]
    fn collapse_spans_run_boundaries() {
        let t = normalize_spacing(tree(vec![Block::Paragraph {
            inlines: vec![Inline::text("one "), Inline::text("  two")],
        }]));
        assert_eq!(t.blocks[0].plain_text(), "one two");
    }

    #[test]
    fn punctuation_run_eats_previous_trailing_space() {
        let t = normalize_spacing(tree(vec![Block::Paragraph {
            inlines: vec![Inline::text("wait "), Inline::text(", no")],
        }]));
        assert_eq!(t.blocks[0].plain_text(), "wait, no");
    }

    #[test]
    fn leading_empty_paragraph_is_removed() {
        let t = normalize_spacing(tree(vec![para("   "), para("content")]));
        assert_eq!(t.blocks.len(), 1);
        assert_eq!(t.blocks[0].plain_text(), "content");
    }

    #[test]
    fn redundant_empties_collapse_but_spacer_with_break_survives() {
        let t = normalize_spacing(tree(vec![
            para("content"),
            Block::Paragraph {
                inlines: vec![Inline::text("  "), Inline::Break],
            },
            Block::Paragraph {
                inlines: vec![Inline::text("  ")],
            },
            para("more"),
        ]));
        // First empty follows content: cleared but retained (it holds a break).
        // Second empty follows an empty paragraph: removed outright.
        assert_eq!(t.blocks.len(), 3);
        assert!(
            matches!(&t.blocks[1], Block::Paragraph { inlines } if inlines == &vec![Inline::Break])
        );
        assert_eq!(t.blocks[2].plain_text(), "more");
    }

    #[test]
    fn fully_empty_paragraphs_are_swept() {
        let t = normalize_spacing(tree(vec![para("content"), para(" \u{00A0} ")]));
        assert_eq!(t.blocks.len(), 1);
    }

    #[test]
    fn spacing_is_idempotent() {
        let input = tree(vec![
            para("  a \u{00A0} b , c  "),
            para("  "),
            Block::Paragraph {
                inlines: vec![Inline::Break],
            },
            para("tail  text ."),
        ]);
        let once = normalize_spacing(input);
        let twice = normalize_spacing(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn table_cells_are_normalized() {
        let t = normalize_spacing(tree(vec![Block::Table {
            rows: vec![vec![vec![Inline::text("  a   b ")]]],
        }]));
        let Block::Table { rows } = &t.blocks[0] else {
            panic!("expected table")
        };
        assert_eq!(inlines_text(&rows[0][0]), "a b");
    }

    // ── title case ───────────────────────────────────────────────────────

    #[test]
    fn title_case_documented_example() {
        assert_eq!(
            title_case("the quick BROWN fox jumps over a lazy-dog"),
            "The Quick Brown Fox Jumps Over a Lazy-Dog"
        );
    }

    #[test]
    fn connector_words_stay_lowercase_mid_heading() {
        assert_eq!(title_case("a tale of two cities"), "A Tale of Two Cities");
    }

    #[test]
    fn last_word_is_capitalized_even_when_connector() {
        assert_eq!(title_case("what this is for"), "What This Is For");
    }

    #[test]
    fn single_word_heading() {
        assert_eq!(title_case("introduction"), "Introduction");
    }

    #[test]
    fn only_levels_one_to_three_are_cased() {
        let t = title_case_headings(tree(vec![
            Block::Heading {
                level: 2,
                inlines: vec![Inline::text("the plan")],
            },
            Block::Heading {
                level: 4,
                inlines: vec![Inline::text("the appendix")],
            },
        ]));
        assert_eq!(t.blocks[0].plain_text(), "The Plan");
        assert_eq!(t.blocks[1].plain_text(), "the appendix");
    }

    #[test]
    fn heading_runs_are_flattened_to_one() {
        let t = title_case_headings(tree(vec![Block::Heading {
            level: 1,
            inlines: vec![
                Inline::text("first "),
                Inline::Text {
                    text: "SECOND".into(),
                    bold: true,
                    italic: false,
                },
            ],
        }]));
        let inlines = t.blocks[0].inlines().unwrap();
        assert_eq!(inlines.len(), 1);
        assert_eq!(t.blocks[0].plain_text(), "First Second");
    }

    #[test]
    fn empty_heading_is_a_noop() {
        let t = title_case_headings(tree(vec![Block::Heading {
            level: 1,
            inlines: vec![],
        }]));
        assert!(t.blocks[0].inlines().unwrap().is_empty());
    }

    // ── smart quotes ─────────────────────────────────────────────────────

    #[test]
    fn quotes_documented_example() {
        assert_eq!(
            smart_quotes(r#"He said "hello" and it's fine"#),
            "He said \u{201C}hello\u{201D} and it\u{2019}s fine"
        );
    }

    #[test]
    fn quote_after_opening_bracket_opens() {
        assert_eq!(smart_quotes(r#"("yes")"#), "(\u{201C}yes\u{201D})");
    }

    #[test]
    fn quote_at_node_start_opens() {
        assert_eq!(smart_quotes(r#""lead"#), "\u{201C}lead");
    }

    #[test]
    fn single_quotes_follow_same_rule() {
        assert_eq!(smart_quotes("'tis Bob's"), "\u{2018}tis Bob\u{2019}s");
    }

    #[test]
    fn quotes_apply_inside_table_cells() {
        let t = convert_quotes(tree(vec![Block::Table {
            rows: vec![vec![vec![Inline::text("\"cell\"")]]],
        }]));
        let Block::Table { rows } = &t.blocks[0] else {
            panic!("expected table")
        };
        assert_eq!(inlines_text(&rows[0][0]), "\u{201C}cell\u{201D}");
    }
}
