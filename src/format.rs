//! The formatting entry point: one call runs the whole pipeline.
//!
//! Control flow is strictly sequential — decode, the conditional tidy
//! passes, style synthesis, assembly, encode — with no state retained
//! between calls. Either the full pipeline succeeds and the caller gets both
//! the encoded document and the preview, or it fails and the caller gets
//! nothing but the error.

use crate::config::FormatOptions;
use crate::error::FormatError;
use crate::markup;
use crate::output::{FormatOutput, FormatStats};
use crate::pipeline::{assemble, decode, encode, style, tidy};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::Instant;
use tracing::{debug, info};

/// Format one uploaded document.
///
/// # Arguments
/// * `bytes`   — raw .docx upload
/// * `options` — preset + tidy toggles for this request
///
/// # Errors
/// [`FormatError::Decode`] when the upload is not a readable .docx;
/// [`FormatError::Encode`] when the output package cannot be written.
///
/// # Example
/// ```rust,no_run
/// use docsmith::{format_document, FormatOptions};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("report.docx")?;
/// let output = format_document(&bytes, &FormatOptions::default())?;
/// println!("{}", output.preview_html);
/// # Ok(())
/// # }
/// ```
pub fn format_document(
    bytes: &[u8],
    options: &FormatOptions,
) -> Result<FormatOutput, FormatError> {
    let total_start = Instant::now();
    info!(
        preset = options.preset.token(),
        size = bytes.len(),
        "starting document formatting"
    );

    // ── Step 1: decode the upload ────────────────────────────────────────
    let decode_start = Instant::now();
    let mut tree = decode::decode_docx(bytes)?;
    let decode_ms = decode_start.elapsed().as_millis() as u64;
    let decoded = tree.counts();
    debug!(
        blocks = decoded.blocks,
        headings = decoded.headings,
        "decoded upload in {decode_ms}ms"
    );

    // ── Step 2: tidy passes, fixed order ─────────────────────────────────
    let transform_start = Instant::now();
    if options.tidy_spacing {
        tree = tidy::normalize_spacing(tree);
    }
    if options.title_case_headings {
        tree = tidy::title_case_headings(tree);
    }
    if options.convert_quotes {
        tree = tidy::convert_quotes(tree);
    }
    let transform_ms = transform_start.elapsed().as_millis() as u64;
    let transformed = tree.counts();

    // ── Step 3: synthesize the stylesheet ────────────────────────────────
    let theme = options.preset.theme();
    let stylesheet = style::synthesize(theme, options);

    // ── Step 4: render sanitized body, assemble both shapes ──────────────
    let body = markup::render_body(&tree);
    let document_html = assemble::full_document(&body, &stylesheet);
    let preview_html = assemble::preview_fragment(&body, &stylesheet);

    // ── Step 5: encode the output package ────────────────────────────────
    let encode_start = Instant::now();
    let docx = encode::encode_docx(&tree, theme, options)?;
    let encode_ms = encode_start.elapsed().as_millis() as u64;

    let stats = FormatStats {
        decoded,
        transformed,
        decode_ms,
        transform_ms,
        encode_ms,
        total_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        blocks = transformed.blocks,
        total_ms = stats.total_ms,
        "formatting complete"
    );

    Ok(FormatOutput {
        docx_base64: STANDARD.encode(&docx),
        preview_html,
        document_html,
        applied_preset: options.preset.token().to_string(),
        stats,
    })
}
