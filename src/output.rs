//! Result types returned by [`crate::format::format_document`].

use crate::markup::TreeCounts;
use serde::Serialize;

/// Everything a caller gets back from one formatting run.
#[derive(Debug, Clone, Serialize)]
pub struct FormatOutput {
    /// The re-styled .docx, base64-encoded (standard alphabet).
    pub docx_base64: String,

    /// Sanitized preview fragment: stylesheet plus bare content container,
    /// ready to embed in a caller's page.
    pub preview_html: String,

    /// The complete standalone HTML document (doctype, head, stylesheet,
    /// body) carrying the same sanitized content as the preview.
    pub document_html: String,

    /// Wire token of the preset that was actually applied, including the
    /// silent classic fallback.
    pub applied_preset: String,

    /// Timing and size statistics for logging and diagnostics.
    pub stats: FormatStats,
}

/// Per-stage statistics for one run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FormatStats {
    /// Block/heading counts of the decoded tree, before any tidy pass.
    pub decoded: TreeCounts,
    /// Counts after the tidy passes (spacing normalization may drop blocks).
    pub transformed: TreeCounts,
    pub decode_ms: u64,
    pub transform_ms: u64,
    pub encode_ms: u64,
    pub total_ms: u64,
}
