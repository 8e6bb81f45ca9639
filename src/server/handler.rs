//! The formatting endpoint: multipart in, JSON out.
//!
//! Validation happens strictly before any pipeline work: the `file` field
//! must exist, be an actual file part (a plain string field has no
//! filename), and carry a `.docx` name. Everything after that runs inside
//! one failure boundary — any pipeline error is logged with full detail and
//! surfaced as the single generic 500.

use crate::config::{parse_flag, FormatOptions};
use crate::format::format_document;
use crate::server::error::{Result, ServiceError};
use axum::{extract::Multipart, Json};
use serde::Serialize;
use std::collections::HashMap;

/// Success payload for `POST /api/format`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatResponse {
    /// The re-styled .docx, base64-encoded.
    pub base64: String,
    /// Sanitized preview fragment for direct embedding.
    pub preview_html: String,
    /// Preset that was actually applied (after the classic fallback).
    pub applied_preset: String,
}

pub async fn format(mut multipart: Multipart) -> Result<Json<FormatResponse>> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ServiceError::InvalidUpload)?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            // A non-file value in the file field has no filename; treat it
            // as an invalid upload rather than decoding whatever it holds.
            let Some(filename) = field.file_name().map(str::to_string) else {
                continue;
            };
            let bytes = field
                .bytes()
                .await
                .map_err(|_| ServiceError::InvalidUpload)?;
            file = Some((filename, bytes.to_vec()));
        } else {
            let value = field
                .text()
                .await
                .map_err(|_| ServiceError::InvalidUpload)?;
            fields.insert(name, value);
        }
    }

    let (filename, bytes) = file.ok_or(ServiceError::InvalidUpload)?;
    if bytes.is_empty() || !filename.to_ascii_lowercase().ends_with(".docx") {
        return Err(ServiceError::InvalidUpload);
    }

    let options = options_from_fields(&fields);
    tracing::info!(
        filename,
        preset = options.preset.token(),
        size = bytes.len(),
        "format request"
    );

    // The pipeline is CPU-bound and synchronous; keep it off the runtime's
    // I/O threads.
    let output = tokio::task::spawn_blocking(move || format_document(&bytes, &options))
        .await
        .map_err(|e| ServiceError::Pipeline(format!("formatting task panicked: {e}")))?
        .map_err(|e| ServiceError::Pipeline(e.to_string()))?;

    Ok(Json(FormatResponse {
        base64: output.docx_base64,
        preview_html: output.preview_html,
        applied_preset: output.applied_preset,
    }))
}

/// Map the multipart text fields onto [`FormatOptions`], applying the
/// documented default wherever a field is absent or unrecognised.
fn options_from_fields(fields: &HashMap<String, String>) -> FormatOptions {
    let defaults = FormatOptions::default();
    let flag = |name: &str, default: bool| parse_flag(fields.get(name).map(String::as_str), default);

    FormatOptions::builder()
        .preset_token(fields.get("preset").map(String::as_str).unwrap_or(""))
        .justify(flag("justify", defaults.justify))
        .tidy_spacing(flag("tidySpacing", defaults.tidy_spacing))
        .title_case_headings(flag("titleCaseHeadings", defaults.title_case_headings))
        .auto_number_headings(flag("autoNumberHeadings", defaults.auto_number_headings))
        .convert_quotes(flag("convertQuotes", defaults.convert_quotes))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::StylePreset;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_fields_yield_defaults() {
        let o = options_from_fields(&HashMap::new());
        assert_eq!(o, FormatOptions::default());
    }

    #[test]
    fn preset_field_resolves_with_fallback() {
        let o = options_from_fields(&fields(&[("preset", "executive")]));
        assert_eq!(o.preset, StylePreset::Executive);

        let o = options_from_fields(&fields(&[("preset", "vaporwave")]));
        assert_eq!(o.preset, StylePreset::Classic);
    }

    #[test]
    fn flags_parse_from_camel_case_fields() {
        let o = options_from_fields(&fields(&[
            ("tidySpacing", "false"),
            ("autoNumberHeadings", "1"),
        ]));
        assert!(!o.tidy_spacing);
        assert!(o.auto_number_headings);
        assert!(o.convert_quotes, "untouched flag keeps its default");
    }
}
