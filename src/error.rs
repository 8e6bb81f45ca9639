//! Error types for the docsmith library.
//!
//! The pipeline has exactly two points where a request can genuinely fail:
//! reading the uploaded package and writing the output package. Everything in
//! between (the tidy passes, style synthesis, assembly) operates on an owned
//! tree and treats malformed shapes as no-ops rather than errors.
//!
//! The web layer collapses every variant into one generic user-facing
//! message; the full detail only ever reaches the server-side log.

use thiserror::Error;

/// All errors returned by the docsmith library.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The uploaded bytes are not a readable .docx package (corrupt archive,
    /// wrong file type, truncated upload).
    #[error("failed to decode document: {detail}")]
    Decode { detail: String },

    /// Writing the output .docx package failed. Rare for well-formed input;
    /// fatal for the request when it happens.
    #[error("failed to encode document: {detail}")]
    Encode { detail: String },
}

impl FormatError {
    pub(crate) fn decode(detail: impl Into<String>) -> Self {
        FormatError::Decode {
            detail: detail.into(),
        }
    }

    pub(crate) fn encode(detail: impl Into<String>) -> Self {
        FormatError::Encode {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_display_carries_detail() {
        let e = FormatError::decode("not a zip archive");
        let msg = e.to_string();
        assert!(msg.contains("decode"), "got: {msg}");
        assert!(msg.contains("not a zip archive"), "got: {msg}");
    }

    #[test]
    fn encode_display_carries_detail() {
        let e = FormatError::encode("zip write failed");
        assert!(e.to_string().contains("encode"));
    }
}
