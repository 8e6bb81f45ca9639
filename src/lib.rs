//! # docsmith
//!
//! Re-style Word documents: upload a .docx, pick a visual preset and a set
//! of tidy options, get back a freshly styled .docx plus a sanitized HTML
//! preview.
//!
//! ## Why this crate?
//!
//! Documents written by many hands drift: doubled spaces, SHOUTED headings,
//! straight quotes pasted from five different editors, ad-hoc fonts. Fixing
//! that by hand is tedious and never sticks. This crate treats re-styling as
//! a single deterministic batch transform — no state, no queue, no partial
//! results.
//!
//! ## Pipeline Overview
//!
//! ```text
//! .docx
//!  │
//!  ├─ 1. Decode    docx-rs → markup tree
//!  ├─ 2. Tidy      spacing → heading title-case → smart quotes (toggleable)
//!  ├─ 3. Style     preset + options → stylesheet (pure)
//!  ├─ 4. Assemble  sanitized body → full document + preview fragment
//!  └─ 5. Encode    tree + theme → styled .docx package
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docsmith::{format_document, FormatOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("report.docx")?;
//!     let options = FormatOptions::builder()
//!         .preset_token("modern")
//!         .auto_number_headings(true)
//!         .build();
//!     let output = format_document(&bytes, &options)?;
//!     std::fs::write("report-restyled.html", &output.preview_html)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `server` | on      | Enables the `docsmith-server` binary (axum + tokio + clap) |
//!
//! Disable `server` when using only the library to avoid pulling in the web
//! stack:
//! ```toml
//! docsmith = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod format;
pub mod markup;
pub mod output;
pub mod pipeline;
pub mod preset;

#[cfg(feature = "server")]
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{parse_flag, FormatOptions, FormatOptionsBuilder};
pub use error::FormatError;
pub use format::format_document;
pub use markup::{Block, Inline, MarkupTree};
pub use output::{FormatOutput, FormatStats};
pub use preset::{PresetTheme, StylePreset};
