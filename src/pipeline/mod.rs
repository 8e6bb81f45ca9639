//! Pipeline stages for document re-styling.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap
//! implementations (e.g. a different reader backend) without touching other
//! stages.
//!
//! ## Data Flow
//!
//! ```text
//! decode ──▶ tidy ──▶ style ──▶ assemble ──▶ encode
//! (docx-rs)  (tree    (CSS      (full doc     (OOXML
//!            rewrites) synth)    + preview)    zip)
//! ```
//!
//! 1. [`decode`]   — read the uploaded .docx into a [`crate::markup::MarkupTree`]
//! 2. [`tidy`]     — spacing normalization, heading title-casing, smart
//!    quotes; each pass independently toggled, always in that order
//! 3. [`style`]    — synthesize the preset stylesheet (pure, no I/O)
//! 4. [`assemble`] — wrap the sanitized body into a standalone document and
//!    a preview fragment
//! 5. [`encode`]   — serialise the tree back into a .docx package

pub mod assemble;
pub mod decode;
pub mod encode;
pub mod style;
pub mod tidy;
