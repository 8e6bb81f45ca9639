//! Assembly stage: wrap sanitized body markup and the synthesized
//! stylesheet into the two shapes callers need.
//!
//! Both outputs embed identical sanitized content; only the wrapping
//! differs. The full document is what the encoder's output corresponds to;
//! the preview fragment is what the caller embeds directly in its own page.

/// A complete standalone HTML document: doctype, head with the stylesheet,
/// body wrapping the content in the shell + container structure.
pub fn full_document(body: &str, stylesheet: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n\
         <style>\n{stylesheet}</style>\n</head>\n<body>\n\
         <div class=\"page\">\n{body}</div>\n</body>\n</html>\n"
    )
}

/// A lightweight preview fragment: stylesheet + bare content container, no
/// outer document structure.
pub fn preview_fragment(body: &str, stylesheet: &str) -> String {
    format!("<style>\n{stylesheet}</style>\n<div class=\"page\">\n{body}</div>\n")
}
