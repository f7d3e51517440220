//! Style and body fragment extraction.
//!
//! Extraction is a first-match text search over the whole document, not a
//! structural parse. Only the first `<style>` block and the first `<body>`
//! block are considered; the first closing tag after an opening tag ends the
//! block. Tag names match case-insensitively and may carry attributes.

use crate::error::{QuoteError, Result};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn style_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("style pattern is valid")
    })
}

fn body_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)<body\b[^>]*>(.*?)</body\s*>").expect("body pattern is valid")
    })
}

/// Return the first `<style>` block of `doc`, including its tags.
///
/// The tags are kept so that the block can be inserted verbatim into another
/// document's head.
pub fn extract_style(doc: &str) -> Option<&str> {
    style_pattern().find(doc).map(|m| m.as_str())
}

/// Return the first `<style>` block of `doc`, or `""` when there is none.
pub fn style_or_empty(doc: &str) -> &str {
    extract_style(doc).unwrap_or("")
}

/// Return the contents of the first `<body>` block of `doc`.
///
/// Fails with [`QuoteError::MissingBody`] when the document has no body
/// block; this aborts the whole render.
pub fn extract_body(doc: &str) -> Result<&str> {
    body_pattern()
        .captures(doc)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(QuoteError::MissingBody)
}

/// Fragments pulled out of a details document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragments<'a> {
    /// First style block with tags, or empty.
    pub style: &'a str,
    /// Inner contents of the first body block.
    pub body: &'a str,
}

impl<'a> Fragments<'a> {
    /// Extract both fragments from `doc`.
    pub fn extract(doc: &'a str) -> Result<Self> {
        let body = extract_body(doc)?;
        let style = style_or_empty(doc);
        debug!(
            style_bytes = style.len(),
            body_bytes = body.len(),
            "Extracted details fragments"
        );
        Ok(Self { style, body })
    }
}
