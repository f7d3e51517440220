//! Merge details fragments into the primary quote template.
//!
//! The primary template must contain a `</head>` and a `</body>` marker.
//! The style fragment is inserted immediately before the first `</head>` and
//! the body fragment immediately before the first `</body>`. Markers are
//! matched exactly. A missing marker leaves the template unchanged at that
//! insertion point and is reported through [`ComposeReport`] and a warning.

use crate::fragment::Fragments;
use tracing::warn;

/// Closing head marker of the primary template.
pub const HEAD_CLOSE: &str = "</head>";
/// Closing body marker of the primary template.
pub const BODY_CLOSE: &str = "</body>";

/// Which insertions were performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeReport {
    pub head_inserted: bool,
    pub body_inserted: bool,
}

impl ComposeReport {
    /// Whether both insertion anchors were present.
    pub fn is_complete(&self) -> bool {
        self.head_inserted && self.body_inserted
    }
}

/// Insert `style` before `</head>` and `body` before `</body>` of `primary`.
pub fn compose(primary: &str, style: &str, body: &str) -> String {
    compose_with_report(primary, style, body).0
}

/// Compose from extracted [`Fragments`].
pub fn compose_fragments(primary: &str, fragments: &Fragments<'_>) -> String {
    compose(primary, fragments.style, fragments.body)
}

/// Like [`compose`], also reporting which anchors were found.
pub fn compose_with_report(primary: &str, style: &str, body: &str) -> (String, ComposeReport) {
    let (with_style, head_inserted) = insert_before(primary, HEAD_CLOSE, style);
    if !head_inserted {
        warn!(marker = HEAD_CLOSE, "Quote template has no insertion anchor; style not inserted");
    }

    let (merged, body_inserted) = insert_before(&with_style, BODY_CLOSE, body);
    if !body_inserted {
        warn!(marker = BODY_CLOSE, "Quote template has no insertion anchor; body not inserted");
    }

    (
        merged,
        ComposeReport {
            head_inserted,
            body_inserted,
        },
    )
}

fn insert_before(haystack: &str, marker: &str, insertion: &str) -> (String, bool) {
    match haystack.find(marker) {
        Some(idx) => {
            let mut out = String::with_capacity(haystack.len() + insertion.len());
            out.push_str(&haystack[..idx]);
            out.push_str(insertion);
            out.push_str(&haystack[idx..]);
            (out, true)
        }
        None => (haystack.to_string(), false),
    }
}
