//! Fuzz target for style/body extraction and composition.
//!
//! Tests that extraction and splicing handle arbitrary documents without
//! panicking, including markers split across multi-byte characters.

#![no_main]

use bq_report::compose::compose_with_report;
use bq_report::fragment::{extract_body, style_or_empty};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let (primary, secondary) = data;
    let style = style_or_empty(secondary);
    if let Ok(body) = extract_body(secondary) {
        let (html, report) = compose_with_report(primary, style, body);
        if !report.head_inserted && !report.body_inserted {
            assert_eq!(html, primary);
        }
    }
});
