//! Fuzz target for quote snapshot parsing.
//!
//! Parsing should only ever return an error; a parsed snapshot must project
//! without panicking.

#![no_main]

use bq_common::{OverrideFields, QuoteSnapshot};
use bq_report::QuoteConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(snapshot) = serde_json::from_slice::<QuoteSnapshot>(data) {
        let _ = bq_report::project(
            &snapshot.summary,
            &snapshot.items,
            &OverrideFields::default(),
            &snapshot.ui.fee,
            &QuoteConfig::default(),
        );
    }
});
