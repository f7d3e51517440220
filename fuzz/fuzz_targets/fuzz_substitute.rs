//! Fuzz target for token substitution.
//!
//! Substitution must never panic. Templates without tokens, or with no
//! values to substitute, come back unchanged; unknown tokens survive
//! verbatim; brace-free values never add braces to the output.

#![no_main]

use arbitrary::Arbitrary;
use bq_report::substitute::{find_tokens, substitute, unresolved_tokens};
use bq_report::TokenMap;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    template: String,
    tokens: Vec<(String, String)>,
}

fn braces(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, '{' | '}')).count()
}

fuzz_target!(|input: Input| {
    let tokens: TokenMap = input.tokens.into_iter().collect();
    let out = substitute(&input.template, &tokens);

    if tokens.is_empty() || find_tokens(&input.template).is_empty() {
        assert_eq!(out, input.template);
    }

    for name in unresolved_tokens(&input.template, &tokens) {
        assert!(out.contains(name.as_str()));
    }

    if tokens.values().all(|value| braces(value) == 0) {
        assert!(braces(&out) <= braces(&input.template));
    }
});
