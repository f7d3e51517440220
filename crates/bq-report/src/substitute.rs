//! Flat placeholder substitution.
//!
//! Token grammar: `{{key}}` or `{{{key}}}` where `key` matches
//! `[A-Za-z0-9_-]+`. Each token is looked up once; known keys are replaced
//! with the raw mapped value and unknown tokens are left verbatim. Inserted
//! values are never re-scanned within the same pass.

use crate::projector::TokenMap;
use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\{?([A-Za-z0-9_-]+)\}\}\}?").expect("token pattern is valid")
    })
}

/// Replace every known token in `template` with its value from `tokens`.
pub fn substitute(template: &str, tokens: &TokenMap) -> String {
    token_pattern()
        .replace_all(template, |caps: &Captures<'_>| match tokens.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Keys of every token in `template`, in order of appearance.
pub fn find_tokens(template: &str) -> Vec<&str> {
    token_pattern()
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Keys referenced by `template` that `tokens` does not define.
pub fn unresolved_tokens(template: &str, tokens: &TokenMap) -> BTreeSet<String> {
    find_tokens(template)
        .into_iter()
        .filter(|key| !tokens.contains_key(*key))
        .map(str::to_string)
        .collect()
}
