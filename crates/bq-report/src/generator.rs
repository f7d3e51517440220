//! Quote generator implementation.

use crate::compose::{compose_with_report, ComposeReport};
use crate::config::QuoteConfig;
use crate::error::Result;
use crate::fragment::Fragments;
use crate::projector::{project, TokenMap};
use crate::source::{fetch_pair, source_for, TemplateSource};
use crate::substitute::{substitute, unresolved_tokens};

use bq_common::{OverrideFields, QuoteSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Result of one render.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedQuote {
    /// Final self-contained HTML document.
    pub html: String,
    /// Token map used for substitution.
    pub tokens: TokenMap,
    /// Tokens in the composed template that the map did not define.
    pub unresolved: BTreeSet<String>,
    /// Which insertion anchors the quote template provided.
    #[serde(skip)]
    pub compose: ComposeReport,
    /// Render timestamp.
    pub rendered_at: DateTime<Utc>,
}

impl RenderedQuote {
    /// One-line description for summaries and logs.
    pub fn summary_line(&self) -> String {
        format!(
            "{} bytes, {} tokens, {} unresolved",
            self.html.len(),
            self.tokens.len(),
            self.unresolved.len()
        )
    }
}

/// Quote generator.
///
/// Holds configuration only; every call takes its own snapshot, so
/// concurrent renders never share state.
pub struct QuoteGenerator {
    config: QuoteConfig,
}

impl QuoteGenerator {
    /// Create a new quote generator with configuration.
    pub fn new(config: QuoteConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(QuoteConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Project the snapshot and overrides into a token map.
    pub fn project(&self, snapshot: &QuoteSnapshot, overrides: &OverrideFields) -> TokenMap {
        project(
            &snapshot.summary,
            &snapshot.items,
            overrides,
            &snapshot.ui.fee,
            &self.config,
        )
    }

    /// Render from template sources, loading both concurrently.
    pub fn generate_from_sources(
        &self,
        quote: &dyn TemplateSource,
        details: &dyn TemplateSource,
        snapshot: &QuoteSnapshot,
        overrides: &OverrideFields,
    ) -> Result<RenderedQuote> {
        let (quote_template, details_template) = fetch_pair(quote, details)?;
        self.generate(&quote_template, &details_template, snapshot, overrides)
    }

    /// Render from the template locations in the configuration.
    pub fn generate_from_config_paths(
        &self,
        snapshot: &QuoteSnapshot,
        overrides: &OverrideFields,
    ) -> Result<RenderedQuote> {
        let quote = source_for(&self.config.templates.quote);
        let details = source_for(&self.config.templates.details);
        self.generate_from_sources(quote.as_ref(), details.as_ref(), snapshot, overrides)
    }

    /// Render from already loaded template text.
    pub fn generate(
        &self,
        quote_template: &str,
        details_template: &str,
        snapshot: &QuoteSnapshot,
        overrides: &OverrideFields,
    ) -> Result<RenderedQuote> {
        let fragments = Fragments::extract(details_template)?;
        let (composed, compose) =
            compose_with_report(quote_template, fragments.style, fragments.body);

        let tokens = self.project(snapshot, overrides);
        let unresolved = unresolved_tokens(&composed, &tokens);
        if !unresolved.is_empty() {
            debug!(unresolved = ?unresolved, "Template references tokens with no value");
        }

        let html = self.finish(substitute(&composed, &tokens));

        let rendered = RenderedQuote {
            html,
            tokens,
            unresolved,
            compose,
            rendered_at: Utc::now(),
        };

        info!(
            bytes = rendered.html.len(),
            tokens = rendered.tokens.len(),
            unresolved = rendered.unresolved.len(),
            "Quote rendered"
        );

        Ok(rendered)
    }

    fn finish(&self, html: String) -> String {
        if !self.config.minify {
            return html;
        }
        let cfg = minify_html::Cfg {
            minify_js: true,
            minify_css: true,
            ..Default::default()
        };
        String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
    }
}
