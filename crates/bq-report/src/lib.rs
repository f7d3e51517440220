//! Quote document generator for window-covering orders.
//!
//! Combines a primary quote template with a secondary details template and
//! fills both with projected pricing data, producing one self-contained HTML
//! string for preview, print, or export.
//!
//! # Pipeline
//!
//! 1. Both template sources are loaded concurrently ([`source::fetch_pair`])
//! 2. The first `<style>` block and the `<body>` contents are pulled out of
//!    the details template ([`fragment`])
//! 3. Those fragments are inserted before `</head>` and `</body>` of the
//!    quote template ([`compose`])
//! 4. Pricing, line items, and overrides are projected into a flat token map
//!    ([`projector`])
//! 5. One substitution pass fills `{{key}}` / `{{{key}}}` tokens
//!    ([`substitute`])
//!
//! # Example
//!
//! ```no_run
//! use bq_common::{OverrideFields, QuoteSnapshot};
//! use bq_report::{QuoteConfig, QuoteGenerator};
//! use bq_report::source::FileSource;
//!
//! let generator = QuoteGenerator::new(QuoteConfig::default());
//! let snapshot = QuoteSnapshot::default();
//! let overrides = OverrideFields::default();
//! let quote = FileSource::new("templates/quote-template.html");
//! let details = FileSource::new("templates/detailed-item-list.html");
//! let rendered = generator.generate_from_sources(&quote, &details, &snapshot, &overrides).unwrap();
//! println!("{}", rendered.html);
//! ```

pub mod compose;
pub mod config;
pub mod error;
pub mod fragment;
pub mod generator;
pub mod projector;
pub mod sections;
pub mod source;
pub mod substitute;

pub use config::{FabricClassRules, QuoteConfig, TemplatePaths};
pub use error::{QuoteError, Result};
pub use generator::{QuoteGenerator, RenderedQuote};
pub use projector::{project, QuoteDataProjector, TokenMap};
