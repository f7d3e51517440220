//! Blind quote common types.
//!
//! This crate provides the data shared by the rendering engine and the
//! workflow layer:
//! - Pricing summary, line items, and UI state snapshots
//! - Operator override fields and the form-reader capability
//! - Lenient number parsing and money formatting
//! - Output format specifications

pub mod model;
pub mod numeric;
pub mod output;
pub mod overrides;

pub use model::{DistributionState, FeeState, LineItem, PricingSummary, QuoteSnapshot, UiState};
pub use numeric::{format_money, parse_leading_float, parse_leading_int};
pub use output::OutputFormat;
pub use overrides::{field_ids, FormReader, OverrideFields};
