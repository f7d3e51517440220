//! Quote data projection: pricing, items, and overrides to a flat token map.
//!
//! Projection never fails. Absent or malformed numbers are treated as zero
//! so that a partial quote can always be previewed.

use crate::config::QuoteConfig;
use crate::sections::customer::newlines_to_br;
use crate::sections::{customer_info_html, AppendixTable, QuoteTotals, SummaryTable};
use bq_common::{FeeState, LineItem, OverrideFields, PricingSummary};
use std::collections::BTreeMap;
use tracing::debug;

/// Placeholder key to formatted display value.
pub type TokenMap = BTreeMap<String, String>;

/// Token keys produced by the projector.
pub mod keys {
    pub const QUOTE_ID: &str = "quoteId";
    pub const ISSUE_DATE: &str = "issueDate";
    pub const DUE_DATE: &str = "dueDate";
    pub const CUSTOMER_INFO_HTML: &str = "customerInfoHtml";
    pub const ITEMS_TABLE_BODY: &str = "itemsTableBody";
    pub const SUBTOTAL: &str = "subtotal";
    pub const GST: &str = "gst";
    pub const GRAND_TOTAL: &str = "grandTotal";
    pub const DEPOSIT: &str = "deposit";
    pub const BALANCE: &str = "balance";
    pub const SAVINGS: &str = "savings";
    pub const TERMS_AND_CONDITIONS: &str = "termsAndConditions";
    pub const ROLLER_BLINDS_TABLE: &str = "rollerBlindsTable";

    /// Every key in the projected map.
    pub const ALL: [&str; 13] = [
        QUOTE_ID,
        ISSUE_DATE,
        DUE_DATE,
        CUSTOMER_INFO_HTML,
        ITEMS_TABLE_BODY,
        SUBTOTAL,
        GST,
        GRAND_TOTAL,
        DEPOSIT,
        BALANCE,
        SAVINGS,
        TERMS_AND_CONDITIONS,
        ROLLER_BLINDS_TABLE,
    ];
}

/// Projects quote inputs into the token map consumed by the substitutor.
#[derive(Debug, Clone, Default)]
pub struct QuoteDataProjector {
    config: QuoteConfig,
}

impl QuoteDataProjector {
    /// Create a projector with configuration.
    pub fn new(config: QuoteConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Build the token map.
    pub fn project(
        &self,
        summary: &PricingSummary,
        items: &[LineItem],
        overrides: &OverrideFields,
        fees: &FeeState,
    ) -> TokenMap {
        project(summary, items, overrides, fees, &self.config)
    }
}

/// Build the token map for one render.
pub fn project(
    summary: &PricingSummary,
    items: &[LineItem],
    overrides: &OverrideFields,
    fees: &FeeState,
    config: &QuoteConfig,
) -> TokenMap {
    let totals = QuoteTotals::compute(summary, overrides, config);
    let summary_table = SummaryTable::build(summary, items, fees);
    let appendix = AppendixTable::build(items, summary, &config.fabric_classes);

    let terms = if overrides.terms_conditions.is_empty() {
        config.default_terms.as_str()
    } else {
        overrides.terms_conditions.as_str()
    };

    debug!(
        items = items.len(),
        appendix_rows = appendix.rows.len(),
        summary_rows = summary_table.rows.len(),
        overridden_total = totals.overridden,
        "Projected quote data"
    );

    let entries = [
        (keys::QUOTE_ID, overrides.quote_id.clone()),
        (keys::ISSUE_DATE, overrides.issue_date.clone()),
        (keys::DUE_DATE, overrides.due_date.clone()),
        (keys::CUSTOMER_INFO_HTML, customer_info_html(overrides)),
        (keys::ITEMS_TABLE_BODY, summary_table.to_html()),
        (keys::SUBTOTAL, totals.subtotal_display()),
        (keys::GST, totals.gst_display()),
        (keys::GRAND_TOTAL, totals.grand_total_display()),
        (keys::DEPOSIT, totals.deposit_display()),
        (keys::BALANCE, totals.balance_display()),
        (keys::SAVINGS, totals.savings_display()),
        (keys::TERMS_AND_CONDITIONS, newlines_to_br(terms)),
        (keys::ROLLER_BLINDS_TABLE, appendix.to_html()),
    ];

    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
