//! Grand total, GST, deposit, and savings figures.

use crate::config::QuoteConfig;
use bq_common::{format_money, parse_leading_float, OverrideFields, PricingSummary};
use serde::{Deserialize, Serialize};

/// Monetary totals shown in the quote summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteTotals {
    /// Computed subtotal.
    pub subtotal: f64,
    /// Final offer price, or the computed GST-inclusive total.
    pub grand_total: f64,
    /// GST component contained in the grand total.
    pub gst: f64,
    /// Amount due up front.
    pub deposit: f64,
    /// Amount due on completion.
    pub balance: f64,
    /// Package discount.
    pub savings: f64,
    /// Whether the grand total came from the operator override.
    pub overridden: bool,
}

impl QuoteTotals {
    /// Compute totals. Never fails; unusable inputs count as zero.
    pub fn compute(
        summary: &PricingSummary,
        overrides: &OverrideFields,
        config: &QuoteConfig,
    ) -> Self {
        let offer = parse_leading_float(&overrides.final_offer_price).filter(|v| usable(*v));
        let overridden = offer.is_some();
        let grand_total = offer
            .or_else(|| summary.gst.filter(|v| usable(*v)))
            .unwrap_or(0.0);

        let gst = grand_total / (1.0 + config.gst_rate) * config.gst_rate;
        let deposit = grand_total * config.deposit_ratio;
        let balance = grand_total * (1.0 - config.deposit_ratio);

        Self {
            subtotal: summary.sum_price.unwrap_or(0.0),
            grand_total,
            gst,
            deposit,
            balance,
            savings: summary.savings(),
            overridden,
        }
    }

    pub fn subtotal_display(&self) -> String {
        format_money(self.subtotal)
    }

    pub fn grand_total_display(&self) -> String {
        format_money(self.grand_total)
    }

    pub fn gst_display(&self) -> String {
        format_money(self.gst)
    }

    pub fn deposit_display(&self) -> String {
        format_money(self.deposit)
    }

    pub fn balance_display(&self) -> String {
        format_money(self.balance)
    }

    pub fn savings_display(&self) -> String {
        format_money(self.savings)
    }
}

// Zero and non-finite values fall through to the next source.
fn usable(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(price: &str) -> OverrideFields {
        OverrideFields {
            final_offer_price: price.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_override_price_wins() {
        let summary = PricingSummary {
            gst: Some(550.0),
            ..Default::default()
        };
        let totals = QuoteTotals::compute(&summary, &overrides("1100"), &QuoteConfig::default());
        assert!(totals.overridden);
        assert_eq!(totals.grand_total_display(), "$1100.00");
        assert_eq!(totals.gst_display(), "$100.00");
        assert_eq!(totals.deposit_display(), "$550.00");
        assert_eq!(totals.balance_display(), "$550.00");
    }

    #[test]
    fn test_falls_back_to_summary_gst() {
        let summary = PricingSummary {
            gst: Some(550.0),
            ..Default::default()
        };
        for price in ["", "abc", "0"] {
            let totals = QuoteTotals::compute(&summary, &overrides(price), &QuoteConfig::default());
            assert!(!totals.overridden, "override {:?} should not apply", price);
            assert_eq!(totals.grand_total_display(), "$550.00");
            assert_eq!(totals.gst_display(), "$50.00");
        }
    }

    #[test]
    fn test_everything_absent_is_zero() {
        let totals = QuoteTotals::compute(
            &PricingSummary::default(),
            &OverrideFields::default(),
            &QuoteConfig::default(),
        );
        assert_eq!(totals.subtotal_display(), "$0.00");
        assert_eq!(totals.grand_total_display(), "$0.00");
        assert_eq!(totals.gst_display(), "$0.00");
        assert_eq!(totals.deposit_display(), "$0.00");
        assert_eq!(totals.balance_display(), "$0.00");
        assert_eq!(totals.savings_display(), "$0.00");
    }

    #[test]
    fn test_savings_and_subtotal() {
        let summary = PricingSummary {
            sum_price: Some(500.0),
            first_rb_price: Some(600.0),
            dis_rb_price: Some(540.0),
            ..Default::default()
        };
        let totals = QuoteTotals::compute(&summary, &OverrideFields::default(), &QuoteConfig::default());
        assert_eq!(totals.subtotal_display(), "$500.00");
        assert_eq!(totals.savings_display(), "$60.00");
    }

    #[test]
    fn test_custom_deposit_ratio() {
        let config = QuoteConfig::default().with_deposit_ratio(0.3);
        let totals = QuoteTotals::compute(&PricingSummary::default(), &overrides("1000"), &config);
        assert_eq!(totals.deposit_display(), "$300.00");
        assert_eq!(totals.balance_display(), "$700.00");
    }
}
