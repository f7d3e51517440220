//! First-page line-item table.
//!
//! Row order: the roller blind package, optional accessory subtotals, then
//! delivery, installation, and removal. Rows are numbered over the rows
//! actually emitted.

use bq_common::{format_money, FeeState, LineItem, PricingSummary};
use serde::{Deserialize, Serialize};

const APPENDIX_NOTE: &str = "See appendix for detailed specifications.";

/// How a row's description and price cells are styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStyle {
    /// Bold title with appendix note; prices wrapped in original/discounted spans.
    Package,
    /// Bold title with appendix note.
    Accessory,
    /// Plain title; price cell may be marked excluded.
    Fee,
}

/// Single summary table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub number: usize,
    pub title: String,
    pub style: RowStyle,
    /// Display quantity (`NA` for accessory subtotals).
    pub qty: String,
    pub price: f64,
    pub discounted_price: f64,
    /// Fee waived: price is struck through and the discounted price is zero.
    pub excluded: bool,
}

impl SummaryRow {
    fn to_html(&self) -> String {
        let description = match self.style {
            RowStyle::Package | RowStyle::Accessory => format!(
                r#"<div class="description"><strong>{}</strong></div>
                    <div class="details">{}</div>"#,
                self.title, APPENDIX_NOTE
            ),
            RowStyle::Fee => format!(r#"<div class="description">{}</div>"#, self.title),
        };

        let (price, discounted) = match self.style {
            RowStyle::Package => (
                format!(
                    r#"<span class="original-price">{}</span>"#,
                    format_money(self.price)
                ),
                format!(
                    r#"<span class="discounted-price">{}</span>"#,
                    format_money(self.discounted_price)
                ),
            ),
            _ => (
                format_money(self.price),
                format_money(self.discounted_price),
            ),
        };

        let price_class = if self.excluded {
            "align-right is-excluded"
        } else {
            "align-right"
        };

        format!(
            r##"
            <tr>
                <td data-label="#">{number}</td>
                <td data-label="Description">
                    {description}
                </td>
                <td data-label="QTY" class="align-right">{qty}</td>
                <td data-label="Price" class="{price_class}">{price}</td>
                <td data-label="Discounted Price" class="align-right">{discounted}</td>
            </tr>
        "##,
            number = self.number,
            description = description,
            qty = self.qty,
            price_class = price_class,
            price = price,
            discounted = discounted,
        )
    }
}

/// Summary table for the first page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Build the rows from the pricing summary, items, and fee panel state.
    pub fn build(summary: &PricingSummary, items: &[LineItem], fees: &FeeState) -> Self {
        let valid_count = LineItem::count_valid(items);
        let mut rows = Vec::with_capacity(6);
        let mut push = |title: &str,
                        style: RowStyle,
                        qty: String,
                        price: f64,
                        discounted: f64,
                        excluded: bool| {
            let number = rows.len() + 1;
            rows.push(SummaryRow {
                number,
                title: title.to_string(),
                style,
                qty,
                price,
                discounted_price: discounted,
                excluded,
            });
        };

        push(
            "Roller Blinds Package",
            RowStyle::Package,
            valid_count.to_string(),
            summary.first_rb_price.unwrap_or(0.0),
            summary.dis_rb_price.unwrap_or(0.0),
            false,
        );

        let accessories = [
            ("Installation Accessories", summary.acce_sum),
            ("Motorised Accessories", summary.e_acce_sum),
        ];
        for (title, sum) in accessories {
            let sum = sum.unwrap_or(0.0);
            if sum > 0.0 {
                push(title, RowStyle::Accessory, "NA".to_string(), sum, sum, false);
            }
        }

        let delivery_qty = fees
            .delivery_qty
            .filter(|q| q.is_finite() && *q != 0.0)
            .unwrap_or(1.0);
        let removal_qty = fees.removal_qty.unwrap_or(0.0);
        let fee_rows = [
            ("Delivery", format_qty(delivery_qty), summary.delivery_fee, fees.delivery_fee_excluded),
            ("Installation", valid_count.to_string(), summary.install_fee, fees.install_fee_excluded),
            ("Removal", format_qty(removal_qty), summary.removal_fee, fees.removal_fee_excluded),
        ];
        for (title, qty, fee, excluded) in fee_rows {
            let fee = fee.unwrap_or(0.0);
            let discounted = if excluded { 0.0 } else { fee };
            push(title, RowStyle::Fee, qty, fee, discounted, excluded);
        }

        Self { rows }
    }

    /// Render the table body rows.
    pub fn to_html(&self) -> String {
        self.rows.iter().map(SummaryRow::to_html).collect()
    }
}

fn format_qty(qty: f64) -> String {
    if qty.is_finite() {
        format!("{}", qty)
    } else {
        "0".to_string()
    }
}
