//! Appendix item table: one row per measured blind.

use crate::config::FabricClassRules;
use bq_common::{format_money, LineItem, PricingSummary};
use serde::{Deserialize, Serialize};

const HEADERS: [&str; 8] = ["#", "F-NAME", "F-COLOR", "Location", "HD", "DUAL", "MOTOR", "PRICE"];
const TABLE_TITLE: &str = "Roller Blinds - Detailed List";
const CHECK: &str = "✓";

/// Background style of a fabric cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FabricClass {
    LightFilter,
    Screen,
    Blockout,
    Plain,
}

impl FabricClass {
    /// Classify an item. Priority: light-filter keyword in the fabric name,
    /// then screen codes, then block-out codes.
    pub fn classify(item: &LineItem, rules: &FabricClassRules) -> Self {
        let keyword = rules.light_filter_keyword.to_lowercase();
        if let Some(fabric) = item.fabric.as_deref() {
            if !keyword.is_empty() && fabric.to_lowercase().contains(&keyword) {
                return FabricClass::LightFilter;
            }
        }

        let Some(code) = item.fabric_type.as_deref() else {
            return FabricClass::Plain;
        };
        if rules.screen_codes.iter().any(|c| c == code) {
            FabricClass::Screen
        } else if rules.blockout_codes.iter().any(|c| c == code) {
            FabricClass::Blockout
        } else {
            FabricClass::Plain
        }
    }

    /// Get the CSS class for this fabric class.
    pub fn css_class(&self) -> &'static str {
        match self {
            FabricClass::LightFilter => "bg-light-filter",
            FabricClass::Screen => "bg-screen",
            FabricClass::Blockout => "bg-blockout",
            FabricClass::Plain => "",
        }
    }
}

/// Single appendix row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendixRow {
    /// 1-based position among valid items.
    pub index: usize,
    pub fabric: String,
    pub color: String,
    pub location: String,
    pub hd: bool,
    pub dual: bool,
    pub motor: bool,
    /// Line price times the summary multiplier.
    pub price: f64,
    pub fabric_class: FabricClass,
}

impl AppendixRow {
    fn to_html(&self) -> String {
        let class = self.fabric_class.css_class();
        format!(
            r#"
                    <tr>
                        <td class="text-center">{index}</td>
                        <td class="{class}">{fabric}</td>
                        <td class="{class}">{color}</td>
                        <td>{location}</td>
                        <td class="text-center">{hd}</td>
                        <td class="text-center">{dual}</td>
                        <td class="text-center">{motor}</td>
                        <td class="text-right">{price}</td>
                    </tr>
                "#,
            index = self.index,
            class = class,
            fabric = self.fabric,
            color = self.color,
            location = self.location,
            hd = tick(self.hd),
            dual = tick(self.dual),
            motor = tick(self.motor),
            price = format_money(self.price),
        )
    }
}

fn tick(flag: bool) -> &'static str {
    if flag {
        CHECK
    } else {
        ""
    }
}

/// Appendix table containing every measured item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendixTable {
    pub rows: Vec<AppendixRow>,
}

impl AppendixTable {
    /// Build rows for items that have both dimensions; others are skipped.
    pub fn build(items: &[LineItem], summary: &PricingSummary, rules: &FabricClassRules) -> Self {
        let multiplier = summary.multiplier();
        let rows = items
            .iter()
            .filter(|item| item.is_valid())
            .enumerate()
            .map(|(position, item)| AppendixRow {
                index: position + 1,
                fabric: item.fabric.clone().unwrap_or_default(),
                color: item.color.clone().unwrap_or_default(),
                location: item.location.clone().unwrap_or_default(),
                hd: item.has_hd_winder(),
                dual: item.has_dual(),
                motor: item.has_motor(),
                price: item.line_price.unwrap_or(0.0) * multiplier,
                fabric_class: FabricClass::classify(item, rules),
            })
            .collect();
        Self { rows }
    }

    /// Render the complete table.
    pub fn to_html(&self) -> String {
        let headers: String = HEADERS.iter().map(|h| format!("<th>{}</th>", h)).collect();
        let rows: String = self.rows.iter().map(AppendixRow::to_html).collect();
        format!(
            r#"
            <table class="items-table">
                <thead>
                    <tr class="table-title">
                        <th colspan="{columns}">{title}</th>
                    </tr>
                    <tr>
                        {headers}
                    </tr>
                </thead>
                <tbody>
                    {rows}
                </tbody>
            </table>
        "#,
            columns = HEADERS.len(),
            title = TABLE_TITLE,
            headers = headers,
            rows = rows,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(fabric: &str, fabric_type: &str) -> LineItem {
        LineItem {
            width: Some(1000.0),
            height: Some(1200.0),
            fabric: Some(fabric.to_string()),
            fabric_type: Some(fabric_type.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_priority() {
        let rules = FabricClassRules::default();
        // Keyword beats the screen code.
        assert_eq!(
            FabricClass::classify(&item("Vista Light-Filter", "SN"), &rules),
            FabricClass::LightFilter
        );
        assert_eq!(FabricClass::classify(&item("Vista", "SN"), &rules), FabricClass::Screen);
        assert_eq!(FabricClass::classify(&item("Vista", "B3"), &rules), FabricClass::Blockout);
        assert_eq!(FabricClass::classify(&item("Vista", "B6"), &rules), FabricClass::Plain);
        assert_eq!(
            FabricClass::classify(&LineItem::default(), &rules),
            FabricClass::Plain
        );
    }

    #[test]
    fn test_css_class() {
        assert_eq!(FabricClass::LightFilter.css_class(), "bg-light-filter");
        assert_eq!(FabricClass::Screen.css_class(), "bg-screen");
        assert_eq!(FabricClass::Blockout.css_class(), "bg-blockout");
        assert_eq!(FabricClass::Plain.css_class(), "");
    }

    #[test]
    fn test_invalid_items_skipped_and_index_renumbered() {
        let items = vec![
            item("A", "SN"),
            LineItem::default(),
            item("C", "B1"),
        ];
        let table = AppendixTable::build(&items, &PricingSummary::default(), &FabricClassRules::default());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].index, 1);
        assert_eq!(table.rows[1].index, 2);
        assert_eq!(table.rows[1].fabric, "C");
    }

    #[test]
    fn test_price_uses_multiplier() {
        let mut blind = item("A", "SN");
        blind.line_price = Some(100.0);
        let summary = PricingSummary {
            mul_times: Some(2.0),
            ..Default::default()
        };
        let table = AppendixTable::build(&[blind], &summary, &FabricClassRules::default());
        assert_eq!(table.rows[0].price, 200.0);
        assert!(table.to_html().contains("$200.00"));
    }

    #[test]
    fn test_flags_render_ticks() {
        let mut blind = item("A", "SN");
        blind.winder = Some("HD".to_string());
        blind.dual = Some("D".to_string());
        blind.motor = Some("M1".to_string());
        let table = AppendixTable::build(&[blind], &PricingSummary::default(), &FabricClassRules::default());
        let row = &table.rows[0];
        assert!(row.hd && row.dual && row.motor);
        assert_eq!(table.to_html().matches(CHECK).count(), 3);
    }

    #[test]
    fn test_empty_table_has_headers() {
        let html = AppendixTable { rows: vec![] }.to_html();
        assert!(html.contains(r#"<table class="items-table">"#));
        assert!(html.contains(r#"<th colspan="8">Roller Blinds - Detailed List</th>"#));
        assert!(html.contains("<th>F-NAME</th>"));
        assert!(!html.contains("<td"));
    }
}
