//! Quote data projection scenarios.
//!
//! Each scenario mirrors a quote an operator would actually price and checks
//! the token values that end up on the printed document.

use bq_common::{FeeState, LineItem, OverrideFields, PricingSummary, QuoteSnapshot};
use bq_report::projector::keys;
use bq_report::sections::{AppendixTable, FabricClass, SummaryTable};
use bq_report::{project, FabricClassRules, QuoteConfig, QuoteDataProjector};

fn blind(fabric: &str, fabric_type: &str, price: f64) -> LineItem {
    LineItem {
        width: Some(1200.0),
        height: Some(1800.0),
        fabric: Some(fabric.to_string()),
        fabric_type: Some(fabric_type.to_string()),
        color: Some("Snow".to_string()),
        location: Some("Bed 1".to_string()),
        line_price: Some(price),
        ..Default::default()
    }
}

mod money {
    use super::*;

    fn summary() -> PricingSummary {
        PricingSummary {
            sum_price: Some(1000.0),
            first_rb_price: Some(600.0),
            dis_rb_price: Some(540.0),
            acce_sum: Some(0.0),
            e_acce_sum: Some(0.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_override_total_scenario() {
        let overrides = OverrideFields {
            final_offer_price: "1100".to_string(),
            ..Default::default()
        };
        let map = project(
            &summary(),
            &[],
            &overrides,
            &FeeState::default(),
            &QuoteConfig::default(),
        );

        assert_eq!(map[keys::SUBTOTAL], "$1000.00");
        assert_eq!(map[keys::GRAND_TOTAL], "$1100.00");
        assert_eq!(map[keys::GST], "$100.00");
        assert_eq!(map[keys::DEPOSIT], "$550.00");
        assert_eq!(map[keys::BALANCE], "$550.00");
        assert_eq!(map[keys::SAVINGS], "$60.00");

        let body = &map[keys::ITEMS_TABLE_BODY];
        assert!(!body.contains("Installation Accessories"));
        assert!(!body.contains("Motorised Accessories"));
    }

    #[test]
    fn test_total_falls_back_to_computed_gst_total() {
        let mut summary = summary();
        summary.gst = Some(1210.0);
        let map = project(
            &summary,
            &[],
            &OverrideFields::default(),
            &FeeState::default(),
            &QuoteConfig::default(),
        );
        assert_eq!(map[keys::GRAND_TOTAL], "$1210.00");
        assert_eq!(map[keys::GST], "$110.00");
    }

    #[test]
    fn test_unparseable_override_falls_back() {
        let overrides = OverrideFields {
            final_offer_price: "call us".to_string(),
            ..Default::default()
        };
        let map = project(
            &summary(),
            &[],
            &overrides,
            &FeeState::default(),
            &QuoteConfig::default(),
        );
        assert_eq!(map[keys::GRAND_TOTAL], "$0.00");
        assert_eq!(map[keys::DEPOSIT], "$0.00");
    }

    #[test]
    fn test_override_with_trailing_text() {
        let overrides = OverrideFields {
            final_offer_price: "990.50 incl. GST".to_string(),
            ..Default::default()
        };
        let map = project(
            &summary(),
            &[],
            &overrides,
            &FeeState::default(),
            &QuoteConfig::default(),
        );
        assert_eq!(map[keys::GRAND_TOTAL], "$990.50");
    }

    #[test]
    fn test_configured_rates() {
        let config = QuoteConfig::default()
            .with_gst_rate(0.15)
            .with_deposit_ratio(0.3);
        let overrides = OverrideFields {
            final_offer_price: "1150".to_string(),
            ..Default::default()
        };
        let map = QuoteDataProjector::new(config).project(
            &summary(),
            &[],
            &overrides,
            &FeeState::default(),
        );
        assert_eq!(map[keys::GST], "$150.00");
        assert_eq!(map[keys::DEPOSIT], "$345.00");
        assert_eq!(map[keys::BALANCE], "$805.00");
    }
}

mod appendix {
    use super::*;

    #[test]
    fn test_single_screen_blind() {
        let summary = PricingSummary {
            mul_times: Some(2.0),
            ..Default::default()
        };
        // The unmeasured item is skipped and does not consume an index.
        let items = vec![
            LineItem {
                width: Some(0.0),
                height: Some(0.0),
                ..Default::default()
            },
            blind("Vista", "SN", 100.0),
        ];
        let map = project(
            &summary,
            &items,
            &OverrideFields::default(),
            &FeeState::default(),
            &QuoteConfig::default(),
        );

        let table = &map[keys::ROLLER_BLINDS_TABLE];
        assert_eq!(table.matches("<tr>").count(), 2, "header row plus one item row");
        assert!(table.contains("$200.00"));
        assert!(table.contains(r#"<td class="bg-screen">Vista</td>"#));
        assert!(table.contains(r#"<td class="bg-screen">Snow</td>"#));
        assert!(table.contains("<td>Bed 1</td>"));
        assert!(table.contains(r#"<td class="text-center">1</td>"#));
        assert!(!table.contains(r#"<td class="text-center">2</td>"#));
        assert_eq!(table.matches("$200.00").count(), 1);
    }

    #[test]
    fn test_mixed_fabrics_and_unmeasured_items() {
        let items = vec![
            blind("Haven Light-Filter", "B1", 80.0),
            LineItem::default(),
            blind("Solar", "B4", 90.0),
            blind("Linen", "LF", 70.0),
        ];
        let table = AppendixTable::build(
            &items,
            &PricingSummary::default(),
            &FabricClassRules::default(),
        );
        let classes: Vec<FabricClass> = table.rows.iter().map(|r| r.fabric_class).collect();
        assert_eq!(
            classes,
            vec![FabricClass::LightFilter, FabricClass::Blockout, FabricClass::Plain]
        );
        let indices: Vec<usize> = table.rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }
}

mod summary_rows {
    use super::*;

    #[test]
    fn test_full_quote_rows() {
        let snapshot = QuoteSnapshot {
            summary: PricingSummary {
                first_rb_price: Some(800.0),
                dis_rb_price: Some(720.0),
                acce_sum: Some(45.0),
                e_acce_sum: Some(310.0),
                delivery_fee: Some(60.0),
                install_fee: Some(150.0),
                removal_fee: Some(25.0),
                ..Default::default()
            },
            items: vec![blind("Vista", "SN", 100.0), blind("Solar", "B2", 120.0)],
            ..Default::default()
        };
        let fees = FeeState {
            delivery_fee_excluded: true,
            removal_qty: Some(1.0),
            ..Default::default()
        };

        let table = SummaryTable::build(&snapshot.summary, &snapshot.items, &fees);
        let titles: Vec<&str> = table.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Roller Blinds Package",
                "Installation Accessories",
                "Motorised Accessories",
                "Delivery",
                "Installation",
                "Removal",
            ]
        );

        let delivery = &table.rows[3];
        assert_eq!(delivery.number, 4);
        assert!(delivery.excluded);
        assert_eq!(delivery.discounted_price, 0.0);

        let installation = &table.rows[4];
        assert_eq!(installation.qty, "2");
        assert_eq!(installation.discounted_price, 150.0);

        let html = table.to_html();
        assert_eq!(html.matches("is-excluded").count(), 1);
        assert!(html.contains(r#"<td data-label="Discounted Price" class="align-right">$0.00</td>"#));
    }
}
