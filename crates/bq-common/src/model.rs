//! Quote data model shared by the rendering engine and the workflows.
//!
//! All types deserialize from the camelCase JSON emitted by the calculation
//! engine and the application state container. Missing fields default to
//! `None`/zero so that a partially populated quote still renders.

use serde::{Deserialize, Serialize};

/// Pricing aggregate computed by the calculation engine.
///
/// Read-only for this crate family. Every numeric field is optional and is
/// treated as zero when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingSummary {
    /// Subtotal of the whole quote.
    pub sum_price: Option<f64>,
    /// Roller blind package price before discount.
    pub first_rb_price: Option<f64>,
    /// Roller blind package price after discount.
    pub dis_rb_price: Option<f64>,
    /// Installation accessories subtotal.
    pub acce_sum: Option<f64>,
    /// Motorised accessories subtotal.
    pub e_acce_sum: Option<f64>,
    /// Delivery fee.
    pub delivery_fee: Option<f64>,
    /// Installation fee.
    pub install_fee: Option<f64>,
    /// Removal fee.
    pub removal_fee: Option<f64>,
    /// Summary-level price multiplier applied to appendix line prices.
    pub mul_times: Option<f64>,
    /// GST-inclusive total.
    pub gst: Option<f64>,
}

impl PricingSummary {
    /// Multiplier for appendix line prices. Absent or zero means 1.
    pub fn multiplier(&self) -> f64 {
        match self.mul_times {
            Some(m) if m != 0.0 && m.is_finite() => m,
            _ => 1.0,
        }
    }

    /// Savings shown on the quote: package price minus discounted price.
    pub fn savings(&self) -> f64 {
        self.first_rb_price.unwrap_or(0.0) - self.dis_rb_price.unwrap_or(0.0)
    }
}

/// One configured window-covering unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub fabric: Option<String>,
    /// Classification code, e.g. `SN` for screen or `B1`..`B5` for block-out.
    pub fabric_type: Option<String>,
    pub color: Option<String>,
    pub location: Option<String>,
    /// Winder type; `HD` marks a heavy-duty winder.
    pub winder: Option<String>,
    /// `D` marks one half of a dual-bracket pair.
    pub dual: Option<String>,
    pub motor: Option<String>,
    pub line_price: Option<f64>,
}

impl LineItem {
    /// An item counts only when both dimensions are set and non-zero.
    pub fn is_valid(&self) -> bool {
        fn set(dim: Option<f64>) -> bool {
            matches!(dim, Some(v) if v != 0.0 && !v.is_nan())
        }
        set(self.width) && set(self.height)
    }

    /// Whether this item is one half of a dual-bracket pair.
    pub fn has_dual(&self) -> bool {
        self.dual.as_deref() == Some("D")
    }

    /// Whether the item has a heavy-duty winder.
    pub fn has_hd_winder(&self) -> bool {
        self.winder.as_deref() == Some("HD")
    }

    /// Whether a motor is configured.
    pub fn has_motor(&self) -> bool {
        self.motor.as_deref().is_some_and(|m| !m.is_empty())
    }

    /// Count the items that have both dimensions set.
    pub fn count_valid(items: &[LineItem]) -> usize {
        items.iter().filter(|item| item.is_valid()).count()
    }
}

/// Per-fee exclusion flags and quantities from the fee panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeState {
    pub delivery_fee_excluded: bool,
    pub install_fee_excluded: bool,
    pub removal_fee_excluded: bool,
    pub delivery_qty: Option<f64>,
    pub removal_qty: Option<f64>,
}

/// Previously committed distribution splits. `None` means never distributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DistributionState {
    #[serde(rename = "remote1chQty")]
    pub remote_1ch_qty: Option<u32>,
    #[serde(rename = "remote16chQty")]
    pub remote_16ch_qty: Option<u32>,
    pub dual_combo_qty: Option<u32>,
    pub dual_slim_qty: Option<u32>,
}

/// UI state consulted by projection and distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
    pub fee: FeeState,
    pub distribution: DistributionState,
    /// Number of remotes required by the configured motorised drives.
    pub drive_remote_count: Option<u32>,
}

/// Full read-only snapshot taken at the start of a render or dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteSnapshot {
    pub summary: PricingSummary,
    pub items: Vec<LineItem>,
    pub ui: UiState,
}

impl QuoteSnapshot {
    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of complete dual-bracket pairs across all items.
    pub fn dual_pair_count(&self) -> u32 {
        let halves = self.items.iter().filter(|item| item.has_dual()).count();
        u32::try_from(halves / 2).unwrap_or(u32::MAX)
    }
}
