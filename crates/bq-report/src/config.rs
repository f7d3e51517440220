//! Quote generation configuration types.

use crate::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Rules that pick the background class of an appendix row.
///
/// Checked in priority order: light-filter keyword in the fabric name, then
/// screen codes, then block-out codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricClassRules {
    /// Case-insensitive substring of the fabric name marking a light-filter fabric.
    #[serde(default = "default_light_filter_keyword")]
    pub light_filter_keyword: String,
    /// Fabric type codes rendered as screen fabrics.
    #[serde(default = "default_screen_codes")]
    pub screen_codes: Vec<String>,
    /// Fabric type codes rendered as block-out fabrics.
    #[serde(default = "default_blockout_codes")]
    pub blockout_codes: Vec<String>,
}

fn default_light_filter_keyword() -> String {
    "light-filter".to_string()
}

fn default_screen_codes() -> Vec<String> {
    vec!["SN".to_string()]
}

fn default_blockout_codes() -> Vec<String> {
    ["B1", "B2", "B3", "B4", "B5"]
        .iter()
        .map(|code| code.to_string())
        .collect()
}

impl Default for FabricClassRules {
    fn default() -> Self {
        Self {
            light_filter_keyword: default_light_filter_keyword(),
            screen_codes: default_screen_codes(),
            blockout_codes: default_blockout_codes(),
        }
    }
}

/// Locations of the two template documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePaths {
    /// Primary quote template.
    #[serde(default = "default_quote_template")]
    pub quote: PathBuf,
    /// Secondary details (appendix) template.
    #[serde(default = "default_details_template")]
    pub details: PathBuf,
}

fn default_quote_template() -> PathBuf {
    PathBuf::from("partials/quote-template.html")
}

fn default_details_template() -> PathBuf {
    PathBuf::from("partials/detailed-item-list.html")
}

impl Default for TemplatePaths {
    fn default() -> Self {
        Self {
            quote: default_quote_template(),
            details: default_details_template(),
        }
    }
}

/// Complete quote configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// GST rate included in the grand total.
    #[serde(default = "default_gst_rate")]
    pub gst_rate: f64,
    /// Share of the grand total due as deposit; the rest is the balance.
    #[serde(default = "default_deposit_ratio")]
    pub deposit_ratio: f64,
    /// Terms shown when the operator leaves the terms field blank.
    #[serde(default = "default_terms")]
    pub default_terms: String,
    /// Appendix row styling rules.
    #[serde(default)]
    pub fabric_classes: FabricClassRules,
    /// Template locations.
    #[serde(default)]
    pub templates: TemplatePaths,
    /// Minify the final document.
    #[serde(default)]
    pub minify: bool,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_gst_rate() -> f64 {
    0.1
}

fn default_deposit_ratio() -> f64 {
    0.5
}

fn default_terms() -> String {
    "Standard terms and conditions apply.".to_string()
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            gst_rate: default_gst_rate(),
            deposit_ratio: default_deposit_ratio(),
            default_terms: default_terms(),
            fabric_classes: FabricClassRules::default(),
            templates: TemplatePaths::default(),
            minify: false,
        }
    }
}

impl QuoteConfig {
    /// Create a new quote configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the GST rate.
    pub fn with_gst_rate(mut self, rate: f64) -> Self {
        self.gst_rate = rate;
        self
    }

    /// Set the deposit ratio.
    pub fn with_deposit_ratio(mut self, ratio: f64) -> Self {
        self.deposit_ratio = ratio;
        self
    }

    /// Set the default terms text.
    pub fn with_default_terms(mut self, terms: impl Into<String>) -> Self {
        self.default_terms = terms.into();
        self
    }

    /// Set the template locations.
    pub fn with_templates(mut self, quote: impl Into<PathBuf>, details: impl Into<PathBuf>) -> Self {
        self.templates = TemplatePaths {
            quote: quote.into(),
            details: details.into(),
        };
        self
    }

    /// Enable output minification.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.gst_rate) {
            return Err(QuoteError::InvalidConfig(format!(
                "gst_rate must be in [0, 1), got {}",
                self.gst_rate
            )));
        }
        if !(self.deposit_ratio > 0.0 && self.deposit_ratio <= 1.0) {
            return Err(QuoteError::InvalidConfig(format!(
                "deposit_ratio must be in (0, 1], got {}",
                self.deposit_ratio
            )));
        }
        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuoteConfig::default();
        assert_eq!(config.schema_version, "1.0.0");
        assert_eq!(config.gst_rate, 0.1);
        assert_eq!(config.deposit_ratio, 0.5);
        assert_eq!(config.default_terms, "Standard terms and conditions apply.");
        assert_eq!(config.fabric_classes.screen_codes, vec!["SN"]);
        assert_eq!(config.fabric_classes.blockout_codes.len(), 5);
        assert!(!config.minify);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = QuoteConfig::new()
            .with_gst_rate(0.15)
            .with_default_terms("Net 30")
            .with_templates("a.html", "b.html")
            .with_minify(true);

        assert_eq!(config.gst_rate, 0.15);
        assert_eq!(config.default_terms, "Net 30");
        assert_eq!(config.templates.quote, PathBuf::from("a.html"));
        assert_eq!(config.templates.details, PathBuf::from("b.html"));
        assert!(config.minify);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(QuoteConfig::new().with_gst_rate(1.5).validate().is_err());
        assert!(QuoteConfig::new().with_gst_rate(-0.1).validate().is_err());
        assert!(QuoteConfig::new().with_deposit_ratio(0.0).validate().is_err());
        assert!(QuoteConfig::new().with_deposit_ratio(1.0).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = QuoteConfig::from_json(r#"{ "gst_rate": 0.15 }"#).unwrap();
        assert_eq!(config.gst_rate, 0.15);
        assert_eq!(config.deposit_ratio, 0.5);
        assert_eq!(config.fabric_classes, FabricClassRules::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = QuoteConfig::default();
        let json = config.to_json().unwrap();
        let parsed = QuoteConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
