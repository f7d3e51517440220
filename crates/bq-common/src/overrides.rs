//! Operator override fields and the form-reader capability.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Field ids of the quote override form.
pub mod field_ids {
    pub const QUOTE_ID: &str = "f3-quote-id";
    pub const ISSUE_DATE: &str = "f3-issue-date";
    pub const DUE_DATE: &str = "f3-due-date";
    pub const CUSTOMER_NAME: &str = "f3-customer-name";
    pub const CUSTOMER_ADDRESS: &str = "f3-customer-address";
    pub const CUSTOMER_PHONE: &str = "f3-customer-phone";
    pub const CUSTOMER_EMAIL: &str = "f3-customer-email";
    pub const FINAL_OFFER_PRICE: &str = "f3-final-offer-price";
    pub const TERMS_CONDITIONS: &str = "f3-terms-conditions";

    /// Every field read when building [`super::OverrideFields`].
    pub const ALL: [&str; 9] = [
        QUOTE_ID,
        ISSUE_DATE,
        DUE_DATE,
        CUSTOMER_NAME,
        CUSTOMER_ADDRESS,
        CUSTOMER_PHONE,
        CUSTOMER_EMAIL,
        FINAL_OFFER_PRICE,
        TERMS_CONDITIONS,
    ];
}

/// Read access to operator-entered form values.
///
/// Implementations return an empty string for unknown or blank fields.
pub trait FormReader {
    fn read(&self, field_id: &str) -> String;
}

impl FormReader for HashMap<String, String> {
    fn read(&self, field_id: &str) -> String {
        self.get(field_id).cloned().unwrap_or_default()
    }
}

impl FormReader for BTreeMap<String, String> {
    fn read(&self, field_id: &str) -> String {
        self.get(field_id).cloned().unwrap_or_default()
    }
}

/// Free-form quote metadata. Every value is a plain string; numeric parsing
/// happens at projection time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverrideFields {
    pub quote_id: String,
    pub issue_date: String,
    pub due_date: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_phone: String,
    pub customer_email: String,
    /// Optional replacement for the computed grand total.
    pub final_offer_price: String,
    /// Multi-line terms text.
    pub terms_conditions: String,
}

impl OverrideFields {
    /// Read every override field from a form.
    pub fn from_form(form: &dyn FormReader) -> Self {
        Self {
            quote_id: form.read(field_ids::QUOTE_ID),
            issue_date: form.read(field_ids::ISSUE_DATE),
            due_date: form.read(field_ids::DUE_DATE),
            customer_name: form.read(field_ids::CUSTOMER_NAME),
            customer_address: form.read(field_ids::CUSTOMER_ADDRESS),
            customer_phone: form.read(field_ids::CUSTOMER_PHONE),
            customer_email: form.read(field_ids::CUSTOMER_EMAIL),
            final_offer_price: form.read(field_ids::FINAL_OFFER_PRICE),
            terms_conditions: form.read(field_ids::TERMS_CONDITIONS),
        }
    }

    /// Form values keyed by field id; blank fields are omitted.
    pub fn to_form(&self) -> BTreeMap<String, String> {
        let values = [
            (field_ids::QUOTE_ID, &self.quote_id),
            (field_ids::ISSUE_DATE, &self.issue_date),
            (field_ids::DUE_DATE, &self.due_date),
            (field_ids::CUSTOMER_NAME, &self.customer_name),
            (field_ids::CUSTOMER_ADDRESS, &self.customer_address),
            (field_ids::CUSTOMER_PHONE, &self.customer_phone),
            (field_ids::CUSTOMER_EMAIL, &self.customer_email),
            (field_ids::FINAL_OFFER_PRICE, &self.final_offer_price),
            (field_ids::TERMS_CONDITIONS, &self.terms_conditions),
        ];
        values
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(id, value)| (id.to_string(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_form_reads_every_field() {
        let mut form = HashMap::new();
        form.insert(field_ids::QUOTE_ID.to_string(), "Q-1001".to_string());
        form.insert(field_ids::CUSTOMER_NAME.to_string(), "Jo Smith".to_string());
        form.insert(field_ids::FINAL_OFFER_PRICE.to_string(), "1100".to_string());

        let fields = OverrideFields::from_form(&form);
        assert_eq!(fields.quote_id, "Q-1001");
        assert_eq!(fields.customer_name, "Jo Smith");
        assert_eq!(fields.final_offer_price, "1100");
        assert_eq!(fields.customer_email, "");
        assert_eq!(fields.terms_conditions, "");
    }

    #[test]
    fn test_form_round_trip() {
        let fields = OverrideFields {
            quote_id: "Q-7".to_string(),
            customer_address: "1 Main St\nSpringfield".to_string(),
            ..Default::default()
        };
        let form = fields.to_form();
        assert_eq!(form.len(), 2);
        assert_eq!(form[field_ids::QUOTE_ID], "Q-7");
        assert_eq!(OverrideFields::from_form(&form), fields);
    }

    #[test]
    fn test_field_ids_are_unique() {
        let mut ids = field_ids::ALL.to_vec();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), field_ids::ALL.len());
    }
}
