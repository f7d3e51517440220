//! Customer information block.

use bq_common::OverrideFields;

/// Render the customer block: bold name, then address, phone, and email
/// lines, each only when the field is non-empty. Address line breaks become
/// `<br>`.
pub fn customer_info_html(fields: &OverrideFields) -> String {
    let mut html = format!("<strong>{}</strong><br>", fields.customer_name);
    if !fields.customer_address.is_empty() {
        html.push_str(&newlines_to_br(&fields.customer_address));
        html.push_str("<br>");
    }
    if !fields.customer_phone.is_empty() {
        html.push_str(&format!("Phone: {}<br>", fields.customer_phone));
    }
    if !fields.customer_email.is_empty() {
        html.push_str(&format!("Email: {}", fields.customer_email));
    }
    html
}

/// Replace every `\n` with `<br>`.
pub(crate) fn newlines_to_br(text: &str) -> String {
    text.replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_only() {
        let fields = OverrideFields {
            customer_name: "Jo Smith".to_string(),
            ..Default::default()
        };
        assert_eq!(customer_info_html(&fields), "<strong>Jo Smith</strong><br>");
    }

    #[test]
    fn test_empty_name_still_renders_bold_line() {
        assert_eq!(
            customer_info_html(&OverrideFields::default()),
            "<strong></strong><br>"
        );
    }

    #[test]
    fn test_all_fields() {
        let fields = OverrideFields {
            customer_name: "Jo Smith".to_string(),
            customer_address: "1 Main St\nSpringfield".to_string(),
            customer_phone: "0400 000 000".to_string(),
            customer_email: "jo@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(
            customer_info_html(&fields),
            "<strong>Jo Smith</strong><br>1 Main St<br>Springfield<br>\
             Phone: 0400 000 000<br>Email: jo@example.com"
        );
    }

    #[test]
    fn test_skips_empty_middle_fields() {
        let fields = OverrideFields {
            customer_name: "A".to_string(),
            customer_email: "a@b.c".to_string(),
            ..Default::default()
        };
        assert_eq!(customer_info_html(&fields), "<strong>A</strong><br>Email: a@b.c");
    }
}
