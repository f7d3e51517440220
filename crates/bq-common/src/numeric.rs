//! Lenient number parsing and money formatting.
//!
//! Operator-entered values arrive as free text. Parsing accepts the longest
//! numeric prefix and ignores trailing characters, so `"1200 incl."` reads as
//! 1200 and `"2 units"` as 2. Input with no numeric prefix yields `None`.

/// Currency symbol used for every monetary display value.
pub const CURRENCY_SYMBOL: &str = "$";

/// Parse the leading floating point number of `raw`.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fractional part, and an optional exponent. Returns `None` when
/// no digits are found.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits + frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parse the leading integer of `raw`.
///
/// Leading whitespace is skipped and an optional sign is accepted. Parsing
/// stops at the first non-digit, so `"2.5"` yields 2. Returns `None` when no
/// digits are found. Values outside the `i64` range saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    match s[..end].parse::<i64>() {
        Ok(value) => Some(value),
        // Only overflow can fail here: the slice is a sign plus digits.
        Err(_) if bytes[0] == b'-' => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Format a monetary value as `$` followed by exactly two decimals.
///
/// Non-finite values render as `$0.00`.
pub fn format_money(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    // Avoid printing "-0.00" for negative zero.
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}{:.2}", CURRENCY_SYMBOL, value)
}

/// Format an optional monetary value, treating `None` as zero.
pub fn format_money_opt(value: Option<f64>) -> String {
    format_money(value.unwrap_or(0.0))
}
