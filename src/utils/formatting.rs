//! Number formatting and parsing shared by the converter, the table view and exports.

use unicode_width::UnicodeWidthStr;

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Amounts are kept with 2 decimals.
pub fn round_amount(value: f64) -> f64 {
    round_to(value, 2)
}

/// Rates are shown and derived with 6 decimals.
pub fn round_rate(value: f64) -> f64 {
    round_to(value, 6)
}

pub fn fmt_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// `680.870000`, or `N/A` when the rate is unknown.
pub fn fmt_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.6}", r),
        None => "N/A".to_string(),
    }
}

/// Parse a user-typed number. Empty, non-numeric and non-finite input yields `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Like `parse_number`, but negative amounts are rejected as well.
pub fn parse_amount(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|v| *v >= 0.0)
}

/// Parse a rate: finite and strictly positive.
pub fn parse_rate(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|v| *v > 0.0)
}

/// Pad on the right using display width, so emoji and accents line up.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

pub fn pad_left(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{s}", " ".repeat(width.saturating_sub(w)))
}
