//! Implied exchange rate from two observed amounts.

use crate::utils::formatting::{parse_number, round_rate};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateQuote {
    Available(f64),
    NotAvailable,
}

impl RateQuote {
    pub fn value(&self) -> Option<f64> {
        match self {
            RateQuote::Available(r) => Some(*r),
            RateQuote::NotAvailable => None,
        }
    }
}

impl fmt::Display for RateQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateQuote::Available(r) => write!(f, "{:.6}", r),
            RateQuote::NotAvailable => f.write_str("N/A"),
        }
    }
}

/// Rate from the `from` amount to the `to` amount, rounded to 6 decimals.
///
/// Not available when either input is not a finite number or `from` is zero.
pub fn calculate_rate(from_amount: &str, to_amount: &str) -> RateQuote {
    match (parse_number(from_amount), parse_number(to_amount)) {
        (Some(from), Some(to)) if from != 0.0 => RateQuote::Available(round_rate(to / from)),
        _ => RateQuote::NotAvailable,
    }
}
