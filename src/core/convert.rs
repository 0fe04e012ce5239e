//! Apply a stored rate to an entered amount.

use crate::models::{ConversionEntry, Direction};
use crate::utils::formatting::{fmt_amount, parse_amount, round_amount};
use chrono::{DateTime, Local};

/// Result of a successful conversion: the text for the counterpart field and
/// the history entry to record.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub counterpart: String,
    pub entry: ConversionEntry,
}

/// Convert `raw_amount` with `rate` in the given direction.
///
/// `None` when the amount is not a non-negative finite number or the rate is
/// not strictly positive; the caller clears the counterpart field and records
/// nothing.
pub fn convert(
    raw_amount: &str,
    rate: f64,
    direction: Direction,
    now: DateTime<Local>,
) -> Option<Conversion> {
    let amount = parse_amount(raw_amount)?;
    if !(rate.is_finite() && rate > 0.0) {
        return None;
    }

    let result = round_amount(amount * rate);
    Some(Conversion {
        counterpart: fmt_amount(result),
        entry: ConversionEntry::new(now, amount, result, direction, Some(rate)),
    })
}
