use super::direction::Direction;
use crate::utils::formatting::{fmt_amount, fmt_rate, round_amount};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Display/export format of an entry's timestamp.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One completed conversion.
///
/// Persisted as `{id, timestamp, fromAmount, toAmount, direction, rateUsed}`;
/// amounts are written as fixed 2-decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub timestamp: DateTime<Local>,
    #[serde(with = "amount_text")]
    pub from_amount: f64,
    #[serde(with = "amount_text")]
    pub to_amount: f64,
    pub direction: Direction,
    #[serde(default, deserialize_with = "positive_rate")]
    pub rate_used: Option<f64>,
}

impl ConversionEntry {
    /// Build a fresh entry with a new id. Amounts are rounded to 2 decimals
    /// and a non-positive rate is recorded as unknown.
    pub fn new(
        timestamp: DateTime<Local>,
        from_amount: f64,
        to_amount: f64,
        direction: Direction,
        rate_used: Option<f64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            from_amount: round_amount(from_amount),
            to_amount: round_amount(to_amount),
            direction,
            rate_used: rate_used.filter(|r| r.is_finite() && *r > 0.0),
        }
    }

    /// First 8 characters of the id, as shown by `list`.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    pub fn date_str(&self) -> String {
        self.timestamp.format(DATE_FORMAT).to_string()
    }

    pub fn from_amount_str(&self) -> String {
        fmt_amount(self.from_amount)
    }

    pub fn to_amount_str(&self) -> String {
        fmt_amount(self.to_amount)
    }

    pub fn rate_str(&self) -> String {
        fmt_rate(self.rate_used)
    }

    /// Rate as a sort key: unknown sorts as zero.
    pub fn rate_or_zero(&self) -> f64 {
        self.rate_used.unwrap_or(0.0)
    }

    /// Same instant of day moved to `date`. Falls back to the earliest valid
    /// local time when the wall-clock time does not exist on that date.
    pub fn timestamp_on(&self, date: NaiveDate) -> Option<DateTime<Local>> {
        let naive = date.and_time(self.timestamp.time());
        Local.from_local_datetime(&naive).earliest()
    }
}

mod amount_text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&fmt_amount(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        let raw = String::deserialize(d)?;
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(round_amount)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount '{raw}'")))
    }
}

fn positive_rate<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let rate = Option::<f64>::deserialize(d)?;
    Ok(rate.filter(|r| r.is_finite() && *r > 0.0))
}
