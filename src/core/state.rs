//! State holder for one converter session.
//!
//! Owns the storage backend and everything read from it: both amount fields,
//! both rates, the history log and the view configuration. Created with
//! `mount`, which reads each key once, and ended with `unmount`, which drops
//! any pending emphasis and hands the storage back.

use crate::core::convert::{Conversion, convert};
use crate::core::emphasis::Emphasis;
use crate::core::history::{DEFAULT_CAPACITY, HistoryStore};
use crate::core::rate::{RateQuote, calculate_rate};
use crate::core::view::ViewState;
use crate::db::storage::{
    KEY_HISTORY_FILTER, KEY_HISTORY_SORT, KEY_SAR_AMOUNT, KEY_SAR_TO_SDG_RATE, KEY_SDG_AMOUNT,
    KEY_SDG_TO_SAR_RATE, KeyValueStore,
};
use crate::errors::{AppError, AppResult};
use crate::models::{ConversionEntry, Currency, Direction, DirectionFilter, SortKey, SortSpec};
use crate::utils::formatting::{fmt_rate, parse_rate};
use chrono::{DateTime, Local, NaiveDate};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

pub const DEFAULT_SAR_TO_SDG_RATE: f64 = 680.87;
pub const DEFAULT_SDG_TO_SAR_RATE: f64 = 0.001471;

/// Values used when storage has nothing for a key.
#[derive(Debug, Clone, Copy)]
pub struct Defaults {
    pub capacity: usize,
    pub sar_to_sdg_rate: f64,
    pub sdg_to_sar_rate: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            sar_to_sdg_rate: DEFAULT_SAR_TO_SDG_RATE,
            sdg_to_sar_rate: DEFAULT_SDG_TO_SAR_RATE,
        }
    }
}

pub struct ConverterState<S: KeyValueStore> {
    storage: S,
    sar_amount: String,
    sdg_amount: String,
    sar_to_sdg_rate: f64,
    sdg_to_sar_rate: f64,
    history: HistoryStore,
    view: ViewState,
    emphasis: Emphasis,
}

fn amount_key(field: Currency) -> &'static str {
    match field {
        Currency::Sar => KEY_SAR_AMOUNT,
        Currency::Sdg => KEY_SDG_AMOUNT,
    }
}

fn rate_key(direction: Direction) -> &'static str {
    match direction {
        Direction::SarToSdg => KEY_SAR_TO_SDG_RATE,
        Direction::SdgToSar => KEY_SDG_TO_SAR_RATE,
    }
}

fn read_or_warn(storage: &impl KeyValueStore, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(v) => v,
        Err(e) => {
            warn!(key, error = %e, "could not read stored value");
            None
        }
    }
}

fn load_rate(storage: &impl KeyValueStore, key: &str, default: f64) -> f64 {
    match read_or_warn(storage, key) {
        None => default,
        Some(raw) => parse_rate(&raw).unwrap_or_else(|| {
            warn!(key, value = %raw, "stored rate is not a positive number, using default");
            default
        }),
    }
}

fn load_view(storage: &impl KeyValueStore) -> ViewState {
    let filter = read_or_warn(storage, KEY_HISTORY_FILTER)
        .map(|raw| {
            DirectionFilter::from_code(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unknown stored history filter, showing all");
                DirectionFilter::All
            })
        })
        .unwrap_or_default();

    let sort = read_or_warn(storage, KEY_HISTORY_SORT)
        .map(|raw| {
            SortSpec::decode(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unknown stored history sort, using newest first");
                SortSpec::default()
            })
        })
        .unwrap_or_default();

    ViewState::new(filter, sort)
}

impl<S: KeyValueStore> ConverterState<S> {
    pub fn mount(storage: S, defaults: Defaults) -> Self {
        let sar_amount = read_or_warn(&storage, KEY_SAR_AMOUNT).unwrap_or_default();
        let sdg_amount = read_or_warn(&storage, KEY_SDG_AMOUNT).unwrap_or_default();
        let sar_to_sdg_rate = load_rate(&storage, KEY_SAR_TO_SDG_RATE, defaults.sar_to_sdg_rate);
        let sdg_to_sar_rate = load_rate(&storage, KEY_SDG_TO_SAR_RATE, defaults.sdg_to_sar_rate);
        let history = HistoryStore::load(&storage, defaults.capacity);
        let view = load_view(&storage);

        Self {
            storage,
            sar_amount,
            sdg_amount,
            sar_to_sdg_rate,
            sdg_to_sar_rate,
            history,
            view,
            emphasis: Emphasis::new(),
        }
    }

    /// End of the session: pending emphasis is cancelled.
    pub fn unmount(mut self) -> S {
        self.emphasis.cancel();
        self.storage
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ---------------------------
    // Amount fields
    // ---------------------------

    pub fn amount(&self, field: Currency) -> &str {
        match field {
            Currency::Sar => &self.sar_amount,
            Currency::Sdg => &self.sdg_amount,
        }
    }

    /// Store the raw text of an amount field, as typed.
    pub fn set_amount(&mut self, field: Currency, value: &str) -> AppResult<()> {
        match field {
            Currency::Sar => self.sar_amount = value.to_string(),
            Currency::Sdg => self.sdg_amount = value.to_string(),
        }
        self.storage.set(amount_key(field), value)
    }

    pub fn clear_amount(&mut self, field: Currency) -> AppResult<()> {
        self.set_amount(field, "")
    }

    // ---------------------------
    // Rates
    // ---------------------------

    pub fn rate(&self, direction: Direction) -> f64 {
        match direction {
            Direction::SarToSdg => self.sar_to_sdg_rate,
            Direction::SdgToSar => self.sdg_to_sar_rate,
        }
    }

    pub fn set_rate(&mut self, direction: Direction, rate: f64) -> AppResult<()> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(AppError::InvalidRate(rate.to_string()));
        }

        match direction {
            Direction::SarToSdg => self.sar_to_sdg_rate = rate,
            Direction::SdgToSar => self.sdg_to_sar_rate = rate,
        }
        self.storage.set(rate_key(direction), &rate.to_string())?;
        self.storage.record(
            "rate",
            direction.label(),
            &format!("Rate set to {}", fmt_rate(Some(rate))),
        );
        Ok(())
    }

    /// Rate implied by the two amount fields, source field first.
    pub fn calculate_rate(&self, direction: Direction) -> RateQuote {
        calculate_rate(
            self.amount(direction.source()),
            self.amount(direction.target()),
        )
    }

    /// Calculate and, when usable, store the implied rate. Returns the quote
    /// and whether it was stored; an unavailable or non-positive result
    /// leaves the stored rate untouched.
    pub fn apply_calculated_rate(
        &mut self,
        direction: Direction,
    ) -> AppResult<(RateQuote, bool)> {
        let quote = self.calculate_rate(direction);
        match quote.value() {
            Some(rate) if rate > 0.0 => {
                self.set_rate(direction, rate)?;
                Ok((quote, true))
            }
            _ => {
                info!(direction = direction.label(), %quote, "implied rate not applied");
                Ok((quote, false))
            }
        }
    }

    // ---------------------------
    // Conversion
    // ---------------------------

    /// Convert the source field of `direction` with the stored rate.
    ///
    /// Invalid input clears the counterpart field and records nothing. On
    /// success the counterpart field is filled, one entry is appended to the
    /// history and the counterpart field is emphasized from `instant`.
    pub fn convert(
        &mut self,
        direction: Direction,
        now: DateTime<Local>,
        instant: Instant,
    ) -> AppResult<Option<Conversion>> {
        let target = direction.target();
        let raw = self.amount(direction.source()).to_string();

        let Some(conversion) = convert(&raw, self.rate(direction), direction, now) else {
            info!(direction = direction.label(), input = %raw, "nothing to convert");
            self.clear_amount(target)?;
            return Ok(None);
        };

        self.set_amount(target, &conversion.counterpart)?;
        self.history.append(conversion.entry.clone(), &mut self.storage)?;
        self.emphasis.trigger(target, instant);

        self.storage.record(
            "convert",
            direction.label(),
            &format!(
                "{} → {} @ {}",
                conversion.entry.from_amount_str(),
                conversion.entry.to_amount_str(),
                conversion.entry.rate_str()
            ),
        );

        Ok(Some(conversion))
    }

    pub fn is_emphasized(&mut self, field: Currency, now: Instant) -> bool {
        self.emphasis.is_emphasized(field, now)
    }

    // ---------------------------
    // History
    // ---------------------------

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn resolve_entry(&self, input: &str) -> AppResult<Uuid> {
        self.history.resolve(input)
    }

    pub fn delete_entry(&mut self, id: Uuid) -> AppResult<bool> {
        let removed = self.history.delete(id, &mut self.storage)?;
        if removed {
            self.storage.record("del", &id.to_string(), "History entry deleted");
        }
        Ok(removed)
    }

    pub fn edit_entry_date(&mut self, id: Uuid, date: NaiveDate) -> AppResult<bool> {
        let edited = self.history.edit_date(id, date, &mut self.storage)?;
        if edited {
            self.storage.record(
                "edit",
                &id.to_string(),
                &format!("History entry moved to {date}"),
            );
        }
        Ok(edited)
    }

    pub fn clear_history(&mut self) -> AppResult<usize> {
        let count = self.history.len();
        self.history.clear(&mut self.storage)?;
        self.storage.record(
            "clear",
            "history",
            &format!("Cleared {count} history entries"),
        );
        Ok(count)
    }

    /// Add imported entries in front of the existing log, newest first.
    /// Returns how many of them are still in the log once the capacity bound
    /// has been applied.
    pub fn import_entries(
        &mut self,
        mut entries: Vec<ConversionEntry>,
        source: &str,
    ) -> AppResult<usize> {
        let offered = entries.len();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let kept = self.history.extend_front(entries, &mut self.storage)?;
        if kept < offered {
            warn!(
                offered,
                kept,
                capacity = self.history.capacity(),
                "history capacity reached, oldest imported rows dropped"
            );
        }
        if kept > 0 {
            self.storage.record("import", source, &format!("Imported {kept} entries"));
        }
        Ok(kept)
    }

    // ---------------------------
    // View
    // ---------------------------

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn projection(&mut self) -> Vec<&ConversionEntry> {
        self.view.projection(&self.history)
    }

    pub fn set_filter(&mut self, filter: DirectionFilter) -> AppResult<()> {
        self.view.set_filter(filter);
        self.storage.set(KEY_HISTORY_FILTER, filter.code())
    }

    pub fn set_sort(&mut self, sort: SortSpec) -> AppResult<()> {
        self.view.set_sort(sort);
        self.storage.set(KEY_HISTORY_SORT, &sort.encode())
    }

    pub fn toggle_sort(&mut self, key: SortKey) -> AppResult<SortSpec> {
        let sort = self.view.toggle_sort(key);
        self.storage.set(KEY_HISTORY_SORT, &sort.encode())?;
        Ok(sort)
    }
}
