mod common;

use chrono::{Local, NaiveDate};
use common::{at, entry, memory};
use rconverter::core::emphasis::{EMPHASIS_DURATION, Emphasis};
use rconverter::core::{ConverterState, Defaults, RateQuote};
use rconverter::db::KeyValueStore;
use rconverter::db::storage::{KEY_HISTORY_SORT, KEY_SAR_TO_SDG_RATE, KEY_SDG_AMOUNT};
use rconverter::errors::AppError;
use rconverter::models::{Currency, Direction, DirectionFilter, SortDirection, SortKey};
use std::time::{Duration, Instant};

#[test]
fn test_mount_uses_defaults_on_empty_storage() {
    let state = ConverterState::mount(memory(), Defaults::default());
    assert_eq!(state.rate(Direction::SarToSdg), 680.87);
    assert_eq!(state.rate(Direction::SdgToSar), 0.001471);
    assert_eq!(state.amount(Currency::Sar), "");
    assert!(state.history().is_empty());
}

#[test]
fn test_mount_ignores_invalid_stored_rate() {
    let mut storage = memory();
    storage.set(KEY_SAR_TO_SDG_RATE, "-3").unwrap();
    let state = ConverterState::mount(storage, Defaults::default());
    assert_eq!(state.rate(Direction::SarToSdg), 680.87);
}

#[test]
fn test_convert_fills_target_and_records_entry() {
    let mut state = ConverterState::mount(memory(), Defaults::default());
    state.set_amount(Currency::Sar, "100").unwrap();

    let start = Instant::now();
    let conversion = state
        .convert(Direction::SarToSdg, Local::now(), start)
        .unwrap()
        .expect("conversion");

    assert_eq!(conversion.counterpart, "68087.00");
    assert_eq!(state.amount(Currency::Sdg), "68087.00");
    assert_eq!(state.history().len(), 1);
    assert!(state.is_emphasized(Currency::Sdg, start));
    assert!(!state.is_emphasized(Currency::Sar, start));
    assert!(!state.is_emphasized(Currency::Sdg, start + EMPHASIS_DURATION));

    // target amount survives a remount
    let storage = state.unmount();
    assert_eq!(storage.get(KEY_SDG_AMOUNT).unwrap().as_deref(), Some("68087.00"));
    let state = ConverterState::mount(storage, Defaults::default());
    assert_eq!(state.history().len(), 1);
}

#[test]
fn test_invalid_input_clears_target_and_records_nothing() {
    let mut state = ConverterState::mount(memory(), Defaults::default());
    state.set_amount(Currency::Sdg, "999").unwrap();
    state.set_amount(Currency::Sar, "abc").unwrap();

    let out = state
        .convert(Direction::SarToSdg, Local::now(), Instant::now())
        .unwrap();

    assert!(out.is_none());
    assert_eq!(state.amount(Currency::Sdg), "");
    assert!(state.history().is_empty());
    assert!(!state.is_emphasized(Currency::Sdg, Instant::now()));
}

#[test]
fn test_set_rate_rejects_non_positive() {
    let mut state = ConverterState::mount(memory(), Defaults::default());
    assert!(matches!(
        state.set_rate(Direction::SdgToSar, 0.0),
        Err(AppError::InvalidRate(_))
    ));
    assert!(state.set_rate(Direction::SdgToSar, -1.0).is_err());
    assert_eq!(state.rate(Direction::SdgToSar), 0.001471);

    state.set_rate(Direction::SdgToSar, 0.0015).unwrap();
    let state = ConverterState::mount(state.unmount(), Defaults::default());
    assert_eq!(state.rate(Direction::SdgToSar), 0.0015);
}

#[test]
fn test_apply_calculated_rate() {
    let mut state = ConverterState::mount(memory(), Defaults::default());
    state.set_amount(Currency::Sar, "100").unwrap();
    state.set_amount(Currency::Sdg, "70000").unwrap();

    let applied = state.apply_calculated_rate(Direction::SarToSdg).unwrap();
    assert_eq!(applied, (RateQuote::Available(700.0), true));
    assert_eq!(state.rate(Direction::SarToSdg), 700.0);

    let applied = state.apply_calculated_rate(Direction::SdgToSar).unwrap();
    assert_eq!(applied, (RateQuote::Available(0.001429), true));

    state.set_amount(Currency::Sar, "0").unwrap();
    let applied = state.apply_calculated_rate(Direction::SarToSdg).unwrap();
    assert_eq!(applied, (RateQuote::NotAvailable, false));
    assert_eq!(state.rate(Direction::SarToSdg), 700.0);
}

#[test]
fn test_apply_calculated_rate_skips_non_positive_quotes() {
    let mut state = ConverterState::mount(memory(), Defaults::default());
    state.set_amount(Currency::Sar, "10").unwrap();

    // available but zero: reported as not applied
    state.set_amount(Currency::Sdg, "0").unwrap();
    let applied = state.apply_calculated_rate(Direction::SarToSdg).unwrap();
    assert_eq!(applied, (RateQuote::Available(0.0), false));
    assert_eq!(state.rate(Direction::SarToSdg), 680.87);

    state.set_amount(Currency::Sdg, "-5").unwrap();
    let applied = state.apply_calculated_rate(Direction::SarToSdg).unwrap();
    assert_eq!(applied, (RateQuote::Available(-0.5), false));
    assert_eq!(state.rate(Direction::SarToSdg), 680.87);
}

#[test]
fn test_import_beyond_capacity_keeps_newest_rows() {
    let defaults = Defaults {
        capacity: 2,
        ..Defaults::default()
    };
    let mut state = ConverterState::mount(memory(), defaults);
    state.set_amount(Currency::Sar, "1").unwrap();
    state
        .convert(Direction::SarToSdg, Local::now(), Instant::now())
        .unwrap();

    // oldest first, as an ascending export would list them
    let rows: Vec<_> = (1..=5)
        .map(|d| entry(at(2025, 3, d, 12), d as f64, 1.0, Direction::SdgToSar, None))
        .collect();
    let newest = rows[4].id;
    let second = rows[3].id;

    let kept = state.import_entries(rows, "rows.csv").unwrap();

    assert_eq!(kept, 2);
    assert_eq!(state.history().len(), 2);
    let ids: Vec<_> = state.history().entries().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![newest, second]);
}

#[test]
fn test_import_reports_every_row_when_room_is_left() {
    let mut state = ConverterState::mount(memory(), Defaults::default());
    let rows: Vec<_> = (1..=3)
        .map(|d| entry(at(2025, 3, d, 12), 1.0, 680.87, Direction::SarToSdg, Some(680.87)))
        .collect();

    assert_eq!(state.import_entries(rows, "rows.csv").unwrap(), 3);
    assert_eq!(state.import_entries(Vec::new(), "empty.csv").unwrap(), 0);
    assert_eq!(state.history().entries()[0].timestamp, at(2025, 3, 3, 12));
}

#[test]
fn test_history_operations_through_state() {
    let mut state = ConverterState::mount(memory(), Defaults::default());
    state.set_amount(Currency::Sar, "2").unwrap();
    state
        .convert(Direction::SarToSdg, Local::now(), Instant::now())
        .unwrap();
    state.set_amount(Currency::Sdg, "1000").unwrap();
    state
        .convert(Direction::SdgToSar, Local::now(), Instant::now())
        .unwrap();
    assert_eq!(state.history().len(), 2);

    let newest = state.history().entries()[0].clone();
    let id = state.resolve_entry(&newest.short_id()).unwrap();
    let date = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
    assert!(state.edit_entry_date(id, date).unwrap());
    assert_eq!(state.history().entries()[0].timestamp.date_naive(), date);

    assert!(state.delete_entry(id).unwrap());
    assert_eq!(state.history().len(), 1);
    assert_eq!(state.clear_history().unwrap(), 1);
    assert!(state.history().is_empty());
}

#[test]
fn test_view_settings_persist() {
    let mut state = ConverterState::mount(memory(), Defaults::default());
    state
        .set_filter(DirectionFilter::Only(Direction::SdgToSar))
        .unwrap();
    let sort = state.toggle_sort(SortKey::RateUsed).unwrap();
    assert_eq!(sort.direction, SortDirection::Ascending);

    let storage = state.unmount();
    assert_eq!(
        storage.get(KEY_HISTORY_SORT).unwrap().as_deref(),
        Some("rateUsed:asc")
    );

    let mut state = ConverterState::mount(storage, Defaults::default());
    assert_eq!(state.view().filter(), DirectionFilter::Only(Direction::SdgToSar));
    let sort = state.toggle_sort(SortKey::RateUsed).unwrap();
    assert_eq!(sort.direction, SortDirection::Descending);
}

#[test]
fn test_capacity_comes_from_defaults() {
    let defaults = Defaults {
        capacity: 2,
        ..Defaults::default()
    };
    let mut state = ConverterState::mount(memory(), defaults);
    state.set_amount(Currency::Sar, "1").unwrap();
    for _ in 0..3 {
        state
            .convert(Direction::SarToSdg, Local::now(), Instant::now())
            .unwrap();
    }
    assert_eq!(state.history().len(), 2);
}

#[test]
fn test_emphasis_supersede_and_cancel() {
    let mut emphasis = Emphasis::new();
    let t0 = Instant::now();

    emphasis.trigger(Currency::Sdg, t0);
    emphasis.trigger(Currency::Sar, t0 + Duration::from_millis(300));

    // past the first deadline, the newer highlight is still on
    let after_first = t0 + Duration::from_millis(600);
    assert_eq!(emphasis.active(after_first), Some(Currency::Sar));
    assert!(!emphasis.is_emphasized(Currency::Sdg, after_first));

    assert_eq!(emphasis.active(t0 + Duration::from_millis(800)), None);

    emphasis.trigger(Currency::Sdg, t0);
    emphasis.cancel();
    assert_eq!(emphasis.active(t0), None);
}

#[test]
fn test_emphasis_expires_after_duration() {
    let mut emphasis = Emphasis::new();
    let t0 = Instant::now();
    emphasis.trigger(Currency::Sar, t0);

    assert!(emphasis.is_emphasized(Currency::Sar, t0 + Duration::from_millis(499)));
    assert!(!emphasis.is_emphasized(Currency::Sar, t0 + Duration::from_millis(500)));
}
