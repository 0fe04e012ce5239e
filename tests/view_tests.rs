mod common;

use common::{at, entry, memory};
use proptest::prelude::*;
use rconverter::core::{HistoryStore, ViewState, project};
use rconverter::models::{
    ConversionEntry, Direction, DirectionFilter, SortDirection, SortKey, SortSpec,
};
use uuid::Uuid;

/// Log newest first, as the store keeps it.
fn sample_log() -> Vec<ConversionEntry> {
    vec![
        entry(at(2025, 4, 4, 12), 50.0, 34043.5, Direction::SarToSdg, Some(680.87)),
        entry(at(2025, 4, 3, 12), 10000.0, 14.71, Direction::SdgToSar, Some(0.001471)),
        entry(at(2025, 4, 2, 12), 300.0, 0.45, Direction::SdgToSar, None),
        entry(at(2025, 4, 1, 12), 1.0, 700.0, Direction::SarToSdg, Some(700.0)),
    ]
}

fn ids(view: &[&ConversionEntry]) -> Vec<Uuid> {
    view.iter().map(|e| e.id).collect()
}

#[test]
fn test_default_view_is_newest_first() {
    let log = sample_log();
    let view = project(&log, DirectionFilter::All, SortSpec::default());
    assert_eq!(ids(&view), log.iter().map(|e| e.id).collect::<Vec<_>>());
}

#[test]
fn test_filter_keeps_only_matching_direction() {
    let log = sample_log();
    let view = project(
        &log,
        DirectionFilter::Only(Direction::SdgToSar),
        SortSpec::default(),
    );
    assert_eq!(view.len(), 2);
    assert!(view.iter().all(|e| e.direction == Direction::SdgToSar));
}

#[test]
fn test_sort_by_from_amount_both_ways() {
    let log = sample_log();
    let asc = project(
        &log,
        DirectionFilter::All,
        SortSpec::new(SortKey::FromAmount, SortDirection::Ascending),
    );
    let amounts: Vec<f64> = asc.iter().map(|e| e.from_amount).collect();
    assert_eq!(amounts, vec![1.0, 50.0, 300.0, 10000.0]);

    let desc = project(
        &log,
        DirectionFilter::All,
        SortSpec::new(SortKey::FromAmount, SortDirection::Descending),
    );
    let amounts: Vec<f64> = desc.iter().map(|e| e.from_amount).collect();
    assert_eq!(amounts, vec![10000.0, 300.0, 50.0, 1.0]);
}

#[test]
fn test_sort_by_to_amount_is_numeric() {
    let log = sample_log();
    let asc = project(
        &log,
        DirectionFilter::All,
        SortSpec::new(SortKey::ToAmount, SortDirection::Ascending),
    );
    let amounts: Vec<f64> = asc.iter().map(|e| e.to_amount).collect();
    assert_eq!(amounts, vec![0.45, 14.71, 700.0, 34043.5]);
}

#[test]
fn test_sort_by_direction_is_stable() {
    let log = sample_log();
    let view = project(
        &log,
        DirectionFilter::All,
        SortSpec::new(SortKey::Direction, SortDirection::Ascending),
    );
    // "SAR to SDG" < "SDG to SAR"; ties keep log order
    assert_eq!(
        ids(&view),
        vec![log[0].id, log[3].id, log[1].id, log[2].id]
    );
}

#[test]
fn test_absent_rate_sorts_as_zero() {
    let log = sample_log();
    let view = project(
        &log,
        DirectionFilter::All,
        SortSpec::new(SortKey::RateUsed, SortDirection::Ascending),
    );
    assert_eq!(view[0].rate_used, None);
    assert_eq!(view[1].rate_used, Some(0.001471));
    assert_eq!(view[3].rate_used, Some(700.0));
}

#[test]
fn test_projection_is_idempotent() {
    let log = sample_log();
    let spec = SortSpec::new(SortKey::RateUsed, SortDirection::Descending);
    let first = ids(&project(&log, DirectionFilter::All, spec));
    let second = ids(&project(&log, DirectionFilter::All, spec));
    assert_eq!(first, second);
}

#[test]
fn test_toggle_semantics() {
    let spec = SortSpec::default();
    assert_eq!(spec.key, SortKey::Timestamp);
    assert_eq!(spec.direction, SortDirection::Descending);

    let spec = spec.toggle(SortKey::Timestamp);
    assert_eq!(spec.direction, SortDirection::Ascending);

    let spec = spec.toggle(SortKey::FromAmount);
    assert_eq!(spec, SortSpec::new(SortKey::FromAmount, SortDirection::Ascending));

    let spec = spec.toggle(SortKey::FromAmount);
    assert_eq!(spec.direction, SortDirection::Descending);

    let spec = spec.toggle(SortKey::Timestamp);
    assert_eq!(spec, SortSpec::default());
}

#[test]
fn test_sort_spec_storage_form() {
    let spec = SortSpec::new(SortKey::RateUsed, SortDirection::Ascending);
    assert_eq!(spec.encode(), "rateUsed:asc");
    assert_eq!(SortSpec::decode("rateUsed:asc"), Some(spec));
    assert_eq!(SortSpec::decode("rateUsed"), None);
    assert_eq!(SortSpec::decode("price:asc"), None);
    assert_eq!(
        DirectionFilter::from_code("sdg-to-sar"),
        Some(DirectionFilter::Only(Direction::SdgToSar))
    );
    assert_eq!(DirectionFilter::from_code("ALL"), Some(DirectionFilter::All));
}

#[test]
fn test_memo_recomputes_only_on_change() {
    let mut storage = memory();
    let mut store = HistoryStore::new(10);
    for e in sample_log().into_iter().rev() {
        store.append(e, &mut storage).unwrap();
    }

    let mut view = ViewState::new(DirectionFilter::All, SortSpec::default());
    assert_eq!(view.projection(&store).len(), 4);
    assert_eq!(view.projection(&store).len(), 4);
    assert_eq!(view.computations(), 1);

    view.set_filter(DirectionFilter::Only(Direction::SarToSdg));
    assert_eq!(view.projection(&store).len(), 2);
    assert_eq!(view.computations(), 2);

    view.toggle_sort(SortKey::ToAmount);
    view.projection(&store);
    assert_eq!(view.computations(), 3);

    let first = store.entries()[0].id;
    store.delete(first, &mut storage).unwrap();
    assert_eq!(view.projection(&store).len(), 1);
    assert_eq!(view.computations(), 4);
    assert_eq!(view.projection(&store).len(), 1);
    assert_eq!(view.computations(), 4);
}

#[test]
fn test_single_conversion_scenario() {
    let mut storage = memory();
    let mut store = HistoryStore::new(10);
    store
        .append(
            entry(at(2025, 7, 1, 10), 1.0, 680.87, Direction::SarToSdg, Some(680.87)),
            &mut storage,
        )
        .unwrap();

    let mut view = ViewState::default();
    let rows = view.projection(&store);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].from_amount_str(), "1.00");
    assert_eq!(rows[0].to_amount_str(), "680.87");
    assert_eq!(rows[0].direction.label(), "SAR to SDG");
    assert_eq!(rows[0].rate_str(), "680.870000");
}

fn arb_entry() -> impl Strategy<Value = ConversionEntry> {
    (
        1u32..=28,
        0u32..24,
        0.0f64..1.0e6,
        0.0f64..1.0e6,
        any::<bool>(),
        prop::option::of(0.0001f64..1000.0),
    )
        .prop_map(|(d, h, from, to, sar, rate)| {
            let dir = if sar { Direction::SarToSdg } else { Direction::SdgToSar };
            entry(at(2025, 2, d, h.clamp(4, 20)), from, to, dir, rate)
        })
}

fn arb_sort() -> impl Strategy<Value = SortSpec> {
    (
        prop::sample::select(vec![
            SortKey::Timestamp,
            SortKey::FromAmount,
            SortKey::ToAmount,
            SortKey::Direction,
            SortKey::RateUsed,
        ]),
        any::<bool>(),
    )
        .prop_map(|(key, asc)| {
            let dir = if asc { SortDirection::Ascending } else { SortDirection::Descending };
            SortSpec::new(key, dir)
        })
}

proptest! {
    #[test]
    fn prop_projection_is_a_filtered_permutation(
        log in prop::collection::vec(arb_entry(), 0..40),
        sort in arb_sort(),
        sar_only in any::<bool>(),
    ) {
        let filter = if sar_only {
            DirectionFilter::Only(Direction::SarToSdg)
        } else {
            DirectionFilter::All
        };

        let view = project(&log, filter, sort);
        let expected = log.iter().filter(|e| filter.matches(e.direction)).count();
        prop_assert_eq!(view.len(), expected);
        prop_assert_eq!(ids(&view), ids(&project(&log, filter, sort)));

        // unique ids: every kept entry appears exactly once
        let mut seen = ids(&view);
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), expected);
    }
}
