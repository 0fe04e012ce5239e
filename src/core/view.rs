//! Filtered, sorted projection of the history log.

use crate::core::history::HistoryStore;
use crate::models::{ConversionEntry, DirectionFilter, SortDirection, SortKey, SortSpec};
use std::cmp::Ordering;

fn compare(a: &ConversionEntry, b: &ConversionEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::Timestamp => a.timestamp.cmp(&b.timestamp),
        SortKey::FromAmount => a.from_amount.total_cmp(&b.from_amount),
        SortKey::ToAmount => a.to_amount.total_cmp(&b.to_amount),
        SortKey::Direction => a.direction.label().cmp(b.direction.label()),
        SortKey::RateUsed => a.rate_or_zero().total_cmp(&b.rate_or_zero()),
    }
}

/// Indices into `log` of the entries passing `filter`, in `sort` order.
///
/// Stable: entries comparing equal keep their log order.
pub fn project_indices(
    log: &[ConversionEntry],
    filter: DirectionFilter,
    sort: SortSpec,
) -> Vec<usize> {
    let mut idx: Vec<usize> = log
        .iter()
        .enumerate()
        .filter(|(_, e)| filter.matches(e.direction))
        .map(|(i, _)| i)
        .collect();

    idx.sort_by(|&a, &b| {
        let ord = compare(&log[a], &log[b], sort.key);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    idx
}

/// Pure projection: same inputs, same output.
pub fn project(
    log: &[ConversionEntry],
    filter: DirectionFilter,
    sort: SortSpec,
) -> Vec<&ConversionEntry> {
    project_indices(log, filter, sort)
        .into_iter()
        .map(|i| &log[i])
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    revision: u64,
    filter: DirectionFilter,
    sort: SortSpec,
}

/// View configuration plus a memo of the last projection, recomputed only when
/// the store revision, the filter or the sort changes.
#[derive(Debug, Default)]
pub struct ViewState {
    filter: DirectionFilter,
    sort: SortSpec,
    cache: Option<(CacheKey, Vec<usize>)>,
    computations: u64,
}

impl ViewState {
    pub fn new(filter: DirectionFilter, sort: SortSpec) -> Self {
        Self {
            filter,
            sort,
            cache: None,
            computations: 0,
        }
    }

    pub fn filter(&self) -> DirectionFilter {
        self.filter
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn set_filter(&mut self, filter: DirectionFilter) {
        self.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Select a sort key: same key flips, new key takes its default direction.
    pub fn toggle_sort(&mut self, key: SortKey) -> SortSpec {
        self.sort = self.sort.toggle(key);
        self.sort
    }

    /// How many times the projection has actually been derived.
    pub fn computations(&self) -> u64 {
        self.computations
    }

    pub fn projection<'a>(&mut self, store: &'a HistoryStore) -> Vec<&'a ConversionEntry> {
        let key = CacheKey {
            revision: store.revision(),
            filter: self.filter,
            sort: self.sort,
        };

        let fresh = matches!(&self.cache, Some((k, _)) if *k == key);
        if !fresh {
            let idx = project_indices(store.entries(), self.filter, self.sort);
            self.computations += 1;
            self.cache = Some((key, idx));
        }

        let log = store.entries();
        self.cache
            .as_ref()
            .map(|(_, idx)| idx.iter().filter_map(|&i| log.get(i)).collect())
            .unwrap_or_default()
    }
}
