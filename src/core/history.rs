//! The conversion history log.
//!
//! Entries are kept newest first. Every mutating operation rewrites the whole
//! log to storage before returning.

use crate::db::storage::{KEY_HISTORY, KeyValueStore};
use crate::errors::{AppError, AppResult};
use crate::models::ConversionEntry;
use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: Vec<ConversionEntry>,
    capacity: usize,
    revision: u64,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
            revision: 0,
        }
    }

    /// Read the persisted log. A missing key is an empty log; a corrupt value
    /// is logged and also treated as an empty log.
    pub fn load(storage: &impl KeyValueStore, capacity: usize) -> Self {
        let mut store = Self::new(capacity);

        let raw = match storage.get(KEY_HISTORY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return store,
            Err(e) => {
                warn!(error = %e, "could not read stored history, starting empty");
                return store;
            }
        };

        match serde_json::from_str::<Vec<ConversionEntry>>(&raw) {
            Ok(entries) => {
                store.entries = entries;
                store.truncate();
                debug!(count = store.entries.len(), "history loaded");
            }
            Err(e) => {
                warn!(error = %e, "stored history is corrupt, starting with an empty log");
            }
        }

        store
    }

    /// Whole-log rewrite.
    pub fn save(&self, storage: &mut impl KeyValueStore) -> AppResult<()> {
        let json = serde_json::to_string(&self.entries)?;
        storage.set(KEY_HISTORY, &json)
    }

    pub fn entries(&self) -> &[ConversionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Incremented on every mutation; used to key derived projections.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: Uuid) -> Option<&ConversionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Insert at the front, dropping the oldest entries beyond capacity.
    pub fn append(
        &mut self,
        entry: ConversionEntry,
        storage: &mut impl KeyValueStore,
    ) -> AppResult<()> {
        self.entries.insert(0, entry);
        self.truncate();
        self.touch();
        self.save(storage)
    }

    /// Insert a batch before the existing entries, keeping the batch order.
    /// Returns how many batch entries survive the capacity bound.
    pub fn extend_front(
        &mut self,
        batch: Vec<ConversionEntry>,
        storage: &mut impl KeyValueStore,
    ) -> AppResult<usize> {
        if batch.is_empty() {
            return Ok(0);
        }
        let kept = batch.len().min(self.capacity);
        self.entries.splice(0..0, batch);
        self.truncate();
        self.touch();
        self.save(storage)?;
        Ok(kept)
    }

    /// Remove the entry with `id`. Absent ids are not an error.
    pub fn delete(&mut self, id: Uuid, storage: &mut impl KeyValueStore) -> AppResult<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.touch();
        }
        self.save(storage)?;
        Ok(removed)
    }

    /// Move the entry to another calendar date, keeping its time of day and
    /// every other field.
    pub fn edit_date(
        &mut self,
        id: Uuid,
        date: NaiveDate,
        storage: &mut impl KeyValueStore,
    ) -> AppResult<bool> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };

        entry.timestamp = entry
            .timestamp_on(date)
            .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;

        self.touch();
        self.save(storage)?;
        Ok(true)
    }

    pub fn clear(&mut self, storage: &mut impl KeyValueStore) -> AppResult<()> {
        self.entries.clear();
        self.touch();
        self.save(storage)
    }

    /// Resolve a full id or a unique prefix of one (hyphens optional).
    pub fn resolve(&self, input: &str) -> AppResult<Uuid> {
        if let Ok(id) = Uuid::parse_str(input) {
            return self
                .get(id)
                .map(|e| e.id)
                .ok_or_else(|| AppError::EntryNotFound(input.to_string()));
        }

        let needle: String = input
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        if needle.is_empty() {
            return Err(AppError::EntryNotFound(input.to_string()));
        }

        let mut matches = self
            .entries
            .iter()
            .filter(|e| e.id.simple().to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(e), None) => Ok(e.id),
            (Some(_), Some(_)) => Err(AppError::AmbiguousEntry(input.to_string())),
            (None, _) => Err(AppError::EntryNotFound(input.to_string())),
        }
    }

    fn truncate(&mut self) {
        if self.entries.len() > self.capacity {
            debug!(
                dropped = self.entries.len() - self.capacity,
                "history over capacity, dropping oldest entries"
            );
            self.entries.truncate(self.capacity);
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
