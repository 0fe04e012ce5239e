//! Transient highlight of the field that just received a computed value.
//!
//! Deadline based: the holder asks whether a field is emphasized at a given
//! instant instead of running a timer thread. A new trigger replaces the
//! pending one, so an older deadline can never clear a newer highlight.

use crate::models::Currency;
use std::time::{Duration, Instant};

pub const EMPHASIS_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    field: Currency,
    until: Instant,
}

#[derive(Debug, Default)]
pub struct Emphasis {
    pending: Option<Pending>,
}

impl Emphasis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emphasize `field` from `now` for `EMPHASIS_DURATION`, replacing any
    /// pending emphasis and its deadline.
    pub fn trigger(&mut self, field: Currency, now: Instant) {
        self.pending = Some(Pending {
            field,
            until: now + EMPHASIS_DURATION,
        });
    }

    /// Field emphasized at `now`, if any. Expired emphasis is dropped.
    pub fn active(&mut self, now: Instant) -> Option<Currency> {
        match self.pending {
            Some(p) if now < p.until => Some(p.field),
            Some(_) => {
                self.pending = None;
                None
            }
            None => None,
        }
    }

    pub fn is_emphasized(&mut self, field: Currency, now: Instant) -> bool {
        self.active(now) == Some(field)
    }

    /// Drop any pending emphasis (teardown).
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
