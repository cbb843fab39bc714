//! Active index state machine.
//!
//! Holds the raw index, which moves on every intent, and the settled index,
//! which follows it once the debounce window passes with no further change.
//! Only the settled index drives visible effects.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::clock::DebounceTimer;
use crate::input::Intent;
use crate::item::TimelineItem;

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Enabled state of the previous/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControls {
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

/// Navigation state over a fixed-length item list.
#[derive(Debug, Clone)]
pub struct NavigationState {
    raw: usize,
    settled: usize,
    len: usize,
    timer: DebounceTimer,
}

impl NavigationState {
    /// Create state for `len` items, settled at index 0.
    ///
    /// `len` must be non-zero; the timeline rejects empty lists before
    /// getting here.
    pub fn new(len: usize, debounce: Duration) -> Self {
        debug_assert!(len > 0, "navigation over an empty list");
        Self {
            raw: 0,
            settled: 0,
            len,
            timer: DebounceTimer::new(debounce),
        }
    }

    /// Index after the most recent intent.
    pub fn raw(&self) -> usize {
        self.raw
    }

    /// Debounced index.
    pub fn settled(&self) -> usize {
        self.settled
    }

    /// Whether a raw change is waiting to settle.
    pub fn is_settling(&self) -> bool {
        self.timer.is_pending()
    }

    /// Apply an intent. Returns `true` if the raw index moved.
    ///
    /// Out-of-range moves and unknown ids are absorbed.
    pub fn apply(&mut self, intent: &Intent, items: &[TimelineItem], now: Instant) -> bool {
        let target = match intent {
            Intent::Next if self.raw + 1 < self.len => Some(self.raw + 1),
            Intent::Previous if self.raw > 0 => Some(self.raw - 1),
            Intent::Select(id) => items.iter().position(|item| &item.id == id),
            Intent::Next | Intent::Previous => None,
        };

        match target {
            Some(index) if index != self.raw => {
                trace!(from = self.raw, to = index, ?intent, "raw index moved");
                self.raw = index;
                // Back at the settled index: nothing left to settle.
                if index == self.settled {
                    self.timer.cancel();
                } else {
                    self.timer.restart(now);
                }
                true
            }
            _ => false,
        }
    }

    /// Advance the debounce timer.
    ///
    /// Returns the new settled index when it changed.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        if !self.timer.fire(now) || self.raw == self.settled {
            return None;
        }
        self.settled = self.raw;
        Some(self.settled)
    }

    /// Control state derived from the settled index.
    pub fn controls(&self) -> NavControls {
        NavControls {
            previous_disabled: self.settled == 0,
            next_disabled: self.settled + 1 >= self.len,
        }
    }
}
