//! Time sources for note timestamps.

use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Source of "now" for note creation and update timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// UTC wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock with millisecond resolution.
///
/// Clones share the same instant, so a caller can keep a handle and advance
/// time for a store that owns another clone.
#[derive(Debug, Clone)]
pub struct ManualClock {
    epoch_ms: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            epoch_ms: Arc::new(AtomicI64::new(start.timestamp_millis())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.epoch_ms
            .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let epoch_ms = self.epoch_ms.load(Ordering::SeqCst);
        DateTime::<Utc>::from_timestamp_millis(epoch_ms).unwrap_or_default()
    }
}
