//! Time source and id generation.

use crate::types::Timestamp;
use parking_lot::Mutex;
use std::sync::Arc;

/// Source of "now" for everything that stamps records.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock that only moves when told to. Used by tests and replays.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, ts: Timestamp) {
        *self.now.lock() = ts;
    }

    pub fn advance_millis(&self, millis: i64) {
        let mut now = self.now.lock();
        *now = Timestamp(now.0 + chrono::Duration::milliseconds(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}

/// Time-based id generator.
///
/// Ids are the clock's millisecond value. Within one generator the value is
/// bumped past the last one issued, so two creations in the same tick still
/// get distinct ids.
pub struct IdGenerator {
    clock: Arc<dyn Clock>,
    last: Mutex<i64>,
}

impl IdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: Mutex::new(i64::MIN),
        }
    }

    /// Next tick value, strictly greater than any issued before.
    pub fn next_tick(&self) -> i64 {
        let now = self.clock.now().millis();
        let mut last = self.last.lock();
        let tick = if now > *last { now } else { *last + 1 };
        *last = tick;
        tick
    }

    /// Bare numeric id, used for users and packages.
    pub fn plain(&self) -> String {
        self.next_tick().to_string()
    }
}

/// Order id for a tick.
pub fn order_id(tick: i64) -> String {
    format!("ORD-{tick}")
}

/// Transaction id for a tick.
pub fn transaction_id(tick: i64) -> String {
    format!("TRX-{tick}")
}
