//! Nullable clock.

use agora_types::Timestamp;
use std::cell::Cell;

/// A clock that only moves when a test moves it.
///
/// Shared by reference; interior mutability lets a test advance it while
/// other code holds `&NullClock`.
#[derive(Debug)]
pub struct NullClock {
    now: Cell<Timestamp>,
}

impl NullClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn at_secs(secs: u64) -> Self {
        Self::new(Timestamp::new(secs))
    }

    pub fn now(&self) -> Timestamp {
        self.now.get()
    }

    pub fn advance(&self, secs: u64) {
        self.now.set(self.now.get().plus_secs(secs));
    }

    /// Jump to `at`, which may be earlier than the current time.
    pub fn set(&self, at: Timestamp) {
        self.now.set(at);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(Timestamp::EPOCH)
    }
}
