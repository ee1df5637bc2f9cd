//! Injectable time source for todo timestamps.
//!
//! The store stamps `created_at` and `updated_at` from a `Clock` rather than
//! calling `Utc::now()` directly. `SystemClock` is used at runtime and
//! `FixedClock` pins (and steps) time in tests so timestamp assertions are
//! exact.

use chrono::{DateTime, Utc};
use std::sync::Arc;
#[cfg(test)]
use std::sync::{Mutex, PoisonError};

#[cfg(test)]
use chrono::Duration;

/// A source of the current UTC instant. Shared across threads with the store.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Cloning copies the current instant; the clones advance independently.
#[derive(Debug)]
#[cfg(test)]
pub struct FixedClock {
    inner: Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            inner: Mutex::new(now),
        }
    }

    /// Pin the clock at an RFC3339 instant such as `2025-01-07T09:00:00Z`.
    pub fn from_rfc3339(s: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Self::new(dt.with_timezone(&Utc)))
    }

    pub fn set_now(&self, now: DateTime<Utc>) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Move the instant by `delta`; negative values rewind.
    pub fn advance(&self, delta: Duration) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += delta;
    }
}

#[cfg(test)]
impl Clone for FixedClock {
    fn clone(&self) -> Self {
        Self::new(self.now())
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub type SharedClock = Arc<dyn Clock>;

pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}

/// Fixed clock at 2025-01-01 00:00:00 UTC, the standard instant for tests.
#[cfg(test)]
pub fn test_clock() -> SharedClock {
    Arc::new(test_fixed_clock())
}

#[cfg(test)]
pub fn test_fixed_clock() -> FixedClock {
    use chrono::TimeZone;
    FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
}
