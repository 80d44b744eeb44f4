//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - v4 UUIDs.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that moves forward one second on every reading (tests only).
#[cfg(test)]
pub struct SteppingClock {
    next: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: std::sync::Mutex::new(start),
        }
    }
}

#[cfg(test)]
impl ClockPort for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut guard = self.next.lock().unwrap_or_else(|e| e.into_inner());
        let now = *guard;
        *guard = now + chrono::Duration::seconds(1);
        now
    }
}

/// Random that yields `Uuid::from_u128(1)`, `2`, `3`, ... (tests only).
#[cfg(test)]
#[derive(Default)]
pub struct SequentialRandom {
    counter: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl SequentialRandom {
    /// Next token is `Uuid::from_u128(n + 1)`.
    pub fn starting_after(n: u64) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(n),
        }
    }
}

#[cfg(test)]
impl RandomPort for SequentialRandom {
    fn gen_uuid(&self) -> Uuid {
        let n = self
            .counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            + 1;
        Uuid::from_u128(u128::from(n))
    }
}
