//! Identifier and clock capabilities.
//!
//! The document model never reaches for ambient randomness or wall-clock
//! time. Callers pass an [`IdSource`] and a [`Clock`]; production code uses
//! [`RandomIds`] and [`SystemClock`], tests use [`SequentialIds`] or
//! [`SeededIds`] with a [`FixedClock`].

#[cfg(test)]
#[path = "ids_test.rs"]
mod ids_test;

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::error::LayoutError;

/// Supplies fresh identifiers for tabs and elements.
pub trait IdSource {
    fn next_id(&mut self) -> Uuid;
}

/// Supplies the current time as milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Draw ids until one is not `in_use`.
///
/// A source that never repeats itself needs at most `taken + 1` draws, where
/// `taken` is the number of ids currently in use. Past that the source is
/// replaying, and the last id drawn is reported.
///
/// # Errors
///
/// Returns [`LayoutError::DuplicateId`] when every draw was already taken.
pub fn next_unused_id(
    ids: &mut dyn IdSource,
    taken: usize,
    in_use: impl Fn(Uuid) -> bool,
) -> Result<Uuid, LayoutError> {
    let mut last = Uuid::nil();
    for _ in 0..=taken {
        let id = ids.next_id();
        if !in_use(id) {
            return Ok(id);
        }
        last = id;
    }
    Err(LayoutError::DuplicateId(last))
}

/// Random v4 UUIDs from the thread RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Reproducible v4 UUIDs from a seeded generator.
#[derive(Debug, Clone)]
pub struct SeededIds {
    rng: StdRng,
}

impl SeededIds {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl IdSource for SeededIds {
    fn next_id(&mut self) -> Uuid {
        let bytes: [u8; 16] = self.rng.random();
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// Counting ids: `...0001`, `...0002`, and so on.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> Uuid {
        self.next += 1;
        Uuid::from_u128(self.next)
    }
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
            return 0;
        };
        i64::try_from(dur.as_millis()).unwrap_or(0)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default, Clone)]
pub struct FixedClock {
    now: Cell<i64>,
}

impl FixedClock {
    #[must_use]
    pub fn at(ms: i64) -> Self {
        Self { now: Cell::new(ms) }
    }

    pub fn set(&self, ms: i64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}
