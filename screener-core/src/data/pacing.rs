//! Request pacing between provider calls.
//!
//! Kept outside the scoring core: [`PacedProvider`] wraps any provider and
//! spaces request starts according to a [`Pacing`] policy. The schedule is
//! shared, so the spacing holds across any number of worker threads.

use super::provider::{DataError, DataProvider, FetchResult};
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Gap between consecutive provider requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Pacing {
    None,
    Fixed { millis: u64 },
    Jittered { min_millis: u64, max_millis: u64 },
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::Jittered {
            min_millis: 200,
            max_millis: 800,
        }
    }
}

impl Pacing {
    /// Draw the next pause. Jitter is uniform over `[min, max]`.
    pub fn next_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        match *self {
            Pacing::None => Duration::ZERO,
            Pacing::Fixed { millis } => Duration::from_millis(millis),
            Pacing::Jittered {
                min_millis,
                max_millis,
            } => {
                let (lo, hi) = if min_millis <= max_millis {
                    (min_millis, max_millis)
                } else {
                    (max_millis, min_millis)
                };
                Duration::from_millis(rng.gen_range(lo..=hi))
            }
        }
    }
}

/// Provider wrapper that applies a [`Pacing`] policy to every fetch,
/// successful or not.
///
/// Each call reserves the next free request slot before touching the inner
/// provider, then waits for it. Slots are `delay` apart, so `n` fetches take
/// at least `(n - 1) * delay` however many threads issue them.
pub struct PacedProvider<P> {
    inner: P,
    pacing: Pacing,
    next_slot: Mutex<Option<Instant>>,
}

impl<P: DataProvider> PacedProvider<P> {
    pub fn new(inner: P, pacing: Pacing) -> Self {
        Self {
            inner,
            pacing,
            next_slot: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    fn lock(&self) -> MutexGuard<'_, Option<Instant>> {
        self.next_slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim the earliest free slot and push the next one out by a fresh
    /// delay. Returns the instant this request may start.
    fn reserve_slot(&self) -> Instant {
        let delay = self.pacing.next_delay(&mut rand::thread_rng());
        let now = Instant::now();
        let mut next = self.lock();
        let slot = match *next {
            Some(at) if at > now => at,
            _ => now,
        };
        *next = Some(slot + delay);
        slot
    }
}

impl<P: DataProvider> DataProvider for PacedProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let slot = self.reserve_slot();
        let wait = slot.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.inner.fetch(symbol, start, end)
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}
