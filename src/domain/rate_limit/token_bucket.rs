//! Fixed-window token bucket.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Per-client admission counter.
///
/// Once `refill_interval` has elapsed since the last refill, the next call resets
/// the bucket to `max_tokens` in one step. This is a fixed-window refill, so a
/// client can spend a full quota at the end of one window and another at the
/// start of the next.
///
/// All four fields are read and written inside one critical section per call, so
/// concurrent callers can neither lose a decrement nor refill twice.
#[derive(Debug)]
pub struct TokenBucket {
    max_tokens: u32,
    refill_interval: Duration,
    state: Mutex<BucketState>,
}

#[derive(Debug)]
struct BucketState {
    tokens: u32,
    last_refill: Instant,
}

impl TokenBucket {
    /// Creates a full bucket.
    pub fn new(max_tokens: u32, refill_interval: Duration) -> Self {
        Self::new_at(max_tokens, refill_interval, Instant::now())
    }

    pub(crate) fn new_at(max_tokens: u32, refill_interval: Duration, now: Instant) -> Self {
        Self {
            max_tokens,
            refill_interval,
            state: Mutex::new(BucketState {
                tokens: max_tokens,
                last_refill: now,
            }),
        }
    }

    /// Takes one token if available.
    pub fn allow(&self) -> bool {
        self.allow_at(Instant::now())
    }

    pub(crate) fn allow_at(&self, now: Instant) -> bool {
        let mut state = self.state.lock();

        if now.saturating_duration_since(state.last_refill) >= self.refill_interval {
            state.tokens = self.max_tokens;
            state.last_refill = now;
        }

        if state.tokens > 0 {
            state.tokens -= 1;
            true
        } else {
            false
        }
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Tokens left in the current window.
    pub fn remaining(&self) -> u32 {
        self.state.lock().tokens
    }
}
