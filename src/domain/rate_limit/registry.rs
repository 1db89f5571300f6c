//! Registry of per-client token buckets with idle eviction.

use dashmap::DashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::token_bucket::TokenBucket;

/// How often the background sweep runs.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Visitors untouched for longer than this are evicted by the sweep.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Debug)]
struct Visitor {
    bucket: Arc<TokenBucket>,
    last_seen: Instant,
}

/// Owns one [`TokenBucket`] per client key.
///
/// Lookup-or-insert and eviction go through the map's entry and `retain` APIs,
/// which lock the shard holding the key, so two first requests from the same
/// client can never create two buckets and the sweep cannot drop an entry while
/// it is being admitted. Bucket accounting happens after the shard lock is
/// released; unrelated clients never wait on each other.
///
/// State is process-local and starts empty on every restart.
#[derive(Debug)]
pub struct RateLimiterRegistry {
    visitors: DashMap<String, Visitor>,
    max_tokens: u32,
    refill_interval: Duration,
    idle_timeout: Duration,
}

impl RateLimiterRegistry {
    /// Creates an empty registry handing out buckets of `max_tokens` that refill
    /// every `refill_interval`.
    pub fn new(max_tokens: u32, refill_interval: Duration) -> Self {
        Self {
            visitors: DashMap::new(),
            max_tokens,
            refill_interval,
            idle_timeout: IDLE_TIMEOUT,
        }
    }

    /// Overrides the idle threshold used by [`Self::sweep_idle`].
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Records a request from `client_key` and decides whether to admit it.
    pub fn admit(&self, client_key: &str) -> bool {
        let now = Instant::now();

        let bucket = {
            let mut visitor = self
                .visitors
                .entry(client_key.to_owned())
                .or_insert_with(|| Visitor {
                    bucket: Arc::new(TokenBucket::new_at(
                        self.max_tokens,
                        self.refill_interval,
                        now,
                    )),
                    last_seen: now,
                });
            visitor.last_seen = now;
            visitor.bucket.clone()
        };

        bucket.allow_at(now)
    }

    /// Removes visitors idle for longer than the idle threshold.
    ///
    /// Returns the number of evicted entries.
    pub fn sweep_idle(&self) -> usize {
        let now = Instant::now();
        let before = self.visitors.len();

        self.visitors
            .retain(|_, visitor| now.saturating_duration_since(visitor.last_seen) <= self.idle_timeout);

        before.saturating_sub(self.visitors.len())
    }

    /// Spawns the periodic idle sweep on the current Tokio runtime.
    ///
    /// The task holds only a weak reference and exits once the registry is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let registry: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let Some(registry) = registry.upgrade() else {
                    tracing::debug!("Rate limiter dropped, stopping idle sweep");
                    break;
                };

                let evicted = registry.sweep_idle();
                if evicted > 0 {
                    tracing::debug!(evicted, remaining = registry.len(), "Evicted idle rate limit visitors");
                }
            }
        })
    }

    pub fn contains(&self, client_key: &str) -> bool {
        self.visitors.contains_key(client_key)
    }

    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}
