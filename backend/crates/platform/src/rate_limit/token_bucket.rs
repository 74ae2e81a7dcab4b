//! In-memory token bucket store
//!
//! One bucket per key. Capacity is `max_requests`; tokens refill
//! continuously at `max_requests / window`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::{RateLimitConfig, RateLimitDecision, RateLimitError, RateLimitStore};

/// A single token bucket
#[derive(Debug, Clone)]
pub struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    window: Duration,
    updated_at: Instant,
}

impl TokenBucket {
    /// A full bucket sized from `config`
    pub fn new(config: &RateLimitConfig, now: Instant) -> Self {
        let capacity = f64::from(config.max_requests);
        let refill_per_sec = if config.window.is_zero() {
            f64::INFINITY
        } else {
            capacity / config.window.as_secs_f64()
        };

        Self {
            capacity,
            tokens: capacity,
            refill_per_sec,
            window: config.window,
            updated_at: now,
        }
    }

    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.updated_at).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            self.updated_at = now;
        }
    }

    /// Take one token if available
    pub fn try_acquire(&mut self, now: Instant) -> RateLimitDecision {
        self.refill(now);

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            return RateLimitDecision::Allowed {
                remaining: self.tokens.floor() as u32,
            };
        }

        // Zero-capacity buckets never refill to a whole token
        let retry_after = if self.capacity < 1.0 || self.refill_per_sec <= 0.0 {
            self.window
        } else {
            Duration::try_from_secs_f64((1.0 - self.tokens) / self.refill_per_sec)
                .unwrap_or(self.window)
        };

        RateLimitDecision::Limited { retry_after }
    }

    /// Whether the bucket would be full at `now`
    pub fn is_full(&self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.updated_at).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens + elapsed * self.refill_per_sec >= self.capacity
        } else {
            self.tokens >= self.capacity
        }
    }
}

/// Process-local [`RateLimitStore`]
///
/// State is lost on restart and not shared between instances. The lock is
/// never held across an `.await`.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    buckets: Mutex<HashMap<String, TokenBucket>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// [`RateLimitStore::check_and_increment`] at an explicit instant
    pub fn check_at(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now: Instant,
    ) -> Result<RateLimitDecision, RateLimitError> {
        let mut buckets = self
            .buckets
            .lock()
            .map_err(|_| RateLimitError::Unavailable("bucket table lock poisoned".to_string()))?;

        let bucket = buckets
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket::new(config, now));

        Ok(bucket.try_acquire(now))
    }

    /// Drop buckets that have refilled completely; they carry no state.
    ///
    /// Returns the number of buckets removed.
    pub fn purge_idle(&self, now: Instant) -> Result<usize, RateLimitError> {
        let mut buckets = self
            .buckets
            .lock()
            .map_err(|_| RateLimitError::Unavailable("bucket table lock poisoned".to_string()))?;

        let before = buckets.len();
        buckets.retain(|_, bucket| !bucket.is_full(now));
        Ok(before - buckets.len())
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.buckets.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitDecision, RateLimitError> {
        self.check_at(key, config, Instant::now())
    }
}
