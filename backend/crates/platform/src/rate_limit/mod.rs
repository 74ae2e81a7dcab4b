//! Rate Limiting Infrastructure
//!
//! Classifies operations into [`RateLimitBucket`]s and provides the request
//! pipeline interception point for each bucket.
//!
//! - [`middleware_for`] returns a pass-through interceptor: it never counts
//!   and never blocks. This is the default wiring.
//! - [`RateLimiter::middleware_for`] returns an interceptor backed by a
//!   [`RateLimitStore`] keyed by `(bucket, client identity)`. It fails closed
//!   with `429 Too Many Requests` once the budget is exhausted.
//!
//! The client identity is the connection's peer address. `X-Forwarded-For`
//! is only honored after [`RateLimiter::with_trusted_forwarding`], for
//! deployments where a proxy owns that header.

pub mod middleware;
pub mod token_bucket;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::{self, ConfigError, ConfigSource};

pub use middleware::{RateLimitGuard, rate_limit};
pub use token_bucket::{InMemoryRateLimitStore, TokenBucket};

// ============================================================================
// Buckets
// ============================================================================

/// Class of operation subject to a shared throttle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitBucket {
    Otp,
    Auth,
    LoanSubmission,
    Payment,
    AiChat,
}

impl RateLimitBucket {
    pub const ALL: [RateLimitBucket; 5] = [
        RateLimitBucket::Otp,
        RateLimitBucket::Auth,
        RateLimitBucket::LoanSubmission,
        RateLimitBucket::Payment,
        RateLimitBucket::AiChat,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use RateLimitBucket::*;
        match self {
            Otp => "otp",
            Auth => "auth",
            LoanSubmission => "loan_submission",
            Payment => "payment",
            AiChat => "ai_chat",
        }
    }

    /// Budget used when no override is configured
    pub const fn default_config(&self) -> RateLimitConfig {
        use RateLimitBucket::*;
        match self {
            Otp => RateLimitConfig::new(5, 300),
            Auth => RateLimitConfig::new(10, 900),
            LoanSubmission => RateLimitConfig::new(3, 3600),
            Payment => RateLimitConfig::new(20, 60),
            AiChat => RateLimitConfig::new(30, 60),
        }
    }

    /// Prefix of the override keys, e.g. `RATE_LIMIT_LOAN_SUBMISSION`
    fn env_prefix(&self) -> String {
        format!("RATE_LIMIT_{}", self.code().to_ascii_uppercase())
    }
}

impl fmt::Display for RateLimitBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown rate limit bucket: {0}")]
pub struct UnknownBucket(pub String);

impl FromStr for RateLimitBucket {
    type Err = UnknownBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RateLimitBucket::ALL
            .into_iter()
            .find(|bucket| bucket.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBucket(s.to_string()))
    }
}

// ============================================================================
// Configuration / decisions
// ============================================================================

/// Rate limit configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window (bucket capacity)
    pub max_requests: u32,
    /// Time to refill the bucket from empty to full
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(10, 60)
    }
}

impl RateLimitConfig {
    pub const fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }
}

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateLimitDecision {
    /// Not counted at all (pass-through)
    Unmetered,
    /// Counted and permitted
    Allowed { remaining: u32 },
    /// Budget exhausted
    Limited { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, RateLimitDecision::Limited { .. })
    }
}

/// Rate limit storage failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateLimitError {
    #[error("Rate limit store unavailable: {0}")]
    Unavailable(String),
}

// ============================================================================
// Store
// ============================================================================

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Consume one unit of `key`'s budget if any is left
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitDecision, RateLimitError>;
}

/// Store that never counts: every request is [`RateLimitDecision::Unmetered`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughStore;

impl RateLimitStore for PassThroughStore {
    async fn check_and_increment(
        &self,
        _key: &str,
        _config: &RateLimitConfig,
    ) -> Result<RateLimitDecision, RateLimitError> {
        Ok(RateLimitDecision::Unmetered)
    }
}

// ============================================================================
// Limiter
// ============================================================================

/// A store plus the budget of every bucket
pub struct RateLimiter<S> {
    store: Arc<S>,
    configs: HashMap<RateLimitBucket, RateLimitConfig>,
    trust_forwarded: bool,
}

/// Config key enabling `X-Forwarded-For` for client identity
pub const TRUST_FORWARDED_KEY: &str = "RATE_LIMIT_TRUST_FORWARDED";

impl<S> Clone for RateLimiter<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            configs: self.configs.clone(),
            trust_forwarded: self.trust_forwarded,
        }
    }
}

impl RateLimiter<PassThroughStore> {
    /// Limiter whose interceptors never block
    pub fn pass_through() -> Self {
        Self::new(PassThroughStore)
    }
}

impl<S> RateLimiter<S>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    /// Limiter with every bucket at its default budget
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            configs: RateLimitBucket::ALL
                .into_iter()
                .map(|bucket| (bucket, bucket.default_config()))
                .collect(),
            trust_forwarded: false,
        }
    }

    /// Override one bucket's budget
    pub fn with_config(mut self, bucket: RateLimitBucket, config: RateLimitConfig) -> Self {
        self.configs.insert(bucket, config);
        self
    }

    /// Key clients on the first `X-Forwarded-For` address instead of the peer
    pub fn with_trusted_forwarding(mut self, trust: bool) -> Self {
        self.trust_forwarded = trust;
        self
    }

    /// Apply `RATE_LIMIT_<BUCKET>_MAX_REQUESTS` / `RATE_LIMIT_<BUCKET>_WINDOW_SECS`
    /// and `RATE_LIMIT_TRUST_FORWARDED`
    pub fn with_overrides_from(mut self, source: &impl ConfigSource) -> Result<Self, ConfigError> {
        self.trust_forwarded = config::flag_or(source, TRUST_FORWARDED_KEY, self.trust_forwarded)?;
        for bucket in RateLimitBucket::ALL {
            let current = self.config_for(bucket);
            let prefix = bucket.env_prefix();
            let max_requests =
                config::parse_or(source, &format!("{prefix}_MAX_REQUESTS"), current.max_requests)?;
            let window_secs = config::parse_or(
                source,
                &format!("{prefix}_WINDOW_SECS"),
                current.window.as_secs(),
            )?;
            self.configs
                .insert(bucket, RateLimitConfig::new(max_requests, window_secs));
        }
        Ok(self)
    }

    pub fn config_for(&self, bucket: RateLimitBucket) -> RateLimitConfig {
        self.configs
            .get(&bucket)
            .copied()
            .unwrap_or_else(|| bucket.default_config())
    }

    pub fn trusts_forwarded(&self) -> bool {
        self.trust_forwarded
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Interceptor for `bucket` backed by this limiter's store
    pub fn middleware_for(&self, bucket: RateLimitBucket) -> RateLimitGuard<S> {
        RateLimitGuard::new(bucket, self.config_for(bucket), self.store.clone())
            .with_trusted_forwarding(self.trust_forwarded)
    }
}

/// Pass-through interceptor for `bucket`
///
/// Always lets the request reach the next stage. Swap in
/// [`RateLimiter::middleware_for`] to enforce a budget.
pub fn middleware_for(bucket: RateLimitBucket) -> RateLimitGuard<PassThroughStore> {
    RateLimiter::pass_through().middleware_for(bucket)
}
