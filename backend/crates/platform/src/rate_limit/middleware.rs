//! Rate Limit Middleware
//!
//! Interceptor for axum's `from_fn_with_state`:
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use platform::rate_limit::{self, RateLimitBucket, PassThroughStore};
//!
//! let guard = rate_limit::middleware_for(RateLimitBucket::Payment);
//! let router = router.route_layer(from_fn_with_state(guard, rate_limit::rate_limit::<PassThroughStore>));
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;

use super::{RateLimitBucket, RateLimitConfig, RateLimitDecision, RateLimitStore};
use crate::client::ClientIdentity;

/// Middleware state: which bucket, its budget, and where it is counted
pub struct RateLimitGuard<S> {
    pub bucket: RateLimitBucket,
    pub config: RateLimitConfig,
    /// Key on `X-Forwarded-For` instead of the connection peer
    pub trust_forwarded: bool,
    store: Arc<S>,
}

impl<S> Clone for RateLimitGuard<S> {
    fn clone(&self) -> Self {
        Self {
            bucket: self.bucket,
            config: self.config,
            trust_forwarded: self.trust_forwarded,
            store: self.store.clone(),
        }
    }
}

impl<S> RateLimitGuard<S> {
    pub fn new(bucket: RateLimitBucket, config: RateLimitConfig, store: Arc<S>) -> Self {
        Self {
            bucket,
            config,
            trust_forwarded: false,
            store,
        }
    }

    pub fn with_trusted_forwarding(mut self, trust: bool) -> Self {
        self.trust_forwarded = trust;
        self
    }

    /// Store key for a client within this bucket
    pub fn key_for(&self, identity: &ClientIdentity) -> String {
        format!("{}:{}", self.bucket, identity)
    }
}

/// Middleware that counts the request against its bucket
///
/// - Unmetered: forwards untouched
/// - Allowed: forwards, then adds `X-RateLimit-Limit` / `X-RateLimit-Remaining`
/// - Limited: `429` problem response with `Retry-After`, the next stage is not called
/// - Store failure: `503` problem response, the next stage is not called
pub async fn rate_limit<S>(
    State(guard): State<RateLimitGuard<S>>,
    req: Request,
    next: Next,
) -> Response
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let peer_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    let identity = ClientIdentity::from_headers(req.headers(), peer_ip, guard.trust_forwarded);
    let key = guard.key_for(&identity);

    match guard.store.check_and_increment(&key, &guard.config).await {
        Ok(RateLimitDecision::Unmetered) => next.run(req).await,
        Ok(RateLimitDecision::Allowed { remaining }) => {
            let mut response = next.run(req).await;
            let headers = response.headers_mut();
            headers.insert(
                "x-ratelimit-limit",
                HeaderValue::from(guard.config.max_requests),
            );
            headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
            response
        }
        Ok(RateLimitDecision::Limited { retry_after }) => {
            tracing::warn!(
                bucket = %guard.bucket,
                client = %identity,
                retry_after_secs = retry_after.as_secs_f64(),
                "Rate limit exceeded"
            );
            let secs = retry_after_secs(retry_after);
            let mut response = AppError::too_many_requests(format!(
                "Too many {} requests",
                guard.bucket
            ))
            .with_action(format!("Retry after {} seconds", secs))
            .into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
            response
        }
        Err(e) => {
            tracing::error!(bucket = %guard.bucket, error = %e, "Rate limit check failed");
            AppError::service_unavailable("Request throttling is unavailable")
                .with_action("Try again later")
                .into_response()
        }
    }
}

/// Whole seconds, rounded up, at least 1
fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after
        .as_secs()
        .saturating_add(u64::from(retry_after.subsec_nanos() > 0));
    secs.max(1)
}
