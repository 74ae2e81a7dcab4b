//! Account Router

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use platform::rate_limit::{RateLimitBucket, RateLimitStore, RateLimiter, rate_limit};

use crate::application::config::AccountConfig;
use crate::presentation::handlers::{self, AccountAppState};

/// Create the account router; every route is throttled under the `auth` bucket
pub fn account_router<S>(config: AccountConfig, limiter: &RateLimiter<S>) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let state = AccountAppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/password/validate", post(handlers::validate_password))
        .route_layer(from_fn_with_state(
            limiter.middleware_for(RateLimitBucket::Auth),
            rate_limit::<S>,
        ))
        .with_state(state)
}
