//! Payment Router

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use platform::rate_limit::{RateLimitBucket, RateLimitStore, RateLimiter, rate_limit};

use crate::application::config::WalletConfig;
use crate::application::wallet_registry::WalletRegistry;
use crate::presentation::handlers::{self, PaymentAppState};

/// Create the payment router
///
/// The checkout address lookup is throttled under the `payment` bucket. The
/// admin reports are not throttled and carry no authentication of their own;
/// mount them behind the host's admin guard.
pub fn payment_router<S>(config: WalletConfig, limiter: &RateLimiter<S>) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let state = PaymentAppState {
        registry: Arc::new(WalletRegistry::new(Arc::new(config))),
    };

    let checkout = Router::new()
        .route("/crypto/{currency}/address", get(handlers::get_address))
        .route_layer(from_fn_with_state(
            limiter.middleware_for(RateLimitBucket::Payment),
            rate_limit::<S>,
        ));

    let admin = Router::new()
        .route("/admin/wallets/status", get(handlers::wallet_status))
        .route("/admin/wallets", get(handlers::wallet_display));

    checkout.merge(admin).with_state(state)
}
