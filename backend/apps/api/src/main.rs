//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors render through
//! `kernel::error::AppError` inside the service crates.

use account::{AccountConfig, account_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use payment::{WalletConfig, WalletRegistry, payment_router};
use platform::config::{self, ConfigSource, ProcessEnv};
use platform::rate_limit::{
    InMemoryRateLimitStore, RateLimitBucket, RateLimitStore, RateLimiter,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 31113;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const IDLE_BUCKET_SWEEP: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,payment=info,account=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Merchant wallets: a missing address only disables that currency
    let wallet_config = WalletConfig::from_env();
    report_wallet_status(&wallet_config);

    // Password policy: a malformed override is fatal
    let account_config = AccountConfig::from_env()?;
    tracing::info!(
        min_length = account_config.password_requirements.min_length,
        require_uppercase = account_config.password_requirements.require_uppercase,
        require_numbers = account_config.password_requirements.require_numbers,
        require_special_chars = account_config.password_requirements.require_special_chars,
        "Password policy loaded"
    );

    // Build router
    let app = if config::flag_or(&ProcessEnv, "RATE_LIMIT_ENFORCE", false)? {
        let limiter =
            RateLimiter::new(InMemoryRateLimitStore::new()).with_overrides_from(&ProcessEnv)?;
        tracing::info!(
            trust_forwarded = limiter.trusts_forwarded(),
            "Rate limit client identity source"
        );
        for bucket in RateLimitBucket::ALL {
            let limit = limiter.config_for(bucket);
            tracing::info!(
                bucket = %bucket,
                max_requests = limit.max_requests,
                window_secs = limit.window.as_secs(),
                "Rate limit enforced"
            );
        }
        spawn_idle_bucket_sweep(limiter.store().clone());
        build_app(wallet_config, account_config, &limiter)
    } else {
        tracing::info!("Rate limiting is not enforced");
        build_app(wallet_config, account_config, &RateLimiter::pass_through())
    };

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&ProcessEnv));

    // Start server
    let port = config::parse_or(&ProcessEnv, "API_PORT", DEFAULT_PORT)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Mount every service router under `/api`
fn build_app<S>(wallets: WalletConfig, account: AccountConfig, limiter: &RateLimiter<S>) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
{
    Router::new()
        .nest("/api/payment", payment_router(wallets, limiter))
        .nest("/api/account", account_router(account, limiter))
}

fn report_wallet_status(wallet_config: &WalletConfig) {
    let registry = WalletRegistry::new(Arc::new(wallet_config.clone()));
    let status = registry.configuration_status();

    for currency in &status.missing {
        tracing::warn!(
            currency = %currency,
            config_key = currency.config_key(),
            "Wallet address not configured"
        );
    }
    tracing::info!(
        configured = status.configured,
        missing = status.missing.len(),
        "Wallet configuration loaded"
    );
}

fn cors_layer(source: &impl ConfigSource) -> CorsLayer {
    let frontend_origins = source
        .get("FRONTEND_ORIGINS")
        .filter(|origins| !origins.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

/// Drop buckets that have refilled completely so memory tracks active clients
fn spawn_idle_bucket_sweep(store: Arc<InMemoryRateLimitStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(IDLE_BUCKET_SWEEP);
        loop {
            interval.tick().await;
            match store.purge_idle(Instant::now()) {
                Ok(0) => {}
                Ok(purged) => tracing::debug!(purged, "Idle rate limit buckets removed"),
                Err(e) => tracing::warn!(error = %e, "Idle rate limit sweep failed"),
            }
        }
    });
}
