//! Router tests for the payment crate

#[cfg(test)]
mod router_tests {
    use crate::application::config::WalletConfig;
    use crate::presentation::router::payment_router;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use platform::rate_limit::{InMemoryRateLimitStore, RateLimitBucket, RateLimitConfig, RateLimiter};
    use serde_json::Value;
    use tower::ServiceExt;

    const BTC: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
    const ETH: &str = "0x1234567890abcdef1234567890abcdef12345678";

    fn app(config: WalletConfig) -> Router {
        payment_router(config, &RateLimiter::pass_through())
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_address_returned_for_valid_config() {
        let app = app(WalletConfig::new(BTC, ETH, ETH, ETH));

        let (status, body) = get(app.clone(), "/crypto/BTC/address").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currency"], "BTC");
        assert_eq!(body["address"], BTC);

        let (status, body) = get(app, "/crypto/usdc/address").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currency"], "USDC");
        assert_eq!(body["address"], ETH);
    }

    #[tokio::test]
    async fn test_missing_address_is_service_unavailable() {
        let (status, body) = get(app(WalletConfig::default()), "/crypto/ETH/address").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], 503);
        assert_eq!(body["detail"], "ETH wallet address is not configured");
    }

    #[tokio::test]
    async fn test_malformed_address_is_service_unavailable() {
        let short = &ETH[..ETH.len() - 1];
        let (status, body) = get(app(WalletConfig::new(BTC, short, ETH, ETH)), "/crypto/ETH/address").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["detail"], "ETH wallet address has an invalid format");
    }

    #[tokio::test]
    async fn test_unsupported_currency_is_bad_request() {
        let (status, body) = get(app(WalletConfig::new(BTC, ETH, ETH, ETH)), "/crypto/DOGE/address").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Unsupported currency: DOGE");
    }

    #[tokio::test]
    async fn test_wallet_status_reports_missing() {
        let (status, body) = get(app(WalletConfig::new(BTC, "", ETH, "")), "/admin/wallets/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["configured"], false);
        assert_eq!(body["missing"], serde_json::json!(["ETH", "USDC"]));
    }

    #[tokio::test]
    async fn test_wallet_status_all_configured() {
        let (status, body) = get(app(WalletConfig::new(BTC, ETH, ETH, ETH)), "/admin/wallets/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["configured"], true);
        assert_eq!(body["missing"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_wallet_display_masks_addresses() {
        let (status, body) = get(app(WalletConfig::new("", ETH, "", "")), "/admin/wallets").await;
        assert_eq!(status, StatusCode::OK);

        let wallets = body.as_array().unwrap();
        assert_eq!(wallets.len(), 4);
        assert_eq!(wallets[0]["currency"], "BTC");
        assert_eq!(wallets[0]["configured"], false);
        assert_eq!(wallets[0]["maskedAddress"], "Not configured");
        assert_eq!(wallets[1]["currency"], "ETH");
        assert_eq!(wallets[1]["configured"], true);
        assert_eq!(wallets[1]["maskedAddress"], "0x1234...5678");

        assert!(!body.to_string().contains(ETH));
    }

    #[tokio::test]
    async fn test_address_lookup_is_throttled_when_enforced() {
        let limiter = RateLimiter::new(InMemoryRateLimitStore::new())
            .with_config(RateLimitBucket::Payment, RateLimitConfig::new(1, 60));
        let app = payment_router(WalletConfig::new(BTC, ETH, ETH, ETH), &limiter);

        let (status, _) = get(app.clone(), "/crypto/BTC/address").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = get(app.clone(), "/crypto/BTC/address").await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

        // admin reports are outside the payment bucket
        let (status, _) = get(app, "/admin/wallets/status").await;
        assert_eq!(status, StatusCode::OK);
    }
}
