//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use crate::application::wallet_registry::WalletRegistry;
use crate::domain::currency::Currency;
use crate::domain::wallet::{ConfigurationStatus, WalletDisplayStatus};
use crate::error::PaymentResult;
use crate::presentation::dto::AddressResponse;

/// Shared state for payment handlers
#[derive(Clone)]
pub struct PaymentAppState {
    pub registry: Arc<WalletRegistry>,
}

/// GET /api/payment/crypto/{currency}/address
pub async fn get_address(
    State(state): State<PaymentAppState>,
    Path(currency): Path<String>,
) -> PaymentResult<Json<AddressResponse>> {
    let currency: Currency = currency.parse()?;
    let address = state.registry.get_address(currency)?;

    Ok(Json(AddressResponse { currency, address }))
}

/// GET /api/payment/admin/wallets/status
pub async fn wallet_status(State(state): State<PaymentAppState>) -> Json<ConfigurationStatus> {
    Json(state.registry.configuration_status())
}

/// GET /api/payment/admin/wallets
pub async fn wallet_display(State(state): State<PaymentAppState>) -> Json<Vec<WalletDisplayStatus>> {
    Json(state.registry.display_status())
}
