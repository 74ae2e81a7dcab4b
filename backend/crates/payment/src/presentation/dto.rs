//! API DTOs (Data Transfer Objects)

use serde::Serialize;

use crate::domain::currency::Currency;

/// Response for GET /api/payment/crypto/{currency}/address
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub currency: Currency,
    pub address: String,
}
