//! API DTOs (Data Transfer Objects)

use platform::password::ValidationOptions;
use serde::Deserialize;

/// Request for POST /api/account/password/validate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePasswordRequest {
    pub password: String,
    #[serde(default)]
    pub options: ValidationOptions,
}

/// Response for POST /api/account/password/validate
pub use platform::password::PasswordValidation as ValidatePasswordResponse;
