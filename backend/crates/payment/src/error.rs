//! Payment Error Types
//!
//! Payment-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::currency::Currency;

/// Payment-specific result type alias
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Which way a wallet setting is broken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationErrorKind {
    Missing,
    InvalidFormat,
}

impl ConfigurationErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigurationErrorKind::Missing => "missing",
            ConfigurationErrorKind::InvalidFormat => "invalid-format",
        }
    }
}

/// A required wallet address is unusable
///
/// Static misconfiguration: never retried, always surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Address is empty or unset
    #[error("{currency} wallet address is not configured")]
    Missing { currency: Currency },

    /// Address is set but does not match the currency's format
    #[error("{currency} wallet address has an invalid format")]
    InvalidFormat { currency: Currency },
}

impl ConfigurationError {
    pub fn kind(&self) -> ConfigurationErrorKind {
        match self {
            ConfigurationError::Missing { .. } => ConfigurationErrorKind::Missing,
            ConfigurationError::InvalidFormat { .. } => ConfigurationErrorKind::InvalidFormat,
        }
    }

    pub fn currency(&self) -> Currency {
        match self {
            ConfigurationError::Missing { currency }
            | ConfigurationError::InvalidFormat { currency } => *currency,
        }
    }
}

/// Payment-specific error variants
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Merchant wallet configuration is unusable
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Currency code outside the supported set
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

impl PaymentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            PaymentError::UnsupportedCurrency(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::Configuration(_) => ErrorKind::ServiceUnavailable,
            PaymentError::UnsupportedCurrency(_) => ErrorKind::BadRequest,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            PaymentError::Configuration(e) => err.with_action(format!(
                "Set {} to a valid {} address and restart the service",
                e.currency().config_key(),
                e.currency()
            )),
            PaymentError::UnsupportedCurrency(_) => {
                err.with_action("Use one of BTC, ETH, USDT, USDC")
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PaymentError::Configuration(e) => {
                tracing::error!(
                    currency = %e.currency(),
                    kind = e.kind().as_str(),
                    config_key = e.currency().config_key(),
                    "Wallet configuration error"
                );
            }
            PaymentError::UnsupportedCurrency(code) => {
                tracing::debug!(code = %code, "Unsupported currency requested");
            }
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
