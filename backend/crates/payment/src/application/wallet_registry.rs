//! Wallet Registry
//!
//! Read-only lookups over [`WalletConfig`]. Presence checks and format checks
//! are kept apart: the admin reports only look at presence, the payment path
//! requires a well-formed address.

use std::sync::Arc;

use crate::application::config::WalletConfig;
use crate::domain::currency::Currency;
use crate::domain::wallet::{ConfigurationStatus, WalletDisplayStatus};
use crate::error::PaymentResult;

/// Merchant receiving addresses
#[derive(Debug, Clone)]
pub struct WalletRegistry {
    config: Arc<WalletConfig>,
}

impl WalletRegistry {
    pub fn new(config: Arc<WalletConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Validated receiving address for `currency`
    ///
    /// ## Errors
    /// * `ConfigurationError::Missing` - the address is empty
    /// * `ConfigurationError::InvalidFormat` - the address fails the currency's format rule
    pub fn get_address(&self, currency: Currency) -> PaymentResult<String> {
        let address = self.config.entry(currency).validated()?;
        tracing::debug!(currency = %currency, "Resolved wallet address");
        Ok(address.to_string())
    }

    /// Which currencies have no address at all
    ///
    /// Format validity is not considered.
    pub fn configuration_status(&self) -> ConfigurationStatus {
        let missing: Vec<Currency> = self
            .config
            .entries()
            .filter(|entry| !entry.is_present())
            .map(|entry| entry.currency)
            .collect();

        ConfigurationStatus {
            configured: missing.is_empty(),
            missing,
        }
    }

    /// One masked row per currency
    pub fn display_status(&self) -> Vec<WalletDisplayStatus> {
        self.config
            .entries()
            .map(WalletDisplayStatus::from)
            .collect()
    }
}
