//! Wallet Address Entries
//!
//! One merchant receiving address per currency, plus the presentational
//! reports built from them.

use serde::Serialize;

use crate::domain::currency::Currency;
use crate::error::ConfigurationError;

/// Placeholder shown for an unset address
pub const NOT_CONFIGURED: &str = "Not configured";

const MASK_PREFIX_CHARS: usize = 6;
const MASK_SUFFIX_CHARS: usize = 4;

/// Receiving address for one currency, as loaded from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAddressEntry {
    pub currency: Currency,
    pub address: String,
}

impl WalletAddressEntry {
    pub fn new(currency: Currency, address: impl Into<String>) -> Self {
        Self {
            currency,
            address: address.into(),
        }
    }

    /// Something was filled in; the format is not checked
    #[inline]
    pub fn is_present(&self) -> bool {
        !self.address.is_empty()
    }

    /// Present and well-formed
    pub fn is_configured(&self) -> bool {
        self.validated().is_ok()
    }

    /// The address, if it is present and matches the currency's format
    pub fn validated(&self) -> Result<&str, ConfigurationError> {
        if !self.is_present() {
            return Err(ConfigurationError::Missing {
                currency: self.currency,
            });
        }

        if !self.currency.address_format().matches(&self.address) {
            return Err(ConfigurationError::InvalidFormat {
                currency: self.currency,
            });
        }

        Ok(&self.address)
    }

    /// First 6 and last 4 characters joined by `...`, or [`NOT_CONFIGURED`]
    pub fn masked(&self) -> String {
        if !self.is_present() {
            return NOT_CONFIGURED.to_string();
        }

        let chars: Vec<char> = self.address.chars().collect();
        let prefix: String = chars.iter().take(MASK_PREFIX_CHARS).collect();
        let suffix: String = chars[chars.len().saturating_sub(MASK_SUFFIX_CHARS)..]
            .iter()
            .collect();

        format!("{}...{}", prefix, suffix)
    }
}

/// Aggregate presence report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationStatus {
    /// No currency has an empty address
    pub configured: bool,
    /// Currencies with an empty address, in [`Currency::ALL`] order
    pub missing: Vec<Currency>,
}

/// Per-currency row for the admin dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDisplayStatus {
    pub currency: Currency,
    pub configured: bool,
    pub masked_address: String,
}

impl From<&WalletAddressEntry> for WalletDisplayStatus {
    fn from(entry: &WalletAddressEntry) -> Self {
        Self {
            currency: entry.currency,
            configured: entry.is_present(),
            masked_address: entry.masked(),
        }
    }
}
