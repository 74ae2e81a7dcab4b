//! Application Configuration
//!
//! Merchant wallet addresses, loaded once at process start.

use platform::config::{self, ConfigSource, ProcessEnv};

use crate::domain::currency::Currency;
use crate::domain::wallet::WalletAddressEntry;

/// Immutable wallet configuration: one receiving address per currency
///
/// Values are taken verbatim from the source. Validation happens at lookup
/// time so an admin can still see what was filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    btc: WalletAddressEntry,
    eth: WalletAddressEntry,
    usdt: WalletAddressEntry,
    usdc: WalletAddressEntry,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self::new("", "", "", "")
    }
}

impl WalletConfig {
    pub fn new(
        btc: impl Into<String>,
        eth: impl Into<String>,
        usdt: impl Into<String>,
        usdc: impl Into<String>,
    ) -> Self {
        Self {
            btc: WalletAddressEntry::new(Currency::Btc, btc),
            eth: WalletAddressEntry::new(Currency::Eth, eth),
            usdt: WalletAddressEntry::new(Currency::Usdt, usdt),
            usdc: WalletAddressEntry::new(Currency::Usdc, usdc),
        }
    }

    /// Read `<CODE>_WALLET_ADDRESS` for every currency; unset keys are empty
    pub fn from_source(source: &impl ConfigSource) -> Self {
        let address = |currency: Currency| config::string(source, currency.config_key());
        Self::new(
            address(Currency::Btc),
            address(Currency::Eth),
            address(Currency::Usdt),
            address(Currency::Usdc),
        )
    }

    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_source(&ProcessEnv)
    }

    pub fn entry(&self, currency: Currency) -> &WalletAddressEntry {
        match currency {
            Currency::Btc => &self.btc,
            Currency::Eth => &self.eth,
            Currency::Usdt => &self.usdt,
            Currency::Usdc => &self.usdc,
        }
    }

    /// Entries in [`Currency::ALL`] order
    pub fn entries(&self) -> impl Iterator<Item = &WalletAddressEntry> + '_ {
        Currency::ALL
            .into_iter()
            .map(move |currency| self.entry(currency))
    }
}
