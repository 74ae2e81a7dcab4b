//! Supported currencies and their address formats

use std::str::FromStr;
use std::sync::LazyLock;

use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PaymentError;

static BITCOIN_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(1|3|bc1)[a-zA-HJ-NP-Z0-9]{25,62}$").expect("bitcoin address pattern")
});

static EVM_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("evm address pattern"));

/// Cryptocurrency accepted for payments
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[display("BTC")]
    Btc,
    #[display("ETH")]
    Eth,
    #[display("USDT")]
    Usdt,
    #[display("USDC")]
    Usdc,
}

impl Currency {
    /// Every supported currency, in reporting order
    pub const ALL: [Currency; 4] = [Currency::Btc, Currency::Eth, Currency::Usdt, Currency::Usdc];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use Currency::*;
        match self {
            Btc => "BTC",
            Eth => "ETH",
            Usdt => "USDT",
            Usdc => "USDC",
        }
    }

    /// Configuration key holding the merchant's receiving address
    #[inline]
    pub const fn config_key(&self) -> &'static str {
        use Currency::*;
        match self {
            Btc => "BTC_WALLET_ADDRESS",
            Eth => "ETH_WALLET_ADDRESS",
            Usdt => "USDT_WALLET_ADDRESS",
            Usdc => "USDC_WALLET_ADDRESS",
        }
    }

    /// Address format rule for this currency
    ///
    /// USDT and USDC are received as ERC-20 tokens, so they share Ethereum's
    /// address format.
    #[inline]
    pub const fn address_format(&self) -> AddressFormat {
        use Currency::*;
        match self {
            Btc => AddressFormat::Bitcoin,
            Eth | Usdt | Usdc => AddressFormat::Evm,
        }
    }
}

impl FromStr for Currency {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| PaymentError::UnsupportedCurrency(s.to_string()))
    }
}

/// Receiving address syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFormat {
    /// Legacy (`1`), P2SH (`3`) or bech32 (`bc1`) prefix, then 25-62
    /// base58/bech32-safe characters
    Bitcoin,
    /// `0x` followed by exactly 40 hex digits
    Evm,
}

impl AddressFormat {
    pub fn matches(&self, address: &str) -> bool {
        match self {
            AddressFormat::Bitcoin => BITCOIN_ADDRESS.is_match(address),
            AddressFormat::Evm => EVM_ADDRESS.is_match(address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("btc".parse::<Currency>().unwrap(), Currency::Btc);
        assert_eq!("Eth".parse::<Currency>().unwrap(), Currency::Eth);
        assert_eq!("USDT".parse::<Currency>().unwrap(), Currency::Usdt);
        assert_eq!("usdc".parse::<Currency>().unwrap(), Currency::Usdc);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            "DOGE".parse::<Currency>(),
            Err(PaymentError::UnsupportedCurrency(code)) if code == "DOGE"
        ));
        assert!("".parse::<Currency>().is_err());
        assert!(" BTC".parse::<Currency>().is_err());
    }

    #[test]
    fn test_display_and_serde_use_codes() {
        for currency in Currency::ALL {
            assert_eq!(currency.to_string(), currency.code());
            assert_eq!(
                serde_json::to_value(currency).unwrap(),
                serde_json::json!(currency.code())
            );
        }
    }

    #[test]
    fn test_bitcoin_format() {
        let format = AddressFormat::Bitcoin;
        assert!(format.matches("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"));
        assert!(format.matches("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy"));
        assert!(format.matches("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"));

        // wrong prefix
        assert!(!format.matches("2A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"));
        // ambiguous characters
        assert!(!format.matches("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNO"));
        assert!(!format.matches("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNI"));
        // 1 + 24 characters
        assert!(!format.matches("1A1zP1eP5QGefi2DMPTfTL5SL"));
        // 1 + 63 characters
        assert!(!format.matches(&format!("1{}", "a".repeat(63))));
        assert!(format.matches(&format!("1{}", "a".repeat(62))));
        assert!(format.matches(&format!("1{}", "a".repeat(25))));
    }

    #[test]
    fn test_evm_format() {
        let format = AddressFormat::Evm;
        assert!(format.matches("0x1234567890abcdef1234567890abcdef12345678"));
        assert!(format.matches("0xABCDEF7890abcdef1234567890abcdef12345678"));

        // 39 and 41 hex digits
        assert!(!format.matches("0x1234567890abcdef1234567890abcdef1234567"));
        assert!(!format.matches("0x1234567890abcdef1234567890abcdef123456789"));
        assert!(!format.matches("1234567890abcdef1234567890abcdef12345678"));
        assert!(!format.matches("0x1234567890abcdef1234567890abcdef1234567g"));
    }

    #[test]
    fn test_rule_table() {
        assert_eq!(Currency::Btc.address_format(), AddressFormat::Bitcoin);
        assert_eq!(Currency::Eth.address_format(), AddressFormat::Evm);
        assert_eq!(Currency::Usdt.address_format(), AddressFormat::Evm);
        assert_eq!(Currency::Usdc.address_format(), AddressFormat::Evm);
    }
}
