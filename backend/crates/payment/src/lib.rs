//! Payment Backend Module
//!
//! Merchant wallet configuration for crypto checkout.
//!
//! Clean Architecture structure:
//! - `domain/` - Currencies, address formats, wallet entries
//! - `application/` - Wallet configuration and the registry
//! - `presentation/` - HTTP handlers
//!
//! ## Behavior
//! - Addresses are loaded once and never change for the life of the process
//! - An address is only handed out if it is present and well-formed
//! - Admin reports look at presence only and never reveal a full address

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::WalletConfig;
pub use application::wallet_registry::WalletRegistry;
pub use domain::currency::{AddressFormat, Currency};
pub use domain::wallet::{ConfigurationStatus, WalletAddressEntry, WalletDisplayStatus};
pub use error::{ConfigurationError, ConfigurationErrorKind, PaymentError, PaymentResult};
pub use presentation::router::payment_router;

#[cfg(test)]
mod tests;
