//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - The closed set of supported currencies and their address format rules
//! - Wallet address entries and the reports built from them

pub mod currency;
pub mod wallet;
