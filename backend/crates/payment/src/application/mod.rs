//! Application Layer - Use Cases
//!
//! Wallet configuration loading and the registry consulted by the payment
//! and admin surfaces.

pub mod config;
pub mod wallet_registry;
