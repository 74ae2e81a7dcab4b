//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Environment-style configuration sources
//! - Password policy (structural rule validation)
//! - Rate limiting: bucket taxonomy, stores, and the axum interceptor
//! - Client identification for throttling keys
//! - Hashing helpers

pub mod client;
pub mod config;
pub mod crypto;
pub mod password;
pub mod rate_limit;
