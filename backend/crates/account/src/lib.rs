//! Account Backend Module
//!
//! Credential rules for account creation and password change.
//!
//! - `application/` - Policy configuration and the password check use case
//! - `presentation/` - HTTP handlers

pub mod application;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use presentation::router::account_router;
