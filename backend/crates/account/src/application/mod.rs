//! Application Layer
//!
//! Use cases for account credentials.

pub mod check_password;
pub mod config;
