//! Presentation Layer
//!
//! HTTP handlers and DTOs for the account API.

pub mod dto;
pub mod handlers;
pub mod router;
