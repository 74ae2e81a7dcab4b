//! Presentation Layer
//!
//! HTTP handlers and DTOs for the payment API.

pub mod dto;
pub mod handlers;
pub mod router;
