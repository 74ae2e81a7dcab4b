//! Shared Kernel - Cross-crate error vocabulary
//!
//! Everything here is shared by the `payment` and `platform` crates and the
//! API binary:
//! - [`error::app_error::AppError`] and the [`error::app_error::AppResult`] alias
//! - [`error::kind::ErrorKind`], the HTTP-facing error classification
//! - With the `axum` feature, RFC 7807 problem details and an `IntoResponse`
//!   implementation

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
