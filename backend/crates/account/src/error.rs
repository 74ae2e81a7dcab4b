//! Account Error Types
//!
//! Start-up failures of the account service. A rejected password is a
//! [`platform::password::PasswordValidation`] value, not an error, so no
//! request handler returns this type.

use platform::config::ConfigError;
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Password policy settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
