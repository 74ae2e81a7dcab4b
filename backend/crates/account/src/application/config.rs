//! Application Configuration
//!
//! Password policy overrides for the account service.

use platform::config::{self, ConfigError, ConfigSource, ProcessEnv};
use platform::password::{DEFAULT_REQUIREMENTS, PasswordRequirements};

use crate::error::AccountResult;

pub const PASSWORD_MIN_LENGTH: &str = "PASSWORD_MIN_LENGTH";
pub const PASSWORD_REQUIRE_UPPERCASE: &str = "PASSWORD_REQUIRE_UPPERCASE";
pub const PASSWORD_REQUIRE_NUMBERS: &str = "PASSWORD_REQUIRE_NUMBERS";
pub const PASSWORD_REQUIRE_SPECIAL: &str = "PASSWORD_REQUIRE_SPECIAL";

/// Account application configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountConfig {
    /// Requirements applied when a password is set or changed
    pub password_requirements: PasswordRequirements,
}

impl AccountConfig {
    /// Build from `PASSWORD_*` keys; unset keys keep the platform defaults
    pub fn from_source(source: &impl ConfigSource) -> AccountResult<Self> {
        let min_length =
            config::parse_or(source, PASSWORD_MIN_LENGTH, DEFAULT_REQUIREMENTS.min_length)?;
        if min_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: PASSWORD_MIN_LENGTH.to_string(),
                value: min_length.to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        let password_requirements = PasswordRequirements {
            min_length,
            require_uppercase: config::flag_or(
                source,
                PASSWORD_REQUIRE_UPPERCASE,
                DEFAULT_REQUIREMENTS.require_uppercase,
            )?,
            require_numbers: config::flag_or(
                source,
                PASSWORD_REQUIRE_NUMBERS,
                DEFAULT_REQUIREMENTS.require_numbers,
            )?,
            require_special_chars: config::flag_or(
                source,
                PASSWORD_REQUIRE_SPECIAL,
                DEFAULT_REQUIREMENTS.require_special_chars,
            )?,
        };

        Ok(Self {
            password_requirements,
        })
    }

    /// Load from the process environment
    pub fn from_env() -> AccountResult<Self> {
        Self::from_source(&ProcessEnv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccountError;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let source: HashMap<&str, &str> = HashMap::new();
        let config = AccountConfig::from_source(&source).unwrap();
        assert_eq!(config.password_requirements, DEFAULT_REQUIREMENTS);
        assert_eq!(config, AccountConfig::default());
    }

    #[test]
    fn test_overrides() {
        let source = HashMap::from([
            (PASSWORD_MIN_LENGTH, "12"),
            (PASSWORD_REQUIRE_SPECIAL, "false"),
            (PASSWORD_REQUIRE_NUMBERS, "0"),
        ]);
        let requirements = AccountConfig::from_source(&source)
            .unwrap()
            .password_requirements;
        assert_eq!(requirements.min_length, 12);
        assert!(requirements.require_uppercase);
        assert!(!requirements.require_numbers);
        assert!(!requirements.require_special_chars);
    }

    #[test]
    fn test_zero_min_length_rejected() {
        let source = HashMap::from([(PASSWORD_MIN_LENGTH, "0")]);
        match AccountConfig::from_source(&source) {
            Err(AccountError::Config(ConfigError::InvalidValue { key, .. })) => {
                assert_eq!(key, PASSWORD_MIN_LENGTH)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_values_rejected() {
        let source = HashMap::from([(PASSWORD_MIN_LENGTH, "eight")]);
        assert!(AccountConfig::from_source(&source).is_err());

        let source = HashMap::from([(PASSWORD_REQUIRE_UPPERCASE, "maybe")]);
        assert!(AccountConfig::from_source(&source).is_err());
    }
}
