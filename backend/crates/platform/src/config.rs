//! Configuration Sources
//!
//! Environment-style key/value configuration, read once at process start.
//! Crates build their own immutable config structs from a [`ConfigSource`]
//! so tests can inject a map instead of touching the process environment.

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Value is present but cannot be parsed into the expected type
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// A read-only key/value configuration source
pub trait ConfigSource {
    /// Raw value for `key`, `None` when unset
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment (after `.env` has been loaded by the binary)
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl ConfigSource for HashMap<&str, &str> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).map(|v| v.to_string())
    }
}

/// String value consumed verbatim; unset becomes the empty string.
pub fn string(source: &impl ConfigSource, key: &str) -> String {
    source.get(key).unwrap_or_default()
}

/// Parsed value, or `default` when unset or blank.
pub fn parse_or<T>(source: &impl ConfigSource, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match source.get(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(default),
    }
}

/// Boolean flag. Accepts `true/false`, `1/0`, `yes/no`, `on/off` (any case).
pub fn flag_or(source: &impl ConfigSource, key: &str, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = source.get(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
            reason: "expected a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_string_missing_is_empty() {
        let src = source(&[]);
        assert_eq!(string(&src, "BTC_WALLET_ADDRESS"), "");
    }

    #[test]
    fn test_string_is_verbatim() {
        let src = source(&[("KEY", "  padded  ")]);
        assert_eq!(string(&src, "KEY"), "  padded  ");
    }

    #[test]
    fn test_parse_or() {
        let src = source(&[("PORT", "8080"), ("BLANK", "  "), ("BAD", "eighty")]);
        assert_eq!(parse_or(&src, "PORT", 1u16), Ok(8080));
        assert_eq!(parse_or(&src, "BLANK", 1u16), Ok(1));
        assert_eq!(parse_or(&src, "UNSET", 1u16), Ok(1));
        assert!(matches!(
            parse_or(&src, "BAD", 1u16),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_flag_or() {
        let src = source(&[("A", "TRUE"), ("B", "0"), ("C", "maybe")]);
        assert_eq!(flag_or(&src, "A", false), Ok(true));
        assert_eq!(flag_or(&src, "B", true), Ok(false));
        assert_eq!(flag_or(&src, "UNSET", true), Ok(true));
        assert!(flag_or(&src, "C", true).is_err());
    }

    #[test]
    fn test_owned_map_source() {
        let mut map = HashMap::new();
        map.insert("KEY".to_string(), "value".to_string());
        assert_eq!(string(&map, "KEY"), "value");
    }
}
