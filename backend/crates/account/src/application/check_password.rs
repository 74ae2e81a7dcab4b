//! Check Password Use Case
//!
//! Evaluates a candidate password against the configured requirements.

use std::sync::Arc;

use platform::password::{self, PasswordValidation, ValidationOptions};

use crate::application::config::AccountConfig;

/// Input for a password check
#[derive(Debug, Clone, Default)]
pub struct CheckPasswordInput {
    pub password: String,
    pub options: ValidationOptions,
}

/// Check password use case
pub struct CheckPasswordUseCase {
    config: Arc<AccountConfig>,
}

impl CheckPasswordUseCase {
    pub fn new(config: Arc<AccountConfig>) -> Self {
        Self { config }
    }

    /// Never fails; the caller inspects `is_valid`
    pub fn execute(&self, input: CheckPasswordInput) -> PasswordValidation {
        let result = password::validate(
            &input.password,
            &self.config.password_requirements,
            &input.options,
        );

        // The candidate itself is never logged
        tracing::debug!(
            is_valid = result.is_valid,
            failed_rules = result.errors.len(),
            "Password checked"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::PasswordRequirements;

    fn use_case(requirements: PasswordRequirements) -> CheckPasswordUseCase {
        CheckPasswordUseCase::new(Arc::new(AccountConfig {
            password_requirements: requirements,
        }))
    }

    fn input(password: &str) -> CheckPasswordInput {
        CheckPasswordInput {
            password: password.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_requirements() {
        let use_case = use_case(PasswordRequirements::default());

        let result = use_case.execute(input("Abcdef1!"));
        assert!(result.is_valid);

        let result = use_case.execute(input("abcdefgh"));
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Password must contain at least one uppercase letter",
                "Password must contain at least one number",
                "Password must contain at least one special character",
            ]
        );
    }

    #[test]
    fn test_configured_requirements_are_applied() {
        let use_case = use_case(PasswordRequirements {
            min_length: 4,
            require_uppercase: false,
            require_numbers: false,
            require_special_chars: false,
        });
        assert!(use_case.execute(input("abcd")).is_valid);
        assert_eq!(
            use_case.execute(input("abc")).errors,
            vec!["Password must be at least 4 characters long"]
        );
    }

    #[test]
    fn test_options_do_not_change_result() {
        let use_case = use_case(PasswordRequirements::default());
        let plain = use_case.execute(input("short"));
        let verbose = use_case.execute(CheckPasswordInput {
            password: "short".to_string(),
            options: ValidationOptions {
                include_length: true,
                verbose: true,
            },
        });
        assert_eq!(plain, verbose);
    }
}
