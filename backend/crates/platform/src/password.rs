//! Password Policy
//!
//! Structural password rules applied at account creation and password change.
//!
//! ## Behavior
//! - Every enabled rule is evaluated; no rule short-circuits another
//! - Failures are reported in a fixed order: length, uppercase, number,
//!   special character
//! - Validation never fails: it always returns a [`PasswordValidation`] the
//!   caller must inspect
//! - Length is counted in Unicode scalar values after NFC composition, so a
//!   decomposed accent counts once; compatibility forms are never expanded
//! - Character classes are checked on the password exactly as given

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Default minimum password length
pub const DEFAULT_MIN_LENGTH: usize = 8;

/// Characters that satisfy the special-character rule
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Process-wide default requirements
pub const DEFAULT_REQUIREMENTS: PasswordRequirements = PasswordRequirements {
    min_length: DEFAULT_MIN_LENGTH,
    require_uppercase: true,
    require_numbers: true,
    require_special_chars: true,
};

// ============================================================================
// Requirements / Options
// ============================================================================

/// Structural requirements a password must meet
///
/// Every field has a default, so a partial override is written with struct
/// update syntax or deserialized from a partial JSON object:
///
/// ```rust
/// use platform::password::PasswordRequirements;
///
/// let relaxed = PasswordRequirements {
///     require_special_chars: false,
///     ..PasswordRequirements::default()
/// };
/// assert_eq!(relaxed.min_length, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PasswordRequirements {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_numbers: bool,
    pub require_special_chars: bool,
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        DEFAULT_REQUIREMENTS
    }
}

/// Reserved validation switches
///
/// Accepted so callers can start passing them now. Neither key changes the
/// result yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationOptions {
    pub include_length: bool,
    pub verbose: bool,
}

// ============================================================================
// Result
// ============================================================================

/// Outcome of a password check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordValidation {
    /// `true` iff `errors` is empty
    pub is_valid: bool,
    /// One user-facing message per failed rule, in rule order
    pub errors: Vec<String>,
}

impl PasswordValidation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

// ============================================================================
// Rules
// ============================================================================

/// A single structural rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    MinLength(usize),
    Uppercase,
    Number,
    SpecialCharacter,
}

impl Rule {
    fn is_satisfied_by(&self, password: &str, length: usize) -> bool {
        match self {
            Rule::MinLength(min) => length >= *min,
            Rule::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            Rule::Number => password.chars().any(|c| c.is_ascii_digit()),
            Rule::SpecialCharacter => password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    fn message(&self) -> String {
        match self {
            Rule::MinLength(min) => format!("Password must be at least {} characters long", min),
            Rule::Uppercase => "Password must contain at least one uppercase letter".to_string(),
            Rule::Number => "Password must contain at least one number".to_string(),
            Rule::SpecialCharacter => {
                "Password must contain at least one special character".to_string()
            }
        }
    }
}

/// Enabled rules in reporting order
fn enabled_rules(requirements: &PasswordRequirements) -> Vec<Rule> {
    let mut rules = vec![Rule::MinLength(requirements.min_length)];
    if requirements.require_uppercase {
        rules.push(Rule::Uppercase);
    }
    if requirements.require_numbers {
        rules.push(Rule::Number);
    }
    if requirements.require_special_chars {
        rules.push(Rule::SpecialCharacter);
    }
    rules
}

/// Validate `password` against `requirements`
///
/// ## Arguments
/// * `password` - candidate password, may be empty
/// * `requirements` - rules to apply ([`DEFAULT_REQUIREMENTS`] for the defaults)
/// * `options` - reserved, currently ignored
pub fn validate(
    password: &str,
    requirements: &PasswordRequirements,
    _options: &ValidationOptions,
) -> PasswordValidation {
    let length = password.nfc().count();

    let errors = enabled_rules(requirements)
        .into_iter()
        .filter(|rule| !rule.is_satisfied_by(password, length))
        .map(|rule| rule.message())
        .collect();

    PasswordValidation::from_errors(errors)
}

/// [`validate`] with default requirements and options
pub fn validate_default(password: &str) -> PasswordValidation {
    validate(password, &DEFAULT_REQUIREMENTS, &ValidationOptions::default())
}

// ============================================================================
// Tests
// ============================================================================
