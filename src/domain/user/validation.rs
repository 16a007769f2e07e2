//! Declarative field validation for user payloads

use thiserror::Error;
use validator::ValidateEmail;

use super::entity::UserUpdate;

/// A single constraint applied to a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must be present and non-empty
    Required,
    /// Minimum length in characters
    MinChars(usize),
    /// Maximum length in characters
    MaxChars(usize),
    /// Value must be a syntactically valid email address
    Email,
}

/// Whether an absent field is an error or is skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// The rule set for one named field
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

pub const USERNAME_RULES: FieldRules = FieldRules {
    field: "Username",
    rules: &[Rule::Required, Rule::MinChars(3), Rule::MaxChars(20)],
};

pub const EMAIL_RULES: FieldRules = FieldRules {
    field: "Email",
    rules: &[Rule::Required, Rule::Email],
};

pub const PASSWORD_RULES: FieldRules = FieldRules {
    field: "Password",
    rules: &[Rule::Required, Rule::MinChars(8)],
};

/// A failed rule on a named field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} must not exceed {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be a valid email")]
    InvalidEmail { field: &'static str },
}

/// Every field that failed validation, in field order
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", self.message())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Human-readable message, one entry per failing field joined with "; "
    pub fn message(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl FieldRules {
    /// Check a value against this field's rules.
    ///
    /// Returns the first failing rule only. Optional fields that are absent
    /// or empty are not checked at all.
    pub fn check(&self, value: Option<&str>, presence: Presence) -> Option<FieldError> {
        let value = value.unwrap_or_default();

        if value.is_empty() && presence == Presence::Optional {
            return None;
        }

        self.rules.iter().find_map(|rule| self.apply(*rule, value))
    }

    fn apply(&self, rule: Rule, value: &str) -> Option<FieldError> {
        let field = self.field;

        match rule {
            Rule::Required if value.is_empty() => Some(FieldError::Required { field }),
            Rule::MinChars(min) if value.chars().count() < min => {
                Some(FieldError::TooShort { field, min })
            }
            Rule::MaxChars(max) if value.chars().count() > max => {
                Some(FieldError::TooLong { field, max })
            }
            Rule::Email if !value.validate_email() => Some(FieldError::InvalidEmail { field }),
            _ => None,
        }
    }
}

/// Stateless validator for user payloads
///
/// Constructed once at startup and shared by reference with the handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserValidator;

impl UserValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a registration payload; all three fields are required
    pub fn validate_new_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ValidationErrors> {
        collect([
            USERNAME_RULES.check(Some(username), Presence::Required),
            EMAIL_RULES.check(Some(email), Presence::Required),
            PASSWORD_RULES.check(Some(password), Presence::Required),
        ])
    }

    /// Validate a partial update; present fields must satisfy their rules
    pub fn validate_update(&self, update: &UserUpdate) -> Result<(), ValidationErrors> {
        collect([
            USERNAME_RULES.check(update.username.as_deref(), Presence::Optional),
            EMAIL_RULES.check(update.email.as_deref(), Presence::Optional),
        ])
    }
}

fn collect<const N: usize>(results: [Option<FieldError>; N]) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = results.into_iter().flatten().collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
