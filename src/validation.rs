//! Input validation for identifiers, passwords and message bodies.
//!
//! Every check here runs before the store mutates anything, which is what keeps
//! registration and group creation all-or-nothing.

use crate::config::LimitsConfig;

/// Which kind of identifier failed validation; used only for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Username,
    GroupName,
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierKind::Username => write!(f, "Username"),
            IdentifierKind::GroupName => write!(f, "Group name"),
        }
    }
}

/// Validation errors with helpful messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{kind} cannot be empty")]
    Empty { kind: IdentifierKind },

    #[error("{kind} is too long (maximum {max} bytes)")]
    TooLong { kind: IdentifierKind, max: usize },

    #[error("{kind} cannot start or end with whitespace")]
    InvalidWhitespace { kind: IdentifierKind },

    #[error("{kind} contains control characters")]
    ControlCharacters { kind: IdentifierKind },

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Password is too long (maximum {max} bytes)")]
    PasswordTooLong { max: usize },

    #[error("Password contains control characters")]
    PasswordControlCharacters,

    #[error("Message is too long (maximum {max} bytes)")]
    MessageTooLong { max: usize },

    #[error("Message contains control characters")]
    MessageControlCharacters,
}

/// Validate a username or group name.
///
/// Identifiers double as cipher keys, so the empty string is never accepted.
pub fn validate_identifier(
    value: &str,
    kind: IdentifierKind,
    limits: &LimitsConfig,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { kind });
    }
    if value.len() > limits.max_identifier_bytes {
        return Err(ValidationError::TooLong {
            kind,
            max: limits.max_identifier_bytes,
        });
    }
    if value.trim() != value {
        return Err(ValidationError::InvalidWhitespace { kind });
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(ValidationError::ControlCharacters { kind });
    }
    Ok(())
}

pub fn validate_username(value: &str, limits: &LimitsConfig) -> Result<(), ValidationError> {
    validate_identifier(value, IdentifierKind::Username, limits)
}

pub fn validate_group_name(value: &str, limits: &LimitsConfig) -> Result<(), ValidationError> {
    validate_identifier(value, IdentifierKind::GroupName, limits)
}

/// Passwords share the identifier length limit but may contain any printable text.
pub fn validate_password(value: &str, limits: &LimitsConfig) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    if value.len() > limits.max_identifier_bytes {
        return Err(ValidationError::PasswordTooLong {
            max: limits.max_identifier_bytes,
        });
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(ValidationError::PasswordControlCharacters);
    }
    Ok(())
}

/// Message bodies may be empty; tabs are the only control character allowed.
pub fn validate_message_body(value: &str, limits: &LimitsConfig) -> Result<(), ValidationError> {
    if value.len() > limits.max_message_bytes {
        return Err(ValidationError::MessageTooLong {
            max: limits.max_message_bytes,
        });
    }
    if value.chars().any(|c| c.is_control() && c != '\t') {
        return Err(ValidationError::MessageControlCharacters);
    }
    Ok(())
}
