// SPDX-License-Identifier: MPL-2.0
//! Input validation for user payloads.
//!
//! Every field is trimmed before its length is checked, and emails are
//! lowercased. Validation collects all field errors instead of stopping at
//! the first one.

use super::{CreateUserInput, UpdateUserInput};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 500;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A registration that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// An update that passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl UserChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

fn check_name(raw: &str, errors: &mut Vec<FieldError>) -> String {
    let name = raw.trim();
    let len = name.chars().count();
    if len < NAME_MIN_CHARS {
        errors.push(FieldError::new(
            "name",
            format!("Name must be at least {NAME_MIN_CHARS} characters"),
        ));
    } else if len > NAME_MAX_CHARS {
        errors.push(FieldError::new(
            "name",
            format!("Name must be at most {NAME_MAX_CHARS} characters"),
        ));
    }
    name.to_string()
}

fn check_email(raw: &str, errors: &mut Vec<FieldError>) -> String {
    let email = normalize_email(raw);
    if !is_valid_email(&email) {
        errors.push(FieldError::new("email", "Please enter a valid email address"));
    }
    email
}

fn check_message(raw: &str, errors: &mut Vec<FieldError>) -> String {
    let message = raw.trim();
    let len = message.chars().count();
    if len < MESSAGE_MIN_CHARS {
        errors.push(FieldError::new(
            "message",
            format!("Message must be at least {MESSAGE_MIN_CHARS} characters"),
        ));
    } else if len > MESSAGE_MAX_CHARS {
        errors.push(FieldError::new(
            "message",
            format!("Message must be at most {MESSAGE_MAX_CHARS} characters"),
        ));
    }
    message.to_string()
}

/// Validates and normalizes a registration.
pub fn validate_create(input: &CreateUserInput) -> Result<NewUser, Vec<FieldError>> {
    let mut errors = Vec::new();
    let user = NewUser {
        name: check_name(&input.name, &mut errors),
        email: check_email(&input.email, &mut errors),
        message: check_message(&input.message, &mut errors),
    };
    if errors.is_empty() {
        Ok(user)
    } else {
        Err(errors)
    }
}

/// Validates the fields present in an update.
pub fn validate_update(input: &UpdateUserInput) -> Result<UserChanges, Vec<FieldError>> {
    let mut errors = Vec::new();
    let changes = UserChanges {
        name: input.name.as_deref().map(|n| check_name(n, &mut errors)),
        email: input.email.as_deref().map(|e| check_email(e, &mut errors)),
        message: input.message.as_deref().map(|m| check_message(m, &mut errors)),
    };
    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}

/// Trims a user id, rejecting blank ones.
pub fn validate_user_id(raw: &str) -> Result<&str, FieldError> {
    let id = raw.trim();
    if id.is_empty() {
        Err(FieldError::new("id", "User id must not be empty"))
    } else {
        Ok(id)
    }
}

/// Canonical form used for storage and lookups.
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Checks the usual `local@domain.tld` shape.
///
/// The local part may hold letters, digits and `_ ' + - .`, must not start
/// or end with a dot, and must not contain `..`. The domain needs at least
/// two labels of letters, digits and hyphens, and an alphabetic TLD of two
/// or more characters.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_'+-.".contains(c));
    if !local_ok {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        label
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric())
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels_ok && tld_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, message: &str) -> CreateUserInput {
        CreateUserInput {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn valid_input_is_normalized() {
        let user = validate_create(&input("  Ann Lee ", " Ann@Example.COM ", "  Happy to join!  "))
            .expect("valid input");
        assert_eq!(user.name, "Ann Lee");
        assert_eq!(user.email, "ann@example.com");
        assert_eq!(user.message, "Happy to join!");
    }

    #[test]
    fn all_field_errors_are_reported() {
        let errors = validate_create(&input("A", "nope", "short")).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "message"]);
    }

    #[test]
    fn lengths_are_checked_after_trimming() {
        let errors = validate_create(&input(" A ", "a@b.co", "     123456789     ")).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let name = "x".repeat(NAME_MAX_CHARS);
        let message = "y".repeat(MESSAGE_MAX_CHARS);
        assert!(validate_create(&input(&name, "a@b.co", &message)).is_ok());

        let long_name = "x".repeat(NAME_MAX_CHARS + 1);
        let errors = validate_create(&input(&long_name, "a@b.co", &message)).unwrap_err();
        assert_eq!(errors[0].message, "Name must be at most 50 characters");
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        assert!(validate_create(&input("李雷", "li@lei.cn", "很高兴参加这次活动！！")).is_ok());
    }

    #[test]
    fn update_validates_only_present_fields() {
        let changes = validate_update(&UpdateUserInput {
            email: Some(" New@Mail.io".into()),
            ..Default::default()
        })
        .expect("valid update");
        assert_eq!(changes.email.as_deref(), Some("new@mail.io"));
        assert!(changes.name.is_none());

        let errors = validate_update(&UpdateUserInput {
            name: Some("x".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(validate_update(&UpdateUserInput::default()).unwrap().is_empty());
    }

    #[test]
    fn blank_user_id_is_rejected() {
        assert_eq!(validate_user_id("  abc "), Ok("abc"));
        assert!(validate_user_id("   ").is_err());
    }

    #[test]
    fn email_shapes() {
        for ok in ["a@b.co", "first.last+tag@sub.example.org", "o'neil@x-y.io"] {
            assert!(is_valid_email(ok), "{ok} should be valid");
        }
        for bad in [
            "", "plain", "@x.io", "a@", "a@b", "a@b.c", ".a@b.co", "a.@b.co", "a..b@c.io",
            "a b@c.io", "a@-b.io", "a@b..io", "a@b.c0m", "a@@b.io",
        ] {
            assert!(!is_valid_email(bad), "{bad} should be invalid");
        }
    }
}
