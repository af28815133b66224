use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::SanitizedInput;

/// Dot-atom local part, then a dotted hostname whose labels are alphanumeric
/// with inner hyphens.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+",
        r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    ))
    .expect("email regex is valid")
});

const MAX_ADDRESS_LEN: usize = 320;
const MAX_LOCAL_PART_LEN: usize = 64;

/// One failed validation rule. `Display` is the message shown to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required.")]
    NameRequired,
    #[error("Email is required.")]
    EmailRequired,
    #[error("Invalid email format.")]
    InvalidEmail,
    #[error("Message is required.")]
    MessageRequired,
}

/// Every rule violation found in a submission, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// The visitor-facing messages, in display order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }
}

/// Runs every rule against `input` and collects all violations.
///
/// Only the two email rules are exclusive: a malformed address is reported
/// solely when one was given.
pub fn validate(input: &SanitizedInput) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if is_blank(&input.name) {
        errors.push(ValidationError::NameRequired);
    }
    if is_blank(&input.email) {
        errors.push(ValidationError::EmailRequired);
    } else if !is_valid_email(&input.email) {
        errors.push(ValidationError::InvalidEmail);
    }
    if is_blank(&input.message) {
        errors.push(ValidationError::MessageRequired);
    }

    errors
}

/// A field counts as missing when it is empty or exactly `"0"`.
fn is_blank(value: &str) -> bool {
    value.is_empty() || value == "0"
}

/// Whether `email` is a well-formed `local@host.tld` address.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_ADDRESS_LEN {
        return false;
    }
    let Some((local, _)) = email.rsplit_once('@') else {
        return false;
    };
    local.len() <= MAX_LOCAL_PART_LEN && EMAIL_REGEX.is_match(email)
}
