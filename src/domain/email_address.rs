use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use super::Field;
use super::ValidationError;

/// `local@domain.tld`: no whitespace, exactly one `@`, at least one dot after
/// it. Also rendered into the page, so the browser form checks the same shape
/// before submitting.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"));

/// This struct exists only for email parsing and can be used for applicants,
/// senders and the operator alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(email: String) -> Result<Self, ValidationError> {
        let email = email.trim().to_owned();
        if email.is_empty() {
            return Err(ValidationError::MissingField(Field::Email));
        }
        // the regex alone accepts e.g. `a@b..c`; `validator` rejects those
        (EMAIL_SHAPE.is_match(&email) && ValidateEmail::validate_email(&email))
            .then_some(Self(email))
            .ok_or(ValidationError::InvalidEmail)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str { &self.0 }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
