mod application;
mod application_form;
mod application_message;
mod applicant_name;
mod company_name;
mod email_address;
mod linkedin_url;
// allow external `use` statements to skip `application_form` etc
pub use application::Application;
pub use application_form::validate;
pub use application_form::violations;
pub use application_form::ApplicationForm;
pub use application_message::ApplicationMessage;
pub use applicant_name::ApplicantName;
pub use company_name::CompanyName;
pub use email_address::EmailAddress;
pub use email_address::EMAIL_PATTERN;
pub use linkedin_url::LinkedInUrl;
pub use linkedin_url::PROFILE_URL_PATTERN;
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

/// The five inputs of the application form, in the order they are checked.
/// Serialises to the JSON key used by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Linkedin,
    Company,
    Message,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Linkedin,
        Field::Company,
        Field::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Linkedin => "linkedin",
            Field::Company => "company",
            Field::Message => "message",
        }
    }

    /// Inclusive grapheme bounds, for the free-text fields only
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match self {
            Field::Name => Some((ApplicantName::MIN, ApplicantName::MAX)),
            Field::Company => Some((CompanyName::MIN, CompanyName::MAX)),
            Field::Message => Some((ApplicationMessage::MIN, ApplicationMessage::MAX)),
            Field::Email | Field::Linkedin => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Linkedin => "LinkedIn URL",
            Field::Company => "Company name",
            Field::Message => "Message",
        }
    }

    fn bounds_message(&self) -> String {
        match self.bounds() {
            Some((min, max)) => format!("{} must be between {min} and {max} characters", self.label()),
            None => format!("{} has an invalid length", self.label()),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every way a submitted application can be rejected. The `Display` impl is
/// the (English) message returned to API clients; localized variants live in
/// `i18n`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    MissingField(Field),
    #[error("Valid email is required")]
    InvalidEmail,
    #[error("Valid LinkedIn URL is required")]
    InvalidLinkedIn,
    #[error("{}", .0.bounds_message())]
    OutOfBounds(Field),
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingField(field) | ValidationError::OutOfBounds(field) => *field,
            ValidationError::InvalidEmail => Field::Email,
            ValidationError::InvalidLinkedIn => Field::Linkedin,
        }
    }
}

/// Shared by the free-text fields: trim, reject empty input, then enforce
/// `min..=max` graphemes (not bytes, not chars).
fn parse_bounded(
    value: &str,
    field: Field,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    let (min, max) = field
        .bounds()
        .ok_or(ValidationError::OutOfBounds(field))?;
    let len = trimmed.graphemes(true).count();
    match (min..=max).contains(&len) {
        true => Ok(trimmed.to_owned()),
        false => Err(ValidationError::OutOfBounds(field)),
    }
}
