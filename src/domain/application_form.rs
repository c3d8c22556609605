use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

use super::Application;
use super::ApplicantName;
use super::ApplicationMessage;
use super::CompanyName;
use super::EmailAddress;
use super::Field;
use super::LinkedInUrl;
use super::ValidationError;

/// Raw form values, exactly as typed by the applicant.
///
/// Absent keys, `null`s, arrays and objects all deserialize to empty strings,
/// so that each is reported as `MissingField` on its own field (like an empty
/// input) instead of failing JSON extraction for the whole body. Numbers and
/// booleans are taken as their text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationForm {
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(deserialize_with = "lenient_text")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient_text")]
    pub company: String,
    #[serde(deserialize_with = "lenient_text")]
    pub message: String,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

impl ApplicationForm {
    pub fn value(
        &self,
        field: Field,
    ) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Linkedin => &self.linkedin,
            Field::Company => &self.company,
            Field::Message => &self.message,
        }
    }

    fn first_missing(&self) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|f| self.value(*f).trim().is_empty())
    }
}

/// Fail-fast check, reporting only the first violation. Rules are applied in a
/// fixed order:
///
/// 1. all five fields present
/// 2. email shape
/// 3. LinkedIn profile URL
/// 4. length bounds of name, company and message
///
/// This is what the form client runs before sending anything.
pub fn validate(form: &ApplicationForm) -> Result<(), ValidationError> {
    if let Some(field) = form.first_missing() {
        return Err(ValidationError::MissingField(field));
    }
    EmailAddress::parse(form.email.clone())?;
    LinkedInUrl::parse(form.linkedin.clone())?;
    ApplicantName::parse(form.name.clone())?;
    CompanyName::parse(form.company.clone())?;
    ApplicationMessage::parse(form.message.clone())?;
    Ok(())
}

/// Every violated field, at most one error per field, in field order. Empty
/// iff `validate` passes.
pub fn violations(form: &ApplicationForm) -> Vec<ValidationError> {
    Application::try_from(form.clone())
        .err()
        .unwrap_or_default()
}
