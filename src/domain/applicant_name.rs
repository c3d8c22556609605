use super::parse_bounded;
use super::Field;
use super::ValidationError;

/// The applicant's name, trimmed, between `MIN` and `MAX` graphemes.
///
/// The field is left private, to prevent bypassing of `parse`, and mutation of
/// the value.
#[derive(Debug, Clone)]
pub struct ApplicantName(String);

impl ApplicantName {
    pub const MIN: usize = 2;
    pub const MAX: usize = 100;

    pub fn parse(name: String) -> Result<Self, ValidationError> {
        parse_bounded(&name, Field::Name).map(Self)
    }
}

impl AsRef<str> for ApplicantName {
    fn as_ref(&self) -> &str { &self.0 }
}
