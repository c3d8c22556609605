use super::parse_bounded;
use super::Field;
use super::ValidationError;

/// Name of the applicant's previous company
#[derive(Debug, Clone)]
pub struct CompanyName(String);

impl CompanyName {
    pub const MIN: usize = 2;
    pub const MAX: usize = 200;

    pub fn parse(company: String) -> Result<Self, ValidationError> {
        parse_bounded(&company, Field::Company).map(Self)
    }
}

impl AsRef<str> for CompanyName {
    fn as_ref(&self) -> &str { &self.0 }
}
