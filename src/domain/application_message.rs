use super::parse_bounded;
use super::Field;
use super::ValidationError;

/// Free-form pitch. Surrounding whitespace is trimmed, but line breaks inside
/// the message are kept as submitted, since the operator email reproduces them.
#[derive(Debug, Clone)]
pub struct ApplicationMessage(String);

impl ApplicationMessage {
    pub const MIN: usize = 10;
    pub const MAX: usize = 2000;

    pub fn parse(message: String) -> Result<Self, ValidationError> {
        parse_bounded(&message, Field::Message).map(Self)
    }
}

impl AsRef<str> for ApplicationMessage {
    fn as_ref(&self) -> &str { &self.0 }
}
