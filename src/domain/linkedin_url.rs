use once_cell::sync::Lazy;
use regex::Regex;

use super::Field;
use super::ValidationError;

/// Personal profile pages only (`/in/<slug>`); company pages, posts and other
/// hosts are rejected. Valid as both a Rust and a JavaScript regex.
pub const PROFILE_URL_PATTERN: &str = r"^https?://(www\.)?linkedin\.com/in/[A-Za-z0-9-]+/?$";

static PROFILE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(PROFILE_URL_PATTERN).expect("valid linkedin regex"));

#[derive(Debug, Clone)]
pub struct LinkedInUrl(String);

impl LinkedInUrl {
    pub fn parse(url: String) -> Result<Self, ValidationError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingField(Field::Linkedin));
        }
        match PROFILE_URL.is_match(url) {
            true => Ok(Self(url.to_owned())),
            false => Err(ValidationError::InvalidLinkedIn),
        }
    }
}

impl AsRef<str> for LinkedInUrl {
    fn as_ref(&self) -> &str { &self.0 }
}
