use super::ApplicantName;
use super::ApplicationForm;
use super::ApplicationMessage;
use super::CompanyName;
use super::EmailAddress;
use super::LinkedInUrl;
use super::ValidationError;

/// A fully parsed application. Only exists for the duration of one request;
/// nothing is persisted.
#[derive(Debug, Clone)]
pub struct Application {
    pub name: ApplicantName,
    pub email: EmailAddress,
    pub linkedin: LinkedInUrl,
    pub company: CompanyName,
    pub message: ApplicationMessage,
}

// parsing every field (instead of stopping at the first `?`) lets the endpoint
// report all violations at once
impl TryFrom<ApplicationForm> for Application {
    type Error = Vec<ValidationError>;
    fn try_from(form: ApplicationForm) -> Result<Self, Self::Error> {
        let name = ApplicantName::parse(form.name);
        let email = EmailAddress::parse(form.email);
        let linkedin = LinkedInUrl::parse(form.linkedin);
        let company = CompanyName::parse(form.company);
        let message = ApplicationMessage::parse(form.message);

        match (name, email, linkedin, company, message) {
            (Ok(name), Ok(email), Ok(linkedin), Ok(company), Ok(message)) => Ok(Self {
                name,
                email,
                linkedin,
                company,
                message,
            }),
            (name, email, linkedin, company, message) => Err([
                name.err(),
                email.err(),
                linkedin.err(),
                company.err(),
                message.err(),
            ]
            .into_iter()
            .flatten()
            .collect()),
        }
    }
}
