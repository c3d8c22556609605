use anyhow::Context;
use chrono::DateTime;
use chrono::Utc;
use htmlescape::encode_minimal;

use crate::domain::Application;
use crate::domain::EmailAddress;
use crate::email_client::EmailClient;
use crate::email_client::EmailMessage;

pub const CONFIRMATION_SUBJECT: &str = "Application Received - Second Chance VC";

/// Relays an accepted application: one email to the operator, one
/// acknowledgement to the applicant.
pub struct Notifier {
    email_client: EmailClient,
    operator: EmailAddress,
}

impl Notifier {
    pub fn new(
        email_client: EmailClient,
        operator: EmailAddress,
    ) -> Self {
        Self {
            email_client,
            operator,
        }
    }

    pub fn email_client(&self) -> &EmailClient { &self.email_client }

    /// The operator notification goes out first; if it fails, the applicant
    /// is not sent a confirmation. A failure of the confirmation itself still
    /// leaves the operator notified (delivery is not all-or-nothing).
    #[tracing::instrument(
        name = "Relaying application",
        skip_all,
        fields(applicant_email = %application.email)
    )]
    pub async fn notify(
        &self,
        application: &Application,
    ) -> Result<(), anyhow::Error> {
        let notification = operator_notification(application, &self.operator, Utc::now());
        self.email_client
            .send_email(&notification)
            .await
            .context("could not send operator notification")?;

        let confirmation = submitter_confirmation(application);
        self.email_client
            .send_email(&confirmation)
            .await
            .with_context(|| format!("could not send confirmation to {}", application.email))?;
        Ok(())
    }
}

/// Everything the applicant submitted, verbatim, plus when it arrived. Replying
/// to this email replies to the applicant.
pub fn operator_notification(
    application: &Application,
    operator: &EmailAddress,
    submitted_at: DateTime<Utc>,
) -> EmailMessage {
    let name = application.name.as_ref();
    let email = application.email.as_ref();
    let linkedin = application.linkedin.as_ref();
    let company = application.company.as_ref();
    let message = application.message.as_ref();
    let timestamp = submitted_at.format("%Y-%m-%d %H:%M:%S UTC");

    let text_body = format!(
        "New Application from Second Chance VC Website\n\n\
        Name: {name}\n\
        Email: {email}\n\
        LinkedIn: {linkedin}\n\
        Previous Company: {company}\n\
        Message:\n{message}\n\n\
        Sent from Second Chance VC website on {timestamp}"
    );

    // user input must be escaped before it is embedded in html
    let linkedin_html = encode_minimal(linkedin);
    let html_body = format!(
        r#"<h2>New Application from Second Chance VC Website</h2>
<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <p><strong>Name:</strong> {}</p>
  <p><strong>Email:</strong> {}</p>
  <p><strong>LinkedIn:</strong> <a href="{linkedin_html}" target="_blank">{linkedin_html}</a></p>
  <p><strong>Previous Company:</strong> {}</p>
  <p><strong>Message:</strong></p>
  <div style="background: #f5f5f5; padding: 15px; border-radius: 5px; margin: 10px 0;">{}</div>
  <hr>
  <p style="color: #666; font-size: 12px;">Sent from Second Chance VC website on {timestamp}</p>
</div>"#,
        encode_minimal(name),
        encode_minimal(email),
        encode_minimal(company),
        encode_minimal(message).replace('\n', "<br>"),
    );

    EmailMessage {
        recipient: operator.clone(),
        reply_to: Some(application.email.clone()),
        subject: format!("New Application: {name}"),
        html_body,
        text_body,
    }
}

/// Fixed acknowledgement, personalised with the applicant's name only
pub fn submitter_confirmation(application: &Application) -> EmailMessage {
    let name = application.name.as_ref();

    let text_body = format!(
        "Thank you for your application to Second Chance VC!\n\n\
        Dear {name},\n\n\
        We have received your application and are excited to learn more about your vision.\n\
        Our team will review your application and get back to you within 5-7 business days.\n\
        In the meantime, feel free to reach out if you have any questions.\n\n\
        Best regards,\n\
        The Second Chance VC Team\n\n\
        This is an automated message. Please do not reply to this email."
    );
    let html_body = format!(
        r#"<h2>Thank you for your application to Second Chance VC!</h2>
<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <p>Dear {},</p>
  <p>We have received your application and are excited to learn more about your vision.</p>
  <p>Our team will review your application and get back to you within 5-7 business days.</p>
  <p>In the meantime, feel free to reach out if you have any questions.</p>
  <br>
  <p>Best regards,<br>The Second Chance VC Team</p>
  <hr>
  <p style="color: #666; font-size: 12px;">This is an automated message. Please do not reply to this email.</p>
</div>"#,
        encode_minimal(name),
    );

    EmailMessage {
        recipient: application.email.clone(),
        reply_to: None,
        subject: CONFIRMATION_SUBJECT.to_string(),
        html_body,
        text_body,
    }
}
