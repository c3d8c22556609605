use std::time::Duration;

use reqwest::Client;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::EmailAddress;

/// How outgoing mail actually leaves the process. Chosen per environment in
/// `configuration/{env}.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailTransport {
    /// JSON API of the transactional email provider (Postmark-style)
    Api,
    /// Development only: the message is logged, not sent
    Log,
}

/// A single composed email, independent of the transport used to send it
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub recipient: EmailAddress,
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

#[derive(Debug)]
pub struct EmailClient {
    http_client: Client,
    transport: EmailTransport,
    base_url: String,
    sender: EmailAddress,
    authorization_token: Secret<String>,
}

// establishing a HTTP connection is expensive, so a single `Client` is kept
// for the lifetime of the app and reused for every message
impl EmailClient {
    pub fn new(
        transport: EmailTransport,
        base_url: String,
        sender: EmailAddress,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        // only fails if the TLS backend cannot be initialised
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            transport,
            base_url,
            sender,
            authorization_token,
        })
    }

    pub fn transport(&self) -> EmailTransport { self.transport }

    pub fn sender(&self) -> &EmailAddress { &self.sender }

    /// Send one message. Non-2xx responses from the provider are errors; there
    /// is no retry.
    #[tracing::instrument(
        name = "Sending email",
        skip_all,
        fields(
            recipient = %message.recipient,
            subject = %message.subject,
        )
    )]
    pub async fn send_email(
        &self,
        message: &EmailMessage,
    ) -> Result<(), reqwest::Error> {
        match self.transport {
            EmailTransport::Log => {
                tracing::info!(
                    reply_to = ?message.reply_to,
                    text_body = %message.text_body,
                    "email not sent (log transport)"
                );
                Ok(())
            }
            EmailTransport::Api => self.post_to_provider(message).await,
        }
    }

    async fn post_to_provider(
        &self,
        message: &EmailMessage,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/email", self.base_url);
        let body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: message.recipient.as_ref(),
            reply_to: message.reply_to.as_ref().map(|r| r.as_ref()),
            subject: &message.subject,
            html_body: &message.html_body,
            text_body: &message.text_body,
        };
        self.http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Request body expected by the provider; keys are PascalCase
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}
