//! Programmatic counterpart of the application form on the entry page:
//! validates locally, sends one request, and reports the result in the
//! current language.

use reqwest::StatusCode;
use tokio::sync::watch;

use crate::domain::validate;
use crate::domain::ApplicationForm;
use crate::i18n::Language;
use crate::i18n::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    /// A request is in flight; the submit control is disabled
    Submitting,
}

impl FormState {
    pub fn submit_label(
        &self,
        lang: Language,
    ) -> &'static str {
        match self {
            FormState::Idle => Notice::Submit.text(lang),
            FormState::Submitting => Notice::Sending.text(lang),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    /// Local validation failed; nothing was sent
    Rejected(Notice),
    /// Accepted by the server; the form was cleared
    Success(Notice),
    /// Not accepted, or no response; the form keeps its values
    Failed(Notice),
}

impl FormOutcome {
    pub fn notice(&self) -> Notice {
        match self {
            FormOutcome::Rejected(n) | FormOutcome::Success(n) | FormOutcome::Failed(n) => *n,
        }
    }
}

pub struct ContactForm {
    api_client: reqwest::Client,
    endpoint: String,
    language: Language,
    values: ApplicationForm,
    state: watch::Sender<FormState>,
}

impl ContactForm {
    /// `base_url` is the site root, e.g. `http://127.0.0.1:8000`
    pub fn new(
        base_url: &str,
        language: Language,
    ) -> Self {
        Self {
            api_client: reqwest::Client::new(),
            endpoint: format!("{}/api/contact", base_url.trim_end_matches('/')),
            language,
            values: ApplicationForm::default(),
            state: watch::channel(FormState::Idle).0,
        }
    }

    pub fn fill(
        &mut self,
        values: ApplicationForm,
    ) {
        self.values = values;
    }

    pub fn values(&self) -> &ApplicationForm { &self.values }

    /// Applies to every notice produced from now on
    pub fn set_language(
        &mut self,
        language: Language,
    ) {
        self.language = language;
    }

    pub fn language(&self) -> Language { self.language }

    pub fn state(&self) -> FormState { *self.state.borrow() }

    /// Observe state transitions, e.g. to render the submit control while a
    /// request is in flight
    pub fn watch_state(&self) -> watch::Receiver<FormState> { self.state.subscribe() }

    pub fn submit_label(&self) -> &'static str { self.state().submit_label(self.language) }

    /// `Idle -> Submitting -> Idle`, with exactly one request in between. There
    /// is no timeout, retry or cancellation.
    ///
    /// Taking `&mut self` means a second submit cannot start while one is in
    /// flight.
    #[tracing::instrument(
        name = "Submitting application form",
        skip(self),
        fields(language = %self.language)
    )]
    pub async fn submit(&mut self) -> FormOutcome {
        if let Err(e) = validate(&self.values) {
            tracing::debug!(field = %e.field(), "application rejected locally");
            return FormOutcome::Rejected(Notice::from(&e));
        }

        self.state.send_replace(FormState::Submitting);
        let outcome = match self.send().await {
            Ok(status) if status.is_success() => {
                self.values = ApplicationForm::default();
                FormOutcome::Success(Notice::Success)
            }
            Ok(StatusCode::TOO_MANY_REQUESTS) => FormOutcome::Failed(Notice::RateLimited),
            Ok(status) => {
                tracing::warn!(%status, "application not accepted");
                FormOutcome::Failed(Notice::Failure)
            }
            Err(e) => {
                tracing::warn!(error.message = %e, "could not reach server");
                FormOutcome::Failed(Notice::Failure)
            }
        };
        self.state.send_replace(FormState::Idle);
        outcome
    }

    async fn send(&self) -> Result<StatusCode, reqwest::Error> {
        let resp = self
            .api_client
            .post(&self.endpoint)
            .json(&self.values)
            .send()
            .await?;
        Ok(resp.status())
    }
}
