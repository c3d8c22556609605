use std::fmt::Debug;

use actix_web::error::InternalError;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use serde::Serialize;
use serde_json::json;

use super::error_chain_fmt;
use crate::domain::Application;
use crate::domain::ApplicationForm;
use crate::domain::Field;
use crate::domain::ValidationError;
use crate::notifier::Notifier;

const ACCEPTED: &str = "Application submitted successfully!";
const VALIDATION_FAILED: &str = "Validation failed";
const SEND_FAILED: &str = "Failed to send application. Please try again later.";
const TOO_MANY_REQUESTS: &str = "Too many requests from this IP, please try again later.";

/// Everything that can go wrong between receiving an application and
/// relaying it. None of the internal causes are ever shown to the client;
/// they are only logged.
#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Validation failed")]
    ValidationFailed(Vec<ValidationError>),
    #[error("Too many requests")]
    RateLimited,
    #[error("Failed to relay application")]
    DispatchFailed(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedFailure(#[from] anyhow::Error),
}

impl Debug for ContactError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// One violated field in a `400` response
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl From<&ValidationError> for FieldError {
    fn from(e: &ValidationError) -> Self {
        Self {
            field: e.field(),
            message: e.to_string(),
        }
    }
}

/// Body of every `/api/contact` response except `429`
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ContactResponse {
    fn accepted() -> Self {
        Self {
            success: true,
            message: ACCEPTED,
            errors: None,
        }
    }

    fn rejected(errors: &[ValidationError]) -> Self {
        Self {
            success: false,
            message: VALIDATION_FAILED,
            errors: Some(errors.iter().map(FieldError::from).collect()),
        }
    }

    fn failed() -> Self {
        Self {
            success: false,
            message: SEND_FAILED,
            errors: None,
        }
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::DispatchFailed(_) | Self::UnexpectedFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut resp = HttpResponse::build(self.status_code());
        match self {
            Self::ValidationFailed(errors) => resp.json(ContactResponse::rejected(errors)),
            Self::RateLimited => resp.json(json!({ "error": TOO_MANY_REQUESTS })),
            Self::DispatchFailed(_) | Self::UnexpectedFailure(_) => {
                resp.json(ContactResponse::failed())
            }
        }
    }
}

/// Bodies that are not valid JSON (or not an object) still get the usual
/// `400` envelope, with no per-field errors
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        tracing::warn!(error.message = %err, "rejected malformed application payload");
        let resp = HttpResponse::BadRequest().json(ContactResponse::rejected(&[]));
        InternalError::from_response(err, resp).into()
    })
}

/// `POST /api/contact`
///
/// 1. (rate limit, see `limit_by_client_address`)
/// 2. parse every field; any violation is a `400` listing all of them
/// 3. relay as two emails; any send failure is a `500`
///
/// # Request example
///
/// ```sh
///     curl -v --json '{"name":"Ana Gomez","email":"ana@example.com","linkedin":"https://linkedin.com/in/anagomez","company":"Acme","message":"I have ten years of experience."}' http://127.0.0.1:8000/api/contact
/// ```
#[tracing::instrument(
    name = "Submitting application",
    skip(form, notifier),
    fields(
        applicant_name = %form.name,
        applicant_email = %form.email,
    )
)]
pub async fn contact(
    form: web::Json<ApplicationForm>,
    notifier: web::Data<Notifier>,
) -> Result<HttpResponse, ContactError> {
    // never trust the client's own validation
    let application: Application = form.0.try_into().map_err(|errors: Vec<ValidationError>| {
        tracing::info!(violations = errors.len(), "application rejected");
        ContactError::ValidationFailed(errors)
    })?;

    notifier.notify(&application).await.map_err(|e| {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "could not relay application"
        );
        ContactError::DispatchFailed(e)
    })?;

    Ok(HttpResponse::Ok().json(ContactResponse::accepted()))
}
