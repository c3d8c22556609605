use std::collections::BTreeMap;

use actix_web::cookie::time::Duration;
use actix_web::cookie::Cookie;
use actix_web::http::header::ContentType;
use actix_web::web;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use serde::Deserialize;
use serde::Serialize;
use tera::Context;
use tera::Tera;

use crate::domain::Field;
use crate::domain::EMAIL_PATTERN;
use crate::domain::PROFILE_URL_PATTERN;
use crate::i18n::page_text;
use crate::i18n::placeholders;
use crate::i18n::Language;
use crate::i18n::Notice;
use crate::i18n::LANGUAGE_COOKIE;
use crate::utils::error_500;

const INDEX: &str = "index.html";

/// Load the entry page template, which is compiled into the binary
pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    // path relative to this file (checked at compile time!)
    tera.add_raw_template(INDEX, include_str!("./index.html"))?;
    Ok(tera)
}

#[derive(Deserialize)]
pub struct HomeQuery {
    lang: Option<String>,
}

/// A valid `?lang=` always wins (and should be remembered); otherwise the
/// stored preference is used. Returns whether the language was chosen
/// explicitly.
pub fn resolve_language(
    requested: Option<&str>,
    stored: Option<&str>,
) -> (Language, bool) {
    match requested.map(Language::try_from) {
        Some(Ok(lang)) => (lang, true),
        _ => (Language::from_preference(stored), false),
    }
}

/// Length rule of a free-text input, and what to show when it is broken
#[derive(Serialize)]
struct InputBounds {
    min: usize,
    max: usize,
    notice: &'static str,
}

pub fn render_page(
    templates: &Tera,
    lang: Language,
) -> Result<String, tera::Error> {
    // text the form script needs, in the page's language
    let notices: BTreeMap<&str, &str> = [
        ("required", Notice::Required),
        ("invalid_email", Notice::InvalidEmail),
        ("invalid_linkedin", Notice::InvalidLinkedIn),
        ("sending", Notice::Sending),
        ("success", Notice::Success),
        ("failure", Notice::Failure),
        ("rate_limited", Notice::RateLimited),
    ]
    .into_iter()
    .map(|(key, notice)| (key, notice.text(lang)))
    .collect();

    // same rules the server applies, checked in the browser first
    let patterns: BTreeMap<&str, &str> =
        [("email", EMAIL_PATTERN), ("linkedin", PROFILE_URL_PATTERN)].into();
    let bounds: BTreeMap<&str, InputBounds> = Field::ALL
        .iter()
        .filter_map(|field| {
            let (min, max) = field.bounds()?;
            let notice = Notice::OutOfBounds(*field).text(lang);
            Some((field.as_str(), InputBounds { min, max, notice }))
        })
        .collect();

    let mut ctx = Context::new();
    ctx.insert("lang", lang.code());
    ctx.insert("text", &page_text(lang));
    ctx.insert("placeholders", &placeholders(lang));
    ctx.insert("notices", &notices);
    ctx.insert("patterns", &patterns);
    ctx.insert("bounds", &bounds);
    templates.render(INDEX, &ctx)
}

/// `GET /`
///
/// Renders the whole page in one language. Switching language is a plain
/// link to `/?lang=..`, which also persists the choice in the
/// `preferred-language` cookie for later visits.
pub async fn home(
    query: web::Query<HomeQuery>,
    request: HttpRequest,
    templates: web::Data<Tera>,
) -> Result<HttpResponse, actix_web::Error> {
    let stored = request.cookie(LANGUAGE_COOKIE);
    let (lang, chosen) = resolve_language(
        query.lang.as_deref(),
        stored.as_ref().map(|c| c.value()),
    );

    let body = render_page(&templates, lang).map_err(error_500)?;

    let mut resp = HttpResponse::Ok();
    resp.content_type(ContentType::html());
    if chosen {
        resp.cookie(
            Cookie::build(LANGUAGE_COOKIE, lang.code())
                .path("/")
                .max_age(Duration::days(365))
                .finish(),
        );
    }
    Ok(resp.body(body))
}

/// `GET /static/site.js`
pub async fn site_script() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(include_str!("./site.js"))
}
