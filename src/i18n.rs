//! English/Spanish text for the site and the application form.
//!
//! The current language is always passed around explicitly as a `Language`
//! value. Its only external source is the persisted preference (the
//! `preferred-language` cookie), see `Language::from_preference`.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;

use crate::domain::Field;
use crate::domain::ValidationError;

/// Key under which the visitor's last chosen language is stored client-side
pub const LANGUAGE_COOKIE: &str = "preferred-language";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// Resolve a stored preference. Anything absent or unrecognised falls back
    /// to English.
    pub fn from_preference(stored: Option<&str>) -> Self {
        stored
            .and_then(|code| Language::try_from(code).ok())
            .unwrap_or_default()
    }
}

impl Display for Language {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<&str> for Language {
    type Error = String;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            e => Err(format!("Unsupported language: {e}")),
        }
    }
}

/// Messages shown to the applicant while filling in and sending the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Required,
    InvalidEmail,
    InvalidLinkedIn,
    OutOfBounds(Field),
    Submit,
    Sending,
    Success,
    Failure,
    RateLimited,
}

impl Notice {
    pub fn text(
        &self,
        lang: Language,
    ) -> &'static str {
        match (self, lang) {
            (Notice::Required, Language::En) => "Please fill in all required fields.",
            (Notice::Required, Language::Es) => "Por favor, completa todos los campos requeridos.",
            (Notice::InvalidEmail, Language::En) => "Please enter a valid email address.",
            (Notice::InvalidEmail, Language::Es) => "Por favor, ingresa un email válido.",
            (Notice::InvalidLinkedIn, Language::En) => "Please enter a valid LinkedIn profile URL.",
            (Notice::InvalidLinkedIn, Language::Es) => {
                "Por favor, ingresa una URL válida de LinkedIn."
            }
            (Notice::OutOfBounds(field), lang) => out_of_bounds(*field, lang),
            (Notice::Submit, Language::En) => "Submit Application",
            (Notice::Submit, Language::Es) => "Enviar Aplicación",
            (Notice::Sending, Language::En) => "Sending...",
            (Notice::Sending, Language::Es) => "Enviando...",
            (Notice::Success, Language::En) => {
                "Thank you for your application! We will contact you soon."
            }
            (Notice::Success, Language::Es) => {
                "¡Gracias por tu aplicación! Nos pondremos en contacto contigo pronto."
            }
            (Notice::Failure, Language::En) => "Error submitting application. Please try again.",
            (Notice::Failure, Language::Es) => {
                "Error al enviar la aplicación. Por favor, inténtalo de nuevo."
            }
            (Notice::RateLimited, Language::En) => {
                "Too many requests from this IP, please try again later."
            }
            (Notice::RateLimited, Language::Es) => {
                "Demasiadas solicitudes desde esta IP, por favor inténtalo más tarde."
            }
        }
    }
}

fn out_of_bounds(
    field: Field,
    lang: Language,
) -> &'static str {
    match (field, lang) {
        (Field::Name, Language::En) => "Name must be between 2 and 100 characters.",
        (Field::Name, Language::Es) => "El nombre debe tener entre 2 y 100 caracteres.",
        (Field::Company, Language::En) => "Company name must be between 2 and 200 characters.",
        (Field::Company, Language::Es) => {
            "El nombre de la empresa debe tener entre 2 y 200 caracteres."
        }
        (Field::Message, Language::En) => "Message must be between 10 and 2000 characters.",
        (Field::Message, Language::Es) => "El mensaje debe tener entre 10 y 2000 caracteres.",
        // email and linkedin have no length rule of their own
        (Field::Email, lang) => Notice::InvalidEmail.text(lang),
        (Field::Linkedin, lang) => Notice::InvalidLinkedIn.text(lang),
    }
}

impl From<&ValidationError> for Notice {
    fn from(e: &ValidationError) -> Self {
        match e {
            ValidationError::MissingField(_) => Notice::Required,
            ValidationError::InvalidEmail => Notice::InvalidEmail,
            ValidationError::InvalidLinkedIn => Notice::InvalidLinkedIn,
            ValidationError::OutOfBounds(field) => Notice::OutOfBounds(*field),
        }
    }
}

/// `(key, en, es)` for every translatable element of the entry page
const PAGE_TEXT: &[(&str, &str, &str)] = &[
    ("title", "Second Chance VC", "Second Chance VC"),
    ("nav_about", "About", "Nosotros"),
    ("nav_criteria", "Criteria", "Criterios"),
    ("nav_apply", "Apply", "Aplicar"),
    (
        "hero_title",
        "Backing founders on their second attempt",
        "Apoyamos a fundadores en su segundo intento",
    ),
    (
        "hero_subtitle",
        "Your last startup taught you more than any accelerator could. We invest in what you learned.",
        "Tu última startup te enseñó más que cualquier aceleradora. Invertimos en lo que aprendiste.",
    ),
    ("hero_cta", "Apply Now", "Aplicar Ahora"),
    ("about_title", "Why second chances", "Por qué segundas oportunidades"),
    (
        "about_body",
        "Most successful founders failed before. We look for people who built, shipped and learned, and give them capital and AI-native tooling to go again.",
        "La mayoría de los fundadores exitosos fracasaron antes. Buscamos personas que construyeron, lanzaron y aprendieron, y les damos capital y herramientas de IA para intentarlo de nuevo.",
    ),
    ("criteria_title", "What we look for", "Qué buscamos"),
    (
        "criteria_experience",
        "You founded or led a company that did not make it",
        "Fundaste o lideraste una empresa que no prosperó",
    ),
    (
        "criteria_clarity",
        "You can explain what went wrong and what you would change",
        "Puedes explicar qué salió mal y qué cambiarías",
    ),
    (
        "criteria_ai",
        "You are building with AI at the core",
        "Estás construyendo con IA en el centro",
    ),
    ("contact_title", "Apply", "Aplica"),
    (
        "contact_subtitle",
        "Tell us about yourself and your previous company.",
        "Cuéntanos sobre ti y tu empresa anterior.",
    ),
    ("label_name", "Full name", "Nombre completo"),
    ("label_email", "Email", "Email"),
    ("label_linkedin", "LinkedIn profile", "Perfil de LinkedIn"),
    ("label_company", "Previous company", "Empresa anterior"),
    ("label_message", "Your story", "Tu historia"),
    ("submit", "Submit Application", "Enviar Aplicación"),
    (
        "footer",
        "© Second Chance VC. All rights reserved.",
        "© Second Chance VC. Todos los derechos reservados.",
    ),
];

/// `(key, en, es)` for input placeholders
const PLACEHOLDERS: &[(&str, &str, &str)] = &[
    ("name", "Ana Gomez", "Ana Gómez"),
    ("email", "you@example.com", "tu@ejemplo.com"),
    (
        "linkedin",
        "https://linkedin.com/in/your-profile",
        "https://linkedin.com/in/tu-perfil",
    ),
    ("company", "Company name", "Nombre de la empresa"),
    (
        "message",
        "What did you build, and what did you learn?",
        "¿Qué construiste y qué aprendiste?",
    ),
];

/// One translatable string, with both variants kept so the rendered element
/// can carry `data-en` / `data-es` alongside the text for `current`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    pub en: &'static str,
    pub es: &'static str,
    pub current: &'static str,
}

impl LocalizedText {
    fn new(
        en: &'static str,
        es: &'static str,
        lang: Language,
    ) -> Self {
        let current = match lang {
            Language::En => en,
            Language::Es => es,
        };
        Self { en, es, current }
    }
}

fn catalogue(
    table: &[(&'static str, &'static str, &'static str)],
    lang: Language,
) -> BTreeMap<&'static str, LocalizedText> {
    table
        .iter()
        .map(|&(key, en, es)| (key, LocalizedText::new(en, es, lang)))
        .collect()
}

pub fn page_text(lang: Language) -> BTreeMap<&'static str, LocalizedText> {
    catalogue(PAGE_TEXT, lang)
}

pub fn placeholders(lang: Language) -> BTreeMap<&'static str, LocalizedText> {
    catalogue(PLACEHOLDERS, lang)
}
