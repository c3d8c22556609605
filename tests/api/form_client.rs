use second_chance::domain::ApplicationForm;
use second_chance::form_client::ContactForm;
use second_chance::form_client::FormOutcome;
use second_chance::form_client::FormState;
use second_chance::i18n::Language;
use second_chance::i18n::Notice;
use wiremock::matchers::any;
use wiremock::Mock;
use wiremock::ResponseTemplate;

use crate::helpers::spawn_app;

fn ana() -> ApplicationForm { serde_json::from_value(crate::helpers::ana()).unwrap() }

#[tokio::test]
async fn submits_to_running_app() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let mut form = ContactForm::new(&format!("http://127.0.0.1:{}", app.port), Language::En);
    form.fill(ana());

    let outcome = form.submit().await;
    assert_eq!(outcome, FormOutcome::Success(Notice::Success));
    assert_eq!(
        outcome.notice().text(form.language()),
        "Thank you for your application! We will contact you soon."
    );
    assert_eq!(form.values(), &ApplicationForm::default());
    assert_eq!(form.state(), FormState::Idle);
}

#[tokio::test]
async fn server_failure_keeps_values() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.email_server)
        .await;

    let mut form = ContactForm::new(&app.addr, Language::En);
    form.fill(ana());
    form.set_language(Language::Es);

    let outcome = form.submit().await;
    assert_eq!(outcome, FormOutcome::Failed(Notice::Failure));
    assert_eq!(
        outcome.notice().text(form.language()),
        "Error al enviar la aplicación. Por favor, inténtalo de nuevo."
    );
    assert_eq!(form.values(), &ana());
}

#[tokio::test]
async fn local_validation_stops_bad_linkedin() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let mut form = ContactForm::new(&app.addr, Language::En);
    form.fill(ApplicationForm {
        linkedin: "http://linkedin.com/company/x".to_string(),
        ..ana()
    });

    assert_eq!(
        form.submit().await,
        FormOutcome::Rejected(Notice::InvalidLinkedIn)
    );
}
