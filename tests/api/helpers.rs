use once_cell::sync::Lazy;
use second_chance::configuration::get_configuration;
use second_chance::configuration::Settings;
use second_chance::email_client::EmailTransport;
use second_chance::startup::Application;
use second_chance::telemetry::get_subscriber;
use second_chance::telemetry::init_subscriber;
use serde_json::json;
use wiremock::MockServer;

/// Init the tracing subscriber once only.
///
/// To opt in to verbose logging, use the env var `TEST_LOG`:
///
/// ```sh
///      TEST_LOG=true cargo test [test_name] | bunyan
/// ```
static TRACING: Lazy<()> = Lazy::new(|| {
    // the two sinks have different types, hence the duplicated arms
    match std::env::var("TEST_LOG") {
        Ok(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::stdout);
            init_subscriber(subscriber);
        }
        Err(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::sink);
            init_subscriber(subscriber);
        }
    };
});

pub struct TestApp {
    pub addr: String,
    pub port: u16,
    /// Stands in for the email provider
    pub email_server: MockServer,
    /// Keeps cookies between requests, like a browser
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_contact(
        &self,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/contact", self.addr))
            .json(body)
            .send()
            .await
            .expect("execute request")
    }

    /// `GET /`, optionally with `?lang=`
    pub async fn get_home(
        &self,
        lang: Option<&str>,
    ) -> reqwest::Response {
        let mut req = self.api_client.get(format!("{}/", self.addr));
        if let Some(lang) = lang {
            req = req.query(&[("lang", lang)]);
        }
        req.send().await.expect("execute request")
    }

    pub async fn get_home_html(
        &self,
        lang: Option<&str>,
    ) -> String {
        self.get_home(lang).await.text().await.unwrap()
    }
}

/// A complete, valid application
pub fn ana() -> serde_json::Value {
    json!({
        "name": "Ana Gomez",
        "email": "ana@example.com",
        "linkedin": "https://linkedin.com/in/anagomez",
        "company": "Acme",
        "message": "I have ten years of experience.",
    })
}

pub async fn spawn_app() -> TestApp { spawn_app_with(|_| {}).await }

/// Spawn the app on a random port, with every email going to a fresh
/// `MockServer`. `configure` may adjust the settings further.
pub async fn spawn_app_with(configure: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let cfg = {
        let mut cfg = get_configuration().expect("read configuration");
        // port 0 is reserved by the OS; the server will be spawned on a random
        // available port
        cfg.application.port = 0;
        cfg.email_client.transport = EmailTransport::Api;
        cfg.email_client.base_url = email_server.uri();
        configure(&mut cfg);
        cfg
    };

    let app = Application::build(cfg).await.expect("build app");
    let port = app.port();
    let addr = format!("http://127.0.0.1:{port}");
    tokio::spawn(app.run_until_stopped());

    let api_client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        addr,
        port,
        email_server,
        api_client,
    }
}
