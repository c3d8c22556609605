use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::middleware::DefaultHeaders;
use actix_web::web;
use actix_web::web::Data;
use actix_web::App;
use actix_web::HttpServer;
use actix_web_lab::middleware::from_fn;
use tera::Tera;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::notifier::Notifier;
use crate::rate_limit::limit_by_client_address;
use crate::rate_limit::RateLimiter;
use crate::routes::contact;
use crate::routes::health_check;
use crate::routes::home;
use crate::routes::json_config;
use crate::routes::site_script;
use crate::routes::templates;

/// Only fonts may come from elsewhere
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
    style-src 'self' https://fonts.googleapis.com; \
    font-src 'self' https://fonts.gstatic.com; \
    script-src 'self'; \
    frame-ancestors 'self'";

/// Wrapper for actix's `Server` with access to the bound port. Not to be
/// confused with actix's `App`!
pub struct Application {
    /// Left private; use `port` to access
    port: u16,
    server: Server,
    /// Shared with the purge worker, see `main`
    rate_limiter: Data<RateLimiter>,
}

impl Application {
    /// Wrapper over `startup::run` that builds a `Server`. Fails if the
    /// configured addresses are malformed or the port cannot be bound.
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener = TcpListener::bind(addr)?;
        // if port 0 was requested, this is the port the OS picked
        let port = listener.local_addr()?.port();

        let operator = cfg.email_client.operator()?;
        let email_client = cfg.email_client.client()?;
        let notifier = Notifier::new(email_client, operator);

        let rate_limiter = Data::new(cfg.rate_limit.limiter());

        let server = run(listener, notifier, rate_limiter.clone(), templates()?)?;

        Ok(Self {
            port,
            server,
            rate_limiter,
        })
    }

    pub fn port(&self) -> u16 { self.port }

    pub fn rate_limiter(&self) -> Data<RateLimiter> { self.rate_limiter.clone() }

    /// Because this consumes `self`, this should be the final function call (or
    /// passed to `tokio::spawn`)
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

/// The server is not responsible for binding to an address, it only listens to
/// an already bound address.
///
/// Declares all endpoints.
pub fn run(
    listener: TcpListener,
    notifier: Notifier,
    rate_limiter: Data<RateLimiter>,
    templates: Tera,
) -> Result<Server, anyhow::Error> {
    // `Data` is an `Arc`; every worker gets a clone of the same state
    let notifier = Data::new(notifier);
    let templates = Data::new(templates);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Content-Security-Policy", CONTENT_SECURITY_POLICY))
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "SAMEORIGIN"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .route("/", web::get().to(home))
            .route("/static/site.js", web::get().to(site_script))
            .route("/api/health", web::get().to(health_check))
            .service(
                // every request to the endpoint counts toward the limit
                web::resource("/api/contact")
                    .wrap(from_fn(limit_by_client_address))
                    .route(web::post().to(contact)),
            )
            .app_data(json_config())
            .app_data(notifier.clone())
            .app_data(rate_limiter.clone())
            .app_data(templates.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
