pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod form_client;
pub mod i18n;
pub mod notifier;
pub mod rate_limit;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod utils;
