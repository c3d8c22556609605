use std::env;
use std::env::current_dir;
use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use config::Config;
use config::ConfigError;
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::EmailAddress;
use crate::domain::ValidationError;
use crate::email_client::EmailClient;
use crate::email_client::EmailTransport;
use crate::rate_limit::RateLimiter;

/// Global configuration, loaded from `configuration/*.yaml`. See
/// `get_configuration`.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub rate_limit: RateLimitSettings,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    /// Should be localhost on dev machine, 0.0.0.0 on prod
    pub host: String,

    /// 0 lets the OS pick a free port (tests)
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailClientSettings {
    /// `log` in development, `api` in production
    pub transport: EmailTransport,
    pub base_url: String,
    /// Address all outgoing mail is sent from
    pub sender_email: String,
    /// Where new applications are relayed to
    pub operator_email: String,
    pub authorization_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<EmailAddress, ValidationError> {
        EmailAddress::parse(self.sender_email.clone())
    }

    pub fn operator(&self) -> Result<EmailAddress, ValidationError> {
        EmailAddress::parse(self.operator_email.clone())
    }

    pub fn timeout(&self) -> Duration { Duration::from_millis(self.timeout_milliseconds) }

    /// Fails if the sender address is malformed
    pub fn client(self) -> Result<EmailClient, anyhow::Error> {
        let sender = self
            .sender()
            .with_context(|| format!("invalid sender address: {}", self.sender_email))?;
        let timeout = self.timeout();
        let client = EmailClient::new(
            self.transport,
            self.base_url,
            sender,
            self.authorization_token,
            timeout,
        )
        .context("could not build email http client")?;
        Ok(client)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_requests: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub window_seconds: u64,
}

impl RateLimitSettings {
    pub fn limiter(&self) -> RateLimiter {
        RateLimiter::new(self.max_requests, Duration::from_secs(self.window_seconds))
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Display for Environment {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Environment::Local => "local",
                Environment::Production => "production",
            }
        )
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            e => Err(format!("Invalid environment: {e}")),
        }
    }
}

/// Load yaml configuration files at `<project_root>/configuration` for the
/// environment named by `APP_ENVIRONMENT` (default `local`). See
/// `load_configuration`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let cfg_dir = current_dir()
        .map_err(|e| ConfigError::Foreign(Box::new(e)))?
        .join("configuration");

    let env: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".to_string())
        .try_into()
        .map_err(ConfigError::Message)?;

    load_configuration(&cfg_dir, env)
}

/// `base.yaml`, then `{env}.yaml`, then `APP_*` env vars.
///
/// All fields must be present, otherwise initialisation will fail
/// immediately, and the server will not start. In particular, the provider
/// token has no default outside `local.yaml`.
pub fn load_configuration(
    cfg_dir: &Path,
    env: Environment,
) -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        .add_source(config::File::from(cfg_dir.join("base.yaml")))
        .add_source(config::File::from(cfg_dir.join(format!("{env}.yaml"))))
        .add_source(
            // env vars are -always- parsed as String, hence `serde-aux` for numbers
            //
            // `APP_APPLICATION__PORT=5001` -> `Settings.application.port`
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
