//! Environment-driven configuration for the bot process.
//!
//! Everything is read once at process entry into an immutable [`BotConfig`]
//! that is handed to the components that need it.

use std::{
    env, fmt,
    net::{Ipv4Addr, SocketAddr},
};

use strum_macros::AsRefStr;
use thiserror::Error;
use url::Url;

pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const NODE_ENV: &str = "NODE_ENV";
pub const WEBHOOK_URL: &str = "WEBHOOK_URL";
pub const PORT: &str = "PORT";

/// Setting this variable (to anything) disables `.env` hydration.
pub const SKIP_DOTENV: &str = "FACTBOT_SKIP_DOTENV";

pub const DEFAULT_PORT: u16 = 3000;
pub const PRODUCTION_ENV: &str = "production";
pub const WEBHOOK_PATH: &str = "/webhook";

/// How updates reach the bot. Chosen once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDelivery {
    /// Telegram pushes updates to `endpoint`, which must route to this
    /// process' `/webhook` handler.
    Webhook { endpoint: Url },
    /// The bot pulls updates itself.
    LongPolling,
}

impl UpdateDelivery {
    pub fn mode(&self) -> DeliveryMode {
        match self {
            UpdateDelivery::Webhook { .. } => DeliveryMode::Webhook,
            UpdateDelivery::LongPolling => DeliveryMode::LongPolling,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryMode {
    Webhook,
    LongPolling,
}

#[derive(Clone, PartialEq, Eq)]
pub struct BotConfig {
    telegram_token: String,
    openai_api_key: String,
    port: u16,
    delivery: UpdateDelivery,
}

impl BotConfig {
    /// Hydrates `.env` (if present) and reads the process environment.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        hydrate_env_file()?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Required
    /// keys are checked in a fixed order so the first missing one is the one
    /// reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_token = required(&lookup, TELEGRAM_TOKEN)?;
        let openai_api_key = required(&lookup, OPENAI_API_KEY)?;

        let production = optional(&lookup, NODE_ENV).as_deref() == Some(PRODUCTION_ENV);
        let delivery = if production {
            let base = optional(&lookup, WEBHOOK_URL).ok_or(ConfigError::MissingWebhookUrl)?;
            UpdateDelivery::Webhook {
                endpoint: webhook_endpoint(&base)?,
            }
        } else {
            UpdateDelivery::LongPolling
        };

        let port = match optional(&lookup, PORT) {
            Some(raw) => raw
                .parse()
                .map_err(|source| ConfigError::InvalidNumber { key: PORT, source })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            telegram_token,
            openai_api_key,
            port,
            delivery,
        })
    }

    pub fn telegram_token(&self) -> &str {
        &self.telegram_token
    }

    pub fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Listens on every interface.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    pub fn delivery(&self) -> &UpdateDelivery {
        &self.delivery
    }

    pub fn mode(&self) -> DeliveryMode {
        self.delivery.mode()
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("telegram_token", &"<redacted>")
            .field("openai_api_key", &"<redacted>")
            .field("port", &self.port)
            .field("delivery", &self.delivery)
            .finish()
    }
}

/// Appends the webhook route to the public base URL.
fn webhook_endpoint(base: &str) -> Result<Url, ConfigError> {
    let base = base.strip_suffix('/').unwrap_or(base);
    Url::parse(&format!("{base}{WEBHOOK_PATH}")).map_err(|source| ConfigError::InvalidUrl {
        key: WEBHOOK_URL,
        source,
    })
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::MissingVar { key })
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub fn hydrate_env_file() -> Result<(), ConfigError> {
    if env::var_os(SKIP_DOTENV).is_some() {
        return Ok(());
    }
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(ConfigError::Dotenv { source: err }),
    }

    Ok(())
}

/// Errors emitted when `.env` hydration or environment parsing fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {key}")]
    MissingVar { key: &'static str },
    #[error("WEBHOOK_URL is required in production mode")]
    MissingWebhookUrl,
    #[error("invalid integer in `{key}`: {source}")]
    InvalidNumber {
        key: &'static str,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("invalid url in `{key}`: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to load .env file: {source}")]
    Dotenv {
        #[from]
        source: dotenvy::Error,
    },
}
