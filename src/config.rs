//! Command line and environment configuration.

use std::{sync::Arc, time::Duration};

use clap::{Args, Parser};

use crate::{
    api::HttpTransport,
    maintenance::{DEFAULT_WEBHOOK_BASE_URL, WebhookErrandNotifier},
    search::{SearchType, SpaceCaption},
    settings::{
        InMemorySettings, ONECORE_API_TOKEN, ONECORE_BASE_URL, ONECORE_PASSWORD, ONECORE_USERNAME,
        Settings, WEBHOOK_BEARER_TOKEN,
    },
};

pub mod observability;

pub use observability::{LogFormat, LoggingConfig};

/// `OneCore` search configuration
#[derive(Debug, Parser)]
#[command(
    name = "onecore-search",
    about = "Search OneCore for maintenance request options",
    long_about = None
)]
pub struct Config {
    /// `OneCore` API connection settings.
    #[command(flatten)]
    pub onecore: OneCoreArgs,

    /// Errand webhook settings.
    #[command(flatten)]
    pub webhook: WebhookArgs,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Search to run.
    #[command(flatten)]
    pub search: SearchArgs,
}

/// `OneCore` API connection.
#[derive(Debug, Args)]
pub struct OneCoreArgs {
    /// `OneCore` API base URL
    #[arg(long = "onecore-base-url", env = "ONECORE_BASE_URL")]
    pub base_url: String,

    /// `OneCore` API user name
    #[arg(long = "onecore-username", env = "ONECORE_USERNAME")]
    pub username: String,

    /// `OneCore` API password
    #[arg(long = "onecore-password", env = "ONECORE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Previously issued bearer token, reused until `OneCore` rejects it
    #[arg(long = "onecore-api-token", env = "ONECORE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(
        long = "onecore-request-timeout-seconds",
        env = "ONECORE_REQUEST_TIMEOUT_SECONDS",
        default_value_t = 30_u64
    )]
    pub request_timeout_seconds: u64,
}

/// Errand webhook.
#[derive(Debug, Args)]
pub struct WebhookArgs {
    /// Errand app workflow base URL
    #[arg(long, env = "WEBHOOK_BASE_URL", default_value = DEFAULT_WEBHOOK_BASE_URL)]
    pub webhook_base_url: String,

    /// Bearer token for the errand app
    #[arg(long, env = "X_WEBHOOK_BEARER_TOKEN", hide_env_values = true)]
    pub webhook_bearer_token: Option<String>,
}

/// The search to run.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search type (`leaseId`, `rentalObjectId`, `contactCode`, `pnr`, `buildingCode`, `propertyName`)
    #[arg(long)]
    pub search_type: SearchType,

    /// Value to search for
    #[arg(long)]
    pub search_value: String,

    /// Space the request concerns, e.g. Lägenhet or Bilplats
    #[arg(long)]
    pub space_caption: SpaceCaption,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Runtime settings seeded from this configuration.
    #[must_use]
    pub fn settings(&self) -> InMemorySettings {
        let settings = InMemorySettings::with_values([
            (ONECORE_BASE_URL, self.onecore.base_url.as_str()),
            (ONECORE_USERNAME, self.onecore.username.as_str()),
            (ONECORE_PASSWORD, self.onecore.password.as_str()),
        ]);

        if let Some(token) = &self.onecore.api_token {
            settings.set(ONECORE_API_TOKEN, token);
        }

        if let Some(token) = &self.webhook.webhook_bearer_token {
            settings.set(WEBHOOK_BEARER_TOKEN, token);
        }

        settings
    }

    /// Per-request timeout for `OneCore` calls.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.onecore.request_timeout_seconds)
    }

    /// Errand notifier posting to the configured webhook base URL.
    #[must_use]
    pub fn webhook_notifier(
        &self,
        settings: Arc<dyn Settings>,
        transport: Arc<dyn HttpTransport>,
    ) -> WebhookErrandNotifier {
        WebhookErrandNotifier::new(settings, transport, self.webhook.webhook_base_url.as_str())
    }
}
