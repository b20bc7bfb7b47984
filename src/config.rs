//! Configuration types for ziu-notify
//!
//! Configuration comes from the process environment (optionally seeded from a
//! `.env` file by the binary). Three values are required (the upstream
//! account, its secret, and the notification webhook URL) and their absence
//! is a fatal startup error. The upstream base URL can be overridden for
//! tests and alternate deployments; polling cadence is fixed by design and
//! deliberately not configurable.

use crate::error::{Error, Result};
use url::Url;

/// Environment variable holding the upstream account identifier
pub const ENV_USERNAME: &str = "ZIU_USERNAME";
/// Environment variable holding the upstream account secret
pub const ENV_PASSWORD: &str = "ZIU_PASSWORD";
/// Environment variable holding the notification webhook URL
pub const ENV_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";
/// Environment variable overriding the upstream API base URL (optional)
pub const ENV_BASE_URL: &str = "ZIU_BASE_URL";

/// Default upstream API base URL
pub const DEFAULT_BASE_URL: &str = "https://ziu.gov.pl/api/ZIUZW";

/// Immutable upstream credentials, held for the process lifetime
///
/// Supplied once at startup and never mutated afterwards; the poll loop keeps
/// them around to re-authenticate whenever the session token expires.
#[derive(Clone)]
pub struct Credentials {
    /// Account identifier (the upstream's `Login` field)
    pub login: String,
    /// Account secret (the upstream's `Zeton` field)
    pub secret: String,
}

// The secret must never leak into logs, so Debug is written by hand.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Process configuration for the poller
#[derive(Clone, Debug)]
pub struct Config {
    /// Upstream credentials
    pub credentials: Credentials,

    /// Notification webhook URL (must be an absolute URL)
    pub webhook_url: Url,

    /// Upstream API base URL, without a trailing slash
    pub base_url: String,
}

impl Config {
    /// Build the configuration from the process environment
    ///
    /// # Errors
    /// Returns a configuration error naming the offending variable when a
    /// required value is missing or empty, or when a URL fails to parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    ///
    /// Extracted from [`Config::from_env`] so tests can supply variables
    /// without touching the process environment. Empty values count as
    /// missing, matching how operators unset variables in unit files.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            match lookup(key) {
                Some(value) if !value.is_empty() => Ok(value),
                _ => Err(Error::config(key, format!("{key} is not set"))),
            }
        };

        let login = required(ENV_USERNAME)?;
        let secret = required(ENV_PASSWORD)?;
        let webhook_raw = required(ENV_WEBHOOK_URL)?;

        let webhook_url = Url::parse(&webhook_raw).map_err(|e| {
            Error::config(ENV_WEBHOOK_URL, format!("invalid webhook URL: {e}"))
        })?;

        let base_url = match lookup(ENV_BASE_URL) {
            Some(value) if !value.is_empty() => {
                // Validate eagerly so a typo fails at startup, not mid-loop.
                Url::parse(&value).map_err(|e| {
                    Error::config(ENV_BASE_URL, format!("invalid base URL: {e}"))
                })?;
                value.trim_end_matches('/').to_string()
            }
            _ => DEFAULT_BASE_URL.to_string(),
        };

        Ok(Self {
            credentials: Credentials { login, secret },
            webhook_url,
            base_url,
        })
    }
}
