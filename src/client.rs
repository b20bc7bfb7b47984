//! Upstream API client
//!
//! Two operations against the results service: authenticating for a session
//! token and fetching the current results payload. Both are single attempts;
//! retry policy lives entirely in the poll loop. The fetch returns the
//! response body verbatim so the parse boundary ([`crate::model`]) stays a
//! separate failure phase.

use crate::config::Credentials;
use crate::error::{Error, Result};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Header carrying the session token, in both directions
pub const TOKEN_HEADER: &str = "X-Token";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the upstream auth and results endpoints
pub struct ResultsClient {
    http: reqwest::Client,
    base_url: String,
}

impl ResultsClient {
    /// Create a client against the given API base URL (no trailing slash)
    ///
    /// # Errors
    /// Returns a configuration error if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("ziu-notify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {e}"),
                key: None,
            })?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Authenticate and return a fresh session token
    ///
    /// Success is strictly HTTP 200 with the token in the `X-Token`
    /// response header; a 200 without the header is still an auth failure
    /// rather than an empty token.
    ///
    /// # Errors
    /// Returns [`Error::Auth`] on transport failure, non-200 status, or a
    /// missing/empty token header.
    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        let url = format!("{}/uzytkownik/login", self.base_url);
        debug!(url = %url, login = %credentials.login, "Logging in to upstream");

        let body = serde_json::json!({
            "Login": credentials.login,
            "Zeton": credentials.secret,
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Auth {
                reason: format!("auth endpoint unreachable: {e}"),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Auth {
                reason: format!("unexpected response status: {status}"),
            });
        }

        response
            .headers()
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::Auth {
                reason: format!("login response carried no {TOKEN_HEADER} header"),
            })
    }

    /// Fetch the current raw results payload
    ///
    /// # Errors
    /// Returns [`Error::TokenRejected`] on HTTP 401/403 (the poll loop's
    /// discard-token signal) and [`Error::Fetch`] on transport failure or
    /// any other non-200 status.
    pub async fn fetch_results(&self, token: &str) -> Result<String> {
        let url = format!("{}/Wynik", self.base_url);
        debug!(url = %url, "Fetching results");

        let response = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, token)
            .send()
            .await
            .map_err(|e| Error::Fetch {
                reason: format!("results endpoint unreachable: {e}"),
            })?;

        let status = response.status();
        match status {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(Error::TokenRejected {
                    status: status.as_u16(),
                });
            }
            other => {
                return Err(Error::Fetch {
                    reason: format!("unexpected response status: {other}"),
                });
            }
        }

        response.text().await.map_err(|e| Error::Fetch {
            reason: format!("failed to read results body: {e}"),
        })
    }
}
