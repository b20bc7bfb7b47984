//! Error types for ziu-notify
//!
//! Every phase of a poll tick has its own error kind (auth, fetch, parse,
//! deliver) so that log lines name the failing phase, plus a configuration
//! kind for startup validation. The poll loop treats all tick-phase errors
//! uniformly; the one classification that changes its behavior is
//! [`Error::is_auth_rejection`], which tells it to discard the cached
//! session token before backing off.

use thiserror::Error;

/// Result type alias for ziu-notify operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ziu-notify
#[derive(Debug, Error)]
pub enum Error {
    /// Login was rejected or the auth endpoint was unreachable
    ///
    /// Fatal when raised by the eager startup login (indistinguishable from
    /// permanently bad credentials at that point); recoverable with backoff
    /// once the loop is running.
    #[error("login failed: {reason}")]
    Auth {
        /// What went wrong (transport error or unexpected status)
        reason: String,
    },

    /// The results endpoint rejected the session token
    ///
    /// Raised on HTTP 401/403 from the results fetch. The server's own token
    /// expiry can be shorter than the local 25-minute window, so this is the
    /// signal to discard the cached token and re-authenticate.
    #[error("session token rejected by server (HTTP {status})")]
    TokenRejected {
        /// The rejecting HTTP status code
        status: u16,
    },

    /// The results endpoint was unreachable or answered non-2xx
    #[error("results fetch failed: {reason}")]
    Fetch {
        /// What went wrong (transport error or unexpected status)
        reason: String,
    },

    /// The results payload did not match the expected schema
    ///
    /// Kept distinct from [`Error::Fetch`]: a parse failure points at an
    /// upstream schema change rather than a connectivity problem.
    #[error("unexpected results payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// The notification webhook was unreachable or answered non-200/204
    #[error("webhook delivery failed: {reason}")]
    Delivery {
        /// What went wrong (transport error or unexpected status)
        reason: String,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of the configuration issue
        message: String,
        /// The environment variable that caused the error
        key: Option<String>,
    },
}

impl Error {
    /// Returns true if this error means the current session token is dead
    ///
    /// The poll loop clears the session store on these errors so the next
    /// tick re-authenticates instead of retrying a rejected token.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Error::TokenRejected { .. })
    }

    /// Shorthand for a config error tied to an environment variable
    pub(crate) fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}
