//! The poll loop
//!
//! Ties the session store, upstream client, formatter and notifier together
//! on a fixed cadence. Each tick runs ensure-token, fetch, parse, format,
//! deliver in sequence; any failure abandons the tick, logs, and backs off
//! for a fixed 20 seconds. A successful tick sleeps 60 seconds. Ticks are
//! strictly sequential (the loop suspends only at the two sleep points and
//! inside blocking network calls) and the loop has no terminal state of its
//! own: it runs until the cancellation token fires.

use crate::client::ResultsClient;
use crate::config::{Config, Credentials};
use crate::error::{Error, Result};
use crate::formatter::format_results;
use crate::ledger::DeliveryLedger;
use crate::model::parse_results;
use crate::notifier::Notifier;
use crate::session::SessionStore;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Sleep between ticks after a fully successful tick
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Sleep before the next tick after any tick-phase failure
pub const RETRY_BACKOFF: Duration = Duration::from_secs(20);

/// The process-wide control structure: polls, formats, delivers
///
/// Owns the session store and delivery ledger outright and injects them
/// into the fetch and format steps; there is no hidden shared state.
pub struct Poller {
    client: ResultsClient,
    notifier: Notifier,
    session: SessionStore,
    ledger: DeliveryLedger,
    credentials: Credentials,
}

impl Poller {
    /// Build a poller from the process configuration
    ///
    /// # Errors
    /// Returns a configuration error if an HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: ResultsClient::new(config.base_url.clone())?,
            notifier: Notifier::new(config.webhook_url.clone())?,
            session: SessionStore::new(),
            ledger: DeliveryLedger::new(),
            credentials: config.credentials.clone(),
        })
    }

    /// Authenticate eagerly and store the token
    ///
    /// Called once before the loop starts. A failure here is fatal at the
    /// call site, since it cannot yet be told apart from permanently bad
    /// credentials.
    ///
    /// # Errors
    /// Returns [`Error::Auth`] when login fails.
    pub async fn login(&self) -> Result<()> {
        let token = self.client.login(&self.credentials).await?;
        self.session.put(token);
        info!("Authenticated against upstream");
        Ok(())
    }

    /// Return the live token, logging in first if the store has none
    async fn ensure_token(&self) -> Result<String> {
        if let Some(token) = self.session.get() {
            return Ok(token);
        }
        info!("No live session token, logging in");
        let token = self.client.login(&self.credentials).await?;
        self.session.put(token.clone());
        Ok(token)
    }

    /// Run one poll tick: ensure token, fetch, parse, format, deliver
    ///
    /// # Errors
    /// Returns the first failing phase's error; the remaining phases are
    /// skipped. The delivery ledger may already have been updated by the
    /// format step when delivery fails; those records will not be
    /// re-attempted, which is the accepted at-most-once guarantee.
    pub async fn tick(&mut self) -> Result<()> {
        let token = self.ensure_token().await?;
        let payload = self.client.fetch_results(&token).await?;
        let groups = parse_results(&payload)?;
        let text = format_results(&groups, &mut self.ledger);
        self.notifier.deliver(&text, &payload).await?;
        Ok(())
    }

    /// Log a failed tick and discard the token if the server rejected it
    ///
    /// A fetch failure that is not an authentication rejection leaves the
    /// token in place.
    fn on_tick_error(&self, error: &Error) {
        warn!(error = %error, "Tick failed, backing off");
        if error.is_auth_rejection() {
            self.session.clear();
        }
    }

    /// Run ticks until the cancellation token fires
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(
            interval = ?POLL_INTERVAL,
            backoff = ?RETRY_BACKOFF,
            "Poll loop started"
        );

        loop {
            if shutdown.is_cancelled() {
                break;
            }

            let delay = match self.tick().await {
                Ok(()) => {
                    debug!("Tick completed, waiting for next check");
                    POLL_INTERVAL
                }
                Err(e) => {
                    self.on_tick_error(&e);
                    RETRY_BACKOFF
                }
            };

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = sleep(delay) => {}
            }
        }

        info!("Poll loop stopped");
    }
}
