//! # ziu-notify
//!
//! Polls the ZIU exam-results API on a fixed cadence and forwards newly
//! published results to a webhook-based chat channel.
//!
//! ## Design Philosophy
//!
//! - **Self-healing sessions** - the upstream token lives in a TTL-bounded
//!   store and is re-acquired automatically when it expires or is rejected
//! - **At-most-once delivery** - a bounded in-memory ledger deduplicates
//!   records across ticks; nothing is persisted and nothing is retried
//! - **Uniform failure handling** - every tick-phase error logs, backs off a
//!   fixed 20 seconds, and the loop carries on
//! - **Library-first** - the binary is a thin wrapper; everything is driveable
//!   from tests
//!
//! ## Quick Start
//!
//! ```no_run
//! use ziu_notify::{Config, Poller, run_with_shutdown};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let poller = Poller::new(&config)?;
//!
//!     // Startup login is fatal on failure: it signals bad credentials
//!     // rather than a transient condition.
//!     poller.login().await?;
//!
//!     // Run with automatic signal handling
//!     run_with_shutdown(poller).await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Bounded evicting key-value store
pub mod cache;
/// Upstream auth and results API client
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Result formatting and dedup decisions
pub mod formatter;
/// Delivery dedup ledger
pub mod ledger;
/// Typed model of the upstream payload
pub mod model;
/// Webhook notification delivery
pub mod notifier;
/// The poll loop
pub mod poller;
/// Session token store
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use cache::{BoundedCache, Eviction};
pub use client::ResultsClient;
pub use config::{Config, Credentials};
pub use error::{Error, Result};
pub use formatter::format_results;
pub use ledger::{DeliveryLedger, RecordKey};
pub use model::parse_results;
pub use notifier::Notifier;
pub use poller::Poller;
pub use session::SessionStore;

use tokio_util::sync::CancellationToken;

/// Run the poller until a termination signal arrives
///
/// Spawns the poll loop, waits for a signal, then cancels the loop and
/// waits for it to wind down.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with a Ctrl+C fallback if
///   signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
pub async fn run_with_shutdown(poller: Poller) {
    let shutdown = CancellationToken::new();
    let loop_token = shutdown.clone();

    let handle = tokio::spawn(async move {
        poller.run(loop_token).await;
    });

    wait_for_signal().await;
    tracing::info!("Shutting down");
    shutdown.cancel();
    handle.await.ok();
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration can fail in restricted environments (containers,
    // tests); fall back to plain Ctrl+C handling when it does.
    match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        _ => {
            tracing::warn!("Could not register unix signal handlers, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
