//! Binary entry point: env configuration, logging, eager login, poll loop.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ziu_notify::{Config, Poller, run_with_shutdown};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> ziu_notify::Result<()> {
    // A missing .env file is fine; real environment variables win.
    dotenvy::dotenv().ok();
    init_logging();

    let config = Config::from_env()?;
    let poller = Poller::new(&config)?;

    // The pre-loop login is the one fatal failure: at this point a rejection
    // cannot be told apart from permanently bad credentials.
    poller.login().await?;

    run_with_shutdown(poller).await;
    Ok(())
}
