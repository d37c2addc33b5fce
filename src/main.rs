use crate::config::Config;
use crate::predict::App;
use crate::router::serve;
use anyhow::{Context, Result};
use astra::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod data;
mod domain;
mod errors;
mod inference;
mod predict;
mod rates;
mod responses;
mod router;

#[cfg(test)]
mod tests;

fn main() -> Result<()> {
    // 1️⃣ Logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,house_price_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2️⃣ Configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(variant = config.variant.as_str(), "configuration loaded");

    // 3️⃣ Load the model and its artifacts; any missing file stops startup here
    let app = App::load(&config)?;

    // 4️⃣ Start the server
    tracing::info!(
        addr = %config.addr,
        workers = config.max_workers,
        "starting server at http://{}",
        config.addr
    );

    let server = Server::bind(&config.addr).max_workers(config.max_workers);

    // 5️⃣ Serve requests; the loaded model is shared read-only by every worker
    server
        .serve(move |req, _info| serve(req, &app))
        .context("Server ended with error")?;

    tracing::info!("Server shut down cleanly.");
    Ok(())
}
