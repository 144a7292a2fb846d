//! IMDb listing server
//!
//! Serves listing endpoints as JSON. See `--help` for configuration.

use std::sync::Arc;

use clap::Parser;
use imdb_listing::config::ServerArgs;
use imdb_listing::fetch::HttpFetcher;
use imdb_listing::server::{self, AppState};
use imdb_listing::Extractor;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,imdb_listing=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ServerArgs::parse();
    let site = args.site_config()?;
    let extractor = Extractor::new(&site)?;
    let fetcher = HttpFetcher::new(&args.user_agent, args.timeout())?;

    tracing::info!(host = %site.host, timeout_secs = args.timeout_secs, "starting listing server");

    let state = AppState::new(Arc::new(fetcher), extractor, &site.host);
    server::run(args.bind, state).await?;

    Ok(())
}
