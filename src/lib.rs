pub mod config;
pub mod extract;
pub mod fetch;
pub mod log;
pub mod scrape;
pub mod server;
pub mod sources;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::server::ScraperState;

pub async fn run(config_path: Option<&str>) -> Result<()> {
    info!("Bullion price service starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let silver_base = config
        .sources
        .silver
        .as_ref()
        .map_or(sources::PHU_QUY_BASE_URL, |s| &s.base_url);
    let gold_base = config
        .sources
        .gold
        .as_ref()
        .map_or(sources::PNJ_BASE_URL, |s| &s.base_url);

    let fetcher = fetch::HttpFetcher::new(Duration::from_millis(config.fetch.timeout_ms))?;
    let state = Arc::new(ScraperState {
        fetcher: Box::new(fetcher),
        silver: sources::silver(silver_base),
        gold: sources::gold(gold_base),
    });

    let app = server::build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running on http://{addr}");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
