//! Crawler binary: one full crawl pass over both sources.
//!
//! Initializes tracing, runs the orchestrator against an in-memory store,
//! and optionally exports everything crawled as a single JSON file for
//! downstream consumers.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use vn_news_crawler::{CrawlConfig, HttpFetcher, MemoryStore, NewsStore, run_crawl};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();

    let start_time = std::time::Instant::now();
    info!("vn_news_crawler starting up");

    let args = Cli::parse();
    debug!(?args.json_output_dir, ?args.vnexpress_limit, ?args.otofun_limit, "Parsed CLI arguments");

    let mut config = CrawlConfig::default();
    if let Some(limit) = args.vnexpress_limit {
        config.vnexpress.limit = limit;
    }
    if let Some(limit) = args.otofun_limit {
        config.otofun.limit = limit;
    }

    let fetcher = HttpFetcher::new(&config.user_agent, config.timeout)?;
    let store = MemoryStore::new();

    let summary = run_crawl(&config, &fetcher, &store).await?;
    info!(
        total = summary.total,
        vnexpress = summary.vnexpress,
        otofun = summary.otofun,
        failed_categories = summary.failed_categories,
        "Crawl finished"
    );

    if let Some(ref dir) = args.json_output_dir {
        if let Err(e) = write_news_json(&store, dir).await {
            error!(path = %dir, error = %e, "Failed to write JSON export");
            return Err(e);
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Serialize every stored article to `<dir>/all_news.json`.
async fn write_news_json(store: &MemoryStore, dir: &str) -> Result<(), Box<dyn Error>> {
    let articles = store.all().await?;
    let json = serde_json::to_string_pretty(&articles)?;

    info!(path = %dir, "Ensuring JSON export directory exists");
    tokio::fs::create_dir_all(dir).await?;

    let output_path = format!("{}/all_news.json", dir.trim_end_matches('/'));
    tokio::fs::write(&output_path, json).await?;
    info!(path = %output_path, count = articles.len(), "Wrote JSON export");

    Ok(())
}
