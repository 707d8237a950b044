use anyhow::Context;
use bestseller_crawler::{CrawlerConfig, Crawler};
use std::time::Instant;
use tracing::info;

/// The main entry point of the application.
///
/// Initializes logging, loads the configuration, crawls the configured page
/// range and writes the collected rows to the output file.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = CrawlerConfig::load().context("failed to load configuration")?;
    info!(
        "Crawling pages {}..={} of {}",
        config.first_page, config.last_page, config.base_url
    );

    let start_time = Instant::now();

    let crawler = Crawler::new(config)?;
    let summary = crawler.run().await.context("crawl aborted")?;

    println!("\n=== Crawl Summary ===");
    println!("Pages fetched: {}", summary.pages_fetched);
    println!("Rows written: {}", summary.rows_written);
    println!("Output: {}", summary.output_path.display());
    println!("Processing time: {:.2?}", start_time.elapsed());

    Ok(())
}
