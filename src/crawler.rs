use crate::{
    extractor::ListingExtractor, fetcher::ListingFetcher, writer, CrawlerConfig, ResultTable,
    Result,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, info};

/// The `Crawler` struct runs the listing pipeline: fetch, extract and append,
/// one page at a time, then a single write of the result table.
pub struct Crawler {
    /// Downloads listing pages.
    fetcher: ListingFetcher,
    /// Turns listing pages into rows.
    extractor: ListingExtractor,
    /// The crawl configuration.
    config: CrawlerConfig,
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    /// The number of listing pages fetched.
    pub pages_fetched: u32,
    /// The number of data rows in the output file.
    pub rows_written: usize,
    /// The file the table was written to.
    pub output_path: PathBuf,
}

impl Crawler {
    /// Creates a new `Crawler` with the given configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Crawler`, or an error if the configuration is
    /// inconsistent, a selector is invalid or the HTTP client cannot be built.
    pub fn new(config: CrawlerConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = ListingFetcher::new(&config)?;
        let extractor = ListingExtractor::new(&config.selectors)?;

        Ok(Self {
            fetcher,
            extractor,
            config,
        })
    }

    /// Fetches and extracts every page of the configured range, in order.
    ///
    /// The first fetch error aborts the crawl; rows collected so far are dropped.
    pub async fn collect(&self) -> Result<ResultTable> {
        self.collect_pages().await.map(|(table, _)| table)
    }

    /// Collects the table, then writes it to the configured output path.
    ///
    /// Nothing is written unless every page was fetched.
    pub async fn run(&self) -> Result<CrawlSummary> {
        let (table, pages_fetched) = self.collect_pages().await?;
        writer::write_table(&table, &self.config.output_path)?;

        Ok(CrawlSummary {
            pages_fetched,
            rows_written: table.len(),
            output_path: self.config.output_path.clone(),
        })
    }

    async fn collect_pages(&self) -> Result<(ResultTable, u32)> {
        let pages = self.config.pages();
        let total = u64::from(self.config.last_page - self.config.first_page) + 1;

        let progress = ProgressBar::new(total);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut table = ResultTable::new();
        let mut pages_fetched = 0;

        for page in pages {
            progress.set_message(format!("Fetching page {}", page));

            let html = match self.fetcher.fetch_page(page).await {
                Ok(html) => html,
                Err(e) => {
                    progress.abandon_with_message(format!("Failed on page {}", page));
                    return Err(e);
                }
            };
            pages_fetched += 1;

            let extraction = self.extractor.extract_page(&html);
            let found = extraction.rows.len();
            debug!(page, rows = found, skipped = extraction.skipped(), "Parsed page");
            table.extend(extraction.rows);
            progress.inc(1);

            if found == 0 && self.config.stop_on_empty_page {
                info!("Page {} has no listings, stopping", page);
                break;
            }
        }

        progress.finish_with_message(format!(
            "Completed: {} rows from {} pages",
            table.len(),
            pages_fetched
        ));
        Ok((table, pages_fetched))
    }
}
