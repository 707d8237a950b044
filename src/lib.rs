use thiserror::Error;

pub mod config;
pub mod crawler;
pub mod extractor;
pub mod fetcher;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use config::{CrawlerConfig, SelectorConfig};
pub use crawler::{CrawlSummary, Crawler};
pub use types::{ListingRow, ResultTable};

/// The `CrawlerError` enum represents the errors that can abort a crawl.
///
/// A listing item with a missing field is not an error: the extractor drops it.
#[derive(Error, Debug)]
pub enum CrawlerError {
    /// Represents a transport failure or a non-success HTTP status.
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    /// Represents a CSS selector that could not be compiled.
    #[error("Invalid selector `{selector}`: {reason}")]
    SelectorError { selector: String, reason: String },
    /// Represents a failure while serializing the result table.
    #[error("CSV serialization failed: {0}")]
    CsvError(#[from] csv::Error),
    /// Represents a filesystem failure while writing the output.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Represents a configuration that could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
}

/// A type alias for `Result` with the `CrawlerError` error type.
pub type Result<T> = std::result::Result<T, CrawlerError>;

// Constants

/// The listing endpoint of the bestseller page.
pub const DEFAULT_BASE_URL: &str = "https://www.aladin.co.kr/shop/common/wbest.aspx";
/// The first page requested.
pub const DEFAULT_FIRST_PAGE: u32 = 1;
/// The last page requested (inclusive).
pub const DEFAULT_LAST_PAGE: u32 = 3;
/// The `cnt` query parameter sent with every listing request.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
/// The file the result table is written to.
pub const DEFAULT_OUTPUT_PATH: &str = "aladin_crawling.csv";
/// Header row of the output file.
pub const CSV_HEADER: [&str; 4] = ["title_text", "title_link", "price", "review"];
