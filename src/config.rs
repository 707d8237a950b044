use crate::{CrawlerError, Result};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Name of the optional configuration file, looked up in the working directory
/// with any extension the `config` crate understands (`bestseller.toml`, ...).
pub const CONFIG_FILE: &str = "bestseller";
/// Prefix of the environment variables overriding the configuration.
pub const ENV_PREFIX: &str = "BESTSELLER";

/// The `CrawlerConfig` struct holds the configuration settings for a crawl.
/// Its `Default` reproduces the fixed three-page bestseller crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// The listing endpoint, without query string.
    pub base_url: String,
    /// The first page requested.
    pub first_page: u32,
    /// The last page requested (inclusive).
    pub last_page: u32,
    /// The number of items requested per page (`cnt` query parameter).
    pub page_size: u32,
    /// The file the result table is written to. Overwritten on every run.
    pub output_path: PathBuf,
    /// The user agent string to be used in HTTP requests.
    pub user_agent: String,
    /// The timeout for a single HTTP request, in seconds. Unset waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// End the page loop at the first page that yields no rows.
    pub stop_on_empty_page: bool,
    /// The CSS selectors describing a listing page.
    pub selectors: SelectorConfig,
}

/// The `SelectorConfig` struct holds the CSS selectors matched against a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Selects every item container of the page.
    pub item: String,
    /// Selects the title anchor inside a container; provides text and `href`.
    pub title: String,
    /// Selects the price node inside a container.
    pub price: String,
    /// Selects the rating node inside a container.
    pub review: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(crate::DEFAULT_BASE_URL),
            first_page: crate::DEFAULT_FIRST_PAGE,
            last_page: crate::DEFAULT_LAST_PAGE,
            page_size: crate::DEFAULT_PAGE_SIZE,
            output_path: PathBuf::from(crate::DEFAULT_OUTPUT_PATH),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
            stop_on_empty_page: false,
            selectors: SelectorConfig::default(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            item: String::from("#Myform > .ss_book_box"),
            title: String::from(".bo3"),
            price: String::from(".ss_p2"),
            review: String::from(".star_score"),
        }
    }
}

impl CrawlerConfig {
    /// Loads the configuration from the optional `bestseller.*` file and
    /// `BESTSELLER_*` environment variables, falling back to the defaults.
    ///
    /// # Returns
    ///
    /// A `Result` containing the validated configuration.
    pub fn load() -> Result<Self> {
        let config: CrawlerConfig = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects page ranges that would never issue a request.
    pub fn validate(&self) -> Result<()> {
        if self.first_page > self.last_page {
            return Err(CrawlerError::ConfigError(::config::ConfigError::Message(format!(
                "first_page ({}) is after last_page ({})",
                self.first_page, self.last_page
            ))));
        }
        Ok(())
    }

    /// The timeout for a single HTTP request, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// The inclusive range of pages to crawl.
    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        self.first_page..=self.last_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_fixed_crawl() {
        let config = CrawlerConfig::default();

        assert_eq!(config.pages().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(config.page_size, 1000);
        assert_eq!(config.output_path, PathBuf::from("aladin_crawling.csv"));
        assert_eq!(config.selectors.item, "#Myform > .ss_book_box");
        assert!(!config.stop_on_empty_page);
        assert_eq!(config.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: CrawlerConfig = Config::builder()
            .add_source(File::from_str(
                "last_page = 5\n[selectors]\nprice = \".price\"\n",
                ::config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.last_page, 5);
        assert_eq!(config.first_page, 1);
        assert_eq!(config.selectors.price, ".price");
        assert_eq!(config.selectors.title, ".bo3");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_timeout_from_source() {
        let config: CrawlerConfig = Config::builder()
            .add_source(File::from_str("timeout_secs = 10", ::config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
    }

    /// Tests that `load` layers `BESTSELLER_*` variables, nested keys
    /// included, over the defaults.
    #[test]
    fn test_load_from_environment() {
        std::env::set_var("BESTSELLER_LAST_PAGE", "7");
        std::env::set_var("BESTSELLER_SELECTORS__PRICE", ".price");

        let result = CrawlerConfig::load();

        std::env::remove_var("BESTSELLER_LAST_PAGE");
        std::env::remove_var("BESTSELLER_SELECTORS__PRICE");

        let config = result.unwrap();
        let expected = CrawlerConfig {
            last_page: 7,
            selectors: SelectorConfig {
                price: ".price".to_string(),
                ..SelectorConfig::default()
            },
            ..CrawlerConfig::default()
        };
        assert_eq!(config, expected);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = CrawlerConfig {
            first_page: 4,
            last_page: 2,
            ..CrawlerConfig::default()
        };

        assert!(matches!(config.validate(), Err(CrawlerError::ConfigError(_))));
    }
}
