use crate::{CrawlerConfig, CrawlerError, Result};
use reqwest::{Client, Url};
use tracing::{debug, instrument};

/// The `ListingFetcher` struct downloads bestseller listing pages.
/// It issues one plain GET per page with a shared `reqwest` client; failures are returned, never retried.
pub struct ListingFetcher {
    /// The HTTP client used for making requests.
    client: Client,
    /// The listing endpoint, without query string.
    base_url: String,
    /// The `cnt` query parameter.
    page_size: u32,
}

impl ListingFetcher {
    /// Creates a new `ListingFetcher` with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The crawl configuration; provides endpoint, page size, user agent and timeout.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `ListingFetcher` instance, or an error if the client could not be created.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent).gzip(true);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            page_size: config.page_size,
        })
    }

    /// Builds the listing URL for the given page.
    ///
    /// # Returns
    ///
    /// A `Result` containing the URL, or an error if the base URL does not parse.
    pub fn page_url(&self, page: u32) -> Result<Url> {
        let page = page.to_string();
        let page_size = self.page_size.to_string();
        let url = Url::parse_with_params(
            &self.base_url,
            [
                ("BestType", "Bestseller"),
                ("BranchType", "1"),
                ("CID", "0"),
                ("page", page.as_str()),
                ("cnt", page_size.as_str()),
                ("SortOrder", "1"),
            ],
        )
        .map_err(|e| {
            CrawlerError::ConfigError(::config::ConfigError::Message(format!(
                "invalid base_url `{}`: {}",
                self.base_url, e
            )))
        })?;
        Ok(url)
    }

    /// Fetches the body of the given listing page.
    ///
    /// # Arguments
    ///
    /// * `page` - The page number substituted into the listing URL.
    ///
    /// # Returns
    ///
    /// A `Result` containing the response body, or a `RequestError` on a transport failure or non-success status.
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, page: u32) -> Result<String> {
        let url = self.page_url(page)?;
        debug!("Listing URL: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        debug!("Response status: {}", status);

        let html = response.error_for_status()?.text().await?;
        debug!(bytes = html.len(), "Fetched listing page");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_query_order() {
        let fetcher = ListingFetcher::new(&CrawlerConfig::default()).unwrap();

        let url = fetcher.page_url(2).unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.aladin.co.kr/shop/common/wbest.aspx?BestType=Bestseller&BranchType=1&CID=0&page=2&cnt=1000&SortOrder=1"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = CrawlerConfig {
            base_url: "not a url".to_string(),
            ..CrawlerConfig::default()
        };
        let fetcher = ListingFetcher::new(&config).unwrap();

        assert!(matches!(fetcher.page_url(1), Err(CrawlerError::ConfigError(_))));
    }
}
