use crate::{config::SelectorConfig, CrawlerError, ListingRow, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

/// The `ListingExtractor` struct turns a listing page into rows.
/// It uses CSS selectors to locate the item containers and the fields inside them.
#[derive(Debug)]
pub struct ListingExtractor {
    /// Selects every item container of the page.
    item: Selector,
    /// Selects the title anchor inside a container.
    title: Selector,
    /// Selects the price node inside a container.
    price: Selector,
    /// Selects the rating node inside a container.
    review: Selector,
}

/// The outcome of extracting one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageExtraction {
    /// The complete rows, in document order.
    pub rows: Vec<ListingRow>,
    /// The number of item containers matched on the page.
    pub containers: usize,
}

impl PageExtraction {
    /// The number of containers dropped because a field was missing.
    pub fn skipped(&self) -> usize {
        self.containers - self.rows.len()
    }
}

impl ListingExtractor {
    /// Creates a new `ListingExtractor` from the given selectors.
    ///
    /// # Arguments
    ///
    /// * `selectors` - The container and field selectors.
    ///
    /// # Returns
    ///
    /// A `Result` containing the extractor, or a `SelectorError` naming the first selector that does not parse.
    pub fn new(selectors: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            item: parse_selector(&selectors.item)?,
            title: parse_selector(&selectors.title)?,
            price: parse_selector(&selectors.price)?,
            review: parse_selector(&selectors.review)?,
        })
    }

    /// Extracts every complete row from the given HTML string.
    pub fn extract(&self, html: &str) -> Vec<ListingRow> {
        self.extract_page(html).rows
    }

    /// Extracts every complete row from the given HTML string, keeping count of
    /// the containers that were matched.
    ///
    /// # Arguments
    ///
    /// * `html` - The HTML string to be parsed.
    ///
    /// # Returns
    ///
    /// A `PageExtraction` with the rows in document order.
    #[instrument(skip(self, html), fields(html_length = html.len()))]
    pub fn extract_page(&self, html: &str) -> PageExtraction {
        let document = Html::parse_document(html);

        let mut containers = 0;
        let rows: Vec<ListingRow> = document
            .select(&self.item)
            .inspect(|_| containers += 1)
            .filter_map(|item| self.extract_row(item))
            .collect();

        let extraction = PageExtraction { rows, containers };
        debug!(
            containers = extraction.containers,
            rows = extraction.rows.len(),
            skipped = extraction.skipped(),
            "Extracted listing page"
        );
        extraction
    }

    /// Reads the four fields of a single container.
    ///
    /// # Returns
    ///
    /// `None` if the title, its `href`, the price or the rating is absent.
    fn extract_row(&self, item: ElementRef<'_>) -> Option<ListingRow> {
        let title = item.select(&self.title).next()?;
        let title_link = title.value().attr("href")?.to_string();
        let price = item.select(&self.price).next()?;
        let review = item.select(&self.review).next()?;

        Some(ListingRow {
            title_text: Self::text_of(title),
            title_link,
            price: Self::text_of(price),
            review: Self::text_of(review),
        })
    }

    /// Concatenates all descendant text nodes, as displayed, without trimming.
    fn text_of(element: ElementRef<'_>) -> String {
        element.text().collect()
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| CrawlerError::SelectorError {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
