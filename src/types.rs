use serde::{Deserialize, Serialize};

/// One listed book, as displayed on the listing page.
///
/// Every field holds the raw text read from the page: prices keep their
/// currency formatting and ratings are not parsed into numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRow {
    /// The text of the title anchor.
    pub title_text: String,
    /// The `href` attribute of the title anchor.
    pub title_link: String,
    /// The displayed (discounted) price.
    pub price: String,
    /// The displayed rating.
    pub review: String,
}

impl ListingRow {
    /// The fields in output column order.
    pub fn to_record(&self) -> [&str; 4] {
        [
            self.title_text.as_str(),
            self.title_link.as_str(),
            self.price.as_str(),
            self.review.as_str(),
        ]
    }
}

/// The rows collected during a crawl, in discovery order.
///
/// Append-only: rows are never removed, reordered or merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    rows: Vec<ListingRow>,
}

impl ResultTable {
    /// Creates an empty `ResultTable`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row after all rows collected so far.
    ///
    /// # Arguments
    ///
    /// * `row` - The extracted row.
    pub fn push(&mut self, row: ListingRow) {
        self.rows.push(row);
    }

    /// The number of rows collected.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no row has been collected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows in discovery order.
    ///
    /// # Returns
    ///
    /// A slice ordered by page, then by position within the page.
    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    /// Iterates over the rows in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, ListingRow> {
        self.rows.iter()
    }
}

impl Extend<ListingRow> for ResultTable {
    fn extend<I: IntoIterator<Item = ListingRow>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ListingRow;
    type IntoIter = std::slice::Iter<'a, ListingRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
