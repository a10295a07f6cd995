//! A browsing session: the current catalog and the result set on display.
//!
//! The session is the only holder of mutable state. Every search reads the
//! full catalog and replaces the result set; a failed search, load, or export
//! leaves both untouched.

use std::path::Path;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{ExportError, LoadError, ValidationError};
use crate::export::export_csv;
use crate::query::Criteria;
use crate::record::Book;
use crate::view::{SortDirection, SortKey, SortToggle, sort};

#[derive(Debug, Clone, Default)]
pub struct Session {
    catalog: Catalog,
    results: Vec<Book>,
    live_query: String,
    toggle: SortToggle,
}

impl Session {
    /// Start a session showing the whole catalog.
    pub fn new(catalog: Catalog) -> Self {
        let results = catalog.books().to_vec();
        Self {
            catalog,
            results,
            live_query: String::new(),
            toggle: SortToggle::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The result set currently on display.
    pub fn results(&self) -> &[Book] {
        &self.results
    }

    /// The last live-search text, as typed.
    pub fn live_query(&self) -> &str {
        &self.live_query
    }

    /// Load a new data file. The catalog is replaced only if the read
    /// succeeds; the result set then shows the whole new catalog.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let catalog = Catalog::load(path)?;
        self.replace_catalog(catalog);
        Ok(self.catalog.len())
    }

    /// Swap in an already-loaded catalog.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        info!(source = %catalog.label(), books = catalog.len(), "catalog replaced");
        self.catalog = catalog;
        self.clear();
    }

    /// Run a validated search against the full catalog.
    pub fn search(&mut self, criteria: &Criteria) -> usize {
        self.results = criteria.apply(self.catalog.books());
        debug!(criteria = criteria.name(), hits = self.results.len(), "search");
        self.results.len()
    }

    /// Year range search from raw input. On error the result set is kept.
    pub fn search_year_range(&mut self, start: &str, end: &str) -> Result<usize, ValidationError> {
        let criteria = Criteria::parse_year_range(start, end)?;
        Ok(self.search(&criteria))
    }

    /// Month and year search from raw input. On error the result set is kept.
    pub fn search_month_year(&mut self, month: &str, year: &str) -> Result<usize, ValidationError> {
        let criteria = Criteria::parse_month_year(month, year)?;
        Ok(self.search(&criteria))
    }

    pub fn search_author(&mut self, query: &str) -> Result<usize, ValidationError> {
        let criteria = Criteria::author(query)?;
        Ok(self.search(&criteria))
    }

    pub fn search_title(&mut self, query: &str) -> Result<usize, ValidationError> {
        let criteria = Criteria::title(query)?;
        Ok(self.search(&criteria))
    }

    /// Re-run the live search with new text.
    pub fn live_search(&mut self, query: &str) -> usize {
        self.live_query = query.to_string();
        self.search(&Criteria::live(query))
    }

    /// Show the whole catalog again and clear the live query.
    pub fn clear(&mut self) {
        self.live_query.clear();
        self.results = self.catalog.books().to_vec();
    }

    /// Sort by `key`, alternating direction on repeated requests for the
    /// same column.
    pub fn sort_by(&mut self, key: SortKey) -> SortDirection {
        let dir = self.toggle.advance(key);
        self.apply_sort(key, dir);
        dir
    }

    /// Sort by `key` in an explicit direction.
    pub fn sort_with(&mut self, key: SortKey, dir: SortDirection) {
        self.toggle.set(key, dir);
        self.apply_sort(key, dir);
    }

    fn apply_sort(&mut self, key: SortKey, dir: SortDirection) {
        self.results = sort(&self.results, key, dir.is_descending());
        debug!(column = %key, direction = %dir, "sorted");
    }

    /// Write the result set, in its current order, as CSV.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<usize, ExportError> {
        export_csv(path, &self.results)
    }

    /// Detail text for the 1-based `row` of the result set.
    pub fn detail(&self, row: usize) -> Option<String> {
        row.checked_sub(1)
            .and_then(|i| self.results.get(i))
            .map(Book::detail)
    }

    /// Footer text, e.g. `Showing 3 result(s).`
    pub fn status(&self) -> String {
        format!("Showing {} result(s).", self.results.len())
    }
}
