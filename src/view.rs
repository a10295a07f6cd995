//! View projection: sorting a result set and shaping it for export.
//!
//! Sorting orders by the chosen column and breaks ties by prior position.
//! Descending reverses that whole order, so sorting a column ascending and
//! then descending yields the exact reverse sequence.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::record::Book;

/// Header row of the CSV export.
pub const CSV_HEADER: [&str; 6] = ["Title", "Author", "Publisher", "Month", "Day", "Year"];

/// A sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Title,
    Author,
    Publisher,
    Month,
    Day,
    Year,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Title,
        SortKey::Author,
        SortKey::Publisher,
        SortKey::Month,
        SortKey::Day,
        SortKey::Year,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Publisher => "publisher",
            SortKey::Month => "month",
            SortKey::Day => "day",
            SortKey::Year => "year",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Compare two books on this column alone.
    fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Author => a.author.cmp(&b.author),
            SortKey::Publisher => a.publisher.cmp(&b.publisher),
            SortKey::Month => a.month.cmp(&b.month),
            SortKey::Day => a.day.cmp(&b.day),
            SortKey::Year => a.year.cmp(&b.year),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("Unknown column '{s}' (expected title, author, publisher, month, day, or year)")
            })
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn is_descending(self) -> bool {
        self == SortDirection::Descending
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("ascending"),
            SortDirection::Descending => f.write_str("descending"),
        }
    }
}

/// Return `results` ordered by `key`.
///
/// Ascending keeps equal keys in their prior order. Descending is the exact
/// reverse of ascending.
pub fn sort(results: &[Book], key: SortKey, descending: bool) -> Vec<Book> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    if descending {
        sorted.reverse();
    }
    sorted
}

/// Remembers, per column, which direction the next sort request uses.
///
/// The first request on a column sorts ascending; each later request on
/// the same column flips it. Columns toggle independently.
#[derive(Debug, Clone, Default)]
pub struct SortToggle {
    next: [SortDirection; 6],
}

impl SortToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction the next request on `key` would use.
    pub fn peek(&self, key: SortKey) -> SortDirection {
        self.next[key.index()]
    }

    /// Take the direction for `key` and flip the stored one.
    pub fn advance(&mut self, key: SortKey) -> SortDirection {
        let dir = self.next[key.index()];
        self.next[key.index()] = dir.toggled();
        dir
    }

    /// Record that `key` was just sorted in `dir`.
    pub fn set(&mut self, key: SortKey, dir: SortDirection) {
        self.next[key.index()] = dir.toggled();
    }
}

/// Header plus one row of string fields per book, in the given order.
pub fn to_csv_rows(results: &[Book]) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(results.len() + 1);
    rows.push(CSV_HEADER.iter().map(|h| h.to_string()).collect());
    for book in results {
        rows.push(vec![
            book.title.clone(),
            book.author.clone(),
            book.publisher.clone(),
            book.month.to_string(),
            book.day.to_string(),
            book.year.to_string(),
        ]);
    }
    rows
}
