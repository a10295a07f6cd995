//! Query engine: filter criteria and the searches they drive.
//!
//! Every search scans the full catalog it is given and returns the matching
//! books in catalog order. Validation happens when a [`Criteria`] is built,
//! so an invalid input never reaches a scan.
//!
//! | Criteria | Matches |
//! |---|---|
//! | `YearRange` | `start <= year <= end` (bounds swapped if reversed) |
//! | `MonthYear` | exact month and year |
//! | `Author` / `Title` | case-insensitive substring |
//! | `Live` | case-insensitive substring of any text field, or of the decimal month, day, or year |

use crate::config::{MONTH_MAX, MONTH_MIN, YEAR_MAX, YEAR_MIN};
use crate::error::{QueryField, ValidationError};
use crate::record::Book;

/// A validated search request.
///
/// Text queries are stored trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criteria {
    /// Years from `start` to `end` inclusive, with `start <= end`.
    YearRange { start: i32, end: i32 },
    /// Exact month and year.
    MonthYear { month: i32, year: i32 },
    /// Author contains the query.
    Author(String),
    /// Title contains the query.
    Title(String),
    /// Any field contains the query. Empty matches everything.
    Live(String),
}

impl Criteria {
    /// Year range search. Both years must lie in `YEAR_MIN..=YEAR_MAX`;
    /// reversed bounds are swapped.
    pub fn year_range(start: i32, end: i32) -> Result<Self, ValidationError> {
        check_range(QueryField::StartYear, start.into(), YEAR_MIN, YEAR_MAX)?;
        check_range(QueryField::EndYear, end.into(), YEAR_MIN, YEAR_MAX)?;
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        Ok(Criteria::YearRange { start, end })
    }

    /// Month and year search.
    pub fn month_year(month: i32, year: i32) -> Result<Self, ValidationError> {
        check_range(QueryField::Month, month.into(), MONTH_MIN, MONTH_MAX)?;
        check_range(QueryField::Year, year.into(), YEAR_MIN, YEAR_MAX)?;
        Ok(Criteria::MonthYear { month, year })
    }

    /// Author substring search. Blank queries are rejected.
    pub fn author(query: &str) -> Result<Self, ValidationError> {
        Ok(Criteria::Author(required_text(QueryField::Author, query)?))
    }

    /// Title substring search. Blank queries are rejected.
    pub fn title(query: &str) -> Result<Self, ValidationError> {
        Ok(Criteria::Title(required_text(QueryField::Title, query)?))
    }

    /// Live search across all fields. Never fails.
    pub fn live(query: &str) -> Self {
        Criteria::Live(query.trim().to_lowercase())
    }

    /// Year range search from raw text input.
    pub fn parse_year_range(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = parse_int(QueryField::StartYear, start, YEAR_MIN, YEAR_MAX)?;
        let end = parse_int(QueryField::EndYear, end, YEAR_MIN, YEAR_MAX)?;
        Self::year_range(start, end)
    }

    /// Month and year search from raw text input.
    pub fn parse_month_year(month: &str, year: &str) -> Result<Self, ValidationError> {
        let month = parse_int(QueryField::Month, month, MONTH_MIN, MONTH_MAX)?;
        let year = parse_int(QueryField::Year, year, YEAR_MIN, YEAR_MAX)?;
        Self::month_year(month, year)
    }

    /// Does `book` satisfy this criteria?
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Criteria::YearRange { start, end } => (*start..=*end).contains(&book.year),
            Criteria::MonthYear { month, year } => book.month == *month && book.year == *year,
            Criteria::Author(q) => book.author.to_lowercase().contains(q.as_str()),
            Criteria::Title(q) => book.title.to_lowercase().contains(q.as_str()),
            Criteria::Live(q) => {
                q.is_empty()
                    || book.title.to_lowercase().contains(q.as_str())
                    || book.author.to_lowercase().contains(q.as_str())
                    || book.publisher.to_lowercase().contains(q.as_str())
                    || book.year.to_string().contains(q.as_str())
                    || book.month.to_string().contains(q.as_str())
                    || book.day.to_string().contains(q.as_str())
            }
        }
    }

    /// Scan `books` in order, keeping those that match.
    pub fn apply(&self, books: &[Book]) -> Vec<Book> {
        books.iter().filter(|b| self.matches(b)).cloned().collect()
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Criteria::YearRange { .. } => "year-range",
            Criteria::MonthYear { .. } => "month-year",
            Criteria::Author(_) => "author",
            Criteria::Title(_) => "title",
            Criteria::Live(_) => "live",
        }
    }
}

/// Books published between `start` and `end` inclusive.
pub fn by_year_range(books: &[Book], start: i32, end: i32) -> Result<Vec<Book>, ValidationError> {
    Ok(Criteria::year_range(start, end)?.apply(books))
}

/// Books published in `month` of `year`.
pub fn by_month_year(books: &[Book], month: i32, year: i32) -> Result<Vec<Book>, ValidationError> {
    Ok(Criteria::month_year(month, year)?.apply(books))
}

/// Books whose author contains `query`, ignoring case.
pub fn by_author(books: &[Book], query: &str) -> Result<Vec<Book>, ValidationError> {
    Ok(Criteria::author(query)?.apply(books))
}

/// Books whose title contains `query`, ignoring case.
pub fn by_title(books: &[Book], query: &str) -> Result<Vec<Book>, ValidationError> {
    Ok(Criteria::title(query)?.apply(books))
}

/// Books with `query` anywhere in their fields. An empty query returns all.
pub fn live_search(books: &[Book], query: &str) -> Vec<Book> {
    Criteria::live(query).apply(books)
}

fn check_range(field: QueryField, value: i64, min: i32, max: i32) -> Result<(), ValidationError> {
    if (i64::from(min)..=i64::from(max)).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn parse_int(field: QueryField, input: &str, min: i32, max: i32) -> Result<i32, ValidationError> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber {
            field,
            input: input.to_string(),
        })?;
    check_range(field, value, min, max)?;
    // In range, so it fits.
    Ok(value as i32)
}

fn required_text(field: QueryField, query: &str) -> Result<String, ValidationError> {
    let query = query.trim();
    if query.is_empty() {
        Err(ValidationError::EmptyQuery { field })
    } else {
        Ok(query.to_lowercase())
    }
}
