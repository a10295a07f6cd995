//! Book records and the tab-separated line parser.
//!
//! Input lines look like:
//!
//! ```text
//! The Caine Mutiny\tHerman Wouk\tDoubleday\t01/06/1952
//! ```
//!
//! Parsing happens in two stages. The structural stage splits on tabs and
//! requires at least four fields; extra trailing fields are ignored. The
//! value stage splits the fourth field on `/` and requires exactly three
//! integer parts. A line failing either stage is skipped, never reported.
//!
//! No calendar check is made: `13/40/1990` parses to month 13, day 40.

use std::fmt;

/// One bestseller entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub month: i32,
    pub day: i32,
    pub year: i32,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publisher: impl Into<String>,
        month: i32,
        day: i32,
        year: i32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publisher: publisher.into(),
            month,
            day,
            year,
        }
    }

    /// Parse one line of the data file.
    ///
    /// Returns `None` when the line has fewer than four tab-separated fields
    /// or when its date is not three slash-separated integers.
    pub fn parse_line(line: &str) -> Option<Book> {
        let line = line.trim_end_matches(['\n', '\r']);
        let [title, author, publisher, date] = split_fields(line)?;
        let (month, day, year) = parse_date(date)?;
        Some(Book {
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            publisher: publisher.trim().to_string(),
            month,
            day,
            year,
        })
    }

    /// Multi-line summary shown for a single row.
    pub fn detail(&self) -> String {
        format!(
            "Title: {}\nAuthor: {}\nPublisher: {}\nDate: {}/{}/{}",
            self.title, self.author, self.publisher, self.month, self.day, self.year
        )
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}/{}/{}",
            self.title, self.author, self.publisher, self.month, self.day, self.year
        )
    }
}

/// Structural stage: the first four tab-separated fields.
fn split_fields(line: &str) -> Option<[&str; 4]> {
    let mut parts = line.split('\t');
    Some([parts.next()?, parts.next()?, parts.next()?, parts.next()?])
}

/// Value stage: `MM/DD/YYYY` as three integers, no zero-padding required.
fn parse_date(date: &str) -> Option<(i32, i32, i32)> {
    let mut parts = date.split('/');
    let month = parts.next()?.trim().parse().ok()?;
    let day = parts.next()?.trim().parse().ok()?;
    let year = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((month, day, year))
}

/// Parse every line of `text`, keeping only the lines that yield a book.
///
/// Lines end at `\n`, `\r\n`, or a lone `\r`.
pub fn parse_books(text: &str) -> Vec<Book> {
    text.split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .filter_map(Book::parse_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let book = Book::parse_line("Book A\tAuthor X\tPub 1\t01/15/1990").unwrap();
        assert_eq!(book, Book::new("Book A", "Author X", "Pub 1", 1, 15, 1990));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let book = Book::parse_line("  Dune \t Frank Herbert\tChilton  \t8/1/1965\r\n").unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.publisher, "Chilton");
        assert_eq!((book.month, book.day, book.year), (8, 1, 1965));
    }

    #[test]
    fn test_padding_irrelevant() {
        let a = Book::parse_line("T\tA\tP\t01/05/1990").unwrap();
        let b = Book::parse_line("T\tA\tP\t1/5/1990").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_few_fields_rejected() {
        assert!(Book::parse_line("Title\tAuthor\t01/01/1990").is_none());
        assert!(Book::parse_line("").is_none());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let book = Book::parse_line("T\tA\tP\t02/03/2001\textra\tmore").unwrap();
        assert_eq!((book.month, book.day, book.year), (2, 3, 2001));
    }

    #[test]
    fn test_bad_dates_rejected() {
        assert!(Book::parse_line("T\tA\tP\t01/1990").is_none());
        assert!(Book::parse_line("T\tA\tP\t01/02/03/1990").is_none());
        assert!(Book::parse_line("T\tA\tP\tJan/02/1990").is_none());
        assert!(Book::parse_line("T\tA\tP\t").is_none());
    }

    #[test]
    fn test_out_of_range_date_accepted() {
        let book = Book::parse_line("Book B\tAuthor Y\tPub 2\t13/40/1990").unwrap();
        assert_eq!((book.month, book.day, book.year), (13, 40, 1990));
    }

    #[test]
    fn test_empty_text_fields_tolerated() {
        let book = Book::parse_line("\t\t\t3/4/1950").unwrap();
        assert!(book.title.is_empty());
        assert!(book.author.is_empty());
        assert!(book.publisher.is_empty());
    }

    #[test]
    fn test_parse_books_skips_bad_lines() {
        let text = "A\tX\tP\t1/1/1950\n\nnot a record\nB\tY\tQ\t2/2/1960\nC\tZ\tR\tbad\n";
        let books = parse_books(text);
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "A");
        assert_eq!(books[1].title, "B");
    }

    #[test]
    fn test_detail_and_display() {
        let book = Book::new("Dune", "Frank Herbert", "Chilton", 8, 1, 1965);
        assert_eq!(
            book.detail(),
            "Title: Dune\nAuthor: Frank Herbert\nPublisher: Chilton\nDate: 8/1/1965"
        );
        assert_eq!(book.to_string(), "Dune\tFrank Herbert\tChilton\t8/1/1965");
    }
}
