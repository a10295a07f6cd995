//! CSV export of a result set.
//!
//! Rows end with `\r\n`. A field is quoted only when it contains a comma,
//! a double quote, or a line break; inner quotes are doubled.

use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::error::ExportError;
use crate::record::Book;
use crate::view::to_csv_rows;

const LINE_END: &str = "\r\n";

/// Quote a single field if it needs it.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\"")).into()
    } else {
        field.into()
    }
}

/// Encode rows as CSV text.
pub fn encode_csv<S: AsRef<str>>(rows: &[Vec<S>]) -> String {
    let mut out = String::new();
    for row in rows {
        let line = row
            .iter()
            .map(|f| escape_field(f.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push_str(LINE_END);
    }
    out
}

/// Write `results` as CSV to any writer.
pub fn write_csv<W: Write>(mut writer: W, results: &[Book]) -> io::Result<()> {
    writer.write_all(encode_csv(&to_csv_rows(results)).as_bytes())?;
    writer.flush()
}

/// Export `results` to the file at `path`, returning the number of data rows.
///
/// The whole document is encoded before the file is touched. An empty
/// result set is refused without writing anything.
pub fn export_csv(path: impl AsRef<Path>, results: &[Book]) -> Result<usize, ExportError> {
    let path = path.as_ref();
    if results.is_empty() {
        return Err(ExportError::NoResults);
    }
    let text = encode_csv(&to_csv_rows(results));
    fs::write(path, text).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = results.len(), "results exported");
    Ok(results.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal CSV reader for checking what we wrote.
    fn parse_csv(text: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match (c, in_quotes) {
                ('"', true) if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                ('"', true) => in_quotes = false,
                ('"', false) => in_quotes = true,
                (',', false) => row.push(std::mem::take(&mut field)),
                ('\r', false) => {}
                ('\n', false) => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                (c, _) => field.push(c),
            }
        }
        rows
    }

    fn sample() -> Vec<Book> {
        vec![
            Book::new("Plain", "Author", "Pub", 1, 2, 1950),
            Book::new("Comma, Title", "Quote \"Q\" Author", "Pub", 12, 31, 2001),
        ]
    }

    #[test]
    fn test_header_and_quoting() {
        let text = encode_csv(&to_csv_rows(&sample()));
        let mut lines = text.split("\r\n");
        assert_eq!(lines.next(), Some("Title,Author,Publisher,Month,Day,Year"));
        assert_eq!(lines.next(), Some("Plain,Author,Pub,1,2,1950"));
        assert_eq!(
            lines.next(),
            Some("\"Comma, Title\",\"Quote \"\"Q\"\" Author\",Pub,12,31,2001")
        );
    }

    #[test]
    fn test_output_reproduces_field_values() {
        let books = sample();
        let rows = parse_csv(&encode_csv(&to_csv_rows(&books)));
        assert_eq!(rows.len(), books.len() + 1);
        for (row, book) in rows[1..].iter().zip(&books) {
            assert_eq!(row[0], book.title);
            assert_eq!(row[1], book.author);
            assert_eq!(row[2], book.publisher);
            assert_eq!(row[3], book.month.to_string());
            assert_eq!(row[4], book.day.to_string());
            assert_eq!(row[5], book.year.to_string());
        }
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = export_csv(&path, &sample()).unwrap();
        assert_eq!(rows, 2);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Title,Author,Publisher,Month,Day,Year\r\n"));
        assert_eq!(parse_csv(&text).len(), 3);
    }

    #[test]
    fn test_export_empty_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let err = export_csv(&path, &[]).unwrap_err();
        assert!(matches!(err, ExportError::NoResults));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        let err = export_csv(&path, &sample()).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn test_write_csv_to_buffer() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &sample()[..1]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Title,Author,Publisher,Month,Day,Year\r\nPlain,Author,Pub,1,2,1950\r\n"
        );
    }
}
