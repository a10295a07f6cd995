//! Error types.
//!
//! Each user-facing failure has its own type so the caller can decide how
//! to present it. Per-line parse failures during a load are not errors at
//! all; the parser simply skips the line.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The query input a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    StartYear,
    EndYear,
    Month,
    Year,
    Author,
    Title,
}

impl QueryField {
    /// Lowercase name preceded by the right indefinite article.
    fn with_article(self) -> String {
        let name = self.to_string().to_lowercase();
        if name.starts_with(['a', 'e', 'i', 'o', 'u']) {
            format!("an {name}")
        } else {
            format!("a {name}")
        }
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryField::StartYear => "Start year",
            QueryField::EndYear => "End year",
            QueryField::Month => "Month",
            QueryField::Year => "Year",
            QueryField::Author => "Author",
            QueryField::Title => "Title",
        };
        f.write_str(name)
    }
}

/// The data file could not be read.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("failed to load '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A query parameter failed its type or range check. No query was run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a number.")]
    NotANumber { field: QueryField, input: String },
    #[error("{field} must be between {min} and {max}.")]
    OutOfRange {
        field: QueryField,
        value: i64,
        min: i32,
        max: i32,
    },
    #[error("Please enter {} query.", .field.with_article())]
    EmptyQuery { field: QueryField },
}

impl ValidationError {
    /// The offending input field.
    pub fn field(&self) -> QueryField {
        match self {
            ValidationError::NotANumber { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::EmptyQuery { field } => *field,
        }
    }
}

/// Writing the CSV export failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("There are no results to export.")]
    NoResults,
    #[error("failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A session script could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("Line {line}: {message}")]
    Syntax { line: usize, message: String },
}

/// Any error the crate can return, for callers that want a single type.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Script(#[from] ScriptError),
}
