//! # bestsellers-rs
//!
//! Load a tab-separated list of bestselling books, search it, sort the
//! results, and export them as CSV.
//!
//! ## Overview
//!
//! Data flows through four stages:
//! - **Parse**: each `title\tauthor\tpublisher\tMM/DD/YYYY` line becomes a
//!   [`Book`], or is skipped if malformed
//! - **Catalog**: the books of one successful load, in file order
//! - **Query**: year range, month+year, author, title, or live search over
//!   the full catalog
//! - **View**: sort by any column and shape rows for CSV export
//!
//! A [`Session`] owns the catalog and the result set on display, and the
//! [`script`] module drives a session from a small command language.
//!
//! ## Example
//!
//! ```
//! use bestsellers_rs::{Book, SortKey, by_year_range, parse_books, sort};
//!
//! let books = parse_books(
//!     "The Firm\tJohn Grisham\tDoubleday\t03/24/1991\n\
//!      Carrie\tStephen King\tDoubleday\t04/05/1974\n\
//!      not a record\n\
//!      Misery\tStephen King\tViking\t06/14/1987\n",
//! );
//! assert_eq!(books.len(), 3);
//!
//! let hits = by_year_range(&books, 1995, 1970).unwrap();
//! let newest_first: Vec<Book> = sort(&hits, SortKey::Year, true);
//! assert_eq!(newest_first[0].title, "The Firm");
//! assert_eq!(newest_first[2].title, "Carrie");
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod query;
pub mod record;
pub mod script;
pub mod session;
pub mod view;

pub use catalog::{Catalog, NO_FILE_LABEL};
pub use config::{DEFAULT_FILE_NAME, DataSource, MONTH_MAX, MONTH_MIN, YEAR_MAX, YEAR_MIN};
pub use error::{BrowserError, ExportError, LoadError, QueryField, ScriptError, ValidationError};
pub use export::{encode_csv, export_csv, write_csv};
pub use query::{Criteria, by_author, by_month_year, by_title, by_year_range, live_search};
pub use record::{Book, parse_books};
pub use script::{Command, execute_script, parse_commands};
pub use session::Session;
pub use view::{CSV_HEADER, SortDirection, SortKey, SortToggle, sort, to_csv_rows};
