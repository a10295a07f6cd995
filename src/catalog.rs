//! The catalog: every book from the most recent successful load.
//!
//! A load reads the whole file into a fresh sequence before anything is
//! returned, so a failed read never yields a mix of old and new books. The
//! caller swaps its catalog only when [`Catalog::load`] returns `Ok`.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::DataSource;
use crate::error::LoadError;
use crate::record::{Book, parse_books};

/// Label shown when no data file is loaded.
pub const NO_FILE_LABEL: &str = "(no file)";

/// An immutable snapshot of loaded books, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
    source: Option<PathBuf>,
}

impl Catalog {
    /// A catalog with no books and no source file.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from already-parsed books.
    pub fn from_books(books: Vec<Book>) -> Self {
        Self {
            books,
            source: None,
        }
    }

    /// Load the file at `path`.
    ///
    /// Lines that do not parse are skipped. Only failures to open or read the
    /// file (including invalid UTF-8) are errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let books = Self::read_books(BufReader::new(file)).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), books = books.len(), "catalog loaded");
        Ok(Self {
            books,
            source: Some(path.to_path_buf()),
        })
    }

    /// Open the startup data source. [`DataSource::None`] gives an empty
    /// catalog rather than an error.
    pub fn open(source: &DataSource) -> Result<Self, LoadError> {
        match source.path() {
            Some(path) => Self::load(path),
            None => {
                info!("no data file, starting with an empty catalog");
                Ok(Self::empty())
            }
        }
    }

    /// Read records from any buffered reader. `\n`, `\r\n` and a lone `\r`
    /// all end a line.
    pub fn read_books<R: BufRead>(mut reader: R) -> io::Result<Vec<Book>> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(parse_books(&text))
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// The file this catalog was loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The source file's base name, or [`NO_FILE_LABEL`].
    pub fn label(&self) -> String {
        self.source
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| NO_FILE_LABEL.to_string())
    }
}
