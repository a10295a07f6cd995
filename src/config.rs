//! Configuration constants and data-file resolution.

use std::path::{Path, PathBuf};

/// Earliest year accepted by year-based queries.
pub const YEAR_MIN: i32 = 1942;
/// Latest year accepted by year-based queries.
pub const YEAR_MAX: i32 = 2013;
/// Lowest month accepted by month+year queries.
pub const MONTH_MIN: i32 = 1;
/// Highest month accepted by month+year queries.
pub const MONTH_MAX: i32 = 12;
/// File loaded when no explicit path is supplied.
pub const DEFAULT_FILE_NAME: &str = "bestsellers.txt";

/// Where the catalog should come from at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A path the user asked for. It must exist.
    Explicit(PathBuf),
    /// The default file, found in the current directory.
    Default(PathBuf),
    /// No explicit path and no default file: start empty.
    None,
}

impl DataSource {
    /// Resolve the startup data source.
    ///
    /// An explicit path is returned as-is, even if it does not exist, so the
    /// loader can report it. Without one, the default file name is looked up
    /// in `dir`; when it is absent the result is [`DataSource::None`].
    ///
    /// A missing explicit path deliberately does not fall back to the default
    /// file, even when one exists; loading it reports `LoadError::NotFound`.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Self {
        if let Some(path) = explicit {
            return DataSource::Explicit(path.to_path_buf());
        }
        let default = dir.join(DEFAULT_FILE_NAME);
        if default.is_file() {
            DataSource::Default(default)
        } else {
            DataSource::None
        }
    }

    /// The path to load, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            DataSource::Explicit(p) | DataSource::Default(p) => Some(p),
            DataSource::None => None,
        }
    }
}
