//! CLI tool to search a bestseller list.
//!
//! Usage:
//!   bestsellers years 1950 1959 --sort title
//!   bestsellers --file lists/nyt.txt author king --csv king.csv
//!   bestsellers run report.books
//!
//! Without `--file`, `bestsellers.txt` in the current directory is used if
//! present; otherwise the catalog starts empty.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use bestsellers_rs::{
    BrowserError, Catalog, DataSource, LoadError, Session, SortDirection, SortKey,
    execute_script,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Search, sort, and export a tab-separated bestseller list.
#[derive(Parser)]
#[command(name = "bestsellers")]
struct Cli {
    /// Data file (title, author, publisher, MM/DD/YYYY; tab-separated)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Sort results by column: title, author, publisher, month, day, year
    #[arg(short, long)]
    sort: Option<SortKey>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Also export the results to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Show data source and result counts on stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Show every book in the catalog
    List,
    /// Books published between two years (either order)
    Years { start: String, end: String },
    /// Books published in one month of one year
    Month { month: String, year: String },
    /// Books whose author contains the text
    Author { query: String },
    /// Books whose title contains the text
    Title { query: String },
    /// Books with the text anywhere in their fields
    Search {
        #[arg(default_value = "")]
        query: String,
    },
    /// Run a session script
    Run { script: PathBuf },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<String, BrowserError> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let source = DataSource::resolve(cli.file.as_deref(), &cwd);
    let catalog = Catalog::open(&source)?;

    if cli.verbose {
        eprintln!("Source:   {}", catalog.label());
        eprintln!("Books:    {}", catalog.len());
    }

    let mut session = Session::new(catalog);

    let script_output = match &cli.command {
        Action::List => None,
        Action::Years { start, end } => session.search_year_range(start, end).map(|_| None)?,
        Action::Month { month, year } => session.search_month_year(month, year).map(|_| None)?,
        Action::Author { query } => session.search_author(query).map(|_| None)?,
        Action::Title { query } => session.search_title(query).map(|_| None)?,
        Action::Search { query } => {
            session.live_search(query);
            None
        }
        Action::Run { script } => {
            let text = fs::read_to_string(script).map_err(|source| LoadError::Io {
                path: script.clone(),
                source,
            })?;
            Some(execute_script(&mut session, &text)?)
        }
    };

    if let Some(key) = cli.sort {
        let dir = if cli.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        session.sort_with(key, dir);
    }

    // Scripts print their own LIST output.
    let output = script_output.unwrap_or_else(|| {
        session
            .results()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    });

    if let Some(path) = &cli.csv {
        let rows = session.export(path)?;
        if cli.verbose {
            eprintln!("Exported: {rows} rows to {}", path.display());
        }
    }

    eprintln!("{}", session.status());
    Ok(output)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            if let Err(e) = io::stdout().write_all(output.as_bytes()) {
                eprintln!("Error writing output: {e}");
                process::exit(1);
            }
            if !output.is_empty() && !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
