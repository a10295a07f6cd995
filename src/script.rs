//! Session scripts: a line-oriented command language for driving a
//! [`Session`] without a user interface.
//!
//! Script format:
//! ```text
//! # Grisham titles of the early nineties, newest first
//! YEARS 1990 1995
//! LIVE "grisham"
//! SORT year DESC
//! LIST
//! EXPORT "grisham.csv"
//! ```
//!
//! Supported commands (keywords are case-insensitive):
//! - `OPEN "path"` - Load a data file, replacing the catalog
//! - `YEARS start end` - Books from `start` to `end` inclusive
//! - `MONTH month year` - Books from one month of one year
//! - `AUTHOR "text"` - Author contains text
//! - `TITLE "text"` - Title contains text
//! - `LIVE "text"` - Any field contains text (`LIVE` alone shows everything)
//! - `CLEAR` - Show the whole catalog again
//! - `SORT column [ASC|DESC]` - Sort; without a direction, toggles per column
//! - `LIST` - Emit the result set, one tab-separated row per line
//! - `COUNT` - Emit `COUNT=n`
//! - `STATUS` - Emit the status line
//! - `DETAIL n` - Emit the detail block for row `n` (1-based)
//! - `EXPORT "path"` - Write the result set as CSV
//! - Lines starting with `#` are comments
//!
//! Text arguments use the first non-blank character as the delimiter, so
//! `"king"`, `/king/` and `.king.` are the same.
//!
//! Malformed lines are syntax errors and nothing runs. Rejected input,
//! unreadable files, and failed exports are reported as `! message` lines;
//! the session is left as it was and the script carries on.

use crate::Session;
use crate::error::ScriptError;
use crate::view::{SortDirection, SortKey};

/// Parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// OPEN "path"
    Open { path: String },
    /// YEARS start end
    Years { start: String, end: String },
    /// MONTH month year
    Month { month: String, year: String },
    /// AUTHOR "text"
    Author { query: String },
    /// TITLE "text"
    Title { query: String },
    /// LIVE "text"
    Live { query: String },
    /// CLEAR
    Clear,
    /// SORT column [ASC|DESC]
    Sort {
        key: SortKey,
        direction: Option<SortDirection>,
    },
    /// LIST
    List,
    /// COUNT
    Count,
    /// STATUS
    Status,
    /// DETAIL n
    Detail { row: usize },
    /// EXPORT "path"
    Export { path: String },
}

impl Command {
    /// Get the command name for messages.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Open { .. } => "OPEN",
            Command::Years { .. } => "YEARS",
            Command::Month { .. } => "MONTH",
            Command::Author { .. } => "AUTHOR",
            Command::Title { .. } => "TITLE",
            Command::Live { .. } => "LIVE",
            Command::Clear => "CLEAR",
            Command::Sort { .. } => "SORT",
            Command::List => "LIST",
            Command::Count => "COUNT",
            Command::Status => "STATUS",
            Command::Detail { .. } => "DETAIL",
            Command::Export { .. } => "EXPORT",
        }
    }
}

/// Parse script text into commands.
pub fn parse_commands(text: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let cmd = parse_command(line).map_err(|message| ScriptError::Syntax {
            line: line_num + 1,
            message,
        })?;
        commands.push(cmd);
    }

    Ok(commands)
}

/// Parse a single command line.
fn parse_command(line: &str) -> Result<Command, String> {
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    match keyword.to_uppercase().as_str() {
        "OPEN" => Ok(Command::Open {
            path: parse_delimited_string(rest)?,
        }),
        "YEARS" => {
            let [start, end] = parse_two_numbers("YEARS", rest)?;
            Ok(Command::Years { start, end })
        }
        "MONTH" => {
            let [month, year] = parse_two_numbers("MONTH", rest)?;
            Ok(Command::Month { month, year })
        }
        "AUTHOR" => Ok(Command::Author {
            query: parse_delimited_string(rest)?,
        }),
        "TITLE" => Ok(Command::Title {
            query: parse_delimited_string(rest)?,
        }),
        "LIVE" if rest.is_empty() => Ok(Command::Live {
            query: String::new(),
        }),
        "LIVE" => Ok(Command::Live {
            query: parse_delimited_string(rest)?,
        }),
        "CLEAR" => no_arguments(Command::Clear, rest),
        "SORT" => parse_sort(rest),
        "LIST" => no_arguments(Command::List, rest),
        "COUNT" => no_arguments(Command::Count, rest),
        "STATUS" => no_arguments(Command::Status, rest),
        "DETAIL" => {
            let row: usize = rest.parse().map_err(|_| "DETAIL requires a row number")?;
            Ok(Command::Detail { row })
        }
        "EXPORT" => Ok(Command::Export {
            path: parse_delimited_string(rest)?,
        }),
        _ => Err(format!("Unknown command: {keyword}")),
    }
}

fn no_arguments(cmd: Command, rest: &str) -> Result<Command, String> {
    if rest.is_empty() {
        Ok(cmd)
    } else {
        Err(format!("{} takes no arguments", cmd.name()))
    }
}

/// Two whitespace-separated tokens. They are kept as text so that
/// non-numeric input is reported by query validation, not as a syntax error.
fn parse_two_numbers(name: &str, rest: &str) -> Result<[String; 2], String> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    match parts.as_slice() {
        [a, b] => Ok([a.to_string(), b.to_string()]),
        _ => Err(format!("{name} requires two values")),
    }
}

/// Parse SORT column [ASC|DESC].
fn parse_sort(rest: &str) -> Result<Command, String> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let (key, direction) = match parts.as_slice() {
        [key] => (key, None),
        [key, dir] => {
            let direction = match dir.to_uppercase().as_str() {
                "ASC" => SortDirection::Ascending,
                "DESC" => SortDirection::Descending,
                _ => return Err(format!("SORT direction must be ASC or DESC, not '{dir}'")),
            };
            (key, Some(direction))
        }
        _ => return Err("SORT requires a column".to_string()),
    };
    Ok(Command::Sort {
        key: key.parse()?,
        direction,
    })
}

/// Parse a delimited string. The first non-blank character is the
/// delimiter and the string runs to its next occurrence.
fn parse_delimited_string(s: &str) -> Result<String, String> {
    let s = s.trim_start();
    let Some(delim) = s.chars().next() else {
        return Err("Expected delimited string".to_string());
    };
    let after_delim = &s[delim.len_utf8()..];

    match after_delim.find(delim) {
        Some(end) if after_delim[end + delim.len_utf8()..].trim().is_empty() => {
            Ok(after_delim[..end].to_string())
        }
        Some(_) => Err("Unexpected text after closing delimiter".to_string()),
        None => Err(format!("Unclosed delimiter '{delim}'")),
    }
}

/// Run one command against the session, appending any output lines.
pub fn run_command(session: &mut Session, cmd: &Command, out: &mut Vec<String>) {
    let outcome: Result<(), String> = match cmd {
        Command::Open { path } => session.open(path).map(|_| ()).map_err(|e| e.to_string()),
        Command::Years { start, end } => session
            .search_year_range(start, end)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Command::Month { month, year } => session
            .search_month_year(month, year)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Command::Author { query } => session
            .search_author(query)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Command::Title { query } => session
            .search_title(query)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Command::Live { query } => {
            session.live_search(query);
            Ok(())
        }
        Command::Clear => {
            session.clear();
            Ok(())
        }
        Command::Sort { key, direction } => {
            match direction {
                Some(dir) => session.sort_with(*key, *dir),
                None => {
                    session.sort_by(*key);
                }
            }
            Ok(())
        }
        Command::List => {
            out.extend(session.results().iter().map(ToString::to_string));
            Ok(())
        }
        Command::Count => {
            out.push(format!("COUNT={}", session.results().len()));
            Ok(())
        }
        Command::Status => {
            out.push(session.status());
            Ok(())
        }
        Command::Detail { row } => match session.detail(*row) {
            Some(detail) => {
                out.extend(detail.lines().map(str::to_string));
                Ok(())
            }
            None => Err(format!("No row {row}")),
        },
        Command::Export { path } => session
            .export(path)
            .map(|rows| out.push(format!("Saved {rows} rows to {path}")))
            .map_err(|e| e.to_string()),
    };

    if let Err(message) = outcome {
        out.push(format!("! {message}"));
    }
}

/// Execute script text against a session.
///
/// Returns the output text on success. The whole script is parsed before
/// any command runs.
pub fn execute_script(session: &mut Session, text: &str) -> Result<String, ScriptError> {
    let commands = parse_commands(text)?;
    let mut out = Vec::new();
    for cmd in &commands {
        run_command(session, cmd, &mut out);
    }
    Ok(out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::record::Book;
    use std::fs;
    use std::path::Path;

    fn session() -> Session {
        Session::new(Catalog::from_books(vec![
            Book::new("The Firm", "John Grisham", "Doubleday", 3, 24, 1991),
            Book::new("The Pelican Brief", "John Grisham", "Doubleday", 3, 22, 1992),
            Book::new("Carrie", "Stephen King", "Doubleday", 4, 5, 1974),
            Book::new("Hawaii", "James A. Michener", "Random House", 12, 6, 1959),
        ]))
    }

    #[test]
    fn test_parse_years() {
        let cmd = parse_command("YEARS 1990 1995").unwrap();
        assert_eq!(
            cmd,
            Command::Years {
                start: "1990".to_string(),
                end: "1995".to_string()
            }
        );
    }

    #[test]
    fn test_parse_delimiters() {
        let a = parse_command(r#"author "king""#).unwrap();
        let b = parse_command("AUTHOR /king/").unwrap();
        assert_eq!(a, b);
        assert!(parse_command(r#"AUTHOR "king"#).is_err());
        assert!(parse_command(r#"AUTHOR "king" extra"#).is_err());
    }

    #[test]
    fn test_parse_sort() {
        let cmd = parse_command("SORT year desc").unwrap();
        assert_eq!(
            cmd,
            Command::Sort {
                key: SortKey::Year,
                direction: Some(SortDirection::Descending)
            }
        );
        let cmd = parse_command("SORT title").unwrap();
        assert_eq!(
            cmd,
            Command::Sort {
                key: SortKey::Title,
                direction: None
            }
        );
        assert!(parse_command("SORT isbn").is_err());
        assert!(parse_command("SORT year sideways").is_err());
    }

    #[test]
    fn test_parse_live_without_text() {
        assert_eq!(
            parse_command("LIVE").unwrap(),
            Command::Live {
                query: String::new()
            }
        );
    }

    #[test]
    fn test_syntax_error_names_line() {
        let err = parse_commands("# comment\nLIST\nFROB 3").unwrap_err();
        assert_eq!(
            err,
            ScriptError::Syntax {
                line: 3,
                message: "Unknown command: FROB".to_string()
            }
        );
        assert_eq!(err.to_string(), "Line 3: Unknown command: FROB");
    }

    #[test]
    fn test_syntax_error_runs_nothing() {
        let mut s = session();
        let result = execute_script(&mut s, "AUTHOR \"king\"\nYEARS 1990");
        assert!(result.is_err());
        assert_eq!(s.results().len(), 4);
    }

    #[test]
    fn test_execute_search_and_sort() {
        let mut s = session();
        let script = r#"
            YEARS 1990 1995
            SORT day
            LIST
            COUNT
        "#;
        let output = execute_script(&mut s, script).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "The Pelican Brief\tJohn Grisham\tDoubleday\t3/22/1992",
                "The Firm\tJohn Grisham\tDoubleday\t3/24/1991",
                "COUNT=2",
            ]
        );
    }

    #[test]
    fn test_validation_errors_are_reported_and_skipped() {
        let mut s = session();
        let script = "AUTHOR \"king\"\nMONTH 13 1990\nYEARS abc 1990\nTITLE \"  \"\nCOUNT";
        let output = execute_script(&mut s, script).unwrap();
        assert_eq!(
            output,
            "! Month must be between 1 and 12.\n\
             ! Start year must be a number.\n\
             ! Please enter a title query.\n\
             COUNT=1"
        );
    }

    #[test]
    fn test_sort_toggle_in_script() {
        let mut s = session();
        let output = execute_script(&mut s, "SORT year\nSORT year\nDETAIL 1").unwrap();
        assert!(output.starts_with("Title: The Pelican Brief\n"));
    }

    #[test]
    fn test_detail_out_of_range() {
        let mut s = session();
        let output = execute_script(&mut s, "LIVE \"zzz\"\nDETAIL 1\nSTATUS").unwrap();
        assert_eq!(output, "! No row 1\nShowing 0 result(s).");
    }

    #[test]
    fn test_open_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("books.txt");
        let csv = dir.path().join("out.csv");
        fs::write(&data, "Dune\tFrank Herbert\tChilton\t8/1/1965\n").unwrap();

        let mut s = session();
        let script = format!(
            "OPEN \"{}\"\nEXPORT \"{}\"\nLIVE \"nothing\"\nEXPORT \"{}\"",
            data.display(),
            csv.display(),
            csv.display()
        );
        let output = execute_script(&mut s, &script).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Saved 1 rows to "));
        assert_eq!(lines[1], "! There are no results to export.");
        let text = fs::read_to_string(&csv).unwrap();
        assert!(text.contains("Dune,Frank Herbert,Chilton,8,1,1965"));
    }

    /// Run a script from `fixtures/` against the sample data file.
    fn run_fixture(script_name: &str) -> String {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let catalog = Catalog::load(dir.join("bestsellers-sample.txt")).unwrap();
        let script = fs::read_to_string(dir.join(script_name)).unwrap();
        let mut s = Session::new(catalog);
        execute_script(&mut s, &script).unwrap()
    }

    /// Compare against the `.expected` file next to the script.
    fn assert_fixture(script_name: &str) {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let expected_name = script_name.replace(".books", ".expected");
        let expected = fs::read_to_string(dir.join(&expected_name)).unwrap();
        assert_eq!(
            run_fixture(script_name),
            expected.trim_end(),
            "output differs for {script_name}"
        );
    }

    macro_rules! fixture_test {
        ($name:ident, $file:expr) => {
            #[test]
            fn $name() {
                assert_fixture($file);
            }
        };
    }

    fixture_test!(script_fifties_by_title, "fifties-by-title.books");
    fixture_test!(script_author_king, "author-king.books");
    fixture_test!(script_month_year, "month-year.books");
    fixture_test!(script_live_numeric, "live-numeric.books");
    fixture_test!(script_invalid_input, "invalid-input.books");
}
