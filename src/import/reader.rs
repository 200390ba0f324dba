// ABOUTME: Source reader turning a roster CSV into header-keyed raw rows
// ABOUTME: Validates the header, skips blank lines, and reports malformed rows with line numbers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use recruit_core::constants::columns;
use recruit_core::errors::{ImportError, ImportResult};
use tokio::task;
use tracing::{debug, info};

/// One data line of the source file, keyed by header name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCsvRow {
    line: u64,
    fields: HashMap<String, String>,
}

impl RawCsvRow {
    /// Build a row from its source line and header/value pairs
    #[must_use]
    pub const fn new(line: u64, fields: HashMap<String, String>) -> Self {
        Self { line, fields }
    }

    /// 1-based line number in the source file
    #[must_use]
    pub const fn line(&self) -> u64 {
        self.line
    }

    /// Trimmed cell value for a header, if the column exists
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Read and parse the roster file at `path`
///
/// # Errors
///
/// - `FileNotFound` if the path does not resolve
/// - `Io` if the file cannot be read
/// - `Parse` for undecodable content, a missing header row, or a row whose
///   column count differs from the header
/// - `MissingColumn` if a required header is absent
pub fn read_coach_csv(path: &Path) -> ImportResult<Vec<RawCsvRow>> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ImportError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ImportError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let rows = parse_rows(file, path)?;
    info!(
        file = %path.display(),
        rows = rows.len(),
        "Parsed coach roster"
    );
    Ok(rows)
}

/// Parse roster content from any reader (stdin, in-memory buffers)
///
/// # Errors
///
/// Same as [`read_coach_csv`] minus `FileNotFound`
pub fn parse_coach_csv<R: Read>(source: R) -> ImportResult<Vec<RawCsvRow>> {
    parse_rows(source, Path::new("-"))
}

/// [`read_coach_csv`] on the blocking thread pool
///
/// # Errors
///
/// Same as [`read_coach_csv`], plus `Task` if the blocking task panics
pub async fn read_coach_csv_blocking(path: PathBuf) -> ImportResult<Vec<RawCsvRow>> {
    task::spawn_blocking(move || read_coach_csv(&path))
        .await
        .map_err(|e| ImportError::Task {
            reason: format!("roster reader task failed: {e}"),
        })?
}

fn parse_rows<R: Read>(source: R, origin: &Path) -> ImportResult<Vec<RawCsvRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        // Column counts are checked per row so blank lines can be told apart from short rows
        .flexible(true)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| csv_error(origin, e))?
        .clone();
    check_headers(&headers)?;

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(csv_error(origin, e)),
        }

        let line = record.position().map_or(0, csv::Position::line);
        if record.iter().all(str::is_empty) {
            debug!(line, "Skipping blank line");
            continue;
        }
        if record.len() != headers.len() {
            return Err(ImportError::Parse {
                line: Some(line),
                reason: format!(
                    "expected {} fields but found {}",
                    headers.len(),
                    record.len()
                ),
            });
        }

        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_owned(), value.to_owned()))
            .collect();
        rows.push(RawCsvRow::new(line, fields));
    }

    Ok(rows)
}

fn check_headers(headers: &StringRecord) -> ImportResult<()> {
    if headers.iter().all(str::is_empty) {
        return Err(ImportError::Parse {
            line: Some(1),
            reason: "missing header row".into(),
        });
    }
    let mut seen = HashSet::new();
    if let Some(duplicate) = headers.iter().find(|h| !seen.insert(*h)) {
        return Err(ImportError::Parse {
            line: Some(1),
            reason: format!("duplicate column '{duplicate}'"),
        });
    }
    for &required in columns::REQUIRED {
        if !headers.iter().any(|h| h == required) {
            return Err(ImportError::MissingColumn { column: required });
        }
    }
    Ok(())
}

fn csv_error(origin: &Path, err: csv::Error) -> ImportError {
    let line = err.position().map(csv::Position::line);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => ImportError::Io {
            path: origin.to_path_buf(),
            source,
        },
        _ => ImportError::Parse { line, reason },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "Sport,School,Conference,Division,State,Coach Name,Coach Role,Email,Phone,Region";

    #[test]
    fn test_rows_keep_file_order_and_line_numbers() {
        let data = format!(
            "{HEADER}\nSoccer,State U,Big West,D1,CA,John Smith,Head Coach,js@su.edu,555-0100,West\n\
             Tennis,Tech,ACC,D1,GA, Cher ,Assistant,cher@tech.edu,,\n"
        );
        let rows = parse_coach_csv(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line(), 2);
        assert_eq!(rows[0].get("Coach Name"), Some("John Smith"));
        assert_eq!(rows[1].get("Coach Name"), Some("Cher"));
        assert_eq!(rows[1].get("Region"), Some(""));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let data = format!(
            "{HEADER}\n\nSoccer,State U,Big West,D1,CA,Ann Lee,Head Coach,a@su.edu,1,\n,,,,,,,,,\n"
        );
        let rows = parse_coach_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_short_row_is_a_parse_error_with_line() {
        let data = format!("{HEADER}\nSoccer,State U,Big West\n");
        let err = parse_coach_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::Parse { line: Some(2), .. }));
    }

    #[test]
    fn test_missing_required_column() {
        let data = "Sport,School,Conference,Division,State,Coach Name,Coach Role,Phone\n";
        let err = parse_coach_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn { column: "Email" }));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let data = format!("{HEADER},Email\nSoccer,State U,Big West,D1,CA,Ann Lee,Head Coach,a@su.edu,1,,b@su.edu\n");
        let err = parse_coach_csv(data.as_bytes()).unwrap_err();
        assert!(
            matches!(&err, ImportError::Parse { line: Some(1), reason } if reason.contains("'Email'")),
            "{err:?}"
        );
    }

    #[test]
    fn test_region_column_is_optional() {
        let data = "Sport,School,Conference,Division,State,Coach Name,Coach Role,Email,Phone\n\
                    Golf,Poly,MWC,D2,TX,Sam Ray,Head Coach,sr@poly.edu,\n";
        let rows = parse_coach_csv(data.as_bytes()).unwrap();
        assert_eq!(rows[0].get("Region"), None);
    }

    #[test]
    fn test_empty_file_has_no_header() {
        let err = parse_coach_csv(&b""[..]).unwrap_err();
        assert!(matches!(err, ImportError::Parse { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let mut data = format!("{HEADER}\n").into_bytes();
        data.extend_from_slice(b"Soccer,State U,Big West,D1,CA,J\xffn,Head,j@su.edu,1,\n");
        let err = parse_coach_csv(&data[..]).unwrap_err();
        assert!(matches!(err, ImportError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = read_coach_csv(Path::new("/nonexistent/coaches.csv")).unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_blocking_reader_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(
            file,
            "Soccer,State U,Big West,D1,CA,John Smith,Head Coach,js@su.edu,555,West"
        )
        .unwrap();

        let rows = read_coach_csv_blocking(file.path().to_path_buf())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Email"), Some("js@su.edu"));
    }
}
