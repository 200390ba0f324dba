// ABOUTME: Error types for the coach roster import pipeline
// ABOUTME: Covers source reading, option validation, and per-batch transaction failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Import Errors
//!
//! Every stage of the pipeline reports failures through [`ImportError`]. Source
//! errors (`FileNotFound`, `Io`, `Parse`, `MissingColumn`) are raised before any
//! transaction opens. `Transaction` is raised by the batched loader after the
//! offending batch has been rolled back; batches committed before it stay committed.

use std::io;
use std::path::PathBuf;

/// Errors produced while importing a coach roster
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The source path does not resolve to a file
    #[error("Source file not found: {}", .path.display())]
    FileNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// The source file exists but could not be read
    #[error("Failed to read {}", .path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The file content is not valid delimited text
    #[error("Parse error{}: {reason}", line_suffix(.line))]
    Parse {
        /// 1-based line number when known
        line: Option<u64>,
        /// What the parser rejected
        reason: String,
    },

    /// A required column is missing from the header row
    #[error("Header row is missing required column '{column}'")]
    MissingColumn {
        /// Name of the missing column
        column: &'static str,
    },

    /// Import options failed validation
    #[error("Invalid import option '{field}': {reason}")]
    InvalidOptions {
        /// Option that was rejected
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// A batch could not be applied and was rolled back
    #[error(
        "Batch {batch} (rows {first_row}..{}) rolled back{}{}",
        range_end(.first_row, .rows),
        detail_suffix("constraint", .constraint),
        detail_suffix("table", .table)
    )]
    Transaction {
        /// 1-based batch number within the run
        batch: usize,
        /// Source index of the first row in the batch
        first_row: usize,
        /// Number of rows in the batch
        rows: usize,
        /// Violated constraint, when the driver reports one
        constraint: Option<String>,
        /// Offending table, when the driver reports one
        table: Option<String>,
        /// Underlying database error
        #[source]
        source: sqlx::Error,
    },

    /// A statement outside of a batch failed (schema, clear, count, checkpoint)
    #[error("Database error during {context}")]
    Database {
        /// Operation that failed
        context: &'static str,
        /// Underlying database error
        #[source]
        source: sqlx::Error,
    },

    /// The blocking reader task did not complete
    #[error("Background task failed: {reason}")]
    Task {
        /// Join failure description
        reason: String,
    },
}

impl ImportError {
    /// Invalid option helper
    pub fn invalid_options(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            field,
            reason: reason.into(),
        }
    }

    /// Parse error without a line number
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            line: None,
            reason: reason.into(),
        }
    }

    /// Wrap a database error with the operation it interrupted
    #[must_use]
    pub fn database(context: &'static str, source: sqlx::Error) -> Self {
        Self::Database { context, source }
    }

    /// Build a batch failure, pulling constraint and table names out of the driver error
    #[must_use]
    pub fn transaction(batch: usize, first_row: usize, rows: usize, source: sqlx::Error) -> Self {
        let (constraint, table) = match &source {
            sqlx::Error::Database(db_err) => (
                db_err.constraint().map(ToOwned::to_owned),
                db_err.table().map(ToOwned::to_owned),
            ),
            _ => (None, None),
        };
        Self::Transaction {
            batch,
            first_row,
            rows,
            constraint,
            table,
            source,
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

const fn range_end(first_row: &usize, rows: &usize) -> usize {
    *first_row + *rows
}

fn detail_suffix(label: &str, value: &Option<String>) -> String {
    value
        .as_deref()
        .map(|v| format!(", {label} '{v}'"))
        .unwrap_or_default()
}

/// Result alias for import operations
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_with_line() {
        let err = ImportError::Parse {
            line: Some(7),
            reason: "found record with 3 fields, but the previous record has 9 fields".into(),
        };
        assert!(err.to_string().starts_with("Parse error at line 7:"));
    }

    #[test]
    fn test_parse_error_display_without_line() {
        let err = ImportError::parse("stream did not contain valid UTF-8");
        assert_eq!(
            err.to_string(),
            "Parse error: stream did not contain valid UTF-8"
        );
    }
}
