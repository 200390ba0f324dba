// ABOUTME: Run report and status snapshot produced by the importer
// ABOUTME: Serializable summaries of committed and failed batches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use recruit_core::errors::ImportError;
use recruit_core::models::ImportCheckpoint;
use serde::Serialize;
use uuid::Uuid;

/// A batch that was rolled back under the best-effort policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    /// 1-based batch number within the run
    pub batch: usize,
    /// Source index of the first row
    pub first_row: usize,
    /// Rows in the batch
    pub rows: usize,
    /// Violated constraint, when reported
    pub constraint: Option<String>,
    /// Offending table, when reported
    pub table: Option<String>,
    /// Rendered error
    pub message: String,
}

impl BatchFailure {
    /// Extract the batch details from a transaction error
    #[must_use]
    pub fn from_error(err: &ImportError) -> Option<Self> {
        match err {
            ImportError::Transaction {
                batch,
                first_row,
                rows,
                constraint,
                table,
                source,
            } => Some(Self {
                batch: *batch,
                first_row: *first_row,
                rows: *rows,
                constraint: constraint.clone(),
                table: table.clone(),
                message: source.to_string(),
            }),
            _ => None,
        }
    }
}

/// Outcome of one import run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Identifier written into every checkpoint of the run
    pub run_id: Uuid,
    /// Source path as given
    pub source_path: String,
    /// Records parsed from the source
    pub records_read: usize,
    /// Source index the run started from
    pub start_index: usize,
    /// Records selected after the start index and limit
    pub records_selected: usize,
    /// Rows deleted by the clear step, if it ran
    pub cleared_rows: Option<u64>,
    /// Rows committed by this run
    pub total_imported: u64,
    /// Batches committed
    pub batches_committed: usize,
    /// Batches rolled back and skipped
    pub failed_batches: Vec<BatchFailure>,
    /// Source index after the last committed batch
    pub next_index: usize,
    /// Run start
    pub started_at: DateTime<Utc>,
    /// Run end
    pub finished_at: DateTime<Utc>,
}

impl ImportReport {
    /// True when every selected record was committed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed_batches.is_empty()
            && usize::try_from(self.total_imported).is_ok_and(|n| n == self.records_selected)
    }

    /// Number of records that belonged to rolled back batches
    #[must_use]
    pub fn skipped_records(&self) -> usize {
        self.failed_batches.iter().map(|f| f.rows).sum()
    }
}

/// Stored state for a source file, shown by `import-coaches --status`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportStatus {
    /// Rows currently in the coaches table
    pub coach_count: u64,
    /// Lowest and highest identity
    pub id_range: Option<(i64, i64)>,
    /// Checkpoint for the requested source
    pub checkpoint: Option<ImportCheckpoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_ignores_other_variants() {
        let err = ImportError::parse("bad quote");
        assert!(BatchFailure::from_error(&err).is_none());
    }

    #[test]
    fn test_from_error_copies_batch_details() {
        let err = ImportError::transaction(3, 20, 10, sqlx::Error::RowNotFound);
        let failure = BatchFailure::from_error(&err).unwrap();
        assert_eq!(failure.batch, 3);
        assert_eq!(failure.first_row, 20);
        assert_eq!(failure.rows, 10);
        assert_eq!(failure.constraint, None);
    }
}
