// ABOUTME: Batched loader applying normalized coach records in per-batch transactions
// ABOUTME: Handles clear-existing, start offset, limit, checkpoints, and failure policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Batched Loader
//!
//! Each batch is one transaction: a multi-row insert plus a checkpoint upsert.
//! A failed batch leaves nothing behind; batches committed before it stay
//! committed. Batches run strictly in order and are never retried.

use chrono::Utc;
use recruit_core::errors::{ImportError, ImportResult};
use recruit_core::models::CoachRecord;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::{FailurePolicy, ImportOptions};
use crate::database::checkpoints::{checkpoint_key, clear_checkpoints, upsert_checkpoint};
use crate::database::coaches::{clear_coaches, insert_coach_batch};
use crate::database::{Database, SqliteTransactionGuard};

use super::report::{BatchFailure, ImportReport};

/// Applies a normalized roster to storage according to [`ImportOptions`]
pub struct BatchedLoader<'a> {
    db: &'a Database,
    options: &'a ImportOptions,
    run_id: Uuid,
    source_key: String,
}

impl<'a> BatchedLoader<'a> {
    /// Loader for one run with a fresh run id
    #[must_use]
    pub fn new(db: &'a Database, options: &'a ImportOptions) -> Self {
        Self {
            db,
            options,
            run_id: Uuid::new_v4(),
            source_key: checkpoint_key(&options.file_path),
        }
    }

    /// Load `records` (the whole parsed file, in file order)
    ///
    /// # Errors
    ///
    /// - `Database` if the clear step fails (nothing is loaded)
    /// - `Transaction` for the first failed batch under `FailFast`
    pub async fn load(&self, records: &[CoachRecord]) -> ImportResult<ImportReport> {
        let started_at = Utc::now();
        let start_index = self.options.start_index;
        let batch_size = self.options.batch_size.max(1);

        let cleared_rows = if self.options.clear_existing {
            Some(self.clear_existing().await?)
        } else {
            None
        };

        let remaining = records.get(start_index..).unwrap_or_default();
        let selected = match self.options.limit {
            Some(limit) => &remaining[..limit.min(remaining.len())],
            None => remaining,
        };

        info!(
            run_id = %self.run_id,
            file = %self.source_key,
            records = records.len(),
            start_index,
            selected = selected.len(),
            batch_size,
            "Starting batched load"
        );
        if selected.is_empty() {
            info!(start_index, "Nothing to import past the start index");
        }

        let mut total_imported: u64 = 0;
        let mut batches_committed = 0;
        let mut failed_batches = Vec::new();
        let mut next_index = start_index.min(records.len());

        for (offset, batch) in selected.chunks(batch_size).enumerate() {
            let batch_no = offset + 1;
            let first_row = start_index + offset * batch_size;
            let batch_end = first_row + batch.len();

            match self.apply_batch(batch, batch_end).await {
                Ok(inserted) => {
                    total_imported += inserted;
                    batches_committed += 1;
                    next_index = batch_end;
                    info!(
                        batch = batch_no,
                        rows = batch.len(),
                        total_imported,
                        "Imported {total_imported} coaches so far"
                    );
                }
                Err(source) => {
                    let err = ImportError::transaction(batch_no, first_row, batch.len(), source);
                    let failure = BatchFailure::from_error(&err);
                    error!(
                        batch = batch_no,
                        first_row,
                        rows = batch.len(),
                        constraint = ?failure.as_ref().and_then(|f| f.constraint.as_deref()),
                        table = ?failure.as_ref().and_then(|f| f.table.as_deref()),
                        error = %err,
                        "Batch rolled back"
                    );
                    match self.options.failure_policy {
                        FailurePolicy::FailFast => return Err(err),
                        FailurePolicy::BestEffort => {
                            warn!(batch = batch_no, "Skipping failed batch (best effort)");
                            failed_batches.extend(failure);
                        }
                    }
                }
            }
        }

        info!(
            total_imported,
            batches_committed,
            batches_failed = failed_batches.len(),
            "Import complete: {total_imported} coaches imported"
        );

        Ok(ImportReport {
            run_id: self.run_id,
            source_path: self.source_key.clone(),
            records_read: records.len(),
            start_index,
            records_selected: selected.len(),
            cleared_rows,
            total_imported,
            batches_committed,
            failed_batches,
            next_index,
            started_at,
            finished_at: Utc::now(),
        })
    }

    async fn clear_existing(&self) -> ImportResult<u64> {
        let context = "clearing existing coaches";
        let tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| ImportError::database(context, e))?;
        let mut guard = SqliteTransactionGuard::new(tx);

        let conn = guard
            .executor()
            .map_err(|e| ImportError::database(context, e))?;
        let deleted = clear_coaches(conn)
            .await
            .map_err(|e| ImportError::database(context, e))?;
        clear_checkpoints(conn)
            .await
            .map_err(|e| ImportError::database(context, e))?;
        guard
            .commit()
            .await
            .map_err(|e| ImportError::database(context, e))?;

        info!(deleted, "Cleared existing coaches and reset identity sequence");
        Ok(deleted)
    }

    async fn apply_batch(&self, batch: &[CoachRecord], batch_end: usize) -> Result<u64, sqlx::Error> {
        let mut guard = SqliteTransactionGuard::new(self.db.pool().begin().await?);
        let conn = guard.executor()?;
        let inserted = insert_coach_batch(conn, batch).await?;
        upsert_checkpoint(conn, &self.source_key, batch_end as u64, self.run_id).await?;
        guard.commit().await?;
        Ok(inserted)
    }
}
