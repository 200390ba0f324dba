// ABOUTME: Single import entry point composing reader, normalizer, and batched loader
// ABOUTME: Resolves the start index from the resume mode and reports stored status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use recruit_core::errors::{ImportError, ImportResult};
use tracing::{debug, info};

use crate::config::{ImportOptions, ResumeMode};
use crate::database::checkpoints::checkpoint_key;
use crate::database::Database;

use super::loader::BatchedLoader;
use super::normalizer::normalize_rows;
use super::reader::read_coach_csv_blocking;
use super::report::{ImportReport, ImportStatus};

/// Import the roster described by `options`
///
/// Replaces the fresh, resume, and append variants: a fresh run clears and
/// starts at 0, an append run keeps existing rows and starts at `start_index`,
/// and a resumed run derives its start index from storage.
///
/// # Errors
///
/// - `InvalidOptions` before anything is read
/// - source errors before any transaction opens
/// - `Database` / `Transaction` from the loader
pub async fn run_import(db: &Database, options: &ImportOptions) -> ImportResult<ImportReport> {
    options.validate()?;

    let rows = read_coach_csv_blocking(options.file_path.clone()).await?;
    let records = normalize_rows(&rows);
    debug!(records = records.len(), "Normalized roster rows");

    let start_index = resolve_start_index(db, options).await?;
    let resolved = ImportOptions {
        start_index,
        ..options.clone()
    };

    BatchedLoader::new(db, &resolved).load(&records).await
}

/// Start index a run should use for its resume mode
///
/// Checkpoint mode refuses to start at 0 over a non-empty table when the file
/// has no checkpoint, since that would append the whole file a second time.
///
/// # Errors
///
/// Returns an error if the row count or checkpoint cannot be read, or
/// `InvalidOptions` when a checkpoint resume has no checkpoint to resume from
pub async fn resolve_start_index(db: &Database, options: &ImportOptions) -> ImportResult<usize> {
    let start_index = match options.resume {
        ResumeMode::Explicit => options.start_index,
        ResumeMode::RowCount => to_index(db.count_coaches().await?),
        ResumeMode::Checkpoint => {
            let source = checkpoint_key(&options.file_path);
            match db.get_checkpoint(&source).await? {
                Some(checkpoint) => to_index(checkpoint.next_index),
                None => {
                    let stored = db.count_coaches().await?;
                    if stored > 0 {
                        return Err(ImportError::invalid_options(
                            "resume",
                            format!(
                                "no checkpoint for {source} but {stored} coaches are stored; \
                                 use --append with --start-index or a fresh import"
                            ),
                        ));
                    }
                    0
                }
            }
        }
    };
    if options.resume != ResumeMode::Explicit {
        info!(
            mode = %options.resume,
            start_index,
            "Resuming import"
        );
    }
    Ok(start_index)
}

/// Stored row count and checkpoint for `file_path`
///
/// # Errors
///
/// Returns an error if either query fails
pub async fn import_status(db: &Database, file_path: &Path) -> ImportResult<ImportStatus> {
    Ok(ImportStatus {
        coach_count: db.count_coaches().await?,
        id_range: db.coach_id_range().await?,
        checkpoint: db.get_checkpoint(&checkpoint_key(file_path)).await?,
    })
}

// An index past the end of the file imports nothing, so saturating is enough
fn to_index(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
