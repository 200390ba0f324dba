// ABOUTME: Persisted import checkpoint recording how far a source file has been imported
// ABOUTME: Written in the same transaction as every committed batch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Durable progress marker for one source file
///
/// `next_index` is the position (in the file's parsed record order) of the first
/// record that has not been committed yet. A resumed run starts there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCheckpoint {
    /// Source path as given to the importer
    pub source_path: String,
    /// Index of the next record to import
    pub next_index: u64,
    /// Run that last advanced the checkpoint
    pub run_id: Uuid,
    /// When the checkpoint was last written
    pub updated_at: DateTime<Utc>,
}
