// ABOUTME: Coach roster import pipeline - reader, normalizer, batched loader
// ABOUTME: Exposes the single run_import entry point and its report types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Roster Import
//!
//! ```text
//! CSV file ──reader──▶ Vec<RawCsvRow> ──normalizer──▶ Vec<CoachRecord> ──loader──▶ coaches
//! ```
//!
//! The whole file is parsed before the first batch opens, so source errors
//! never leave partial data behind.

/// Batched, transactional loader
pub mod loader;
/// Raw row to `CoachRecord` mapping
pub mod normalizer;
/// Entry point and resume resolution
pub mod pipeline;
/// CSV source reader
pub mod reader;
/// Run report and status snapshot
pub mod report;

pub use loader::BatchedLoader;
pub use normalizer::{normalize_row, normalize_rows, split_name};
pub use pipeline::{import_status, resolve_start_index, run_import};
pub use reader::{parse_coach_csv, read_coach_csv, read_coach_csv_blocking, RawCsvRow};
pub use report::{BatchFailure, ImportReport, ImportStatus};
