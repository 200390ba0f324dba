// ABOUTME: Library entry point for the coach roster importer
// ABOUTME: Batched, resumable CSV to SQLite loading with checkpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recruit Import
//!
//! Bulk loader for college coach rosters. A roster CSV is read into memory,
//! normalized into [`CoachRecord`](models::CoachRecord)s, and written to the
//! `coaches` table in fixed-size batches, each inside its own transaction.
//!
//! ## Run modes
//!
//! - **Fresh**: clear the table, restart identities at 1, load from index 0
//! - **Append**: keep existing rows, load from an explicit start index
//! - **Resume**: keep existing rows, start at the stored checkpoint or row count
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recruit_import::config::ImportOptions;
//! use recruit_import::database::Database;
//! use recruit_import::errors::ImportResult;
//! use recruit_import::import::run_import;
//!
//! #[tokio::main]
//! async fn main() -> ImportResult<()> {
//!     let db = Database::in_memory().await?;
//!     let report = run_import(&db, &ImportOptions::fresh("data/coaches.csv")).await?;
//!     println!("Imported {} coaches", report.total_imported);
//!     db.close().await;
//!     Ok(())
//! }
//! ```

/// Environment and run configuration
pub mod config;

/// `SQLite` storage, schema, and transaction guard
pub mod database;

/// Error types
pub mod errors;

/// Reader, normalizer, batched loader, and entry point
pub mod import;

/// Structured logging setup
pub mod logging;

pub use recruit_core::{constants, models};
