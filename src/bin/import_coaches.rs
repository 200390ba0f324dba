// ABOUTME: Coach roster import utility
// ABOUTME: Loads a roster CSV into the coaches table in batched transactions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Coach roster importer.
//!
//! Usage:
//! ```bash
//! # Fresh import (clears the table, identities restart at 1)
//! cargo run --bin import-coaches -- data/coaches.csv
//!
//! # Append records 5000.. without clearing
//! cargo run --bin import-coaches -- data/coaches.csv --append --start-index 5000
//!
//! # Continue after the last committed batch
//! cargo run --bin import-coaches -- data/coaches.csv --resume checkpoint
//!
//! # Show stored row count and checkpoint
//! cargo run --bin import-coaches -- data/coaches.csv --status
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use recruit_import::config::{
    DatabaseUrl, FailurePolicy, ImportOptions, ImporterConfig, ResumeMode,
};
use recruit_import::database::Database;
use recruit_import::import::{import_status, run_import};
use recruit_import::logging::LoggingConfig;
use tracing::{debug, error, info, warn};

/// Flags left unset fall back to `COACH_IMPORT_FILE`, `COACH_IMPORT_BATCH_SIZE`,
/// and `DATABASE_URL`, then to the built-in defaults
#[derive(Parser)]
#[command(
    name = "import-coaches",
    about = "Coach Roster Importer",
    long_about = "Import a college coach roster CSV into the coaches table in batched transactions, \
                  with fresh, append, and resume modes"
)]
struct ImportArgs {
    /// Roster CSV to import [default: data/coaches.csv]
    file: Option<PathBuf>,

    /// Records per batch transaction [default: 1000]
    #[arg(long)]
    batch_size: Option<usize>,

    /// Number of leading records to skip
    #[arg(long, default_value_t = 0)]
    start_index: usize,

    /// Maximum number of records to import
    #[arg(long)]
    limit: Option<usize>,

    /// Keep existing rows instead of clearing the table first
    #[arg(long)]
    append: bool,

    /// Derive the start index from storage: `checkpoint` or `row-count` (implies --append)
    #[arg(long, value_name = "MODE")]
    resume: Option<ResumeMode>,

    /// Skip failed batches instead of stopping (imported total may undercount)
    #[arg(long)]
    best_effort: bool,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Print stored row count and checkpoint without importing
    #[arg(long)]
    status: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl ImportArgs {
    /// Environment configuration with these flags applied on top
    fn config(&self) -> Result<ImporterConfig> {
        let mut config = ImporterConfig::from_env()?;

        if let Some(url) = &self.database_url {
            config.database.url = DatabaseUrl::parse_url(url)?;
        }

        let resume = self.resume.unwrap_or_default();
        let options = &mut config.import;
        if let Some(file) = &self.file {
            options.file_path.clone_from(file);
        }
        if let Some(batch_size) = self.batch_size {
            options.batch_size = batch_size;
        }
        options.start_index = self.start_index;
        options.limit = self.limit;
        options.clear_existing = !self.append && resume == ResumeMode::Explicit;
        options.resume = resume;
        options.failure_policy = if self.best_effort {
            FailurePolicy::BestEffort
        } else {
            FailurePolicy::FailFast
        };

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = ImportArgs::parse();

    let logging = if args.verbose {
        LoggingConfig::from_env().with_level("debug")
    } else {
        LoggingConfig::from_env()
    };
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!("=== Coach Roster Importer ===");

    let config = match args.config() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let db = match connect(&config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Import failed: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = if args.status {
        print_status(&db, &config.import.file_path).await
    } else {
        import(&db, &config.import).await
    };

    db.close().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Import failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn connect(config: &ImporterConfig) -> Result<Database> {
    Database::connect(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))
}

async fn import(db: &Database, options: &ImportOptions) -> Result<()> {
    info!(
        "Importing {} (batch size {}, {})",
        options.file_path.display(),
        options.batch_size,
        if options.clear_existing {
            "fresh"
        } else {
            "append"
        }
    );

    let report = run_import(db, options).await?;

    info!("");
    info!("=== Import Complete ===");
    info!("Imported {} coaches", report.total_imported);
    if !report.failed_batches.is_empty() {
        warn!(
            "{} batches ({} records) were rolled back and skipped",
            report.failed_batches.len(),
            report.skipped_records()
        );
    }
    info!("Next start index: {}", report.next_index);
    debug!("Report: {}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

async fn print_status(db: &Database, file: &Path) -> Result<()> {
    let status = import_status(db, file).await?;

    info!("=== Import Status ===");
    info!("Stored coaches: {}", status.coach_count);
    if let Some((min_id, max_id)) = status.id_range {
        info!("Identity range: {min_id}..={max_id}");
    }
    match &status.checkpoint {
        Some(checkpoint) => info!(
            "Checkpoint for {}: next index {} (run {}, updated {})",
            checkpoint.source_path,
            checkpoint.next_index,
            checkpoint.run_id,
            checkpoint.updated_at.to_rfc3339()
        ),
        None => info!("No checkpoint stored for {}", file.display()),
    }
    debug!("Status: {}", serde_json::to_string_pretty(&status)?);

    Ok(())
}
