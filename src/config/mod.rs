// ABOUTME: Configuration module for the coach roster importer
// ABOUTME: Environment-first settings for the database connection and import runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the importer
//!
//! Settings come from environment variables first; command-line flags on the
//! `import-coaches` binary override them field by field.
//!
//! - **Database**: `DATABASE_URL` and `SQLx` pool tuning
//! - **Import**: source file, batch size, offsets, failure policy, resume mode

/// Database connection configuration
pub mod database;
/// Import run options
pub mod import;

pub use database::{DatabaseConfig, DatabaseUrl, SqlxConfig};
pub use import::{FailurePolicy, ImportOptions, ResumeMode};

use recruit_core::errors::ImportResult;
use tracing::debug;

/// Complete importer configuration
#[derive(Debug, Clone, Default)]
pub struct ImporterConfig {
    /// Storage settings
    pub database: DatabaseConfig,
    /// Run parameters
    pub import: ImportOptions,
}

impl ImporterConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any environment value is malformed
    pub fn from_env() -> ImportResult<Self> {
        let config = Self {
            database: DatabaseConfig::from_env()?,
            import: ImportOptions::from_env()?,
        };
        debug!(
            database = %config.database.url,
            file = %config.import.file_path.display(),
            batch_size = config.import.batch_size,
            "Importer configuration loaded from environment"
        );
        Ok(config)
    }
}
