// ABOUTME: SQLite storage for the coach roster and import checkpoints
// ABOUTME: Owns the connection pool, schema creation, and pool shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! The importer writes to two tables:
//!
//! - `coaches`: one row per `CoachRecord`, keyed by an `AUTOINCREMENT` identity so
//!   a cleared table can restart its sequence at 1
//! - `import_checkpoints`: the next source index per file, advanced inside every
//!   batch transaction
//!
//! Schema creation is idempotent and runs on every connect.

/// Coach table operations (multi-row insert, clear, count, listing)
pub mod coaches;

/// Checkpoint table operations
pub mod checkpoints;

/// RAII transaction guard
pub mod transactions;

pub use transactions::{SqliteTransactionGuard, TransactionGuard};

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use recruit_core::errors::{ImportError, ImportResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::fs;
use tracing::{debug, info};

use crate::config::{DatabaseConfig, DatabaseUrl};

/// Roster storage handle
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the configured database and create the schema
    ///
    /// File databases are created (with their parent directory) when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the connection fails,
    /// or the schema statements fail
    pub async fn connect(config: &DatabaseConfig) -> ImportResult<Self> {
        let pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.pool.acquire_timeout_secs));

        let (pool_options, connect_options) = match &config.url {
            DatabaseUrl::Memory => (
                // Every connection to :memory: is a separate database; keep exactly one alive
                pool_options
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None),
                SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(|e| ImportError::database("parsing connection options", e))?,
            ),
            DatabaseUrl::SQLite { path } => {
                ensure_parent_dir(path).await?;
                (
                    pool_options
                        .max_connections(config.pool.max_connections.max(1))
                        .idle_timeout(config.pool.idle_timeout_secs.map(Duration::from_secs)),
                    SqliteConnectOptions::new()
                        .filename(path)
                        .create_if_missing(true),
                )
            }
        };

        let connect_options =
            connect_options.busy_timeout(Duration::from_secs(config.pool.busy_timeout_secs));

        info!("Connecting to database: {}", config.url);
        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| ImportError::database("connecting to database", e))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Private in-memory database with the schema applied
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema creation fails
    pub async fn in_memory() -> ImportResult<Self> {
        Self::connect(&DatabaseConfig::in_memory()).await
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails
    pub async fn migrate(&self) -> ImportResult<()> {
        self.migrate_coaches().await?;
        self.migrate_checkpoints().await?;
        debug!("Database schema ready");
        Ok(())
    }

    async fn migrate_coaches(&self) -> ImportResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS coaches (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                school TEXT NOT NULL,
                sport TEXT NOT NULL,
                phone TEXT,
                position TEXT,
                division TEXT,
                conference TEXT,
                state TEXT,
                region TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ImportError::database("creating coaches table", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_coaches_school ON coaches(school)")
            .execute(&self.pool)
            .await
            .map_err(|e| ImportError::database("creating coaches school index", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_coaches_sport ON coaches(sport)")
            .execute(&self.pool)
            .await
            .map_err(|e| ImportError::database("creating coaches sport index", e))?;

        Ok(())
    }

    async fn migrate_checkpoints(&self) -> ImportResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS import_checkpoints (
                source_path TEXT PRIMARY KEY,
                next_index INTEGER NOT NULL,
                run_id TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ImportError::database("creating import_checkpoints table", e))?;

        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database pool closed");
    }
}

async fn ensure_parent_dir(path: &Path) -> ImportResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| ImportError::Io {
                    path: parent.to_path_buf(),
                    source,
                })
        }
        _ => Ok(()),
    }
}
