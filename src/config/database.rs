// ABOUTME: Database configuration types for the SQLite roster store
// ABOUTME: Parses DATABASE_URL and carries SQLx pool settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recruit_core::constants::defaults;
use recruit_core::errors::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for non-`SQLite` URLs, which the importer cannot reset sequences on
    pub fn parse_url(s: &str) -> ImportResult<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" || path_str.is_empty() {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.starts_with("postgresql://") || s.starts_with("postgres://") {
            Err(ImportError::invalid_options(
                "database_url",
                "only SQLite databases are supported",
            ))
        } else {
            // Fallback: treat as SQLite file path
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DATABASE_URL).unwrap_or(Self::SQLite {
            path: PathBuf::from("./data/recruiting.db"),
        })
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Pool settings
    pub pool: SqlxConfig,
}

impl DatabaseConfig {
    /// Load database configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` names an unsupported backend
    pub fn from_env() -> ImportResult<Self> {
        Ok(Self {
            url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", defaults::DATABASE_URL))?,
            pool: SqlxConfig::from_env(),
        })
    }

    /// Configuration for a private in-memory database
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: DatabaseUrl::Memory,
            pool: SqlxConfig::default(),
        }
    }
}

/// `SQLx` connection pool configuration
///
/// Values of `None` use `SQLx` defaults. In-memory databases always use a single
/// connection that never expires, since every new connection would see an empty
/// database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlxConfig {
    /// Maximum number of pooled connections
    /// Set via `SQLX_MAX_CONNECTIONS` environment variable
    pub max_connections: u32,
    /// Connection acquire timeout in seconds
    /// Set via `SQLX_ACQUIRE_TIMEOUT_SECS` environment variable
    pub acquire_timeout_secs: u64,
    /// Maximum time a connection can sit idle before being closed (seconds)
    /// Set via `SQLX_IDLE_TIMEOUT_SECS` environment variable
    pub idle_timeout_secs: Option<u64>,
    /// `SQLite` busy timeout in seconds
    /// Set via `SQLITE_BUSY_TIMEOUT_SECS` environment variable
    pub busy_timeout_secs: u64,
}

impl Default for SqlxConfig {
    fn default() -> Self {
        Self {
            max_connections: 4,
            acquire_timeout_secs: 30,
            idle_timeout_secs: None,
            busy_timeout_secs: 5,
        }
    }
}

impl SqlxConfig {
    /// Load from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_connections: env::var("SQLX_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_connections),
            acquire_timeout_secs: env::var("SQLX_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.acquire_timeout_secs),
            idle_timeout_secs: env::var("SQLX_IDLE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
            busy_timeout_secs: env::var("SQLITE_BUSY_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.busy_timeout_secs),
        }
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sqlite_file_url() {
        let url = DatabaseUrl::parse_url("sqlite:./data/recruiting.db").unwrap();
        assert_eq!(
            url,
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/recruiting.db")
            }
        );
        assert_eq!(url.to_connection_string(), "sqlite:./data/recruiting.db");
    }

    #[test]
    fn test_parse_memory_url() {
        assert!(DatabaseUrl::parse_url("sqlite::memory:").unwrap().is_memory());
    }

    #[test]
    fn test_bare_path_falls_back_to_sqlite() {
        let url = DatabaseUrl::parse_url("roster.db").unwrap();
        assert_eq!(url.to_connection_string(), "sqlite:roster.db");
    }

    #[test]
    fn test_postgres_rejected() {
        let err = DatabaseUrl::parse_url("postgres://localhost/recruiting").unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidOptions {
                field: "database_url",
                ..
            }
        ));
    }
}
