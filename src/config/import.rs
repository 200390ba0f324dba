// ABOUTME: Import run options - source file, batch sizing, offsets, and failure policy
// ABOUTME: One options structure replaces the fresh, resume, and append driver variants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recruit_core::constants::{defaults, limits};
use recruit_core::errors::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;

/// What the loader does when a batch fails to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Roll back the batch and stop the run (canonical)
    #[default]
    FailFast,
    /// Roll back the batch, record it, and continue with the next one.
    /// Best effort: the imported total may undercount the source.
    BestEffort,
}

/// Where a run takes its start index from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResumeMode {
    /// Use `start_index` exactly as supplied
    #[default]
    Explicit,
    /// Start at the current number of stored coach rows
    RowCount,
    /// Start at the persisted checkpoint for the source path
    Checkpoint,
}

impl ResumeMode {
    /// Stable string form used on the command line
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::RowCount => "row-count",
            Self::Checkpoint => "checkpoint",
        }
    }
}

impl FromStr for ResumeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "explicit" => Ok(Self::Explicit),
            "row-count" | "row_count" | "count" => Ok(Self::RowCount),
            "checkpoint" => Ok(Self::Checkpoint),
            other => Err(format!(
                "unknown resume mode '{other}' (expected checkpoint or row-count)"
            )),
        }
    }
}

impl Display for ResumeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Parameters of one import run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Roster CSV to import
    pub file_path: PathBuf,
    /// Records per batch transaction
    pub batch_size: usize,
    /// Number of leading source records to skip
    pub start_index: usize,
    /// Empty the table and restart the identity sequence before loading
    pub clear_existing: bool,
    /// Maximum number of records to import after `start_index`
    pub limit: Option<usize>,
    /// Batch failure handling
    pub failure_policy: FailurePolicy,
    /// Start index source
    pub resume: ResumeMode,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from(defaults::CSV_PATH),
            batch_size: defaults::BATCH_SIZE,
            start_index: 0,
            clear_existing: true,
            limit: None,
            failure_policy: FailurePolicy::FailFast,
            resume: ResumeMode::Explicit,
        }
    }
}

impl ImportOptions {
    /// Full replace of the table from `file_path`
    #[must_use]
    pub fn fresh(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Append records from `start_index` onward, keeping existing rows
    #[must_use]
    pub fn append_from(file_path: impl Into<PathBuf>, start_index: usize) -> Self {
        Self {
            file_path: file_path.into(),
            start_index,
            clear_existing: false,
            ..Self::default()
        }
    }

    /// Append from a start index derived from storage
    #[must_use]
    pub fn resume(file_path: impl Into<PathBuf>, resume: ResumeMode) -> Self {
        Self {
            file_path: file_path.into(),
            clear_existing: false,
            resume,
            ..Self::default()
        }
    }

    /// Set the batch size
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Cap the number of imported records
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the failure policy
    #[must_use]
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Load defaults from the environment
    ///
    /// Reads `COACH_IMPORT_FILE` and `COACH_IMPORT_BATCH_SIZE`.
    ///
    /// # Errors
    ///
    /// Returns an error if `COACH_IMPORT_BATCH_SIZE` is not a number
    pub fn from_env() -> ImportResult<Self> {
        let mut options = Self::default();
        if let Ok(path) = env::var("COACH_IMPORT_FILE") {
            options.file_path = PathBuf::from(path);
        }
        if let Ok(raw) = env::var("COACH_IMPORT_BATCH_SIZE") {
            options.batch_size = raw.parse().map_err(|e| {
                ImportError::invalid_options(
                    "batch_size",
                    format!("invalid COACH_IMPORT_BATCH_SIZE '{raw}': {e}"),
                )
            })?;
        }
        Ok(options)
    }

    /// Check the options for contradictions before anything touches storage
    ///
    /// # Errors
    ///
    /// Returns `ImportError::InvalidOptions` when the batch size is out of range or
    /// a derived resume mode is combined with clearing or an explicit start index
    pub fn validate(&self) -> ImportResult<()> {
        if self.batch_size == 0 {
            return Err(ImportError::invalid_options(
                "batch_size",
                "must be at least 1",
            ));
        }
        if self.batch_size > limits::MAX_BATCH_SIZE {
            return Err(ImportError::invalid_options(
                "batch_size",
                format!("must not exceed {}", limits::MAX_BATCH_SIZE),
            ));
        }
        if self.resume != ResumeMode::Explicit {
            if self.clear_existing {
                return Err(ImportError::invalid_options(
                    "resume",
                    format!("'{}' cannot be combined with clearing existing rows", self.resume),
                ));
            }
            if self.start_index != 0 {
                return Err(ImportError::invalid_options(
                    "start_index",
                    format!("start index is derived from storage in '{}' mode", self.resume),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_a_fresh_run() {
        let options = ImportOptions::default();
        assert!(options.clear_existing);
        assert_eq!(options.start_index, 0);
        assert_eq!(options.batch_size, defaults::BATCH_SIZE);
        assert_eq!(options.failure_policy, FailurePolicy::FailFast);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let options = ImportOptions::fresh("roster.csv").with_batch_size(0);
        assert!(matches!(
            options.validate(),
            Err(ImportError::InvalidOptions {
                field: "batch_size",
                ..
            })
        ));
    }

    #[test]
    fn test_resume_with_clear_rejected() {
        let mut options = ImportOptions::resume("roster.csv", ResumeMode::Checkpoint);
        options.clear_existing = true;
        assert!(matches!(
            options.validate(),
            Err(ImportError::InvalidOptions { field: "resume", .. })
        ));
    }

    #[test]
    fn test_resume_with_start_index_rejected() {
        let mut options = ImportOptions::resume("roster.csv", ResumeMode::RowCount);
        options.start_index = 10;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_resume_mode_parsing() {
        assert_eq!("checkpoint".parse::<ResumeMode>(), Ok(ResumeMode::Checkpoint));
        assert_eq!("row-count".parse::<ResumeMode>(), Ok(ResumeMode::RowCount));
        assert_eq!("Row_Count".parse::<ResumeMode>(), Ok(ResumeMode::RowCount));
        assert!("latest".parse::<ResumeMode>().is_err());
    }
}
