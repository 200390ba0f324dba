// ABOUTME: Tests for environment-driven importer configuration
// ABOUTME: Validates DATABASE_URL parsing, import option overrides, and option validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use recruit_import::config::{DatabaseUrl, ImportOptions, ImporterConfig, ResumeMode};
use recruit_import::constants::defaults;
use recruit_import::errors::ImportError;
use serial_test::serial;

fn clear_import_env() {
    env::remove_var("DATABASE_URL");
    env::remove_var("COACH_IMPORT_FILE");
    env::remove_var("COACH_IMPORT_BATCH_SIZE");
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_import_env();

    let config = ImporterConfig::from_env().unwrap();
    assert_eq!(
        config.database.url,
        DatabaseUrl::parse_url(defaults::DATABASE_URL).unwrap()
    );
    assert_eq!(config.import.file_path, PathBuf::from(defaults::CSV_PATH));
    assert_eq!(config.import.batch_size, defaults::BATCH_SIZE);
    assert!(config.import.clear_existing);
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_import_env();
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("COACH_IMPORT_FILE", "rosters/fall.csv");
    env::set_var("COACH_IMPORT_BATCH_SIZE", "250");

    let config = ImporterConfig::from_env().unwrap();
    assert!(config.database.url.is_memory());
    assert_eq!(config.import.file_path, PathBuf::from("rosters/fall.csv"));
    assert_eq!(config.import.batch_size, 250);

    clear_import_env();
}

#[test]
#[serial]
fn test_malformed_batch_size_rejected() {
    clear_import_env();
    env::set_var("COACH_IMPORT_BATCH_SIZE", "lots");

    let err = ImporterConfig::from_env().unwrap_err();
    assert!(matches!(
        err,
        ImportError::InvalidOptions {
            field: "batch_size",
            ..
        }
    ));

    clear_import_env();
}

#[test]
#[serial]
fn test_postgres_url_rejected() {
    clear_import_env();
    env::set_var("DATABASE_URL", "postgresql://localhost/recruiting");

    assert!(ImporterConfig::from_env().is_err());

    clear_import_env();
}

#[test]
fn test_append_and_resume_constructors_keep_rows() {
    let append = ImportOptions::append_from("roster.csv", 40);
    assert!(!append.clear_existing);
    assert_eq!(append.start_index, 40);
    assert!(append.validate().is_ok());

    let resume = ImportOptions::resume("roster.csv", ResumeMode::Checkpoint);
    assert!(!resume.clear_existing);
    assert!(resume.validate().is_ok());
}

#[test]
fn test_oversized_batch_rejected() {
    let options = ImportOptions::fresh("roster.csv").with_batch_size(1_000_000);
    assert!(options.validate().is_err());
}
