// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, in-memory database, and roster CSV fixture helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `recruit_import`

use std::fmt::Write as _;
use std::io::Write;
use std::sync::Once;

use recruit_import::database::Database;
use tempfile::NamedTempFile;

static INIT_LOGGER: Once = Once::new();

/// Roster header with every column
pub const HEADER: &str =
    "Sport,School,Conference,Division,State,Coach Name,Coach Role,Email,Phone,Region";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::in_memory().await.unwrap()
}

/// One roster line for coach `i`
pub fn roster_line(i: usize) -> String {
    let region = if i % 3 == 0 { "" } else { "Midwest" };
    format!(
        "Soccer,School {i},Conference {c},D1,OH,Coach{i} Tester,Assistant Coach,coach{i}@school.edu,555-{i:04},{region}",
        c = i % 5
    )
}

/// Email of roster line `i`
pub fn roster_email(i: usize) -> String {
    format!("coach{i}@school.edu")
}

/// Roster CSV with `rows` generated coaches
pub fn roster_csv(rows: usize) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for i in 0..rows {
        let _ = writeln!(csv, "{}", roster_line(i));
    }
    csv
}

/// Write CSV content to a temporary file
pub fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Temporary roster file with `rows` generated coaches
pub fn roster_file(rows: usize) -> NamedTempFile {
    write_csv(&roster_csv(rows))
}

/// Abort any insert of a coach with `email`
pub async fn poison_email(db: &Database, email: &str) {
    sqlx::query(&format!(
        "CREATE TRIGGER poison_{id} BEFORE INSERT ON coaches \
         WHEN NEW.email = '{email}' \
         BEGIN SELECT RAISE(ABORT, 'poisoned row'); END",
        id = uuid::Uuid::new_v4().simple()
    ))
    .execute(db.pool())
    .await
    .unwrap();
}

/// Drop every trigger installed by [`poison_email`]
pub async fn remove_poison(db: &Database) {
    let triggers: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'trigger' AND name LIKE 'poison_%'")
            .fetch_all(db.pool())
            .await
            .unwrap();
    for (name,) in triggers {
        sqlx::query(&format!("DROP TRIGGER {name}"))
            .execute(db.pool())
            .await
            .unwrap();
    }
}

/// Emails of all stored coaches in identity order, with their ids
pub async fn stored_ids_and_emails(db: &Database) -> Vec<(i64, String)> {
    sqlx::query_as("SELECT id, email FROM coaches ORDER BY id")
        .fetch_all(db.pool())
        .await
        .unwrap()
}
