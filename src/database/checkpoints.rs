// ABOUTME: Import checkpoint persistence for resumable runs
// ABOUTME: Upserts the next source index per file inside batch transactions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use recruit_core::errors::{ImportError, ImportResult};
use recruit_core::models::ImportCheckpoint;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use uuid::Uuid;

use super::Database;

/// Key a source file's checkpoint is stored under
///
/// Uses the canonical path so `data/coaches.csv` and `./data/../data/coaches.csv`
/// share one checkpoint. Falls back to the path as given when it cannot be resolved.
#[must_use]
pub fn checkpoint_key(path: &Path) -> String {
    fs::canonicalize(path).map_or_else(
        |_| path.to_string_lossy().into_owned(),
        |canonical| canonical.to_string_lossy().into_owned(),
    )
}

/// Record that every source record before `next_index` is committed
///
/// # Errors
///
/// Returns the driver error if the upsert fails
pub async fn upsert_checkpoint(
    conn: &mut SqliteConnection,
    source_path: &str,
    next_index: u64,
    run_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO import_checkpoints (source_path, next_index, run_id, updated_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT(source_path) DO UPDATE SET
            next_index = excluded.next_index,
            run_id = excluded.run_id,
            updated_at = excluded.updated_at
        ",
    )
    .bind(source_path)
    .bind(next_index as i64)
    .bind(run_id.to_string())
    .bind(Utc::now().to_rfc3339())
    .execute(conn)
    .await?;
    Ok(())
}

/// Forget every checkpoint (the table they describe was emptied)
///
/// # Errors
///
/// Returns the driver error if the delete fails
pub async fn clear_checkpoints(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    Ok(sqlx::query("DELETE FROM import_checkpoints")
        .execute(conn)
        .await?
        .rows_affected())
}

fn row_to_checkpoint(row: &SqliteRow) -> Result<ImportCheckpoint, sqlx::Error> {
    let next_index: i64 = row.try_get("next_index")?;
    let run_id: String = row.try_get("run_id")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(ImportCheckpoint {
        source_path: row.try_get("source_path")?,
        next_index: next_index.max(0) as u64,
        run_id: Uuid::parse_str(&run_id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        updated_at: DateTime::parse_from_rfc3339(&updated_at)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc),
    })
}

impl Database {
    /// Stored checkpoint for a source path
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_checkpoint(&self, source_path: &str) -> ImportResult<Option<ImportCheckpoint>> {
        let row = sqlx::query(
            r"
            SELECT source_path, next_index, run_id, updated_at
            FROM import_checkpoints
            WHERE source_path = $1
            ",
        )
        .bind(source_path)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| ImportError::database("reading import checkpoint", e))?;

        row.as_ref()
            .map(row_to_checkpoint)
            .transpose()
            .map_err(|e| ImportError::database("decoding import checkpoint", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_then_read_back() {
        let db = Database::in_memory().await.unwrap();
        let run_id = Uuid::new_v4();

        let mut conn = db.pool().acquire().await.unwrap();
        upsert_checkpoint(&mut conn, "roster.csv", 10, run_id)
            .await
            .unwrap();
        upsert_checkpoint(&mut conn, "roster.csv", 20, run_id)
            .await
            .unwrap();
        drop(conn);

        let checkpoint = db.get_checkpoint("roster.csv").await.unwrap().unwrap();
        assert_eq!(checkpoint.next_index, 20);
        assert_eq!(checkpoint.run_id, run_id);
        assert!(db.get_checkpoint("other.csv").await.unwrap().is_none());
    }

    #[test]
    fn test_checkpoint_key_resolves_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("roster.csv");
        fs::write(&file, "Sport\n").unwrap();
        let aliased = dir.path().join(".").join("roster.csv");

        assert_eq!(checkpoint_key(&aliased), checkpoint_key(&file));
        assert_eq!(
            checkpoint_key(Path::new("missing/roster.csv")),
            "missing/roster.csv"
        );
    }

    #[tokio::test]
    async fn test_clear_checkpoints() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();
        upsert_checkpoint(&mut conn, "a.csv", 5, Uuid::new_v4())
            .await
            .unwrap();
        upsert_checkpoint(&mut conn, "b.csv", 7, Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(clear_checkpoints(&mut conn).await.unwrap(), 2);
        drop(conn);

        assert!(db.get_checkpoint("a.csv").await.unwrap().is_none());
    }
}
