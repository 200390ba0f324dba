// ABOUTME: Coach table operations used by the batched loader and status reporting
// ABOUTME: Multi-row parameterized inserts, clear-with-sequence-reset, counting, and listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recruit_core::constants::limits;
use recruit_core::errors::{ImportError, ImportResult};
use recruit_core::models::{CoachRecord, StoredCoach};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection};

use super::Database;

/// Records per `INSERT` statement that stay under the bind-parameter ceiling
pub const MAX_ROWS_PER_STATEMENT: usize =
    limits::SQLITE_MAX_BIND_PARAMS / CoachRecord::COLUMN_COUNT;

const INSERT_PREFIX: &str = "INSERT INTO coaches (first_name, last_name, email, school, sport, \
     phone, position, division, conference, state, region) ";

/// Insert `records` in order with one multi-row statement
///
/// Batches larger than [`MAX_ROWS_PER_STATEMENT`] are written with several
/// statements on the same connection, so callers holding a transaction still get
/// all-or-nothing behavior.
///
/// # Errors
///
/// Returns the driver error of the first statement that fails
pub async fn insert_coach_batch(
    conn: &mut SqliteConnection,
    records: &[CoachRecord],
) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;
    for chunk in records.chunks(MAX_ROWS_PER_STATEMENT) {
        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(INSERT_PREFIX);
        builder.push_values(chunk, |mut b, coach| {
            b.push_bind(&coach.first_name)
                .push_bind(&coach.last_name)
                .push_bind(&coach.email)
                .push_bind(&coach.school)
                .push_bind(&coach.sport)
                .push_bind(&coach.phone)
                .push_bind(&coach.position)
                .push_bind(&coach.division)
                .push_bind(&coach.conference)
                .push_bind(&coach.state)
                .push_bind(&coach.region);
        });
        inserted += builder.build().execute(&mut *conn).await?.rows_affected();
    }
    Ok(inserted)
}

/// Delete every coach and restart the identity sequence at 1
///
/// # Errors
///
/// Returns the driver error if either statement fails
pub async fn clear_coaches(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let deleted = sqlx::query("DELETE FROM coaches")
        .execute(&mut *conn)
        .await?
        .rows_affected();
    sqlx::query("DELETE FROM sqlite_sequence WHERE name = 'coaches'")
        .execute(&mut *conn)
        .await?;
    Ok(deleted)
}

fn row_to_coach(row: &SqliteRow) -> Result<StoredCoach, sqlx::Error> {
    Ok(StoredCoach {
        id: row.try_get("id")?,
        record: CoachRecord {
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            school: row.try_get("school")?,
            sport: row.try_get("sport")?,
            phone: row.try_get("phone")?,
            position: row.try_get("position")?,
            division: row.try_get("division")?,
            conference: row.try_get("conference")?,
            state: row.try_get("state")?,
            region: row.try_get("region")?,
        },
    })
}

impl Database {
    /// Number of stored coaches
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails
    pub async fn count_coaches(&self) -> ImportResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM coaches")
            .fetch_one(self.pool())
            .await
            .map_err(|e| ImportError::database("counting coaches", e))?;
        Ok(count.max(0) as u64)
    }

    /// Coaches ordered by identity
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list_coaches(&self, limit: u32, offset: u32) -> ImportResult<Vec<StoredCoach>> {
        let rows = sqlx::query(
            r"
            SELECT id, first_name, last_name, email, school, sport,
                   phone, position, division, conference, state, region
            FROM coaches
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(self.pool())
        .await
        .map_err(|e| ImportError::database("listing coaches", e))?;

        rows.iter()
            .map(row_to_coach)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ImportError::database("decoding coach row", e))
    }

    /// Lowest and highest identity currently stored
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn coach_id_range(&self) -> ImportResult<Option<(i64, i64)>> {
        let row = sqlx::query("SELECT MIN(id) AS min_id, MAX(id) AS max_id FROM coaches")
            .fetch_one(self.pool())
            .await
            .map_err(|e| ImportError::database("reading coach id range", e))?;
        let min_id: Option<i64> = row
            .try_get("min_id")
            .map_err(|e| ImportError::database("decoding coach id range", e))?;
        let max_id: Option<i64> = row
            .try_get("max_id")
            .map_err(|e| ImportError::database("decoding coach id range", e))?;
        Ok(min_id.zip(max_id))
    }
}
