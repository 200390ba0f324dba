// ABOUTME: RAII transaction guard used for every batch and for the clear step
// ABOUTME: Rolls back automatically when dropped without an explicit commit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Transaction management with RAII guards
//!
//! A batch is applied as:
//!
//! ```text
//! let mut guard = TransactionGuard::new(pool.begin().await?);
//! insert_coach_batch(guard.executor()?, &records).await?;
//! upsert_checkpoint(guard.executor()?, source, next_index, run_id).await?;
//! guard.commit().await?;
//! ```
//!
//! Any `?` before `commit()` drops the guard, and `SQLx` rolls the transaction
//! back. Errors stay as `sqlx::Error` so the loader can attach batch context.

use sqlx::{Database, Transaction};
use tracing::{debug, warn};

/// RAII guard for database transactions ensuring automatic rollback on drop
pub struct TransactionGuard<'c, DB: Database> {
    transaction: Option<Transaction<'c, DB>>,
    committed: bool,
}

impl<'c, DB: Database> TransactionGuard<'c, DB> {
    /// Wrap a transaction obtained from `pool.begin().await`
    #[must_use]
    pub fn new(transaction: Transaction<'c, DB>) -> Self {
        debug!("TransactionGuard created - transaction will auto-rollback if not committed");
        Self {
            transaction: Some(transaction),
            committed: false,
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already consumed or the commit fails
    pub async fn commit(mut self) -> Result<(), sqlx::Error> {
        let tx = self.transaction.take().ok_or_else(consumed)?;
        tx.commit().await?;
        self.committed = true;
        debug!("TransactionGuard committed successfully");
        Ok(())
    }

    /// Explicitly roll back the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already consumed or the rollback fails
    pub async fn rollback(mut self) -> Result<(), sqlx::Error> {
        let tx = self.transaction.take().ok_or_else(consumed)?;
        tx.rollback().await?;
        debug!("TransactionGuard rolled back explicitly");
        Ok(())
    }

    /// Check if the transaction has been committed
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed
    }

    /// Connection to run statements on inside the transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already committed or rolled back
    pub fn executor(&mut self) -> Result<&mut <DB as Database>::Connection, sqlx::Error> {
        self.transaction.as_deref_mut().ok_or_else(consumed)
    }
}

impl<DB: Database> Drop for TransactionGuard<'_, DB> {
    fn drop(&mut self) {
        if self.transaction.is_some() && !self.committed {
            warn!(
                "TransactionGuard dropped without commit - transaction will be rolled back automatically"
            );
        }
    }
}

fn consumed() -> sqlx::Error {
    sqlx::Error::Protocol("transaction already consumed - guard used after commit/rollback".into())
}

/// Type alias for `SQLite` transaction guard
pub type SqliteTransactionGuard<'c> = TransactionGuard<'c, sqlx::Sqlite>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database as RosterDb;

    async fn count(db: &RosterDb) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM import_checkpoints")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    const INSERT: &str = "INSERT INTO import_checkpoints (source_path, next_index, run_id, updated_at) \
                          VALUES ('a.csv', 1, 'run', 'now')";

    #[tokio::test]
    async fn test_commit_persists() {
        let db = RosterDb::in_memory().await.unwrap();
        let mut guard = SqliteTransactionGuard::new(db.pool().begin().await.unwrap());
        sqlx::query(INSERT)
            .execute(guard.executor().unwrap())
            .await
            .unwrap();
        guard.commit().await.unwrap();
        assert_eq!(count(&db).await, 1);
    }

    #[tokio::test]
    async fn test_drop_rolls_back() {
        let db = RosterDb::in_memory().await.unwrap();
        {
            let mut guard = SqliteTransactionGuard::new(db.pool().begin().await.unwrap());
            sqlx::query(INSERT)
                .execute(guard.executor().unwrap())
                .await
                .unwrap();
            assert!(!guard.is_committed());
        }
        assert_eq!(count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_explicit_rollback() {
        let db = RosterDb::in_memory().await.unwrap();
        let mut guard = SqliteTransactionGuard::new(db.pool().begin().await.unwrap());
        sqlx::query(INSERT)
            .execute(guard.executor().unwrap())
            .await
            .unwrap();
        guard.rollback().await.unwrap();
        assert_eq!(count(&db).await, 0);
    }
}
