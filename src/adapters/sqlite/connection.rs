//! SQLite connection pool management, grounded in the teacher's
//! `infrastructure::database::connection` module (its WAL/busy-timeout/pool
//! tuning kept; the conflicting duplicate method bodies left by that file
//! are not carried over).

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

/// Owns the pool backing the version store (spec.md §4.2).
pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    /// `database_url` is a `sqlx` SQLite URL, e.g. `sqlite:swarmctl.db` or
    /// `sqlite::memory:`.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .context("invalid database URL")?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(10)
            .idle_timeout(Duration::from_secs(30))
            .max_lifetime(Duration::from_secs(1800))
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .context("failed to create connection pool")?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("failed to run migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrates_in_memory_database() {
        let db = DatabaseConnection::new("sqlite::memory:")
            .await
            .expect("in-memory connection");
        db.migrate().await.expect("migrations run");

        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='repositories'",
        )
        .fetch_one(db.pool())
        .await
        .expect("query sqlite_master");
        assert_eq!(result.0, 1);

        db.close().await;
    }
}
