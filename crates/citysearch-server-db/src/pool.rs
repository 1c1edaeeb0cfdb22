// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{
	SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;

use crate::error::DbError;

/// Create a SqlitePool with WAL mode, common settings and the `REGEXP`
/// function registered on every connection.
///
/// # Arguments
/// * `database_url` - SQLite connection string (e.g., "sqlite:./cities.db")
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
/// Returns `DbError::Internal` if the URL is invalid, `DbError::Sqlx` if the
/// connection fails.
#[tracing::instrument(skip(database_url))]
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, DbError> {
	let options = SqliteConnectOptions::from_str(database_url)
		.map_err(|e| DbError::Internal(format!("Invalid database URL: {e}")))?
		.journal_mode(SqliteJournalMode::Wal)
		.synchronous(SqliteSynchronous::Normal)
		.create_if_missing(true)
		.with_regexp();

	let pool = SqlitePoolOptions::new()
		.max_connections(max_connections)
		.connect_with(options)
		.await?;

	tracing::debug!("database pool created");
	Ok(pool)
}

/// Create the city collection and its indexes if they do not exist.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS cities (
			id TEXT NOT NULL,
			name TEXT,
			ascii TEXT,
			alt_name TEXT,
			lat TEXT,
			long TEXT,
			feat_class TEXT,
			feat_code TEXT,
			country TEXT,
			cc2 TEXT,
			admin1 TEXT,
			admin2 TEXT,
			admin3 TEXT,
			admin4 TEXT,
			population TEXT,
			elevation TEXT,
			dem TEXT,
			tz TEXT,
			modified_at TEXT
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_cities_id ON cities(id)")
		.execute(pool)
		.await?;

	tracing::debug!("migrations applied");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_migrations_are_idempotent() {
		let dir = tempfile::tempdir().unwrap();
		let url = format!("sqlite:{}", dir.path().join("cities.db").display());
		let pool = create_pool(&url, 2).await.unwrap();

		run_migrations(&pool).await.unwrap();
		run_migrations(&pool).await.unwrap();

		let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cities")
			.fetch_one(&pool)
			.await
			.unwrap();
		assert_eq!(count, 0);
		pool.close().await;
	}

	#[tokio::test]
	async fn test_regexp_is_registered() {
		let dir = tempfile::tempdir().unwrap();
		let url = format!("sqlite:{}", dir.path().join("cities.db").display());
		let pool = create_pool(&url, 1).await.unwrap();

		let (matched,): (i64,) = sqlx::query_as("SELECT 'Lima' REGEXP '(?i)^li'")
			.fetch_one(&pool)
			.await
			.unwrap();
		assert_eq!(matched, 1);
		pool.close().await;
	}
}
