// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! City repository.

use async_trait::async_trait;
use sqlx::{sqlite::SqlitePool, QueryBuilder, Sqlite};
use uuid::Uuid;

use crate::error::DbError;
use crate::filter::CityFilter;
use crate::projection::CityProjection;
use crate::types::{CityDocument, CityRecord, CityUpdate, FindOptions, SortOrder};

const INSERT_CITY: &str = r#"
	INSERT INTO cities (
		id, name, ascii, alt_name, lat, long, feat_class, feat_code, country, cc2,
		admin1, admin2, admin3, admin4, population, elevation, dem, tz, modified_at
	)
	VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
"#;

#[derive(Clone)]
pub struct CityRepository {
	pool: SqlitePool,
}

impl CityRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}

	/// Fetch every city whose name matches `filter`, in insertion order.
	#[tracing::instrument(skip(self), fields(pattern = %filter.pattern()))]
	pub async fn find(
		&self,
		filter: &CityFilter,
		projection: CityProjection,
	) -> Result<Vec<CityRecord>, DbError> {
		let sql = format!(
			"SELECT {} FROM cities WHERE name REGEXP ?1 ORDER BY rowid",
			projection.select_list()
		);
		let cities: Vec<CityRecord> = sqlx::query_as(&sql)
			.bind(filter.pattern())
			.fetch_all(&self.pool)
			.await?;

		tracing::debug!(count = cities.len(), "city find completed");
		Ok(cities)
	}

	#[tracing::instrument(skip(self), fields(pattern = %filter.pattern()))]
	pub async fn find_one(
		&self,
		filter: &CityFilter,
		projection: CityProjection,
	) -> Result<Option<CityRecord>, DbError> {
		let sql = format!(
			"SELECT {} FROM cities WHERE name REGEXP ?1 ORDER BY rowid LIMIT 1",
			projection.select_list()
		);
		let city: Option<CityRecord> = sqlx::query_as(&sql)
			.bind(filter.pattern())
			.fetch_optional(&self.pool)
			.await?;
		Ok(city)
	}

	#[tracing::instrument(skip(self), fields(pattern = %filter.pattern()))]
	pub async fn find_many(
		&self,
		filter: &CityFilter,
		projection: CityProjection,
		options: FindOptions,
	) -> Result<Vec<CityRecord>, DbError> {
		let order = match options.sort_by_name {
			Some(SortOrder::Ascending) => "name ASC, rowid",
			Some(SortOrder::Descending) => "name DESC, rowid",
			None => "rowid",
		};
		// SQLite treats a negative LIMIT as unbounded.
		let (limit, offset) = if options.page_size == 0 {
			(-1_i64, 0_i64)
		} else {
			let size = i64::from(options.page_size);
			(size, size * i64::from(options.page))
		};

		let sql = format!(
			"SELECT {} FROM cities WHERE name REGEXP ?1 ORDER BY {order} LIMIT ?2 OFFSET ?3",
			projection.select_list()
		);
		let cities: Vec<CityRecord> = sqlx::query_as(&sql)
			.bind(filter.pattern())
			.bind(limit)
			.bind(offset)
			.fetch_all(&self.pool)
			.await?;

		tracing::debug!(count = cities.len(), "city find_many completed");
		Ok(cities)
	}

	#[tracing::instrument(skip(self), fields(pattern = %filter.pattern()))]
	pub async fn count(&self, filter: &CityFilter) -> Result<u64, DbError> {
		let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cities WHERE name REGEXP ?1")
			.bind(filter.pattern())
			.fetch_one(&self.pool)
			.await?;
		Ok(count as u64)
	}

	/// Insert one city. Returns the stored id, or `None` when the id already
	/// exists (the conflict is logged, not raised).
	#[tracing::instrument(skip(self, city), fields(id = ?city.id))]
	pub async fn insert_one(&self, city: &CityDocument) -> Result<Option<String>, DbError> {
		let id = city
			.id
			.clone()
			.unwrap_or_else(|| Uuid::new_v4().to_string());

		match bind_document(sqlx::query(INSERT_CITY), &id, city)
			.execute(&self.pool)
			.await
		{
			Ok(_) => Ok(Some(id)),
			Err(e) => {
				let e = DbError::from(e);
				if e.is_unique_violation() {
					tracing::error!(id = %id, error = %e, "duplicate city id, insert skipped");
					Ok(None)
				} else {
					Err(e)
				}
			}
		}
	}

	/// Insert cities in one transaction. Returns the inserted count, or `None`
	/// when any id collides (the batch is rolled back and the conflict logged).
	#[tracing::instrument(skip(self, cities), fields(count = cities.len()))]
	pub async fn insert_many(&self, cities: &[CityDocument]) -> Result<Option<u64>, DbError> {
		let mut tx = self.pool.begin().await?;

		for city in cities {
			let id = city
				.id
				.clone()
				.unwrap_or_else(|| Uuid::new_v4().to_string());

			if let Err(e) = bind_document(sqlx::query(INSERT_CITY), &id, city)
				.execute(&mut *tx)
				.await
			{
				let e = DbError::from(e);
				if e.is_unique_violation() {
					tracing::error!(id = %id, error = %e, "duplicate city id, batch rolled back");
					tx.rollback().await?;
					return Ok(None);
				}
				return Err(e);
			}
		}

		tx.commit().await?;
		tracing::info!(count = cities.len(), "inserted cities");
		Ok(Some(cities.len() as u64))
	}

	/// Overwrite the fields set in `update` on the city with `id`. Returns the
	/// number of modified rows.
	#[tracing::instrument(skip(self, update))]
	pub async fn update_one(&self, id: &str, update: &CityUpdate) -> Result<u64, DbError> {
		let assignments = update.assignments();
		if assignments.is_empty() {
			return Ok(0);
		}

		let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE cities SET ");
		let mut separated = builder.separated(", ");
		for (column, value) in assignments {
			separated.push(format!("\"{column}\" = "));
			separated.push_bind_unseparated(value);
		}
		builder.push(" WHERE id = ");
		builder.push_bind(id);

		let result = builder.build().execute(&self.pool).await?;
		Ok(result.rows_affected())
	}

	#[tracing::instrument(skip(self))]
	pub async fn delete_one(&self, id: &str) -> Result<u64, DbError> {
		let result = sqlx::query("DELETE FROM cities WHERE id = ?1")
			.bind(id)
			.execute(&self.pool)
			.await?;
		Ok(result.rows_affected())
	}

	/// Round-trip to the database to confirm it is reachable.
	pub async fn ping(&self) -> Result<(), DbError> {
		sqlx::query("SELECT 1").execute(&self.pool).await?;
		Ok(())
	}
}

fn bind_document<'q>(
	query: sqlx::query::Query<'q, Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
	id: &'q str,
	city: &'q CityDocument,
) -> sqlx::query::Query<'q, Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
	query
		.bind(id)
		.bind(city.name.as_deref())
		.bind(city.ascii.as_deref())
		.bind(city.alt_name.as_deref())
		.bind(city.lat.as_deref())
		.bind(city.long.as_deref())
		.bind(city.feat_class.as_deref())
		.bind(city.feat_code.as_deref())
		.bind(city.country.as_deref())
		.bind(city.cc2.as_deref())
		.bind(city.admin1.as_deref())
		.bind(city.admin2.as_deref())
		.bind(city.admin3.as_deref())
		.bind(city.admin4.as_deref())
		.bind(city.population.as_deref())
		.bind(city.elevation.as_deref())
		.bind(city.dem.as_deref())
		.bind(city.tz.as_deref())
		.bind(city.modified_at.as_deref())
}

/// Read/write access to the city collection.
#[async_trait]
pub trait CityStore: Send + Sync {
	async fn find(
		&self,
		filter: &CityFilter,
		projection: CityProjection,
	) -> Result<Vec<CityRecord>, DbError>;
	async fn find_one(
		&self,
		filter: &CityFilter,
		projection: CityProjection,
	) -> Result<Option<CityRecord>, DbError>;
	async fn find_many(
		&self,
		filter: &CityFilter,
		projection: CityProjection,
		options: FindOptions,
	) -> Result<Vec<CityRecord>, DbError>;
	async fn count(&self, filter: &CityFilter) -> Result<u64, DbError>;
	async fn insert_one(&self, city: &CityDocument) -> Result<Option<String>, DbError>;
	async fn insert_many(&self, cities: &[CityDocument]) -> Result<Option<u64>, DbError>;
	async fn update_one(&self, id: &str, update: &CityUpdate) -> Result<u64, DbError>;
	async fn delete_one(&self, id: &str) -> Result<u64, DbError>;
	async fn ping(&self) -> Result<(), DbError>;
}

#[async_trait]
impl CityStore for CityRepository {
	async fn find(
		&self,
		filter: &CityFilter,
		projection: CityProjection,
	) -> Result<Vec<CityRecord>, DbError> {
		self.find(filter, projection).await
	}

	async fn find_one(
		&self,
		filter: &CityFilter,
		projection: CityProjection,
	) -> Result<Option<CityRecord>, DbError> {
		self.find_one(filter, projection).await
	}

	async fn find_many(
		&self,
		filter: &CityFilter,
		projection: CityProjection,
		options: FindOptions,
	) -> Result<Vec<CityRecord>, DbError> {
		self.find_many(filter, projection, options).await
	}

	async fn count(&self, filter: &CityFilter) -> Result<u64, DbError> {
		self.count(filter).await
	}

	async fn insert_one(&self, city: &CityDocument) -> Result<Option<String>, DbError> {
		self.insert_one(city).await
	}

	async fn insert_many(&self, cities: &[CityDocument]) -> Result<Option<u64>, DbError> {
		self.insert_many(cities).await
	}

	async fn update_one(&self, id: &str, update: &CityUpdate) -> Result<u64, DbError> {
		self.update_one(id, update).await
	}

	async fn delete_one(&self, id: &str) -> Result<u64, DbError> {
		self.delete_one(id).await
	}

	async fn ping(&self) -> Result<(), DbError> {
		self.ping().await
	}
}
