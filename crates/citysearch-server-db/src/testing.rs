// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::pool::run_migrations;
use crate::types::CityDocument;

/// In-memory pool. A single connection keeps every query on the same
/// database.
pub async fn create_test_pool() -> SqlitePool {
	let options = SqliteConnectOptions::from_str("sqlite::memory:")
		.unwrap()
		.with_regexp();
	SqlitePoolOptions::new()
		.max_connections(1)
		.connect_with(options)
		.await
		.unwrap()
}

pub async fn create_city_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	run_migrations(&pool).await.unwrap();
	pool
}

pub fn city(id: &str, name: &str, country: &str) -> CityDocument {
	CityDocument {
		id: Some(id.to_string()),
		name: Some(name.to_string()),
		ascii: Some(name.to_string()),
		lat: Some("0.0".to_string()),
		long: Some("0.0".to_string()),
		feat_class: Some("P".to_string()),
		feat_code: Some("PPL".to_string()),
		country: Some(country.to_string()),
		population: Some("0".to_string()),
		..Default::default()
	}
}
