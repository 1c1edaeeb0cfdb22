// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for the search and health routes.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
	body::Body,
	http::{Request, StatusCode},
};
use citysearch_server::api::{create_app_state, create_router};
use citysearch_server::ServerConfig;
use citysearch_server_config::{MatchMode, RankingMode};
use citysearch_server_db::testing::city;
use citysearch_server_db::{
	create_pool, run_migrations, CityDocument, CityFilter, CityProjection, CityRecord,
	CityRepository, CityStore, CityUpdate, DbError, FindOptions,
};
use tempfile::tempdir;
use tower::ServiceExt;

fn lima_peru() -> CityDocument {
	CityDocument {
		lat: Some("-12.04318".to_string()),
		long: Some("-77.02824".to_string()),
		feat_code: Some("PPLC".to_string()),
		population: Some("7737002".to_string()),
		..city("3936456", "Lima", "PE")
	}
}

/// Creates a test app backed by a seeded on-disk database.
async fn setup_test_app(config: ServerConfig) -> (axum::Router, tempfile::TempDir) {
	let dir = tempdir().unwrap();
	let db_path = dir.path().join("test_search.db");
	let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
	let pool = create_pool(&db_url, 2).await.unwrap();
	run_migrations(&pool).await.unwrap();

	let repo = CityRepository::new(pool);
	repo.insert_many(&[
		lima_peru(),
		city("3936451", "Limatambo", "PE"),
		city("2988507", "Paris", "FR"),
		city("4705349", "Lima", "US"),
		city("3435910", "Buenos Aires", "AR"),
	])
	.await
	.unwrap();

	let state = create_app_state(Arc::new(repo), &config);
	(create_router(state), dir)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
	let response = app
		.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
		.await
		.unwrap();
	let status = response.status();
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
	(status, json)
}

#[tokio::test]
async fn test_search_returns_ranked_cities() {
	let (app, _dir) = setup_test_app(ServerConfig::default()).await;

	let (status, json) = get(app, "/search?q=lima").await;
	assert_eq!(status, StatusCode::OK);

	let results = json.as_array().unwrap();
	assert_eq!(results.len(), 3);
	assert_eq!(results[0]["name"], "Lima");
	assert_eq!(results[0]["country"], "PE");
	assert_eq!(results[0]["lat"], "-12.04318");
	assert_eq!(results[0]["population"], "7737002");
	assert_eq!(results[1]["name"], "Lima");
	assert_eq!(results[1]["country"], "US");
	assert_eq!(results[2]["name"], "Limatambo");
}

#[tokio::test]
async fn test_search_omits_id_and_score() {
	let (app, _dir) = setup_test_app(ServerConfig::default()).await;

	let (_, json) = get(app, "/search?q=Paris").await;
	let paris = json[0].as_object().unwrap();
	assert!(!paris.contains_key("id"));
	assert!(!paris.contains_key("score"));
	for key in [
		"name",
		"lat",
		"long",
		"feat_class",
		"feat_code",
		"country",
		"population",
	] {
		assert!(paris.contains_key(key), "missing {key}");
	}
}

#[tokio::test]
async fn test_search_no_match_is_empty_array() {
	let (app, _dir) = setup_test_app(ServerConfig::default()).await;

	let (status, json) = get(app, "/search?q=xyz123").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_search_missing_query_is_bad_request() {
	let (app, _dir) = setup_test_app(ServerConfig::default()).await;

	let (status, _) = get(app, "/search").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_empty_query_is_bad_request() {
	let (app, _dir) = setup_test_app(ServerConfig::default()).await;

	let (status, json) = get(app, "/search?q=").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error"], "invalid_query");
}

#[tokio::test]
async fn test_search_space_matches_multi_word_names() {
	let (app, _dir) = setup_test_app(ServerConfig::default()).await;

	let (status, json) = get(app, "/search?q=%20").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(json.as_array().unwrap().len(), 1);
	assert_eq!(json[0]["name"], "Buenos Aires");
}

#[tokio::test]
async fn test_search_regex_metacharacters_are_literal() {
	let (app, _dir) = setup_test_app(ServerConfig::default()).await;

	let (status, json) = get(app.clone(), "/search?q=.*").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(json, serde_json::json!([]));

	let (status, _) = get(app, "/search?q=%28").await;
	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_search_regex_mode() {
	let mut config = ServerConfig::default();
	config.search.match_mode = MatchMode::Regex;
	let (app, _dir) = setup_test_app(config).await;

	let (status, json) = get(app.clone(), "/search?q=.*").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(json.as_array().unwrap().len(), 5);

	let (status, json) = get(app, "/search?q=%28").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error"], "invalid_pattern");
}

#[tokio::test]
async fn test_search_legacy_ranking_reverses_ties() {
	let mut config = ServerConfig::default();
	config.search.ranking = RankingMode::Legacy;
	let (app, _dir) = setup_test_app(config).await;

	let (_, json) = get(app, "/search?q=lima").await;
	assert_eq!(json[0]["country"], "US");
	assert_eq!(json[1]["country"], "PE");
	assert_eq!(json[2]["name"], "Limatambo");
}

#[tokio::test]
async fn test_search_is_idempotent() {
	let (app, _dir) = setup_test_app(ServerConfig::default()).await;

	let (_, first) = get(app.clone(), "/search?q=li").await;
	let (_, second) = get(app, "/search?q=li").await;
	assert_eq!(first, second);
}

#[tokio::test]
async fn test_health_reports_database() {
	let (app, _dir) = setup_test_app(ServerConfig::default()).await;

	let (status, json) = get(app, "/health").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["status"], "healthy");
	assert_eq!(json["database"], "ok");
}

struct UnavailableStore;

fn unavailable() -> DbError {
	DbError::Internal("connection refused".to_string())
}

#[async_trait]
impl CityStore for UnavailableStore {
	async fn find(
		&self,
		_filter: &CityFilter,
		_projection: CityProjection,
	) -> Result<Vec<CityRecord>, DbError> {
		Err(unavailable())
	}

	async fn find_one(
		&self,
		_filter: &CityFilter,
		_projection: CityProjection,
	) -> Result<Option<CityRecord>, DbError> {
		Err(unavailable())
	}

	async fn find_many(
		&self,
		_filter: &CityFilter,
		_projection: CityProjection,
		_options: FindOptions,
	) -> Result<Vec<CityRecord>, DbError> {
		Err(unavailable())
	}

	async fn count(&self, _filter: &CityFilter) -> Result<u64, DbError> {
		Err(unavailable())
	}

	async fn insert_one(&self, _city: &CityDocument) -> Result<Option<String>, DbError> {
		Err(unavailable())
	}

	async fn insert_many(&self, _cities: &[CityDocument]) -> Result<Option<u64>, DbError> {
		Err(unavailable())
	}

	async fn update_one(&self, _id: &str, _update: &CityUpdate) -> Result<u64, DbError> {
		Err(unavailable())
	}

	async fn delete_one(&self, _id: &str) -> Result<u64, DbError> {
		Err(unavailable())
	}

	async fn ping(&self) -> Result<(), DbError> {
		Err(unavailable())
	}
}

#[tokio::test]
async fn test_search_store_failure_is_internal_error() {
	let state = create_app_state(Arc::new(UnavailableStore), &ServerConfig::default());
	let app = create_router(state);

	let (status, json) = get(app, "/search?q=lima").await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(json["error"], "internal_error");
	assert_eq!(json["message"], "Search failed");
}

#[tokio::test]
async fn test_health_store_failure_is_unavailable() {
	let state = create_app_state(Arc::new(UnavailableStore), &ServerConfig::default());
	let app = create_router(state);

	let (status, json) = get(app, "/health").await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(json["status"], "unhealthy");
}
