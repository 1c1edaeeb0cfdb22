// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Router construction and shared handler state.

use std::sync::Arc;

use axum::{routing::get, Router};
use citysearch_server_db::CityStore;
use citysearch_server_search::CitySearchService;

use crate::routes;
use crate::ServerConfig;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
	pub store: Arc<dyn CityStore>,
	pub search: Arc<CitySearchService>,
}

pub fn create_app_state(store: Arc<dyn CityStore>, config: &ServerConfig) -> AppState {
	let search = Arc::new(CitySearchService::new(Arc::clone(&store), &config.search));
	AppState { store, search }
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/search", get(routes::search::search_cities))
		.with_state(state)
}
