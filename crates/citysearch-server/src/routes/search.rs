// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! City autocomplete HTTP handler.

use axum::{
	extract::{Query, State},
	Json,
};
use citysearch_server_db::CityRecord;
use citysearch_server_search::ScoredCity;
use serde::{Deserialize, Serialize};

use crate::{api::AppState, error::ServerError};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
	pub q: String,
}

/// A ranked city as sent to clients. The score only decides the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityResponse {
	pub name: Option<String>,
	pub lat: Option<String>,
	pub long: Option<String>,
	pub feat_class: Option<String>,
	pub feat_code: Option<String>,
	pub country: Option<String>,
	pub population: Option<String>,
}

impl From<CityRecord> for CityResponse {
	fn from(city: CityRecord) -> Self {
		Self {
			name: city.name,
			lat: city.lat,
			long: city.long,
			feat_class: city.feat_class,
			feat_code: city.feat_code,
			country: city.country,
			population: city.population,
		}
	}
}

impl From<ScoredCity> for CityResponse {
	fn from(scored: ScoredCity) -> Self {
		scored.city.into()
	}
}

/// GET /search?q= - Cities whose name contains `q`, most similar first.
pub async fn search_cities(
	State(state): State<AppState>,
	Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<CityResponse>>, ServerError> {
	tracing::debug!(query = %params.q, "searching cities");

	let ranked = state.search.search(&params.q).await?;

	Ok(Json(ranked.into_iter().map(CityResponse::from).collect()))
}
