// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Autocomplete search over the city store.

use std::sync::Arc;

use citysearch_server_config::{MatchMode, RankingMode, SearchConfig};
use citysearch_server_db::{CityFilter, CityProjection, CityStore};

use crate::error::SearchError;
use crate::ranking::{rank, ScoredCity};

/// Filters the store by name, scores each candidate against the query and
/// ranks the result. Holds no per-request state.
pub struct CitySearchService {
	store: Arc<dyn CityStore>,
	match_mode: MatchMode,
	ranking: RankingMode,
}

impl std::fmt::Debug for CitySearchService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CitySearchService")
			.field("match_mode", &self.match_mode)
			.field("ranking", &self.ranking)
			.finish()
	}
}

impl CitySearchService {
	pub fn new(store: Arc<dyn CityStore>, config: &SearchConfig) -> Self {
		Self {
			store,
			match_mode: config.match_mode,
			ranking: config.ranking,
		}
	}

	pub fn match_mode(&self) -> MatchMode {
		self.match_mode
	}

	pub fn ranking(&self) -> RankingMode {
		self.ranking
	}

	/// Every city whose name contains `query`, best match first.
	///
	/// Store failures propagate unchanged; nothing is retried and no partial
	/// result is returned.
	#[tracing::instrument(
		skip(self),
		fields(match_mode = ?self.match_mode, ranking = ?self.ranking)
	)]
	pub async fn search(&self, query: &str) -> Result<Vec<ScoredCity>, SearchError> {
		if query.is_empty() {
			return Err(SearchError::EmptyQuery);
		}

		let filter = CityFilter::from_query(query, self.match_mode)?;
		let candidates = self.store.find(&filter, CityProjection::SEARCH).await?;

		let scored = candidates
			.into_iter()
			.map(|city| ScoredCity::new(city, query))
			.collect();
		let ranked = rank(scored, self.ranking);

		tracing::debug!(count = ranked.len(), "search completed");
		Ok(ranked)
	}
}
