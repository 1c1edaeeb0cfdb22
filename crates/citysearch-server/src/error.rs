// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use citysearch_server_search::SearchError;
use serde::{Deserialize, Serialize};

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("invalid query: {0}")]
	InvalidQuery(String),
	#[error("invalid pattern: {0}")]
	InvalidPattern(String),
	#[error("internal error: {0}")]
	Internal(String),
}

impl From<SearchError> for ServerError {
	fn from(e: SearchError) -> Self {
		match e {
			SearchError::EmptyQuery => {
				ServerError::InvalidQuery("Query must not be empty".to_string())
			}
			SearchError::InvalidPattern(msg) => ServerError::InvalidPattern(msg),
			SearchError::Database(e) => {
				tracing::error!(error = %e, "search failed");
				ServerError::Internal("Search failed".to_string())
			}
		}
	}
}

impl ServerError {
	fn status_and_code(&self) -> (StatusCode, &'static str) {
		match self {
			ServerError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "invalid_query"),
			ServerError::InvalidPattern(_) => (StatusCode::BAD_REQUEST, "invalid_pattern"),
			ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, code) = self.status_and_code();
		let message = match self {
			ServerError::InvalidQuery(msg)
			| ServerError::InvalidPattern(msg)
			| ServerError::Internal(msg) => msg,
		};

		(
			status,
			Json(ErrorResponse {
				error: code.to_string(),
				message,
			}),
		)
			.into_response()
	}
}
