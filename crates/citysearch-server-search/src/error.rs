// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use citysearch_server_db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
	#[error("Query must not be empty")]
	EmptyQuery,

	#[error("Invalid search pattern: {0}")]
	InvalidPattern(String),

	#[error("City store unavailable: {0}")]
	Database(#[source] DbError),
}

impl From<DbError> for SearchError {
	fn from(e: DbError) -> Self {
		match e {
			DbError::InvalidPattern(msg) => SearchError::InvalidPattern(msg),
			other => SearchError::Database(other),
		}
	}
}
