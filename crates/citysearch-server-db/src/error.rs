// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Invalid pattern: {0}")]
	InvalidPattern(String),

	#[error("Internal: {0}")]
	Internal(String),
}

impl DbError {
	/// True for unique-constraint violations, which inserts log and swallow.
	pub fn is_unique_violation(&self) -> bool {
		match self {
			DbError::Sqlx(sqlx::Error::Database(e)) => e.is_unique_violation(),
			DbError::Conflict(_) => true,
			_ => false,
		}
	}
}

pub type Result<T> = std::result::Result<T, DbError>;
