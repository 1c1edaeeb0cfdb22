// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database configuration.

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
	pub url: String,
	pub max_connections: u32,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			url: "sqlite::memory:".to_string(),
			max_connections: DEFAULT_MAX_CONNECTIONS,
		}
	}
}

/// Database configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfigLayer {
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub max_connections: Option<u32>,
}

impl DatabaseConfigLayer {
	pub fn merge(&mut self, other: DatabaseConfigLayer) {
		if other.url.is_some() {
			self.url = other.url;
		}
		if other.max_connections.is_some() {
			self.max_connections = other.max_connections;
		}
	}

	/// The connection URL has no default; leaving it unset is a
	/// `MissingRequired` error.
	pub fn finalize(self) -> Result<DatabaseConfig, ConfigError> {
		let url = self.url.ok_or_else(|| {
			ConfigError::MissingRequired(vec!["CITYSEARCH_SERVER_DATABASE_URL".to_string()])
		})?;

		let max_connections = self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS);
		if max_connections == 0 {
			return Err(ConfigError::InvalidValue {
				key: "database.max_connections".to_string(),
				message: "must be at least 1".to_string(),
			});
		}

		Ok(DatabaseConfig {
			url,
			max_connections,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_url_is_an_error() {
		let err = DatabaseConfigLayer::default().finalize().unwrap_err();
		match err {
			ConfigError::MissingRequired(keys) => {
				assert_eq!(keys, vec!["CITYSEARCH_SERVER_DATABASE_URL".to_string()]);
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn test_custom_url() {
		let layer = DatabaseConfigLayer {
			url: Some("sqlite:/var/lib/citysearch/cities.db".to_string()),
			max_connections: None,
		};
		let config = layer.finalize().unwrap();
		assert_eq!(config.url, "sqlite:/var/lib/citysearch/cities.db");
		assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
	}

	#[test]
	fn test_zero_connections_rejected() {
		let layer = DatabaseConfigLayer {
			url: Some("sqlite::memory:".to_string()),
			max_connections: Some(0),
		};
		assert!(matches!(
			layer.finalize(),
			Err(ConfigError::InvalidValue { .. })
		));
	}
}
