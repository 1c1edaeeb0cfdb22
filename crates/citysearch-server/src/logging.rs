// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use citysearch_server_config::{ConfigError, LogFormat, LoggingConfig, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_tracing(config: &LoggingConfig) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
	let registry = tracing_subscriber::registry().with(filter);

	match config.format {
		LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json())
			.init(),
	}
}

/// Report a configuration failure. Missing keys are listed together.
pub fn log_config_error(err: &ConfigError) {
	match err {
		ConfigError::MissingRequired(keys) => tracing::error!(
			missing = %keys.join(", "),
			"refusing to start with incomplete configuration"
		),
		other => tracing::error!(error = %other, "invalid configuration"),
	}
}

pub fn log_config_loaded(config: &ServerConfig) {
	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		max_connections = config.database.max_connections,
		match_mode = ?config.search.match_mode,
		ranking = ?config.search.ranking,
		log_format = ?config.logging.format,
		"Server configuration loaded"
	);
}
