// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! City autocomplete search server binary.

use std::path::PathBuf;
use std::sync::Arc;

use citysearch_server::{create_app_state, create_router, import, logging, ServerConfig};
use citysearch_server_config::LoggingConfig;
use citysearch_server_db::{create_pool, run_migrations, CityRepository, CityStore};
use clap::{Parser, Subcommand};
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};

/// citysearch-server - ranked city name autocomplete over HTTP.
#[derive(Parser, Debug)]
#[command(
	name = "citysearch-server",
	about = "City autocomplete search server",
	version
)]
struct Args {
	/// Config file (defaults to /etc/citysearch/server.toml)
	#[arg(long, global = true, env = "CITYSEARCH_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Run the HTTP server (default)
	Serve,
	/// Load a GeoNames cities dump (tab separated) into the database
	Import {
		/// Path to the dump, e.g. cities15000.txt
		path: PathBuf,
	},
	/// Show version and build information
	Version,
}

mod version;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	load_env_file();

	let loaded = match &args.config {
		Some(path) => citysearch_server_config::load_config_with_file(path.clone()),
		None => citysearch_server_config::load_config(),
	};

	let config = match loaded {
		Ok(config) => config,
		Err(e) => {
			logging::init_tracing(&LoggingConfig::default());
			logging::log_config_error(&e);
			return Err(e.into());
		}
	};

	logging::init_tracing(&config.logging);
	logging::log_config_loaded(&config);

	match args.command {
		Some(Command::Import { path }) => run_import(&config, &path).await,
		_ => serve(&config).await,
	}
}

/// Reads `<CITYSEARCH_ENV>.env` (default `dev.env`), falling back to `.env`.
fn load_env_file() {
	let env = std::env::var("CITYSEARCH_ENV").unwrap_or_else(|_| "dev".to_string());
	if dotenvy::from_filename(format!("{env}.env")).is_err() {
		dotenvy::dotenv().ok();
	}
}

async fn serve(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		match_mode = ?config.search.match_mode,
		ranking = ?config.search.ranking,
		"starting citysearch-server"
	);

	let pool = create_pool(&config.database.url, config.database.max_connections).await?;
	run_migrations(&pool).await?;

	let store: Arc<dyn CityStore> = Arc::new(CityRepository::new(pool.clone()));
	let state = create_app_state(store, config);

	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	if let Err(e) = axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
	{
		tracing::error!(error = %e, "Server error");
	}

	pool.close().await;
	tracing::info!("Server shutdown complete");
	Ok(())
}

async fn run_import(
	config: &ServerConfig,
	path: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
	let pool = create_pool(&config.database.url, config.database.max_connections).await?;
	run_migrations(&pool).await?;

	let repo = CityRepository::new(pool.clone());
	let result = import::import_file(&repo, path).await;
	pool.close().await;

	let summary = result?;
	println!(
		"imported {} cities ({} rows skipped, {} batches rejected)",
		summary.inserted, summary.skipped_lines, summary.rejected_batches
	);
	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::error!(error = %e, "failed to listen for ctrl-c");
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			}
			Err(e) => {
				tracing::error!(error = %e, "failed to listen for SIGTERM");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	tracing::info!("Received shutdown signal");
}
