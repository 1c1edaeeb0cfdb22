// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::api::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
	pub status: String,
	pub database: String,
}

/// GET /health - Reports whether the city store answers queries.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	match state.store.ping().await {
		Ok(()) => (
			StatusCode::OK,
			Json(HealthResponse {
				status: "healthy".to_string(),
				database: "ok".to_string(),
			}),
		),
		Err(e) => {
			tracing::warn!(error = %e, "database health check failed");
			(
				StatusCode::SERVICE_UNAVAILABLE,
				Json(HealthResponse {
					status: "unhealthy".to_string(),
					database: "unavailable".to_string(),
				}),
			)
		}
	}
}
