// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! City autocomplete search server.
//!
//! This crate provides the HTTP surface over the city store: a ranked
//! `/search` endpoint, a `/health` probe and a GeoNames dump importer.

pub mod api;
pub mod error;
pub mod import;
pub mod logging;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
pub use citysearch_server_config::ServerConfig;
pub use error::{ErrorResponse, ServerError};
pub use routes::search::CityResponse;
