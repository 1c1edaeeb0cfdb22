// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database layer for the city search server.
//!
//! Cities live in a single SQLite table shaped like a document collection:
//! every field is an optional string and names are matched with `REGEXP`.

pub mod city;
pub mod error;
pub mod filter;
pub mod pool;
pub mod projection;
pub mod testing;
pub mod types;

pub use city::{CityRepository, CityStore};
pub use error::{DbError, Result};
pub use filter::CityFilter;
pub use pool::{create_pool, run_migrations};
pub use projection::{CityField, CityProjection};
pub use types::{CityDocument, CityRecord, CityUpdate, FindOptions, SortOrder};
