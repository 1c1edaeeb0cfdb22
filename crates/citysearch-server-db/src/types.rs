// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A city as returned by a projected read. Fields left out of the projection
/// are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CityRecord {
	pub id: Option<String>,
	pub name: Option<String>,
	pub lat: Option<String>,
	pub long: Option<String>,
	pub feat_class: Option<String>,
	pub feat_code: Option<String>,
	pub country: Option<String>,
	pub population: Option<String>,
}

/// The full stored city document, laid out like a GeoNames cities dump row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityDocument {
	pub id: Option<String>,
	pub name: Option<String>,
	pub ascii: Option<String>,
	pub alt_name: Option<String>,
	pub lat: Option<String>,
	pub long: Option<String>,
	pub feat_class: Option<String>,
	pub feat_code: Option<String>,
	pub country: Option<String>,
	pub cc2: Option<String>,
	pub admin1: Option<String>,
	pub admin2: Option<String>,
	pub admin3: Option<String>,
	pub admin4: Option<String>,
	pub population: Option<String>,
	pub elevation: Option<String>,
	pub dem: Option<String>,
	pub tz: Option<String>,
	pub modified_at: Option<String>,
}

/// Fields to overwrite on an existing city. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityUpdate {
	pub name: Option<String>,
	pub lat: Option<String>,
	pub long: Option<String>,
	pub feat_class: Option<String>,
	pub feat_code: Option<String>,
	pub country: Option<String>,
	pub population: Option<String>,
}

impl CityUpdate {
	pub(crate) fn assignments(&self) -> Vec<(&'static str, &str)> {
		[
			("name", &self.name),
			("lat", &self.lat),
			("long", &self.long),
			("feat_class", &self.feat_class),
			("feat_code", &self.feat_code),
			("country", &self.country),
			("population", &self.population),
		]
		.into_iter()
		.filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
		.collect()
	}

	pub fn is_empty(&self) -> bool {
		self.assignments().is_empty()
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
	#[default]
	Ascending,
	Descending,
}

/// Ordering and paging for [`crate::CityStore::find_many`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
	/// Sort by name. `None` keeps insertion order.
	pub sort_by_name: Option<SortOrder>,
	/// Zero-based page index.
	pub page: u32,
	/// Page size. Zero disables paging.
	pub page_size: u32,
}
