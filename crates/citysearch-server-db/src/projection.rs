// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed field projection for city reads.
//!
//! A projection decides which [`CityField`]s a read returns. Excluded fields
//! are still present in the result row but always come back as `None`.

/// The fixed set of fields a city read can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CityField {
	Id,
	Name,
	Lat,
	Long,
	FeatClass,
	FeatCode,
	Country,
	Population,
}

impl CityField {
	pub const ALL: [CityField; 8] = [
		CityField::Id,
		CityField::Name,
		CityField::Lat,
		CityField::Long,
		CityField::FeatClass,
		CityField::FeatCode,
		CityField::Country,
		CityField::Population,
	];

	pub fn column(self) -> &'static str {
		match self {
			CityField::Id => "id",
			CityField::Name => "name",
			CityField::Lat => "lat",
			CityField::Long => "long",
			CityField::FeatClass => "feat_class",
			CityField::FeatCode => "feat_code",
			CityField::Country => "country",
			CityField::Population => "population",
		}
	}
}

/// Field-inclusion flags, one per [`CityField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityProjection {
	pub id: bool,
	pub name: bool,
	pub lat: bool,
	pub long: bool,
	pub feat_class: bool,
	pub feat_code: bool,
	pub country: bool,
	pub population: bool,
}

impl CityProjection {
	/// Every field.
	pub const ALL: CityProjection = CityProjection {
		id: true,
		name: true,
		lat: true,
		long: true,
		feat_class: true,
		feat_code: true,
		country: true,
		population: true,
	};

	/// Fields returned to autocomplete clients: everything but the identifier.
	pub const SEARCH: CityProjection = CityProjection {
		id: false,
		..CityProjection::ALL
	};

	pub fn includes(&self, field: CityField) -> bool {
		match field {
			CityField::Id => self.id,
			CityField::Name => self.name,
			CityField::Lat => self.lat,
			CityField::Long => self.long,
			CityField::FeatClass => self.feat_class,
			CityField::FeatCode => self.feat_code,
			CityField::Country => self.country,
			CityField::Population => self.population,
		}
	}

	/// Render the SQL select list. Excluded fields are selected as `NULL` so
	/// every row keeps the same shape.
	pub fn select_list(&self) -> String {
		CityField::ALL
			.iter()
			.map(|field| {
				let column = field.column();
				if self.includes(*field) {
					format!("\"{column}\"")
				} else {
					format!("NULL AS \"{column}\"")
				}
			})
			.collect::<Vec<_>>()
			.join(", ")
	}
}

impl Default for CityProjection {
	fn default() -> Self {
		CityProjection::ALL
	}
}
