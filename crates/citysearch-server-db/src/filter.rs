// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Name filter for city reads.

use citysearch_server_config::MatchMode;
use regex::Regex;

use crate::error::DbError;

const CASE_INSENSITIVE: &str = "(?i)";

/// Case-insensitive, unanchored pattern over the city name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityFilter {
	pattern: String,
}

impl CityFilter {
	/// Match names containing `query` as a literal substring. Regex
	/// metacharacters in `query` carry no special meaning.
	pub fn name_contains(query: &str) -> Self {
		Self {
			pattern: format!("{CASE_INSENSITIVE}{}", regex::escape(query)),
		}
	}

	/// Match names against `pattern` used as a raw regular expression.
	///
	/// The pattern is compiled once here so that a malformed expression is
	/// reported as [`DbError::InvalidPattern`] rather than failing inside the
	/// store.
	pub fn name_matches(pattern: &str) -> Result<Self, DbError> {
		let pattern = format!("{CASE_INSENSITIVE}{pattern}");
		Regex::new(&pattern).map_err(|e| DbError::InvalidPattern(e.to_string()))?;
		Ok(Self { pattern })
	}

	pub fn from_query(query: &str, mode: MatchMode) -> Result<Self, DbError> {
		match mode {
			MatchMode::Literal => Ok(Self::name_contains(query)),
			MatchMode::Regex => Self::name_matches(query),
		}
	}

	/// Every document.
	pub fn any() -> Self {
		Self {
			pattern: CASE_INSENSITIVE.to_string(),
		}
	}

	/// Pattern handed to the store's `REGEXP` operator.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn compiled(filter: &CityFilter) -> Regex {
		Regex::new(filter.pattern()).unwrap()
	}

	#[test]
	fn test_contains_is_case_insensitive() {
		let re = compiled(&CityFilter::name_contains("lima"));
		assert!(re.is_match("Lima"));
		assert!(re.is_match("San Bartolomé de LIMA"));
		assert!(!re.is_match("Lim"));
	}

	#[test]
	fn test_contains_escapes_metacharacters() {
		let re = compiled(&CityFilter::name_contains(".*"));
		assert!(!re.is_match("Lima"));
		assert!(re.is_match("weird .* name"));
	}

	#[test]
	fn test_regex_mode_expands() {
		let filter = CityFilter::from_query(".*", MatchMode::Regex).unwrap();
		assert!(compiled(&filter).is_match("Lima"));
	}

	#[test]
	fn test_regex_mode_rejects_invalid_pattern() {
		let result = CityFilter::from_query("(unclosed", MatchMode::Regex);
		assert!(matches!(result, Err(DbError::InvalidPattern(_))));
	}

	#[test]
	fn test_literal_mode_accepts_invalid_regex() {
		let filter = CityFilter::from_query("(unclosed", MatchMode::Literal).unwrap();
		assert!(compiled(&filter).is_match("the (unclosed bracket"));
	}

	#[test]
	fn test_any_matches_everything() {
		let re = compiled(&CityFilter::any());
		assert!(re.is_match(""));
		assert!(re.is_match("Lima"));
	}

	proptest! {
		/// Escaped filters always compile and match exactly the names that
		/// contain the query, ignoring case.
		#[test]
		fn literal_filter_is_substring_match(query in ".{0,8}", name in ".{0,16}") {
			let re = compiled(&CityFilter::name_contains(&query));
			let haystack = format!("{name}{query}{name}");
			prop_assert!(re.is_match(&haystack));
		}

		#[test]
		fn literal_filter_matches_case_variants(query in "[a-zA-Z]{1,8}") {
			let re = compiled(&CityFilter::name_contains(&query));
			prop_assert!(re.is_match(&query.to_uppercase()));
			prop_assert!(re.is_match(&query.to_lowercase()));
		}
	}
}
