// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Search behavior configuration section.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// How the user's query is turned into a name pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
	/// Query text is escaped and matched as a literal substring.
	#[default]
	Literal,
	/// Query text is used as a raw regular expression.
	Regex,
}

impl FromStr for MatchMode {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"literal" => Ok(MatchMode::Literal),
			"regex" => Ok(MatchMode::Regex),
			other => Err(ConfigError::InvalidValue {
				key: "search.match_mode".to_string(),
				message: format!("expected 'literal' or 'regex', got '{other}'"),
			}),
		}
	}
}

/// How scored candidates are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
	/// Stable descending-score sort. Ties keep fetch order.
	#[default]
	Stable,
	/// Sort driven by the historical `a.score >= b.score` "less than"
	/// relation. Ties come out in reverse fetch order.
	Legacy,
}

impl FromStr for RankingMode {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"stable" => Ok(RankingMode::Stable),
			"legacy" => Ok(RankingMode::Legacy),
			other => Err(ConfigError::InvalidValue {
				key: "search.ranking".to_string(),
				message: format!("expected 'stable' or 'legacy', got '{other}'"),
			}),
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
	pub match_mode: MatchMode,
	pub ranking: RankingMode,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfigLayer {
	#[serde(default)]
	pub match_mode: Option<MatchMode>,
	#[serde(default)]
	pub ranking: Option<RankingMode>,
}

impl SearchConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.match_mode.is_some() {
			self.match_mode = other.match_mode;
		}
		if other.ranking.is_some() {
			self.ranking = other.ranking;
		}
	}

	pub fn finalize(self) -> SearchConfig {
		SearchConfig {
			match_mode: self.match_mode.unwrap_or_default(),
			ranking: self.ranking.unwrap_or_default(),
		}
	}
}
