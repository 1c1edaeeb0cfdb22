// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Normalized edit similarity between a query and a city name.
//!
//! The ratio is `(|a| + |b| - d) / (|a| + |b|)` where `d` is the
//! insertion/deletion distance (a substitution counts as one of each), which
//! reduces to `2 * lcs(a, b) / (|a| + |b|)`. Lengths count Unicode scalar
//! values.

use rapidfuzz::distance::indel;

/// Raw similarity ratio in `[0.0, 1.0]`. Two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
	if a.is_empty() && b.is_empty() {
		return 1.0;
	}

	indel::normalized_similarity(a.chars(), b.chars())
}

/// Round to two decimals, ties to even.
pub fn round_score(value: f64) -> f64 {
	(value * 100.0).round_ties_even() / 100.0
}

/// Score a candidate name against the query, ignoring case.
pub fn score(query: &str, name: &str) -> f64 {
	round_score(ratio(&query.to_lowercase(), &name.to_lowercase()))
}
