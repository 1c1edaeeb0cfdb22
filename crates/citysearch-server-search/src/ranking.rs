// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ordering of scored candidates.

use citysearch_server_config::RankingMode;
use citysearch_server_db::CityRecord;

use crate::similarity;

/// A fetched city decorated with its per-request similarity score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCity {
	pub city: CityRecord,
	pub score: f64,
}

impl ScoredCity {
	/// Score `city` against `query`. A city fetched without its name scores
	/// as an empty name.
	pub fn new(city: CityRecord, query: &str) -> Self {
		let score = similarity::score(query, city.name.as_deref().unwrap_or_default());
		Self { city, score }
	}
}

/// The historical "less than": `a` sorts before `b` whenever its score is
/// greater than *or equal to* `b`'s. Not a strict order, so it must never be
/// handed to `slice::sort_by`.
pub fn legacy_less(a: &ScoredCity, b: &ScoredCity) -> bool {
	a.score >= b.score
}

/// Order candidates by descending score.
pub fn rank(cities: Vec<ScoredCity>, mode: RankingMode) -> Vec<ScoredCity> {
	match mode {
		RankingMode::Stable => rank_stable(cities),
		RankingMode::Legacy => merge_sort_by_less(cities, &legacy_less),
	}
}

fn rank_stable(mut cities: Vec<ScoredCity>) -> Vec<ScoredCity> {
	cities.sort_by(|a, b| b.score.total_cmp(&a.score));
	cities
}

/// Top-down merge sort that consults only `less`. With a strict `less` it is
/// stable; with `legacy_less` equal elements come out in reverse input order.
fn merge_sort_by_less<T, F>(mut items: Vec<T>, less: &F) -> Vec<T>
where
	F: Fn(&T, &T) -> bool,
{
	if items.len() <= 1 {
		return items;
	}

	let right = items.split_off(items.len() / 2);
	let left = merge_sort_by_less(items, less);
	let right = merge_sort_by_less(right, less);

	let mut merged = Vec::with_capacity(left.len() + right.len());
	let mut left = left.into_iter().peekable();
	let mut right = right.into_iter().peekable();
	loop {
		let take_right = match (left.peek(), right.peek()) {
			(Some(l), Some(r)) => less(r, l),
			(Some(_), None) => false,
			(None, Some(_)) => true,
			(None, None) => break,
		};
		let next = if take_right {
			right.next()
		} else {
			left.next()
		};
		merged.extend(next);
	}
	merged
}
