// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ranked fuzzy search over city names.
//!
//! A search filters the store for names containing the query, scores every
//! candidate with [`similarity::score`] and orders them with
//! [`ranking::rank`].

pub mod error;
pub mod ranking;
pub mod service;
pub mod similarity;

pub use error::SearchError;
pub use ranking::{legacy_less, rank, ScoredCity};
pub use service::CitySearchService;
pub use similarity::{ratio, round_score, score};
