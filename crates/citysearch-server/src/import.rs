// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loads a GeoNames cities dump (tab separated, one city per line) into the
//! city store.

use std::path::Path;

use anyhow::Context;
use citysearch_server_db::{CityDocument, CityStore};
use tokio::io::{AsyncBufReadExt, BufReader};

pub const GEONAMES_COLUMNS: usize = 19;
pub const BATCH_SIZE: usize = 1000;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
	pub inserted: u64,
	pub skipped_lines: u64,
	pub rejected_batches: u64,
}

/// Parse one dump row. Blank cells become `None`; rows with too few columns
/// yield `None`.
pub fn parse_line(line: &str) -> Option<CityDocument> {
	let cells: Vec<&str> = line.split('\t').collect();
	if cells.len() < GEONAMES_COLUMNS {
		return None;
	}

	let cell = |i: usize| {
		let value = cells[i].trim();
		(!value.is_empty()).then(|| value.to_string())
	};

	Some(CityDocument {
		id: cell(0),
		name: cell(1),
		ascii: cell(2),
		alt_name: cell(3),
		lat: cell(4),
		long: cell(5),
		feat_class: cell(6),
		feat_code: cell(7),
		country: cell(8),
		cc2: cell(9),
		admin1: cell(10),
		admin2: cell(11),
		admin3: cell(12),
		admin4: cell(13),
		population: cell(14),
		elevation: cell(15),
		dem: cell(16),
		tz: cell(17),
		modified_at: cell(18),
	})
}

#[tracing::instrument(skip(store), fields(path = %path.display()))]
pub async fn import_file(store: &dyn CityStore, path: &Path) -> anyhow::Result<ImportSummary> {
	let file = tokio::fs::File::open(path)
		.await
		.with_context(|| format!("failed to open {}", path.display()))?;
	let mut lines = BufReader::new(file).lines();

	let mut summary = ImportSummary::default();
	let mut batch = Vec::with_capacity(BATCH_SIZE);
	let mut line_no = 0usize;

	while let Some(line) = lines
		.next_line()
		.await
		.with_context(|| format!("failed to read {} after line {line_no}", path.display()))?
	{
		line_no += 1;
		if line.trim().is_empty() {
			continue;
		}

		match parse_line(&line) {
			Some(city) => batch.push(city),
			None => {
				tracing::warn!(line = line_no, "skipping row with missing columns");
				summary.skipped_lines += 1;
				continue;
			}
		}

		if batch.len() == BATCH_SIZE {
			flush(store, &mut batch, &mut summary, line_no).await?;
		}
	}

	if !batch.is_empty() {
		flush(store, &mut batch, &mut summary, line_no).await?;
	}

	tracing::info!(
		inserted = summary.inserted,
		skipped_lines = summary.skipped_lines,
		rejected_batches = summary.rejected_batches,
		"import finished"
	);
	Ok(summary)
}

async fn flush(
	store: &dyn CityStore,
	batch: &mut Vec<CityDocument>,
	summary: &mut ImportSummary,
	line_no: usize,
) -> anyhow::Result<()> {
	let inserted = store
		.insert_many(batch.as_slice())
		.await
		.with_context(|| format!("failed to insert batch ending at line {line_no}"))?;

	match inserted {
		Some(n) => summary.inserted += n,
		None => {
			tracing::warn!(line = line_no, "batch rejected due to duplicate ids");
			summary.rejected_batches += 1;
		}
	}
	batch.clear();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use citysearch_server_db::testing::create_city_test_pool;
	use citysearch_server_db::{CityFilter, CityRepository};
	use std::io::Write;

	const LIMA: &str = "3936456\tLima\tLima\tLima,Lime\t-12.04318\t-77.02824\tP\tPPLC\tPE\t\t15\t1501\t\t\t7737002\t\t108\tAmerica/Lima\t2019-09-05";

	fn row(id: u32, name: &str) -> String {
		format!("{id}\t{name}\t{name}\t\t0.0\t0.0\tP\tPPL\tXX\t\t\t\t\t\t100\t\t0\tUTC\t2020-01-01")
	}

	#[test]
	fn test_parse_line_maps_columns() {
		let city = parse_line(LIMA).unwrap();
		assert_eq!(city.id.as_deref(), Some("3936456"));
		assert_eq!(city.name.as_deref(), Some("Lima"));
		assert_eq!(city.lat.as_deref(), Some("-12.04318"));
		assert_eq!(city.feat_code.as_deref(), Some("PPLC"));
		assert_eq!(city.country.as_deref(), Some("PE"));
		assert_eq!(city.cc2, None);
		assert_eq!(city.population.as_deref(), Some("7737002"));
		assert_eq!(city.tz.as_deref(), Some("America/Lima"));
		assert_eq!(city.modified_at.as_deref(), Some("2019-09-05"));
	}

	#[test]
	fn test_parse_line_rejects_short_rows() {
		assert!(parse_line("3936456\tLima\tLima").is_none());
		assert!(parse_line("").is_none());
	}

	#[tokio::test]
	async fn test_import_file_inserts_and_skips() {
		let repo = CityRepository::new(create_city_test_pool().await);
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "{LIMA}").unwrap();
		writeln!(file).unwrap();
		writeln!(file, "broken\trow").unwrap();
		writeln!(file, "{}", row(1, "Paris")).unwrap();

		let summary = import_file(&repo, file.path()).await.unwrap();
		assert_eq!(
			summary,
			ImportSummary {
				inserted: 2,
				skipped_lines: 1,
				rejected_batches: 0,
			}
		);
		assert_eq!(repo.count(&CityFilter::any()).await.unwrap(), 2);
	}

	#[tokio::test]
	async fn test_import_file_batches() {
		let repo = CityRepository::new(create_city_test_pool().await);
		let mut file = tempfile::NamedTempFile::new().unwrap();
		for i in 0..(BATCH_SIZE as u32 + 5) {
			writeln!(file, "{}", row(i, &format!("Town {i}"))).unwrap();
		}

		let summary = import_file(&repo, file.path()).await.unwrap();
		assert_eq!(summary.inserted, BATCH_SIZE as u64 + 5);
		assert_eq!(summary.rejected_batches, 0);
	}

	#[tokio::test]
	async fn test_import_file_duplicate_batch_rejected() {
		let repo = CityRepository::new(create_city_test_pool().await);
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "{}", row(7, "Lima")).unwrap();
		writeln!(file, "{}", row(7, "Lima")).unwrap();

		let summary = import_file(&repo, file.path()).await.unwrap();
		assert_eq!(summary.inserted, 0);
		assert_eq!(summary.rejected_batches, 1);
	}

	#[tokio::test]
	async fn test_import_missing_file_errors() {
		let repo = CityRepository::new(create_city_test_pool().await);
		let err = import_file(&repo, Path::new("/nonexistent/cities.tsv"))
			.await
			.unwrap_err();
		assert!(err.to_string().contains("failed to open"));
	}
}
