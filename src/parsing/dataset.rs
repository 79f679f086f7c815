/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::error::{InflationError, Result};
use crate::index::category::{CategoryDefinition, CategoryInflationData};
use crate::index::table::PriceIndexTable;
use crate::util::period::TimePeriod;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::collections::BTreeMap;

// ---------------
// -- RECEIVING --
// ---------------

/// The dataset is published either as a bare list of categories or wrapped
/// together with a metadata block.
#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile {
	Bare(Vec<CategoryRecord>),
	Wrapped(DatasetHolder),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetHolder {
	#[serde(default)]
	metadata: DatasetMetadata,
	categories: Vec<CategoryRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRecord {
	id: String,
	name: String,

	#[serde(default)]
	description: String,

	/// Keyed by "YYYY-MM"
	rates: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetadata {
	/// RFC 3339 timestamp of when the upstream data was fetched
	pub fetched_at: Option<String>,
	pub version: Option<String>,
	pub description: Option<String>,
}

impl DatasetMetadata {
	pub fn fetched_at(&self) -> Option<DateTime<FixedOffset>> {
		self.fetched_at
			.as_deref()
			.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
	}
}

// ------------
// -- LOADED --
// ------------

/// A parsed dataset: the table the engine borrows, plus whatever the
/// publisher said about it.
#[derive(Debug)]
pub struct Dataset {
	pub metadata: DatasetMetadata,
	pub table: PriceIndexTable,
}

impl Dataset {
	pub fn from_json(json: &str) -> Result<Dataset> {
		let (metadata, records) = match serde_json::from_str(json)? {
			DatasetFile::Bare(records) => (DatasetMetadata::default(), records),
			DatasetFile::Wrapped(holder) => (holder.metadata, holder.categories),
		};

		let categories = records
			.into_iter()
			.map(CategoryRecord::into_category)
			.collect::<Result<Vec<_>>>()?;

		Ok(Dataset {
			metadata,
			table: PriceIndexTable::new(categories)?,
		})
	}
}

impl CategoryRecord {
	fn into_category(self) -> Result<CategoryInflationData> {
		let mut rates = BTreeMap::new();

		for (key, value) in self.rates {
			let period = TimePeriod::from_key(&key).map_err(|e| {
				InflationError::dataset(format!("category {}: {}", self.id, e))
			})?;

			if !value.is_finite() || value <= 0.0 {
				return Err(InflationError::dataset(format!(
					"category {}: index for {} must be positive, got {}",
					self.id, key, value
				)));
			}

			// "2024-1" and "2024-01" are the same month
			if rates.insert(period, value).is_some() {
				return Err(InflationError::dataset(format!(
					"category {}: {} appears more than once",
					self.id, period
				)));
			}
		}

		Ok(CategoryInflationData::new(
			CategoryDefinition {
				id: self.id,
				name: self.name,
				description: self.description,
			},
			rates,
		))
	}
}
