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
use crate::index::table::PriceIndexTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monthly spend in one category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingCategory {
	#[serde(alias = "category_id")]
	pub category_id: String,
	pub amount: f64,
}

impl SpendingCategory {
	pub fn new(category_id: &str, amount: f64) -> Result<Self> {
		let entry = Self {
			category_id: category_id.to_string(),
			amount,
		};
		entry.validate()?;
		Ok(entry)
	}

	fn validate(&self) -> Result<()> {
		if self.amount.is_nan() || self.amount < 0.0 {
			return Err(InflationError::invalid(format!(
				"amount for {} must be a non-negative number, got {}",
				self.category_id, self.amount
			)));
		}
		Ok(())
	}
}

impl fmt::Display for SpendingCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}={}", self.category_id, self.amount)
	}
}

/// A household's spending profile. Ids are expected to be unique but that
/// is not enforced; a repeated id simply counts twice.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Basket {
	entries: Vec<SpendingCategory>,
}

impl Basket {
	pub fn new() -> Self {
		Self::default()
	}

	/// Validates every entry, so deserialized input gets the same checks as
	/// entries built through `SpendingCategory::new`.
	pub fn from_entries(entries: Vec<SpendingCategory>) -> Result<Self> {
		for entry in &entries {
			entry.validate()?;
		}
		Ok(Self { entries })
	}

	pub fn push(&mut self, category_id: &str, amount: f64) -> Result<()> {
		self.entries.push(SpendingCategory::new(category_id, amount)?);
		Ok(())
	}

	pub fn entries(&self) -> &[SpendingCategory] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn total(&self) -> f64 {
		self.entries.iter().map(|e| e.amount).sum()
	}

	/// Ids the table does not know, each reported once, in basket order.
	pub fn unknown_ids(&self, table: &PriceIndexTable) -> Vec<String> {
		let mut unknown: Vec<String> = Vec::new();
		for entry in &self.entries {
			if !table.contains(&entry.category_id)
				&& !unknown.contains(&entry.category_id)
			{
				unknown.push(entry.category_id.clone());
			}
		}
		unknown
	}
}
