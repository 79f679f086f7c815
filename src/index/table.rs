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
use crate::index::lookup::RateLookup;
use crate::util::period::TimePeriod;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Read-only monthly price-index data for every known category.
///
/// The table is built once by whoever owns the dataset and then only ever
/// borrowed; nothing in it changes after construction.
#[derive(Debug)]
pub struct PriceIndexTable {
	/// Categories in the order they were supplied
	categories: Vec<CategoryInflationData>,

	/// Position of each category in `categories`, by id
	index: BTreeMap<String, usize>,

	/// Sorted periods of the reference category. Every category is assumed
	/// to share it; nothing checks that they do.
	calendar: Vec<TimePeriod>,
}

impl PriceIndexTable {
	/// Builds the table. The first category supplies the calendar.
	pub fn new(categories: Vec<CategoryInflationData>) -> Result<Self> {
		let mut index = BTreeMap::new();
		for (i, category) in categories.iter().enumerate() {
			if index.insert(category.id().to_string(), i).is_some() {
				return Err(InflationError::dataset(format!(
					"category {} is defined more than once",
					category.id()
				)));
			}
		}

		let calendar: Vec<TimePeriod> = categories
			.first()
			.map(|c| c.rates().keys().copied().collect())
			.unwrap_or_default();

		debug!(
			categories = categories.len(),
			periods = calendar.len(),
			"built price index table"
		);

		Ok(Self {
			categories,
			index,
			calendar,
		})
	}

	pub fn len(&self) -> usize {
		self.categories.len()
	}

	pub fn is_empty(&self) -> bool {
		self.categories.is_empty()
	}

	pub fn contains(&self, category_id: &str) -> bool {
		self.index.contains_key(category_id)
	}

	fn category(&self, category_id: &str) -> Option<&CategoryInflationData> {
		self.index.get(category_id).map(|&i| &self.categories[i])
	}

	pub fn definitions(&self) -> impl Iterator<Item = &CategoryDefinition> {
		self.categories.iter().map(|c| c.definition())
	}

	pub fn definition(&self, category_id: &str) -> Option<&CategoryDefinition> {
		self.category(category_id).map(|c| c.definition())
	}

	/// The full series of a category.
	pub fn rates_for(
		&self,
		category_id: &str,
	) -> Result<&BTreeMap<TimePeriod, f64>> {
		self.category(category_id)
			.map(|c| c.rates())
			.ok_or_else(|| InflationError::unknown_category(category_id))
	}

	/// The single lookup every other accessor is expressed through.
	pub fn lookup(&self, category_id: &str, period: &TimePeriod) -> RateLookup {
		match self.category(category_id) {
			None => RateLookup::UnknownCategory,
			Some(category) => match category.rate(period) {
				Some(v) => RateLookup::Present(v),
				None => RateLookup::AbsentKey,
			},
		}
	}

	pub fn rate(&self, category_id: &str, period: &TimePeriod) -> Option<f64> {
		self.lookup(category_id, period).value()
	}

	/// Zero-filling accessor: unknown categories and missing months both
	/// read as zero.
	pub fn rate_or_zero(&self, category_id: &str, period: &TimePeriod) -> f64 {
		self.rate(category_id, period).unwrap_or(0.0)
	}

	/// Mean of the category's observations in `year`, or zero when there
	/// are none. Unknown categories are an error rather than a zero.
	pub fn yearly_average(&self, category_id: &str, year: i32) -> Result<f64> {
		let category = self
			.category(category_id)
			.ok_or_else(|| InflationError::unknown_category(category_id))?;

		let (sum, count) = category
			.rates_in_year(year)
			.fold((0.0_f64, 0usize), |(sum, count), (_, rate)| {
				(sum + *rate, count + 1)
			});

		if count == 0 {
			return Ok(0.0);
		}
		Ok(sum / count as f64)
	}

	/// Every period of the shared calendar, ascending.
	pub fn calendar_keys(&self) -> &[TimePeriod] {
		&self.calendar
	}

	/// The months of `year` that exist in the calendar, ascending.
	pub fn calendar_year(&self, year: i32) -> Vec<TimePeriod> {
		TimePeriod::months_of(year)
			.filter(|p| self.calendar.binary_search(p).is_ok())
			.collect()
	}

	/// Earliest and latest period of the calendar.
	pub fn bounds(&self) -> Option<(TimePeriod, TimePeriod)> {
		match (self.calendar.first(), self.calendar.last()) {
			(Some(&first), Some(&last)) => Some((first, last)),
			_ => None,
		}
	}

	/// Distinct years that have at least one month in the calendar.
	pub fn years(&self) -> BTreeSet<i32> {
		self.calendar.iter().map(|p| p.year()).collect()
	}

	/// The most recent year with all twelve months present. Falls back to
	/// the earliest known year when no year is complete; `None` only when
	/// the calendar is empty.
	pub fn last_complete_year(&self) -> Option<i32> {
		let years = self.years();

		years
			.iter()
			.rev()
			.find(|&&year| self.calendar_year(year).len() == 12)
			.or_else(|| years.iter().next())
			.copied()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn category(
		id: &str,
		from_year: i32,
		to_year: i32,
		last_month: u32,
	) -> CategoryInflationData {
		let mut rates = BTreeMap::new();
		for year in from_year..=to_year {
			let months = if year == to_year { last_month } else { 12 };
			for month in 1..=months {
				rates.insert(
					TimePeriod::new(year, month).unwrap(),
					100.0 + month as f64,
				);
			}
		}
		CategoryInflationData::new(CategoryDefinition::new(id, id, ""), rates)
	}

	#[test]
	fn test_duplicate_ids_rejected() {
		let result = PriceIndexTable::new(vec![
			category("food", 2020, 2021, 12),
			category("food", 2020, 2021, 12),
		]);
		assert!(matches!(result, Err(InflationError::Dataset { .. })));
	}

	#[test]
	fn test_lookup_outcomes() {
		let table =
			PriceIndexTable::new(vec![category("food", 2020, 2021, 6)]).unwrap();
		let june = TimePeriod::new(2021, 6).unwrap();
		let july = TimePeriod::new(2021, 7).unwrap();

		assert_eq!(table.lookup("food", &june), RateLookup::Present(106.0));
		assert_eq!(table.lookup("food", &july), RateLookup::AbsentKey);
		assert_eq!(table.lookup("fuel", &june), RateLookup::UnknownCategory);

		assert_eq!(table.rate("food", &july), None);
		assert_eq!(table.rate_or_zero("food", &july), 0.0);
		assert_eq!(table.rate_or_zero("fuel", &june), 0.0);
	}

	#[test]
	fn test_rates_for_unknown() {
		let table =
			PriceIndexTable::new(vec![category("food", 2020, 2020, 12)]).unwrap();
		assert_eq!(table.rates_for("food").unwrap().len(), 12);
		assert!(matches!(
			table.rates_for("fuel"),
			Err(InflationError::UnknownCategory { .. })
		));
	}

	#[test]
	fn test_yearly_average() {
		let table =
			PriceIndexTable::new(vec![category("food", 2020, 2021, 3)]).unwrap();

		// 101..=112 averages to 106.5
		assert_eq!(table.yearly_average("food", 2020).unwrap(), 106.5);
		// partial year: 101, 102, 103
		assert_eq!(table.yearly_average("food", 2021).unwrap(), 102.0);
		// no data at all reads as zero
		assert_eq!(table.yearly_average("food", 2019).unwrap(), 0.0);
		assert!(table.yearly_average("fuel", 2020).is_err());
	}

	#[test]
	fn test_calendar_from_first_category() {
		let table = PriceIndexTable::new(vec![
			category("food", 2022, 2023, 2),
			category("fuel", 2010, 2023, 12),
		])
		.unwrap();

		let keys = table.calendar_keys();
		assert_eq!(keys.len(), 14);
		assert_eq!(keys[0].to_key(), "2022-01");
		assert_eq!(keys[13].to_key(), "2023-02");
		assert_eq!(table.calendar_year(2023).len(), 2);
		assert!(table.calendar_year(2010).is_empty());

		let (min, max) = table.bounds().unwrap();
		assert_eq!((min.to_key(), max.to_key()), ("2022-01".into(), "2023-02".into()));
	}

	#[test]
	fn test_last_complete_year() {
		let table =
			PriceIndexTable::new(vec![category("food", 2020, 2024, 6)]).unwrap();
		assert_eq!(table.last_complete_year(), Some(2023));
	}

	#[test]
	fn test_last_complete_year_with_full_final_year() {
		let table =
			PriceIndexTable::new(vec![category("food", 2020, 2024, 12)]).unwrap();
		assert_eq!(table.last_complete_year(), Some(2024));
	}

	#[test]
	fn test_last_complete_year_falls_back_to_earliest() {
		let mut rates = BTreeMap::new();
		for key in ["2021-03", "2021-04", "2022-01"] {
			rates.insert(TimePeriod::from_key(key).unwrap(), 100.0);
		}
		let table = PriceIndexTable::new(vec![CategoryInflationData::new(
			CategoryDefinition::new("food", "Food", ""),
			rates,
		)])
		.unwrap();

		assert_eq!(table.last_complete_year(), Some(2021));
	}

	#[test]
	fn test_empty_table() {
		let table = PriceIndexTable::new(vec![]).unwrap();
		assert!(table.is_empty());
		assert!(table.calendar_keys().is_empty());
		assert_eq!(table.bounds(), None);
		assert_eq!(table.last_complete_year(), None);
	}

	#[test]
	fn test_definitions_keep_order() {
		let table = PriceIndexTable::new(vec![
			category("housing", 2020, 2020, 12),
			category("food", 2020, 2020, 12),
		])
		.unwrap();
		let ids: Vec<&str> = table.definitions().map(|d| d.id.as_str()).collect();
		assert_eq!(ids, vec!["housing", "food"]);
		assert_eq!(table.definition("food").unwrap().name, "food");
		assert!(table.definition("fuel").is_none());
	}
}
