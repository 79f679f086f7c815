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

use crate::calc::basket::Basket;
use crate::error::{InflationError, Result};
use crate::index::lookup::MissingRate;
use crate::index::table::PriceIndexTable;
use crate::util::nonfinite;
use crate::util::period::{TimePeriod, TimeRange};
use serde::Serialize;
use tracing::{debug, info, warn};

const MONTHS_PER_YEAR: usize = 12;

/// A personal inflation rate and how much the data behind it can be trusted.
///
/// `personal_rate` is a percentage and is NaN whenever the data needed to
/// compute it is missing; callers must check before displaying it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationResult {
	#[serde(serialize_with = "nonfinite::serialize")]
	pub personal_rate: f64,
	pub from: TimePeriod,
	pub to: TimePeriod,

	/// The target year had all twelve months of index data
	pub is_complete: bool,

	/// The target year is the most recent complete year in the table
	pub is_last_complete: bool,
}

impl InflationResult {
	/// The result reported when the year before `year` lacks a full twelve
	/// months of data.
	fn incomplete_baseline(year: i32) -> Self {
		Self {
			personal_rate: f64::NAN,
			from: TimePeriod::year_end(year - 1),
			to: TimePeriod::year_end(year),
			is_complete: false,
			is_last_complete: false,
		}
	}

	pub fn is_defined(&self) -> bool {
		!self.personal_rate.is_nan()
	}
}

/// Year-over-year personal inflation over a borrowed price-index table.
///
/// The cost of the basket is priced at every available month of the target
/// year and of the year before; the ratio of the two monthly averages,
/// annualized when the target year is partial, is the rate.
pub struct InflationEngine<'a> {
	table: &'a PriceIndexTable,
}

impl<'a> InflationEngine<'a> {
	pub fn new(table: &'a PriceIndexTable) -> Self {
		Self { table }
	}

	pub fn table(&self) -> &'a PriceIndexTable {
		self.table
	}

	/// Ranges are treated as spanning whole calendar years: only the year
	/// of the range's end matters.
	pub fn calculate_range(
		&self,
		basket: &Basket,
		range: &TimeRange,
	) -> Result<InflationResult> {
		self.calculate(basket, range.to.year())
	}

	pub fn calculate(&self, basket: &Basket, year: i32) -> Result<InflationResult> {
		let previous_year = year.checked_sub(1).ok_or_else(|| {
			InflationError::invalid(format!("year {} has no predecessor", year))
		})?;

		let before = self.table.calendar_year(previous_year);
		let after = self.table.calendar_year(year);

		debug!(
			year,
			previous_months = before.len(),
			current_months = after.len(),
			"resolved calendar"
		);

		// Only a full prior year is trusted as a baseline
		if before.len() < MONTHS_PER_YEAR {
			info!(year, "baseline year is incomplete, no rate computed");
			return Ok(InflationResult::incomplete_baseline(year));
		}

		let unknown = basket.unknown_ids(self.table);
		if !unknown.is_empty() {
			warn!(ids = ?unknown, "basket references unknown categories");
			return Err(InflationError::UnknownCategory { ids: unknown });
		}

		let is_last_complete = self.table.last_complete_year() == Some(year);

		let (from, to) = match (after.first(), after.last()) {
			(Some(&first), Some(&last)) => (first, last),
			_ => {
				info!(year, "no data for the target year");
				return Ok(InflationResult {
					personal_rate: f64::NAN,
					from: TimePeriod::year_start(year),
					to: TimePeriod::year_end(year),
					is_complete: false,
					is_last_complete,
				});
			},
		};

		let spend_before = self.basket_spend(basket, &before)?;
		let spend_after = self.basket_spend(basket, &after)?;

		// Averaging per month keeps a partial current year comparable
		let average_before = spend_before / before.len() as f64;
		let average_after = spend_after / after.len() as f64;

		let exponent = MONTHS_PER_YEAR as f64 / after.len() as f64;
		let annualized = (average_after / average_before).powf(exponent);

		debug!(average_before, average_after, exponent, "annualized ratio");

		Ok(InflationResult {
			personal_rate: (annualized - 1.0) * 100.0,
			from,
			to,
			is_complete: after.len() == MONTHS_PER_YEAR,
			is_last_complete,
		})
	}

	/// Total cost of the basket summed over the given months. A month that
	/// a category lacks poisons the sum with NaN.
	fn basket_spend(&self, basket: &Basket, months: &[TimePeriod]) -> Result<f64> {
		let mut total = 0.0;
		for entry in basket.entries() {
			for month in months {
				let rate = self.table.lookup(&entry.category_id, month).resolve(
					&entry.category_id,
					month,
					MissingRate::NaN,
				)?;
				total += entry.amount * rate;
			}
		}
		Ok(total)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::index::category::{CategoryDefinition, CategoryInflationData};
	use std::collections::BTreeMap;
	use tracing_test::traced_test;

	fn series(
		id: &str,
		months: impl IntoIterator<Item = (&'static str, f64)>,
	) -> CategoryInflationData {
		let rates: BTreeMap<TimePeriod, f64> = months
			.into_iter()
			.map(|(k, v)| (TimePeriod::from_key(k).unwrap(), v))
			.collect();
		CategoryInflationData::new(CategoryDefinition::new(id, id, ""), rates)
	}

	fn year_of(year: i32, value: f64, months: u32) -> Vec<(TimePeriod, f64)> {
		(1..=months)
			.map(|m| (TimePeriod::new(year, m).unwrap(), value))
			.collect()
	}

	fn flat(id: &str, rates: Vec<(TimePeriod, f64)>) -> CategoryInflationData {
		CategoryInflationData::new(
			CategoryDefinition::new(id, id, ""),
			rates.into_iter().collect(),
		)
	}

	fn basket(entries: &[(&str, f64)]) -> Basket {
		let mut basket = Basket::new();
		for (id, amount) in entries {
			basket.push(id, *amount).unwrap();
		}
		basket
	}

	#[test]
	fn test_constant_prices_mean_no_inflation() {
		let rates = [year_of(2022, 104.2, 12), year_of(2023, 104.2, 12)].concat();
		let table = PriceIndexTable::new(vec![flat("food", rates)]).unwrap();
		let engine = InflationEngine::new(&table);

		let result = engine.calculate(&basket(&[("food", 6000.0)]), 2023).unwrap();
		assert!(result.personal_rate.abs() < 1e-9);
		assert!(result.is_complete);
		assert!(result.is_last_complete);
		assert_eq!(result.from.to_key(), "2023-01");
		assert_eq!(result.to.to_key(), "2023-12");
	}

	#[test]
	fn test_full_year_ratio() {
		let rates = [year_of(2022, 100.0, 12), year_of(2023, 110.0, 12)].concat();
		let table = PriceIndexTable::new(vec![flat("food", rates)]).unwrap();
		let engine = InflationEngine::new(&table);

		let result = engine.calculate(&basket(&[("food", 10.0)]), 2023).unwrap();
		assert!((result.personal_rate - 10.0).abs() < 1e-9);
	}

	#[test]
	fn test_partial_year_is_annualized() {
		let rates = [year_of(2023, 100.0, 12), year_of(2024, 105.0, 6)].concat();
		let table = PriceIndexTable::new(vec![flat("food", rates)]).unwrap();
		let engine = InflationEngine::new(&table);

		let result = engine.calculate(&basket(&[("food", 1.0)]), 2024).unwrap();
		assert!((result.personal_rate - 10.25).abs() < 1e-9);
		assert!(!result.is_complete);
		assert!(!result.is_last_complete);
		assert_eq!(result.from.to_key(), "2024-01");
		assert_eq!(result.to.to_key(), "2024-06");
	}

	#[test]
	fn test_incomplete_baseline() {
		// 2022 is missing March
		let table = PriceIndexTable::new(vec![series(
			"food",
			[
				("2022-01", 100.0),
				("2022-02", 100.0),
				("2022-04", 100.0),
				("2023-01", 120.0),
			],
		)])
		.unwrap();
		let engine = InflationEngine::new(&table);

		let result = engine.calculate(&basket(&[("food", 1.0)]), 2023).unwrap();
		assert!(result.personal_rate.is_nan());
		assert!(!result.is_defined());
		assert!(!result.is_complete);
		assert!(!result.is_last_complete);
		assert_eq!(result.from.to_key(), "2022-12");
		assert_eq!(result.to.to_key(), "2023-12");
	}

	#[test]
	fn test_incomplete_baseline_wins_over_unknown_category() {
		let table =
			PriceIndexTable::new(vec![flat("food", year_of(2023, 100.0, 12))])
				.unwrap();
		let engine = InflationEngine::new(&table);

		let result = engine.calculate(&basket(&[("fuel", 1.0)]), 2023).unwrap();
		assert!(result.personal_rate.is_nan());
	}

	#[test]
	#[traced_test]
	fn test_unknown_category_fails_calculation() {
		let rates = [year_of(2022, 100.0, 12), year_of(2023, 101.0, 12)].concat();
		let table = PriceIndexTable::new(vec![flat("food", rates)]).unwrap();
		let engine = InflationEngine::new(&table);

		let err = engine
			.calculate(
				&basket(&[("food", 1.0), ("fuel", 2.0), ("toys", 3.0), ("fuel", 1.0)]),
				2023,
			)
			.unwrap_err();

		match err {
			InflationError::UnknownCategory { ids } => {
				assert_eq!(ids, vec!["fuel".to_string(), "toys".to_string()])
			},
			other => panic!("unexpected error: {}", other),
		}
		assert!(logs_contain("basket references unknown categories"));
	}

	#[test]
	fn test_missing_month_in_one_category_is_nan() {
		let food = [year_of(2022, 100.0, 12), year_of(2023, 101.0, 12)].concat();
		let mut fuel = [year_of(2022, 100.0, 12), year_of(2023, 101.0, 12)].concat();
		fuel.retain(|(p, _)| p.to_key() != "2023-05");

		let table =
			PriceIndexTable::new(vec![flat("food", food), flat("fuel", fuel)])
				.unwrap();
		let engine = InflationEngine::new(&table);

		let result = engine
			.calculate(&basket(&[("food", 1.0), ("fuel", 1.0)]), 2023)
			.unwrap();
		assert!(result.personal_rate.is_nan());
		// the flags still describe the calendar
		assert!(result.is_complete);
	}

	#[test]
	fn test_zero_baseline_is_infinite() {
		let rates = [year_of(2022, 0.0, 12), year_of(2023, 100.0, 12)].concat();
		let table = PriceIndexTable::new(vec![flat("food", rates)]).unwrap();
		let engine = InflationEngine::new(&table);

		let result = engine.calculate(&basket(&[("food", 1.0)]), 2023).unwrap();
		assert_eq!(result.personal_rate, f64::INFINITY);
	}

	#[test]
	fn test_empty_basket_is_nan() {
		let rates = [year_of(2022, 100.0, 12), year_of(2023, 101.0, 12)].concat();
		let table = PriceIndexTable::new(vec![flat("food", rates)]).unwrap();
		let engine = InflationEngine::new(&table);

		let result = engine.calculate(&Basket::new(), 2023).unwrap();
		assert!(result.personal_rate.is_nan());
	}

	#[test]
	fn test_json_keeps_infinity_and_nan_apart() {
		let rates = [year_of(2022, 0.0, 12), year_of(2023, 100.0, 12)].concat();
		let table = PriceIndexTable::new(vec![flat("food", rates)]).unwrap();
		let engine = InflationEngine::new(&table);

		let infinite = engine.calculate(&basket(&[("food", 1.0)]), 2023).unwrap();
		let undefined = engine.calculate(&Basket::new(), 2023).unwrap();

		let infinite = serde_json::to_string(&infinite).unwrap();
		let undefined = serde_json::to_string(&undefined).unwrap();
		assert_eq!(
			infinite,
			r#"{"personalRate":"inf","from":"2023-01","to":"2023-12","isComplete":true,"isLastComplete":true}"#
		);
		assert!(undefined.starts_with(r#"{"personalRate":"NaN","#));
		assert_ne!(infinite, undefined);
	}

	#[test]
	fn test_no_data_for_target_year() {
		let table =
			PriceIndexTable::new(vec![flat("food", year_of(2022, 100.0, 12))])
				.unwrap();
		let engine = InflationEngine::new(&table);

		let result = engine.calculate(&basket(&[("food", 1.0)]), 2023).unwrap();
		assert!(result.personal_rate.is_nan());
		assert!(!result.is_complete);
		assert_eq!(result.from.to_key(), "2023-01");
		assert_eq!(result.to.to_key(), "2023-12");
	}

	#[test]
	fn test_weights_matter() {
		// food doubles, housing stays flat
		let food = [year_of(2022, 100.0, 12), year_of(2023, 200.0, 12)].concat();
		let housing = [year_of(2022, 100.0, 12), year_of(2023, 100.0, 12)].concat();
		let table =
			PriceIndexTable::new(vec![flat("food", food), flat("housing", housing)])
				.unwrap();
		let engine = InflationEngine::new(&table);

		let heavy_food = engine
			.calculate(&basket(&[("food", 3.0), ("housing", 1.0)]), 2023)
			.unwrap();
		let light_food = engine
			.calculate(&basket(&[("food", 1.0), ("housing", 3.0)]), 2023)
			.unwrap();

		assert!((heavy_food.personal_rate - 75.0).abs() < 1e-9);
		assert!((light_food.personal_rate - 25.0).abs() < 1e-9);
	}

	#[test]
	fn test_range_uses_end_year() {
		let rates = [
			year_of(2021, 100.0, 12),
			year_of(2022, 100.0, 12),
			year_of(2023, 110.0, 12),
		]
		.concat();
		let table = PriceIndexTable::new(vec![flat("food", rates)]).unwrap();
		let engine = InflationEngine::new(&table);

		let range = TimeRange::new(
			TimePeriod::new(2021, 3).unwrap(),
			TimePeriod::new(2023, 2).unwrap(),
		)
		.unwrap();
		let by_range = engine.calculate_range(&basket(&[("food", 1.0)]), &range).unwrap();
		let by_year = engine.calculate(&basket(&[("food", 1.0)]), 2023).unwrap();
		assert_eq!(by_range, by_year);
	}
}
