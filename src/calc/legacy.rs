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

//! The weighted-average gauge that predates the year-over-year engine.
//!
//! It is not an inflation rate in the same sense as
//! [`InflationEngine`](crate::calc::engine::InflationEngine): it averages
//! the raw index levels of the range's final year, weighted by spend, and
//! folds the result into `[0, 10)`. Nothing selects it implicitly.

use crate::calc::basket::Basket;
use crate::error::{InflationError, Result};
use crate::index::table::PriceIndexTable;
use crate::util::nonfinite;
use crate::util::period::{TimePeriod, TimeRange};
use serde::Serialize;
use tracing::warn;

/// Upper bound of the gauge; sums wrap around it.
const GAUGE_MODULUS: f64 = 10.0;

/// One basket line's share of the gauge.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
	pub category_id: String,
	#[serde(serialize_with = "nonfinite::serialize")]
	pub weight: f64,
	#[serde(serialize_with = "nonfinite::serialize")]
	pub rate: f64,
	#[serde(serialize_with = "nonfinite::serialize")]
	pub contribution: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyResult {
	#[serde(serialize_with = "nonfinite::serialize")]
	pub personal_rate: f64,
	pub breakdown: Vec<Contribution>,
	pub period: TimePeriod,
}

/// Weights each category's yearly average index at `range.to`'s year by its
/// share of the basket total. The start of the range is not consulted.
#[deprecated(note = "use InflationEngine::calculate for personal inflation")]
pub fn weighted_average(
	table: &PriceIndexTable,
	basket: &Basket,
	range: &TimeRange,
) -> Result<LegacyResult> {
	if basket.is_empty() {
		return Ok(LegacyResult {
			personal_rate: 0.0,
			breakdown: vec![],
			period: range.to,
		});
	}

	let unknown = basket.unknown_ids(table);
	if !unknown.is_empty() {
		warn!(ids = ?unknown, "basket references unknown categories");
		return Err(InflationError::UnknownCategory { ids: unknown });
	}

	let total = basket.total();
	let year = range.to.year();

	let mut breakdown = Vec::with_capacity(basket.len());
	for entry in basket.entries() {
		let weight = entry.amount / total;
		let rate = table.yearly_average(&entry.category_id, year)?;
		breakdown.push(Contribution {
			category_id: entry.category_id.clone(),
			weight,
			rate,
			contribution: weight * rate,
		});
	}

	let sum: f64 = breakdown.iter().map(|c| c.contribution).sum();

	Ok(LegacyResult {
		personal_rate: sum % GAUGE_MODULUS,
		breakdown,
		period: range.to,
	})
}
