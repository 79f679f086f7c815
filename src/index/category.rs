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
use crate::util::period::TimePeriod;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Formatter;

/// What a spending category is, independent of any price data.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct CategoryDefinition {
	pub id: String,
	pub name: String,
	pub description: String,
}

impl CategoryDefinition {
	pub fn new(id: &str, name: &str, description: &str) -> Self {
		Self {
			id: id.to_string(),
			name: name.to_string(),
			description: description.to_string(),
		}
	}
}

impl std::fmt::Display for CategoryDefinition {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} ({})", self.name, self.id)
	}
}

/// A category together with its monthly price-index series.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryInflationData {
	definition: CategoryDefinition,

	/// Index value per month; keys are unique after normalization
	rates: BTreeMap<TimePeriod, f64>,
}

impl CategoryInflationData {
	pub fn new(
		definition: CategoryDefinition,
		rates: BTreeMap<TimePeriod, f64>,
	) -> Self {
		Self { definition, rates }
	}

	pub fn id(&self) -> &str {
		&self.definition.id
	}

	pub fn definition(&self) -> &CategoryDefinition {
		&self.definition
	}

	pub fn rates(&self) -> &BTreeMap<TimePeriod, f64> {
		&self.rates
	}

	pub fn rate(&self, period: &TimePeriod) -> Option<f64> {
		self.rates.get(period).copied()
	}

	/// Rates falling within the given calendar year, in month order.
	pub fn rates_in_year(
		&self,
		year: i32,
	) -> impl Iterator<Item = (&TimePeriod, &f64)> {
		self.rates
			.range(TimePeriod::year_start(year)..=TimePeriod::year_end(year))
	}
}
