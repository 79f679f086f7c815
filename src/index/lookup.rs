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
use crate::util::period::TimePeriod;

/// The outcome of asking the table for one index value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RateLookup {
	/// The category has an observation for the period
	Present(f64),
	/// The category exists but has no observation for the period
	AbsentKey,
	/// The table has never heard of the category
	UnknownCategory,
}

/// How a caller wants a non-present lookup collapsed into a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingRate {
	/// Treat missing data as an index of zero
	Zero,
	/// Poison the arithmetic so the result is visibly unusable
	NaN,
	/// Refuse to produce a number at all
	Fail,
}

impl RateLookup {
	pub fn value(&self) -> Option<f64> {
		match self {
			RateLookup::Present(v) => Some(*v),
			_ => None,
		}
	}

	/// Collapses the outcome using the given policy. The id and period are
	/// only used to build the error message.
	pub fn resolve(
		self,
		category_id: &str,
		period: &TimePeriod,
		policy: MissingRate,
	) -> Result<f64> {
		match (self, policy) {
			(RateLookup::Present(v), _) => Ok(v),
			(_, MissingRate::Zero) => Ok(0.0),
			(_, MissingRate::NaN) => Ok(f64::NAN),
			(RateLookup::UnknownCategory, MissingRate::Fail) => {
				Err(InflationError::unknown_category(category_id))
			},
			(RateLookup::AbsentKey, MissingRate::Fail) => {
				Err(InflationError::dataset(format!(
					"category {} has no rate for {}",
					category_id, period
				)))
			},
		}
	}
}
