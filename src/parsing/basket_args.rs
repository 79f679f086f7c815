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
use regex::Regex;

/// Parses `category=amount` pairs given on the command line.
pub struct BasketArgParser {
	pair_regex: Regex,
}

impl BasketArgParser {
	pub fn new() -> Self {
		let re = Regex::new(r"^\s*([A-Za-z0-9_\-]+)\s*=\s*([0-9]+(?:\.[0-9]+)?)\s*$")
			.expect("basket pair pattern is valid");
		Self { pair_regex: re }
	}

	pub fn parse_pair(&self, pair: &str) -> Result<(String, f64)> {
		let caps = self.pair_regex.captures(pair).ok_or_else(|| {
			InflationError::invalid(format!(
				"expected category=amount, got '{}'",
				pair
			))
		})?;

		let amount = caps[2].parse::<f64>().map_err(|_| {
			InflationError::invalid(format!("bad amount in '{}'", pair))
		})?;

		Ok((caps[1].to_string(), amount))
	}

	/// Adds every pair to the basket, in order.
	pub fn extend(&self, basket: &mut Basket, pairs: &[String]) -> Result<()> {
		for pair in pairs {
			let (category_id, amount) = self.parse_pair(pair)?;
			basket.push(&category_id, amount)?;
		}
		Ok(())
	}
}

impl Default for BasketArgParser {
	fn default() -> Self {
		Self::new()
	}
}
