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
use crate::calc::engine::InflationResult;
use crate::calc::legacy::LegacyResult;
use crate::index::table::PriceIndexTable;
use crate::reports::table::Table;

/// Percentages that may be NaN or infinite.
pub fn format_rate(rate: f64) -> String {
	if rate.is_nan() {
		"n/a".to_string()
	} else if rate.is_infinite() {
		if rate > 0.0 { "inf" } else { "-inf" }.to_string()
	} else {
		format!("{:.2}%", rate)
	}
}

fn yes_no(flag: bool) -> String {
	if flag { "yes" } else { "no" }.to_string()
}

/// Text rendering of a year-over-year result and the basket behind it.
pub struct ResultReporter<'a> {
	result: &'a InflationResult,
	basket: &'a Basket,
	table: &'a PriceIndexTable,
}

impl<'a> ResultReporter<'a> {
	pub fn new(
		result: &'a InflationResult,
		basket: &'a Basket,
		table: &'a PriceIndexTable,
	) -> Self {
		Self {
			result,
			basket,
			table,
		}
	}

	pub fn render(&self) -> String {
		let mut summary = Table::new(2);
		summary.add_row(vec![
			"Period".to_string(),
			format!("{}..{}", self.result.from, self.result.to),
		]);
		summary.add_row(vec![
			"Personal rate".to_string(),
			format_rate(self.result.personal_rate),
		]);
		summary.add_row(vec![
			"Complete year".to_string(),
			yes_no(self.result.is_complete),
		]);
		summary.add_row(vec![
			"Latest complete".to_string(),
			yes_no(self.result.is_last_complete),
		]);

		let mut out = summary.render();
		if self.basket.is_empty() {
			return out;
		}

		let total = self.basket.total();
		let mut lines = Table::new(4);
		lines.add_header(vec!["Category", "Name", "Amount", "Share"]);
		lines.add_separator();
		for entry in self.basket.entries() {
			let name = self
				.table
				.definition(&entry.category_id)
				.map(|d| d.name.clone())
				.unwrap_or_default();
			lines.add_row(vec![
				entry.category_id.clone(),
				name,
				format!("{:.2}", entry.amount),
				format_rate(entry.amount / total * 100.0),
			]);
		}
		lines.right_align(vec![2, 3]);

		out.push('\n');
		out.push_str(&lines.render());
		out
	}

	pub fn print(&self) {
		print!("{}", self.render());
	}
}

/// Text rendering of the weighted-average gauge.
pub struct LegacyReporter<'a> {
	result: &'a LegacyResult,
}

impl<'a> LegacyReporter<'a> {
	pub fn new(result: &'a LegacyResult) -> Self {
		Self { result }
	}

	pub fn render(&self) -> String {
		let mut summary = Table::new(2);
		summary.add_row(vec!["Period".to_string(), self.result.period.to_string()]);
		summary.add_row(vec![
			"Weighted gauge".to_string(),
			format_gauge(self.result.personal_rate),
		]);

		let mut out = summary.render();
		if self.result.breakdown.is_empty() {
			return out;
		}

		let mut lines = Table::new(4);
		lines.add_header(vec!["Category", "Weight", "Avg index", "Contribution"]);
		lines.add_separator();
		for c in &self.result.breakdown {
			lines.add_row(vec![
				c.category_id.clone(),
				format!("{:.4}", c.weight),
				format!("{:.2}", c.rate),
				format!("{:.4}", c.contribution),
			]);
		}
		lines.right_align(vec![1, 2, 3]);

		out.push('\n');
		out.push_str(&lines.render());
		out
	}

	pub fn print(&self) {
		print!("{}", self.render());
	}
}

fn format_gauge(value: f64) -> String {
	if value.is_nan() {
		"n/a".to_string()
	} else {
		format!("{:.2}", value)
	}
}
