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
use crate::error::Result;
use crate::parsing::dataset::Dataset;
use crate::profile::registry::ProfileRegistry;
use crate::reports::table::Table;
use crate::util::period::TimeRange;

/// Reports describing the dataset itself rather than any basket.
pub struct DatasetReporter<'a> {
	dataset: &'a Dataset,
}

impl<'a> DatasetReporter<'a> {
	pub fn new(dataset: &'a Dataset) -> Self {
		Self { dataset }
	}

	pub fn categories(&self) -> String {
		let mut table = Table::new(3);
		table.add_header(vec!["Id", "Name", "Description"]);
		table.add_separator();
		for definition in self.dataset.table.definitions() {
			table.add_row(vec![
				definition.id.clone(),
				definition.name.clone(),
				definition.description.clone(),
			]);
		}
		table.render()
	}

	/// The index series of one category, then its yearly averages. Only
	/// months inside `range` are shown when one is given.
	pub fn series(&self, category_id: &str, range: Option<&TimeRange>) -> Result<String> {
		let table = &self.dataset.table;
		let rates = table.rates_for(category_id)?;

		let mut months = Table::new(2);
		months.add_header(vec!["Period", "Index"]);
		months.add_separator();

		let mut years = Vec::new();
		for (period, rate) in rates {
			if range.is_some_and(|r| !r.contains(period)) {
				continue;
			}
			months.add_row(vec![period.to_string(), format!("{:.2}", rate)]);
			if years.last() != Some(&period.year()) {
				years.push(period.year());
			}
		}
		months.right_align(vec![1]);

		let mut averages = Table::new(2);
		averages.add_header(vec!["Year", "Average"]);
		averages.add_separator();
		for year in years {
			averages.add_row(vec![
				year.to_string(),
				format!("{:.2}", table.yearly_average(category_id, year)?),
			]);
		}
		averages.right_align(vec![1]);

		Ok(format!("{}\n{}", months.render(), averages.render()))
	}

	/// Calendar extent and completeness per year.
	pub fn coverage(&self) -> String {
		let table = &self.dataset.table;

		let mut summary = Table::new(2);
		summary.add_row(vec!["Categories".to_string(), table.len().to_string()]);
		if let Some((first, last)) = table.bounds() {
			summary.add_row(vec!["First period".to_string(), first.to_string()]);
			summary.add_row(vec!["Last period".to_string(), last.to_string()]);
		}
		if let Some(year) = table.last_complete_year() {
			summary.add_row(vec!["Last complete".to_string(), year.to_string()]);
		}
		if let Some(fetched) = self.dataset.metadata.fetched_at() {
			summary.add_row(vec![
				"Fetched".to_string(),
				fetched.format("%Y-%m-%d %H:%M").to_string(),
			]);
		}

		let mut years = Table::new(3);
		years.add_header(vec!["Year", "Months", "Complete"]);
		years.add_separator();
		for year in table.years() {
			let months = table.calendar_year(year).len();
			years.add_row(vec![
				year.to_string(),
				months.to_string(),
				if months == 12 { "yes" } else { "no" }.to_string(),
			]);
		}
		years.right_align(vec![1]);

		format!("{}\n{}", summary.render(), years.render())
	}

	pub fn profiles(registry: &ProfileRegistry) -> String {
		let mut table = Table::new(4);
		table.add_header(vec!["Id", "Name", "Total", "Categories"]);
		table.add_separator();
		for profile in registry.iter() {
			let ids: Vec<&str> = profile
				.basket
				.entries()
				.iter()
				.map(|e| e.category_id.as_str())
				.collect();
			table.add_row(vec![
				profile.id.clone(),
				profile.name.clone(),
				format!("{:.2}", profile.basket.total()),
				ids.join(", "),
			]);
		}
		table.right_align(vec![2]);
		table.render()
	}
}
