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
use std::fmt::Write;

/// Plain column-aligned table used by every report.
///
/// Widths are measured in characters rather than bytes, since category
/// names in the published datasets are not ASCII. Trailing whitespace is
/// trimmed from each rendered line.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	pub fn add_row(&mut self, row: Vec<String>) {
		self.rows.push(Row::Data(row));
	}

	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			self.right_align[col] = true;
		}
	}

	pub fn render(&self) -> String {
		let mut max_widths = vec![0; self.column_count];

		for row in &self.rows {
			if let Row::Data(data_row) | Row::Header(data_row) = row {
				for (i, value) in data_row.iter().enumerate() {
					max_widths[i] = max_widths[i].max(value.chars().count());
				}
			}
		}

		let mut out = String::new();
		for row in &self.rows {
			let line = match row {
				Row::Header(header_row) => {
					self.centered_row(&max_widths, header_row, " | ")
				},
				Row::Data(data_row) => self.data_row(&max_widths, data_row, "   "),
				Row::Separator => self.separator(&max_widths),
			};
			let _ = writeln!(out, "{}", line.trim_end());
		}
		out
	}

	fn data_row(
		&self,
		max_widths: &[usize],
		data_row: &[String],
		separator: &str,
	) -> String {
		let mut line = String::new();
		for (i, value) in data_row.iter().enumerate() {
			if self.right_align[i] {
				let _ = write!(line, "{:>width$}", value, width = max_widths[i]);
			} else {
				let _ = write!(line, "{:<width$}", value, width = max_widths[i]);
			}
			if i < data_row.len() - 1 {
				line.push_str(separator);
			}
		}
		line
	}

	fn centered_row(
		&self,
		max_widths: &[usize],
		data_row: &[String],
		separator: &str,
	) -> String {
		let cells: Vec<String> = data_row
			.iter()
			.enumerate()
			.map(|(i, value)| Table::center_align(value, max_widths[i]))
			.collect();
		cells.join(separator)
	}

	fn separator(&self, max_widths: &[usize]) -> String {
		let total_width: usize =
			max_widths.iter().sum::<usize>() + (3 * (self.column_count - 1));
		"-".repeat(total_width)
	}

	fn center_align(value: &str, width: usize) -> String {
		let len = value.chars().count();
		if len >= width {
			return value.to_string();
		}
		let total_padding = width - len;
		let left_padding = total_padding / 2;
		let right_padding = total_padding - left_padding;

		format!(
			"{}{}{}",
			" ".repeat(left_padding),
			value,
			" ".repeat(right_padding)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_alignment() {
		let mut table = Table::new(2);
		table.add_header(vec!["Id", "Amount"]);
		table.add_separator();
		table.add_row(vec!["food".to_string(), "6000".to_string()]);
		table.add_row(vec!["transport".to_string(), "20".to_string()]);
		table.right_align(vec![1]);

		let expected = "   Id     | Amount\n\
		                ------------------\n\
		                food          6000\n\
		                transport       20\n";
		assert_eq!(table.render(), expected);
	}

	#[test]
	fn test_width_counts_characters() {
		let mut table = Table::new(2);
		table.add_row(vec!["Jídlo".to_string(), "1".to_string()]);
		table.add_row(vec!["Food".to_string(), "2".to_string()]);

		assert_eq!(table.render(), "Jídlo   1\nFood    2\n");
	}
}
