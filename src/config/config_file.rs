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
use crate::calc::basket::SpendingCategory;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	/// Dataset to load when none is given on the command line
	pub dataset: Option<String>,

	/// Year to calculate for when none is given; otherwise the dataset's
	/// last complete year is used
	pub default_year: Option<i32>,

	#[serde(default)]
	pub profiles: Vec<ProfileConfig>,
}

/// A user-defined basket. Replaces a built-in profile with the same id.
#[derive(Debug, Deserialize)]
pub struct ProfileConfig {
	pub id: String,
	pub name: Option<String>,
	pub description: Option<String>,

	#[serde(default)]
	pub categories: Vec<SpendingCategory>,
}
