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
use crate::calc::basket::{Basket, SpendingCategory};
use crate::config::config_file::Config;
use crate::error::Result;
use crate::parsing::dataset::Dataset;
use dirs::home_dir;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything that touches the disk goes through here.
pub struct Filesystem {
	/// Where the config lives when no path is given explicitly
	default_config: Option<PathBuf>,
}

impl Filesystem {
	pub fn new() -> Self {
		Self {
			default_config: home_dir().map(|h| h.join(".config/infla/config.toml")),
		}
	}

	/// Fetches the config from the given path, or the default path if none.
	/// An explicit path must exist; a missing default file is an empty
	/// config.
	pub fn get_config(&self, custom_config_path: Option<&String>) -> Result<Config> {
		let config_path = match custom_config_path {
			Some(p) => PathBuf::from(p),
			None => match &self.default_config {
				Some(p) if p.exists() => p.clone(),
				_ => {
					debug!("no config file, using defaults");
					return Ok(Config::default());
				},
			},
		};

		let content = fs::read_to_string(&config_path)?;
		let config: Config = toml::from_str(&content)?;

		info!(path = %config_path.display(), "loaded config");
		Ok(config)
	}

	pub fn load_dataset(&self, path: &Path) -> Result<Dataset> {
		let content = fs::read_to_string(path)?;
		let dataset = Dataset::from_json(&content)?;

		info!(
			path = %path.display(),
			categories = dataset.table.len(),
			"loaded dataset"
		);
		Ok(dataset)
	}

	/// Reads a basket saved as a JSON list of `{categoryId, amount}`.
	pub fn load_basket(&self, path: &Path) -> Result<Basket> {
		let content = fs::read_to_string(path)?;
		let entries: Vec<SpendingCategory> = serde_json::from_str(&content)?;
		Basket::from_entries(entries)
	}
}

impl Default for Filesystem {
	fn default() -> Self {
		Self::new()
	}
}
