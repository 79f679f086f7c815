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
use crate::config::config_file::ProfileConfig;
use crate::error::{InflationError, Result};
use std::collections::BTreeMap;

/// A named household with a preset basket.
#[derive(Clone, Debug, PartialEq)]
pub struct UserProfile {
	pub id: String,
	pub name: String,
	pub description: String,
	pub basket: Basket,
}

impl UserProfile {
	fn preset(
		id: &str,
		name: &str,
		description: &str,
		entries: &[(&str, f64)],
	) -> Result<Self> {
		let mut basket = Basket::new();
		for (category_id, amount) in entries {
			basket.push(category_id, *amount)?;
		}

		Ok(Self {
			id: id.to_string(),
			name: name.to_string(),
			description: description.to_string(),
			basket,
		})
	}
}

/// Lookup of profiles by id, in display order.
#[derive(Debug)]
pub struct ProfileRegistry {
	profiles: Vec<UserProfile>,
}

impl ProfileRegistry {
	/// The presets every installation starts with. `default` and `custom`
	/// have empty baskets; the former is meant to be replaced from config
	/// with the official basket weights.
	pub fn builtin() -> Result<Self> {
		let profiles = vec![
			UserProfile::preset(
				"default",
				"Standard basket",
				"Official weights used by the statistical office",
				&[],
			)?,
			UserProfile::preset(
				"student",
				"Student",
				"Rent, public transport and groceries",
				&[
					("housing_rent", 8000.0),
					("food", 6000.0),
					("transport", 2000.0),
				],
			)?,
			UserProfile::preset(
				"family",
				"Young family",
				"Housing, groceries and schooling for a family with children",
				&[("housing", 15000.0), ("food", 10000.0), ("education", 3000.0)],
			)?,
			UserProfile::preset(
				"senior",
				"Senior",
				"Energy, groceries and medication for a pensioner",
				&[("housing", 8000.0), ("food", 6000.0), ("health", 2000.0)],
			)?,
			UserProfile::preset(
				"custom",
				"Custom",
				"Build your own basket",
				&[],
			)?,
		];

		Ok(Self { profiles })
	}

	/// Built-ins overlaid with the profiles from config. A name or
	/// description the config leaves out is kept from the profile being
	/// replaced; a new profile is named after its id.
	pub fn with_config(configured: &[ProfileConfig]) -> Result<Self> {
		let mut registry = Self::builtin()?;
		for profile in configured {
			let replaced = registry.get(&profile.id);
			let name = match (&profile.name, replaced) {
				(Some(name), _) => name.clone(),
				(None, Some(existing)) => existing.name.clone(),
				(None, None) => profile.id.clone(),
			};
			let description = match (&profile.description, replaced) {
				(Some(description), _) => description.clone(),
				(None, Some(existing)) => existing.description.clone(),
				(None, None) => String::new(),
			};

			registry.insert(UserProfile {
				id: profile.id.clone(),
				name,
				description,
				basket: Basket::from_entries(profile.categories.clone())?,
			});
		}
		Ok(registry)
	}

	/// Adds a profile, replacing any existing one with the same id in place.
	pub fn insert(&mut self, profile: UserProfile) {
		match self.profiles.iter_mut().find(|p| p.id == profile.id) {
			Some(existing) => *existing = profile,
			None => self.profiles.push(profile),
		}
	}

	pub fn get(&self, id: &str) -> Option<&UserProfile> {
		self.profiles.iter().find(|p| p.id == id)
	}

	pub fn is_valid(&self, id: &str) -> bool {
		self.get(id).is_some()
	}

	/// Amount per category id; empty for an unknown profile.
	pub fn spending(&self, id: &str) -> BTreeMap<String, f64> {
		let mut spending = BTreeMap::new();
		if let Some(profile) = self.get(id) {
			for entry in profile.basket.entries() {
				spending.insert(entry.category_id.clone(), entry.amount);
			}
		}
		spending
	}

	pub fn basket(&self, id: &str) -> Result<&Basket> {
		self.get(id)
			.map(|p| &p.basket)
			.ok_or_else(|| InflationError::UnknownProfile { id: id.to_string() })
	}

	pub fn iter(&self) -> impl Iterator<Item = &UserProfile> {
		self.profiles.iter()
	}
}
