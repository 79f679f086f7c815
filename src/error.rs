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
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InflationError>;

/// Every failure the library can report. An incomplete baseline year is
/// reported as a NaN result instead.
#[derive(Debug, Error)]
pub enum InflationError {
	#[error("invalid argument: {message}")]
	InvalidArgument { message: String },

	#[error("unknown categories: {}", ids.join(", "))]
	UnknownCategory { ids: Vec<String> },

	#[error("unknown profile: {id}")]
	UnknownProfile { id: String },

	#[error("malformed dataset: {message}")]
	Dataset { message: String },

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("failed to parse config: {0}")]
	Toml(#[from] toml::de::Error),
}

impl InflationError {
	pub fn invalid(message: impl Into<String>) -> Self {
		Self::InvalidArgument {
			message: message.into(),
		}
	}

	pub fn dataset(message: impl Into<String>) -> Self {
		Self::Dataset {
			message: message.into(),
		}
	}

	pub fn unknown_category(id: impl Into<String>) -> Self {
		Self::UnknownCategory {
			ids: vec![id.into()],
		}
	}
}
